//! Lodestone Hardware Abstraction Layer
//!
//! This crate defines the narrow capability calls the script bridge is
//! allowed to make on a board. Register-level peripheral protocols stay
//! behind these traits; a board crate implements them for real hardware
//! and tests implement them with mocks.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Script engine (opaque, owns values)    │
//! └─────────────────────────────────────────┘
//!                     │ native calls
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  lodestone-core (bridge, buffer, fill)  │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  lodestone-hal (this crate - traits)    │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │ lodestone-    │       │ board support │
//! │   drivers     │       │    crates     │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::Gpio`] - Digital I/O addressed by pin number
//! - [`analog::Analog`], [`analog::TouchSensor`], [`analog::Dac`] - Analog I/O
//! - [`pwm::Pwm`] - LEDC-style PWM channels
//! - [`ir::Infrared`] - Infrared transmit and capture
//! - [`storage::Volumes`] - The two storage backends
//! - [`clock::Clock`] - Monotonic time and blocking delays
//! - [`input::AnyKey`] - "Press any key" acknowledgment input
//! - [`board::Board`] - Aggregate handed to the bridge

#![no_std]
#![deny(unsafe_code)]

pub mod analog;
pub mod board;
pub mod clock;
pub mod gpio;
pub mod input;
pub mod ir;
pub mod pwm;
pub mod storage;

// Re-export key traits at crate root for convenience
pub use analog::{Analog, Dac, TouchSensor};
pub use board::Board;
pub use clock::Clock;
pub use gpio::{Gpio, PinMode, PinNumber};
pub use input::AnyKey;
pub use ir::{CaptureMode, Infrared};
pub use pwm::Pwm;
pub use storage::{Backend, FsError, OpenMode, Volumes};
