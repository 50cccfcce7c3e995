//! Board trait implementations over `embedded-hal` and `embedded-io`
//!
//! A board support package builds its [`lodestone_hal::Board`] out of
//! these adapters plus whatever vendor drivers it needs:
//!
//! - Numbered pin bank over individual digital pins
//! - Active-low button set for the fault acknowledgment prompt
//! - Millisecond clock over a blocking delay
//! - Text sink over a byte-oriented serial port

#![no_std]
#![deny(unsafe_code)]

pub mod clock;
pub mod keys;
pub mod pins;
pub mod serial;

pub use clock::DelayClock;
pub use keys::{ButtonKeys, KeyPolarity};
pub use pins::PinBank;
pub use serial::TextSink;
