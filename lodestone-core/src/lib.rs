//! Board-agnostic native binding bridge for Lodestone
//!
//! Scripts run in an external, sandboxed engine. This crate is the layer
//! the engine calls into when a script touches bytes or hardware:
//!
//! - Engine boundary (`Value`, `Engine` trait, native function table)
//! - Byte transcoding (base64, Latin-1 <-> UTF-8)
//! - `Buffer` model and range fill over typed views
//! - Structured value marshalling
//! - File path argument resolution over the two storage backends
//! - GPIO, PWM, analog, touch, DAC and infrared natives
//! - Uncaught exception reporting
//!
//! Nothing here retains an engine value past the native call it was
//! handed to; bytes that must outlive a call are copied into native memory.

#![no_std]
#![deny(unsafe_code)]

extern crate alloc;

#[macro_use]
mod fmt;

pub mod bridge;
pub mod buffer;
pub mod config;
pub mod engine;
pub mod error;
pub mod fault;
pub mod fill;
pub mod lazy;
pub mod locator;
pub mod marshal;
pub mod transcode;
pub mod value;

pub use bridge::{natives, Context, Native, NativeFn, NativeResult};
pub use config::BridgeConfig;
pub use engine::Engine;
pub use error::{BridgeError, ErrorKind, SCRIPT_EXIT_MESSAGE};
pub use fault::{Exception, FaultReporter, Outcome};
pub use lazy::{BridgeState, LazyInit};
pub use locator::{resolve_path, FileLocation, LocateOptions};
pub use marshal::{from_dynamic_value, to_dynamic_value, Tree, TreeMap};
pub use value::{ElementType, ObjectClass, ObjectRef, Value, ViewKind};
