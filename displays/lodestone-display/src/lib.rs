//! Display abstraction traits and shared components for Lodestone
//!
//! This crate provides:
//! - `DisplayBackend` trait for the text surface diagnostics are drawn on
//! - `TextStyle` for the two text styles the firmware uses (title, body)
//! - `Screen`, a word-wrapping character buffer rendered to any backend
//!
//! # Architecture
//!
//! The fault reporter composes a diagnostic into a `Screen` first and only
//! then renders it, so a failing backend never leaves a half-built message
//! in native memory and the same text can be mirrored to the serial log.

#![no_std]
#![deny(unsafe_code)]

pub mod backend;
pub mod screen;

// Re-export key types
pub use backend::{DisplayBackend, DisplayError, TextStyle};
pub use screen::{Screen, LINE_LEN, SCREEN_COLS, SCREEN_ROWS};
