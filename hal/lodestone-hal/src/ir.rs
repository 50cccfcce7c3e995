//! Infrared transmit and receive abstractions

use core::fmt::Write;

/// How captured signals are rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CaptureMode {
    /// Protocol-decoded signal (protocol, address, command)
    Decoded,
    /// Raw mark/space timings
    Raw,
}

/// Infrared transceiver
///
/// Capture is non-blocking: the bridge owns the polling loop and its
/// timeout, the transceiver only reports whether a signal has arrived.
pub trait Infrared {
    /// Transmit the contents of a signal file already read into memory
    fn transmit_buffer(&mut self, data: &[u8], hide_ui: bool) -> bool;

    /// Transmit a single code with the given protocol
    fn transmit_code(&mut self, protocol: &str, data: &str, bits: i32) -> bool;

    /// Arm the receiver
    fn begin_capture(&mut self, mode: CaptureMode);

    /// Check for a captured signal
    ///
    /// When a signal is available it is written to `out` in the signal
    /// file text format and `true` is returned.
    fn poll_capture(&mut self, out: &mut dyn Write) -> bool;

    /// Disarm the receiver
    fn end_capture(&mut self);
}
