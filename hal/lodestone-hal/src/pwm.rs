//! PWM channel abstractions
//!
//! Mirrors an LEDC-style peripheral where channels are attached to pins.
//! Every operation reports success as a boolean: a rejected write is a
//! normal outcome the script may retry, not a fault.

use crate::gpio::PinNumber;

/// LEDC-style PWM controller
pub trait Pwm {
    /// Attach a PWM channel to a pin
    fn attach(&mut self, pin: PinNumber, freq_hz: i32, resolution_bits: i32) -> bool;

    /// Set the duty cycle of an attached pin
    fn write(&mut self, pin: PinNumber, duty: i32) -> bool;

    /// Output a 50% duty square wave at the given frequency
    fn write_tone(&mut self, pin: PinNumber, freq_hz: i32) -> bool;

    /// Hardware fade between two duty values
    fn fade(&mut self, pin: PinNumber, start_duty: i32, target_duty: i32, fade_ms: i32) -> bool;

    /// Change frequency and resolution of an attached pin
    fn change_frequency(&mut self, pin: PinNumber, freq_hz: i32, resolution_bits: i32) -> bool;

    /// Release the channel attached to a pin
    fn detach(&mut self, pin: PinNumber) -> bool;
}
