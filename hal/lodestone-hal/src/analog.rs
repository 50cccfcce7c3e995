//! Analog I/O abstractions
//!
//! ADC reads, PWM-backed analog writes, and the optional capacitive touch
//! and DAC peripherals. Touch and DAC are separate traits because not every
//! chip has them; a board reports their absence through [`crate::Board`].

use crate::gpio::PinNumber;

/// ADC and analog-write operations
pub trait Analog {
    /// One-time ADC setup (attenuation, input mode)
    ///
    /// Called lazily before the first read. Must be idempotent.
    fn configure_adc(&mut self);

    /// Read the raw ADC value of a pin
    fn analog_read(&mut self, pin: PinNumber) -> i32;

    /// Write an analog (PWM duty) value
    fn analog_write(&mut self, pin: PinNumber, value: i32);

    /// Set the resolution in bits used by [`Analog::analog_write`]
    fn analog_write_resolution(&mut self, pin: PinNumber, bits: i32);

    /// Set the PWM frequency used by [`Analog::analog_write`]
    fn analog_write_frequency(&mut self, pin: PinNumber, hz: i32);
}

/// Capacitive touch sensing
pub trait TouchSensor {
    /// Read the touch sensor value of a pin
    fn touch_read(&mut self, pin: PinNumber) -> i32;
}

/// Digital-to-analog converter
pub trait Dac {
    /// Write an 8-bit value to a DAC pin
    fn dac_write(&mut self, pin: PinNumber, value: i32);
}
