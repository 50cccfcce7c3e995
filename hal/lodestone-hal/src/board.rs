//! Board aggregate
//!
//! Everything the bridge may touch on one board, handed over as a single
//! object for the duration of a native call.

use core::fmt::Write;

use crate::analog::{Analog, Dac, TouchSensor};
use crate::clock::Clock;
use crate::gpio::Gpio;
use crate::ir::Infrared;
use crate::pwm::Pwm;
use crate::storage::Volumes;

/// Board capabilities
///
/// Optional peripherals default to absent. A board with a capacitive
/// touch sensor or a DAC overrides [`Board::touch`] / [`Board::dac`].
pub trait Board {
    /// Storage backend pair
    type Volumes: Volumes;

    /// Digital pins
    fn gpio(&mut self) -> &mut dyn Gpio;

    /// ADC and analog write
    fn analog(&mut self) -> &mut dyn Analog;

    /// PWM channels
    fn pwm(&mut self) -> &mut dyn Pwm;

    /// Capacitive touch, if the chip has it
    fn touch(&mut self) -> Option<&mut dyn TouchSensor> {
        None
    }

    /// DAC, if the chip has it
    fn dac(&mut self) -> Option<&mut dyn Dac> {
        None
    }

    /// Infrared transceiver
    fn infrared(&mut self) -> &mut dyn Infrared;

    /// Storage backends
    fn volumes(&mut self) -> &mut Self::Volumes;

    /// Time source
    fn clock(&mut self) -> &mut dyn Clock;

    /// Text output on the display (script `print`)
    fn display_text(&mut self) -> &mut dyn Write;

    /// Text output on the serial transport
    fn serial_text(&mut self) -> &mut dyn Write;
}
