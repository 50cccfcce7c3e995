//! GPIO abstractions
//!
//! Scripts address pins by number, so the bridge talks to a whole bank
//! of pins rather than to individual typed pin objects.

/// Raw pin number as supplied by a script
///
/// No range validation happens above this trait; implementations must
/// ignore or reject pins they do not own.
pub type PinNumber = i32;

/// Numeric mode codes accepted from scripts
pub mod mode_code {
    pub const INPUT: i32 = 0x01;
    pub const OUTPUT: i32 = 0x03;
    pub const PULLUP: i32 = 0x04;
    pub const INPUT_PULLUP: i32 = 0x05;
    pub const PULLDOWN: i32 = 0x08;
    pub const INPUT_PULLDOWN: i32 = 0x09;
    pub const OPEN_DRAIN: i32 = 0x10;
    pub const OUTPUT_OPEN_DRAIN: i32 = 0x13;
    pub const ANALOG: i32 = 0xC0;
}

/// Pin direction and pull configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinMode {
    /// Floating input
    #[default]
    Input,
    /// Input with internal pull-up
    InputPullUp,
    /// Input with internal pull-down
    InputPullDown,
    /// Push-pull output
    Output,
    /// Open-drain output
    OutputOpenDrain,
    /// Analog input, digital buffer disabled
    Analog,
}

impl PinMode {
    /// Decode a numeric mode code
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            mode_code::INPUT => Some(PinMode::Input),
            // A bare pull flag leaves the pin an input
            mode_code::PULLUP | mode_code::INPUT_PULLUP => Some(PinMode::InputPullUp),
            mode_code::PULLDOWN | mode_code::INPUT_PULLDOWN => Some(PinMode::InputPullDown),
            mode_code::OUTPUT => Some(PinMode::Output),
            mode_code::OPEN_DRAIN | mode_code::OUTPUT_OPEN_DRAIN => Some(PinMode::OutputOpenDrain),
            mode_code::ANALOG => Some(PinMode::Analog),
            _ => None,
        }
    }

    /// Numeric code for this mode
    pub fn code(self) -> i32 {
        match self {
            PinMode::Input => mode_code::INPUT,
            PinMode::InputPullUp => mode_code::INPUT_PULLUP,
            PinMode::InputPullDown => mode_code::INPUT_PULLDOWN,
            PinMode::Output => mode_code::OUTPUT,
            PinMode::OutputOpenDrain => mode_code::OUTPUT_OPEN_DRAIN,
            PinMode::Analog => mode_code::ANALOG,
        }
    }

    /// Check if this mode drives the pin
    pub fn is_output(self) -> bool {
        matches!(self, PinMode::Output | PinMode::OutputOpenDrain)
    }
}

/// Bank of digital pins addressed by number
pub trait Gpio {
    /// Configure a pin's direction and pull
    fn pin_mode(&mut self, pin: PinNumber, mode: PinMode);

    /// Drive an output pin high or low
    fn digital_write(&mut self, pin: PinNumber, high: bool);

    /// Read the logic level of a pin
    fn digital_read(&mut self, pin: PinNumber) -> bool;
}

impl<T: Gpio + ?Sized> Gpio for &mut T {
    fn pin_mode(&mut self, pin: PinNumber, mode: PinMode) {
        (**self).pin_mode(pin, mode)
    }

    fn digital_write(&mut self, pin: PinNumber, high: bool) {
        (**self).digital_write(pin, high)
    }

    fn digital_read(&mut self, pin: PinNumber) -> bool {
        (**self).digital_read(pin)
    }
}
