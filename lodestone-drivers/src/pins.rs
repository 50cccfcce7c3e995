//! Numbered pin bank
//!
//! Scripts address pins by number while `embedded-hal` hands out one typed
//! object per pin. The bank owns up to `N` of them and routes each call by
//! number. Numbers the bank does not own are ignored and read low.
//!
//! Pull resistors and drive strength belong to the pin's own configuration;
//! the bank only tracks whether a pin is currently an input or an output.

use embedded_hal::digital::{InputPin, OutputPin, PinState, StatefulOutputPin};
use heapless::Vec;
use lodestone_hal::{Gpio, PinMode, PinNumber};

struct Slot<P> {
    number: PinNumber,
    pin: P,
    mode: PinMode,
}

/// Up to `N` flexible pins addressed by number
pub struct PinBank<P, const N: usize> {
    slots: Vec<Slot<P>, N>,
    faults: u32,
}

impl<P, const N: usize> Default for PinBank<P, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P, const N: usize> PinBank<P, N> {
    pub const fn new() -> Self {
        Self {
            slots: Vec::new(),
            faults: 0,
        }
    }

    /// Hand a pin to the bank under `number`
    ///
    /// Gives the pin back if the number is taken or the bank is full.
    pub fn add(&mut self, number: PinNumber, pin: P) -> Result<(), P> {
        if self.slots.iter().any(|s| s.number == number) {
            return Err(pin);
        }
        self.slots
            .push(Slot {
                number,
                pin,
                mode: PinMode::Input,
            })
            .map_err(|slot| slot.pin)
    }

    /// Current mode of an owned pin
    pub fn mode(&self, number: PinNumber) -> Option<PinMode> {
        self.slots.iter().find(|s| s.number == number).map(|s| s.mode)
    }

    /// Pin operations that returned an error
    pub fn faults(&self) -> u32 {
        self.faults
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    fn slot_mut(&mut self, number: PinNumber) -> Option<&mut Slot<P>> {
        self.slots.iter_mut().find(|s| s.number == number)
    }
}

impl<P, const N: usize> Gpio for PinBank<P, N>
where
    P: InputPin + StatefulOutputPin,
{
    fn pin_mode(&mut self, pin: PinNumber, mode: PinMode) {
        if let Some(slot) = self.slot_mut(pin) {
            slot.mode = mode;
        }
    }

    fn digital_write(&mut self, pin: PinNumber, high: bool) {
        let Some(slot) = self.slot_mut(pin) else {
            return;
        };
        // Writes to an input are dropped
        if !slot.mode.is_output() {
            return;
        }
        if slot.pin.set_state(PinState::from(high)).is_err() {
            self.faults += 1;
        }
    }

    fn digital_read(&mut self, pin: PinNumber) -> bool {
        let Some(slot) = self.slot_mut(pin) else {
            return false;
        };
        let level = if slot.mode.is_output() {
            slot.pin.is_set_high()
        } else {
            slot.pin.is_high()
        };
        match level {
            Ok(high) => high,
            Err(_) => {
                self.faults += 1;
                false
            }
        }
    }
}
