//! Button set used as the "any key" input
//!
//! A key that is already held when the set is started must be released
//! before it counts as a press, so a finger still on a button from the
//! script's own UI does not dismiss a fault report.

use embedded_hal::digital::InputPin;
use heapless::Vec;
use lodestone_hal::AnyKey;

/// Electrical level of a pressed key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum KeyPolarity {
    /// Pressed pulls the line low (button to ground, pull-up enabled)
    #[default]
    ActiveLow,
    ActiveHigh,
}

struct Key<P> {
    pin: P,
    /// Held at `begin` and not yet released
    latched: bool,
}

/// Up to `N` buttons, any of which acknowledges
pub struct ButtonKeys<P, const N: usize> {
    keys: Vec<Key<P>, N>,
    polarity: KeyPolarity,
}

impl<P: InputPin, const N: usize> ButtonKeys<P, N> {
    pub const fn new(polarity: KeyPolarity) -> Self {
        Self {
            keys: Vec::new(),
            polarity,
        }
    }

    /// Add a button; gives it back if the set is full
    pub fn add(&mut self, pin: P) -> Result<(), P> {
        self.keys.push(Key { pin, latched: false }).map_err(|key| key.pin)
    }

    fn is_pressed(pin: &mut P, polarity: KeyPolarity) -> bool {
        let level = match polarity {
            KeyPolarity::ActiveLow => pin.is_low(),
            KeyPolarity::ActiveHigh => pin.is_high(),
        };
        // An unreadable button never acknowledges
        level.unwrap_or(false)
    }
}

impl<P: InputPin, const N: usize> AnyKey for ButtonKeys<P, N> {
    fn begin(&mut self) {
        let polarity = self.polarity;
        for key in self.keys.iter_mut() {
            key.latched = Self::is_pressed(&mut key.pin, polarity);
        }
    }

    fn any_key_pressed(&mut self) -> bool {
        let polarity = self.polarity;
        let mut pressed = false;
        for key in self.keys.iter_mut() {
            let down = Self::is_pressed(&mut key.pin, polarity);
            if key.latched {
                key.latched = down;
            } else if down {
                pressed = true;
            }
        }
        pressed
    }
}
