//! Process-wide lazy initialisation flags
//!
//! Two peripherals are brought up on first use and then left running until
//! power-off: the touch/input bus and the ADC. Each flag moves once from
//! uninitialised to ready.
//!
//! The bridge runs on a single cooperative thread, so `ensure` does not
//! guard against two callers racing through `init`. A port that runs
//! natives from several threads needs a lock around it.

use portable_atomic::{AtomicBool, Ordering};

/// One-shot initialisation flag
#[derive(Debug)]
pub struct LazyInit {
    ready: AtomicBool,
}

impl Default for LazyInit {
    fn default() -> Self {
        Self::new()
    }
}

impl LazyInit {
    pub const fn new() -> Self {
        Self { ready: AtomicBool::new(false) }
    }

    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }

    /// Run `init` if this is the first call
    ///
    /// Returns `true` if `init` ran.
    pub fn ensure(&self, init: impl FnOnce()) -> bool {
        if self.is_ready() {
            return false;
        }
        init();
        self.ready.store(true, Ordering::Release);
        true
    }
}

/// Lazy state shared by every native call
#[derive(Debug, Default)]
pub struct BridgeState {
    /// Touch controller / input bus
    pub touch_bus: LazyInit,
    /// ADC attenuation and width
    pub adc: LazyInit,
}

impl BridgeState {
    pub const fn new() -> Self {
        Self {
            touch_bus: LazyInit::new(),
            adc: LazyInit::new(),
        }
    }
}
