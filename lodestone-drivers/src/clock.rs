//! Millisecond clock over a blocking delay
//!
//! Time advances only through [`DelayClock::delay_ms`] and
//! [`DelayClock::advance`]. Boards with a free-running hardware timer
//! should implement [`Clock`] on the timer instead.

use embedded_hal::delay::DelayNs;
use lodestone_hal::Clock;

pub struct DelayClock<D> {
    delay: D,
    now_ms: u64,
}

impl<D: DelayNs> DelayClock<D> {
    pub const fn new(delay: D) -> Self {
        Self { delay, now_ms: 0 }
    }

    /// Account for time spent outside this clock
    pub fn advance(&mut self, ms: u32) {
        self.now_ms = self.now_ms.saturating_add(u64::from(ms));
    }

    pub fn release(self) -> D {
        self.delay
    }
}

impl<D: DelayNs> Clock for DelayClock<D> {
    fn now_ms(&self) -> u64 {
        self.now_ms
    }

    fn delay_ms(&mut self, ms: u32) {
        self.delay.delay_ms(ms);
        self.advance(ms);
    }
}
