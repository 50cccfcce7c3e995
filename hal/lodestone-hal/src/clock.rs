//! Time source abstractions

/// Monotonic millisecond clock with blocking delays
///
/// The bridge runs on a single cooperative thread, so its only suspension
/// points (infrared capture and the error acknowledgment wait) are bounded
/// polling loops built on this trait.
pub trait Clock {
    /// Milliseconds since boot
    fn now_ms(&self) -> u64;

    /// Block for the given number of milliseconds
    fn delay_ms(&mut self, ms: u32);
}

impl<T: Clock + ?Sized> Clock for &mut T {
    fn now_ms(&self) -> u64 {
        (**self).now_ms()
    }

    fn delay_ms(&mut self, ms: u32) {
        (**self).delay_ms(ms)
    }
}
