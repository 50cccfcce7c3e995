//! User input abstractions

/// "Press any key" input
///
/// Backed by whatever the board has: buttons, an encoder, or a touch
/// controller on a shared I2C bus.
pub trait AnyKey {
    /// Bring up the input hardware (bus init, controller reset)
    ///
    /// Called at most once per power cycle, on first use.
    fn begin(&mut self);

    /// Check if any key is currently pressed
    fn any_key_pressed(&mut self) -> bool;
}

impl<T: AnyKey + ?Sized> AnyKey for &mut T {
    fn begin(&mut self) {
        (**self).begin()
    }

    fn any_key_pressed(&mut self) -> bool {
        (**self).any_key_pressed()
    }
}
