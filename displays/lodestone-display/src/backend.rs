//! Display backend trait
//!
//! Defines the interface for the text surface (TFT, OLED, or a host mock).

/// Display backend errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Communication error with display
    Communication,
    /// Invalid coordinates or dimensions
    InvalidCoordinates,
    /// Display not initialized
    NotInitialized,
    /// Buffer overflow
    BufferOverflow,
}

/// Text style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TextStyle {
    /// Large, alert-coloured heading
    Title,
    /// Regular body text
    #[default]
    Body,
}

impl TextStyle {
    /// Horizontal scale relative to body text
    pub const fn scale(self) -> u8 {
        match self {
            TextStyle::Title => 2,
            TextStyle::Body => 1,
        }
    }
}

/// Display backend trait
///
/// Coordinates are in body-text character cells.
pub trait DisplayBackend {
    /// Clear the entire display to the background colour
    fn clear(&mut self) -> Result<(), DisplayError>;

    /// Draw text at the specified row and column
    ///
    /// - `row`: Row number (0-based)
    /// - `col`: Column number in characters (0-based)
    /// - `text`: Text to display
    /// - `style`: Title or body
    fn draw_text(&mut self, row: u8, col: u8, text: &str, style: TextStyle) -> Result<(), DisplayError>;

    /// Flush buffered content to the display
    ///
    /// For displays with internal buffers, this sends the buffer to the hardware.
    fn flush(&mut self) -> Result<(), DisplayError>;

    /// Get the display dimensions
    ///
    /// Returns (columns, rows) in body character units
    fn dimensions(&self) -> (u8, u8);

    /// Check if the display is ready
    fn is_ready(&self) -> bool;

    /// Draw text horizontally centred on a row
    fn draw_centered(&mut self, row: u8, text: &str, style: TextStyle) -> Result<(), DisplayError> {
        let (cols, _) = self.dimensions();
        let width = text.chars().count().saturating_mul(style.scale() as usize);
        let col = (cols as usize).saturating_sub(width) / 2;
        self.draw_text(row, col as u8, text, style)
    }
}

impl<T: DisplayBackend + ?Sized> DisplayBackend for &mut T {
    fn clear(&mut self) -> Result<(), DisplayError> {
        (**self).clear()
    }

    fn draw_text(&mut self, row: u8, col: u8, text: &str, style: TextStyle) -> Result<(), DisplayError> {
        (**self).draw_text(row, col, text, style)
    }

    fn flush(&mut self) -> Result<(), DisplayError> {
        (**self).flush()
    }

    fn dimensions(&self) -> (u8, u8) {
        (**self).dimensions()
    }

    fn is_ready(&self) -> bool {
        (**self).is_ready()
    }
}
