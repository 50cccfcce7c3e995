//! Screen buffer types
//!
//! A word-wrapping character buffer for text-mode diagnostics.

use heapless::String;

use crate::backend::{DisplayBackend, DisplayError, TextStyle};

/// Number of character rows on the standard 320x240 panel
pub const SCREEN_ROWS: usize = 30;

/// Number of body-text character columns on the standard panel
pub const SCREEN_COLS: usize = 53;

/// Maximum bytes stored per line
pub const LINE_LEN: usize = 64;

/// Screen buffer for text-mode displays
///
/// Text is appended top to bottom with [`Screen::write_wrapped`]; rows that
/// do not fit are dropped and [`Screen::is_truncated`] reports it.
#[derive(Clone)]
pub struct Screen {
    lines: [String<LINE_LEN>; SCREEN_ROWS],
    styles: [TextStyle; SCREEN_ROWS],
    /// Next row `write_wrapped` appends to
    cursor: usize,
    /// Wrap width in characters
    cols: usize,
    truncated: bool,
    dirty: bool,
}

impl Default for Screen {
    fn default() -> Self {
        Self::new()
    }
}

impl Screen {
    /// Create a new empty screen with the standard width
    pub fn new() -> Self {
        Self::with_width(SCREEN_COLS)
    }

    /// Create a new empty screen wrapping at `cols` characters
    pub fn with_width(cols: usize) -> Self {
        Self {
            lines: core::array::from_fn(|_| String::new()),
            styles: [TextStyle::Body; SCREEN_ROWS],
            cursor: 0,
            cols: cols.clamp(1, LINE_LEN),
            truncated: false,
            dirty: true,
        }
    }

    /// Clear the entire screen and rewind the cursor
    pub fn clear(&mut self) {
        for line in &mut self.lines {
            line.clear();
        }
        self.styles = [TextStyle::Body; SCREEN_ROWS];
        self.cursor = 0;
        self.truncated = false;
        self.dirty = true;
    }

    /// Set the content of a specific row
    ///
    /// Text longer than the row is cut at a character boundary.
    pub fn set_line(&mut self, row: usize, text: &str, style: TextStyle) {
        if row < SCREEN_ROWS {
            let limit = self.cols;
            copy_truncated(&mut self.lines[row], text, limit);
            self.styles[row] = style;
            self.dirty = true;
        }
    }

    /// Get the content of a specific row
    pub fn get_line(&self, row: usize) -> Option<&str> {
        self.lines.get(row).map(|s| s.as_str())
    }

    /// Get the style of a specific row
    pub fn style(&self, row: usize) -> Option<TextStyle> {
        self.styles.get(row).copied()
    }

    /// Append text at the cursor, wrapping at the screen width
    ///
    /// Embedded newlines start a new row. Long lines break at the last
    /// space that fits, or mid-word when there is none. Returns `false`
    /// if the screen ran out of rows.
    pub fn write_wrapped(&mut self, text: &str, style: TextStyle) -> bool {
        for paragraph in text.split('\n') {
            let mut rest = paragraph;
            if rest.is_empty() && !self.push_row("", style) {
                return false;
            }
            while !rest.is_empty() {
                let (line, remaining) = split_to_width(rest, self.cols);
                if !self.push_row(line, style) {
                    return false;
                }
                rest = remaining;
            }
        }
        true
    }

    fn push_row(&mut self, text: &str, style: TextStyle) -> bool {
        if self.cursor >= SCREEN_ROWS {
            self.truncated = true;
            return false;
        }
        self.set_line(self.cursor, text, style);
        self.cursor += 1;
        true
    }

    /// Row the next `write_wrapped` call starts on
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Move the cursor, e.g. to leave a gap below a title
    pub fn set_cursor(&mut self, row: usize) {
        self.cursor = row.min(SCREEN_ROWS);
    }

    /// Whether text was dropped for lack of rows
    pub fn is_truncated(&self) -> bool {
        self.truncated
    }

    /// Check if screen needs redrawing
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Mark screen as clean (after rendering)
    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }

    /// Get all lines as an iterator
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(|s| s.as_str())
    }

    /// Get number of rows
    pub const fn rows(&self) -> usize {
        SCREEN_ROWS
    }

    /// Get the wrap width
    pub const fn cols(&self) -> usize {
        self.cols
    }

    /// Draw every non-empty row to `backend` and flush
    ///
    /// Title rows are centred; body rows start at column 0. Rows beyond
    /// the backend's height are skipped.
    pub fn render<B: DisplayBackend + ?Sized>(&mut self, backend: &mut B) -> Result<(), DisplayError> {
        if !backend.is_ready() {
            return Err(DisplayError::NotInitialized);
        }
        let (_, height) = backend.dimensions();
        backend.clear()?;
        for (row, line) in self.lines.iter().enumerate().take(height as usize) {
            if line.is_empty() {
                continue;
            }
            match self.styles[row] {
                TextStyle::Title => backend.draw_centered(row as u8, line, TextStyle::Title)?,
                TextStyle::Body => backend.draw_text(row as u8, 0, line, TextStyle::Body)?,
            }
        }
        backend.flush()?;
        self.dirty = false;
        Ok(())
    }
}

/// Split `text` into a head of at most `width` chars and the remainder
fn split_to_width(text: &str, width: usize) -> (&str, &str) {
    let Some((idx, _)) = text.char_indices().nth(width) else {
        return (text, "");
    };
    let head = &text[..idx];
    let tail = &text[idx..];
    if let Some(after_space) = tail.strip_prefix(' ') {
        return (head, after_space);
    }
    match head.rfind(' ') {
        Some(space) if space > 0 => (&head[..space], &text[space + 1..]),
        _ => (head, tail),
    }
}

fn copy_truncated(dst: &mut String<LINE_LEN>, text: &str, max_chars: usize) {
    dst.clear();
    for c in text.chars().take(max_chars) {
        if dst.push(c).is_err() {
            break;
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Screen {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "Screen[");
        for (i, line) in self.lines.iter().take(self.cursor).enumerate() {
            if i > 0 {
                defmt::write!(f, ", ");
            }
            defmt::write!(f, "{}", line.as_str());
        }
        defmt::write!(f, "]");
    }
}
