//! `core::fmt::Write` over a byte serial port
//!
//! Console natives produce text; UARTs and USB CDC endpoints take bytes.
//! With `crlf` set, every `\n` goes out as `\r\n` for dumb terminals.

use core::fmt;

use embedded_io::Write;

pub struct TextSink<W> {
    inner: W,
    crlf: bool,
}

impl<W: Write> TextSink<W> {
    pub const fn new(inner: W, crlf: bool) -> Self {
        Self { inner, crlf }
    }

    pub fn inner_mut(&mut self) -> &mut W {
        &mut self.inner
    }

    pub fn into_inner(self) -> W {
        self.inner
    }

    /// Flush the underlying port
    pub fn flush(&mut self) -> Result<(), W::Error> {
        self.inner.flush()
    }

    fn write_bytes(&mut self, s: &str) -> Result<(), W::Error> {
        if !self.crlf {
            return self.inner.write_all(s.as_bytes());
        }
        let mut lines = s.split('\n');
        if let Some(first) = lines.next() {
            self.inner.write_all(first.as_bytes())?;
        }
        for line in lines {
            self.inner.write_all(b"\r\n")?;
            self.inner.write_all(line.as_bytes())?;
        }
        Ok(())
    }
}

impl<W: Write> fmt::Write for TextSink<W> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.write_bytes(s).map_err(|_| fmt::Error)
    }
}
