//! Script source loading
//!
//! Sources come either from a volume or from the shell's transport. In
//! both cases the text is copied into native memory before the engine
//! sees it.

use alloc::string::String;
use alloc::vec;

use embedded_io::{Read, ReadExactError};
use lodestone_core::locator::{auto_select, read_file};
use lodestone_hal::{Backend, Volumes};

use crate::error::ShellError;

/// Bytes the sender appends after a streamed script
pub const TRAILER_LEN: usize = 2;

/// Largest script either loader accepts
pub const MAX_SCRIPT_LEN: usize = 64 * 1024;

/// Read a streamed script of `len` bytes
///
/// Exactly `len + TRAILER_LEN` bytes are consumed from `transport`; the
/// trailer is dropped.
pub fn read_script<R: Read>(transport: &mut R, len: usize) -> Result<String, ShellError> {
    if len > MAX_SCRIPT_LEN {
        return Err(ShellError::InvalidSize);
    }
    let mut buf = vec![0u8; len + TRAILER_LEN];
    transport.read_exact(&mut buf).map_err(|err| match err {
        ReadExactError::UnexpectedEof => {
            warn!("script stream ended early");
            ShellError::Transport
        }
        ReadExactError::Other(_) => ShellError::Transport,
    })?;
    buf.truncate(len);
    String::from_utf8(buf).map_err(|_| ShellError::Utf8)
}

/// Load a script file, preferring the removable card
pub fn load_script_file<V: Volumes + ?Sized>(volumes: &mut V, path: &str) -> Result<(Backend, String), ShellError> {
    let backend = auto_select(volumes, path);
    if !volumes.exists(backend, path) {
        return Err(ShellError::ScriptNotFound);
    }
    let bytes = read_file(volumes, backend, path, MAX_SCRIPT_LEN)?;
    debug!("loaded {=usize} bytes from {=str}", bytes.len(), backend.name());
    let source = String::from_utf8(bytes).map_err(|_| ShellError::Utf8)?;
    Ok((backend, source))
}
