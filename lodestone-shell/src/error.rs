//! Shell error type

use core::fmt;

use lodestone_hal::FsError;

/// Why a shell command could not start a script
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ShellError {
    /// `run_from_file` without a path
    MissingArgument,
    /// Streamed script larger than the loader accepts
    InvalidSize,
    /// Transport closed or failed before the script was complete
    Transport,
    /// Script source is not UTF-8
    Utf8,
    /// No such file on either volume
    ScriptNotFound,
    /// File exists but could not be read
    Storage(FsError),
}

impl fmt::Display for ShellError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShellError::MissingArgument => f.write_str("missing script path"),
            ShellError::InvalidSize => f.write_str("script size out of range"),
            ShellError::Transport => f.write_str("transport error while receiving script"),
            ShellError::Utf8 => f.write_str("script is not valid UTF-8"),
            ShellError::ScriptNotFound => f.write_str("script not found"),
            ShellError::Storage(err) => write!(f, "cannot read script: {:?}", err),
        }
    }
}

impl From<FsError> for ShellError {
    fn from(err: FsError) -> Self {
        match err {
            FsError::NotFound => ShellError::ScriptNotFound,
            other => ShellError::Storage(other),
        }
    }
}
