//! Bridge error taxonomy
//!
//! Every native function reports failure as a [`BridgeError`]; the engine
//! binding turns it into a thrown script exception of the matching class.

use alloc::borrow::Cow;
use core::fmt;

use lodestone_display::DisplayError;
use lodestone_hal::FsError;

use crate::transcode::TranscodeError;

/// Message carried by the deliberate-exit sentinel
pub const SCRIPT_EXIT_MESSAGE: &str = "Script exited";

/// Kinds of bridge failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ErrorKind {
    /// Malformed base64 or non-Latin-1 text
    InvalidEncoding,
    /// Argument of the wrong dynamic type
    TypeMismatch,
    /// Argument of the right type but an unusable value
    InvalidArgument,
    /// Feature absent on this hardware
    UnsupportedOperation,
    /// Bridge invariant violated; a firmware defect
    InternalError,
    /// Deliberate script termination, not a failure
    ScriptExit,
}

impl ErrorKind {
    /// Script-visible exception class
    pub fn error_class(self) -> &'static str {
        match self {
            ErrorKind::TypeMismatch | ErrorKind::InvalidEncoding => "TypeError",
            ErrorKind::InternalError => "InternalError",
            _ => "Error",
        }
    }
}

/// A failed native call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BridgeError {
    pub kind: ErrorKind,
    pub message: Cow<'static, str>,
}

impl BridgeError {
    pub fn new(kind: ErrorKind, message: impl Into<Cow<'static, str>>) -> Self {
        Self { kind, message: message.into() }
    }

    pub fn type_mismatch(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::TypeMismatch, message)
    }

    pub fn invalid_argument(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::InvalidArgument, message)
    }

    pub fn invalid_encoding(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::InvalidEncoding, message)
    }

    pub fn internal(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::InternalError, message)
    }

    /// Feature missing on this board; `api` is the script-facing name
    pub fn unsupported(api: &str) -> Self {
        Self::new(
            ErrorKind::UnsupportedOperation,
            alloc::format!("{} function not supported on this device", api),
        )
    }

    /// The deliberate-exit sentinel
    pub fn script_exit() -> Self {
        Self::new(ErrorKind::ScriptExit, SCRIPT_EXIT_MESSAGE)
    }

    pub fn is_script_exit(&self) -> bool {
        self.kind == ErrorKind::ScriptExit
    }
}

impl fmt::Display for BridgeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ErrorKind::ScriptExit => f.write_str(SCRIPT_EXIT_MESSAGE),
            _ => f.write_str(&self.message),
        }
    }
}

impl From<TranscodeError> for BridgeError {
    fn from(err: TranscodeError) -> Self {
        match err {
            TranscodeError::InvalidEncoding => BridgeError::invalid_encoding("invalid base64 data"),
            TranscodeError::NotLatin1 => BridgeError::invalid_encoding("text is not representable in Latin-1"),
        }
    }
}

impl From<FsError> for BridgeError {
    fn from(err: FsError) -> Self {
        match err {
            FsError::NotFound => BridgeError::invalid_argument("file not found"),
            FsError::NotMounted => BridgeError::invalid_argument("filesystem not mounted"),
            FsError::InvalidPath => BridgeError::invalid_argument("invalid path"),
            FsError::Io => BridgeError::internal("filesystem I/O error"),
        }
    }
}

impl From<DisplayError> for BridgeError {
    fn from(_: DisplayError) -> Self {
        BridgeError::internal("display error")
    }
}
