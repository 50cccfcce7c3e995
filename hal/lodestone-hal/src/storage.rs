//! Storage volume abstractions
//!
//! The device has exactly two filesystems: the onboard flash filesystem
//! and a removable card. Scripts name them `"littlefs"` and `"sd"`.

/// One of the two storage backends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Backend {
    /// Onboard flash filesystem
    Primary,
    /// Removable card filesystem
    Removable,
}

impl Backend {
    /// Script-visible name of the backend
    pub fn name(self) -> &'static str {
        match self {
            Backend::Primary => "littlefs",
            Backend::Removable => "sd",
        }
    }

    /// Look up a backend by its script-visible name
    ///
    /// Matching is exact; callers that accept other casings must
    /// normalize first.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "littlefs" => Some(Backend::Primary),
            "sd" => Some(Backend::Removable),
            _ => None,
        }
    }
}

/// Errors from filesystem operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FsError {
    /// Path does not exist
    NotFound,
    /// Backend is not mounted
    NotMounted,
    /// Underlying device error
    Io,
    /// Path is a directory or otherwise not openable in this mode
    InvalidPath,
}

/// File open modes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OpenMode {
    Read,
    Write,
    Append,
}

/// The pair of storage backends
///
/// # Arguments
/// Paths are absolute (`/dir/file.ext`).
pub trait Volumes {
    /// Handle to an open file
    type File: embedded_io::Read;

    /// Check if a backend is mounted
    fn is_mounted(&self, backend: Backend) -> bool;

    /// Check if a path exists on a backend
    ///
    /// Point-in-time answer; the file may disappear before it is opened.
    fn exists(&mut self, backend: Backend, path: &str) -> bool;

    /// Open a file on a backend
    fn open(&mut self, backend: Backend, path: &str, mode: OpenMode) -> Result<Self::File, FsError>;
}
