//! Script path argument resolution
//!
//! File-taking natives accept three call shapes:
//!
//! - `f({ fs: "sd", path: "/a.txt" })`
//! - `f("sd", "/a.txt")` (legacy natives only)
//! - `f("/a.txt")`, picking the backend automatically
//!
//! Each shape is a [`PathForm`]; they are tried in order and the last one
//! always matches.

use alloc::string::String;
use alloc::vec::Vec;

use embedded_io::Read;
use lodestone_hal::{Backend, FsError, OpenMode, Volumes};

use crate::engine::{arg, Engine};
use crate::value::Value;

/// A resolved file argument
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileLocation {
    pub backend: Backend,
    pub path: String,
    /// Whether the path existed when checked; `false` if not checked
    pub existed: bool,
    /// Number of arguments the path took up
    pub consumed: usize,
}

/// Resolution switches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LocateOptions {
    /// Accept `("sd" | "littlefs", path)`
    pub legacy_fs_first: bool,
    /// Fill in [`FileLocation::existed`]
    pub check_exists: bool,
}

/// Call shapes, in priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PathForm {
    Object,
    LegacyPair,
    BarePath,
}

impl PathForm {
    pub const PRIORITY: [PathForm; 3] = [PathForm::Object, PathForm::LegacyPair, PathForm::BarePath];

    fn parse<E: Engine + ?Sized>(self, engine: &mut E, args: &[Value], opts: LocateOptions) -> Option<Candidate> {
        match self {
            PathForm::Object => {
                let Value::Object(obj) = arg(args, 0) else {
                    return None;
                };
                let fs = engine.get(*obj, "fs");
                let path = engine.get(*obj, "path");
                Some(Candidate {
                    backend: text_of(engine, &fs).and_then(|name| Backend::from_name(&name)),
                    path: text_of(engine, &path).unwrap_or_default(),
                    consumed: 1,
                })
            }
            PathForm::LegacyPair => {
                if !opts.legacy_fs_first {
                    return None;
                }
                let name = text_of(engine, arg(args, 0))?.to_ascii_lowercase();
                let backend = Backend::from_name(&name)?;
                Some(Candidate {
                    backend: Some(backend),
                    path: text_of(engine, arg(args, 1)).unwrap_or_default(),
                    consumed: 2,
                })
            }
            PathForm::BarePath => Some(Candidate {
                backend: None,
                path: text_of(engine, arg(args, 0)).unwrap_or_default(),
                consumed: 1,
            }),
        }
    }
}

struct Candidate {
    /// `None` means auto-select
    backend: Option<Backend>,
    path: String,
    consumed: usize,
}

fn text_of<E: Engine + ?Sized>(engine: &mut E, value: &Value) -> Option<String> {
    match value {
        Value::Undefined => None,
        Value::String(s) => Some(s.clone()),
        other => engine.to_string(other),
    }
}

/// Resolve the leading path arguments of a native call
pub fn resolve_path<E, V>(engine: &mut E, volumes: &mut V, args: &[Value], opts: LocateOptions) -> FileLocation
where
    E: Engine + ?Sized,
    V: Volumes + ?Sized,
{
    let candidate = PathForm::PRIORITY
        .iter()
        .find_map(|form| form.parse(engine, args, opts))
        .unwrap_or(Candidate { backend: None, path: String::new(), consumed: 1 });

    let backend = match candidate.backend {
        Some(backend) => backend,
        None => auto_select(volumes, &candidate.path),
    };
    let existed = opts.check_exists && volumes.exists(backend, &candidate.path);
    debug!("locate: {=str} on {=str}, exists={=bool}", candidate.path.as_str(), backend.name(), existed);

    FileLocation {
        backend,
        path: candidate.path,
        existed,
        consumed: candidate.consumed,
    }
}

/// Removable card if mounted and holding `path`, else onboard flash
pub fn auto_select<V: Volumes + ?Sized>(volumes: &mut V, path: &str) -> Backend {
    if volumes.is_mounted(Backend::Removable) && volumes.exists(Backend::Removable, path) {
        Backend::Removable
    } else {
        Backend::Primary
    }
}

/// Read a whole file into native memory
///
/// Fails with [`FsError::Io`] if the file is larger than `limit` bytes.
pub fn read_file<V: Volumes + ?Sized>(volumes: &mut V, backend: Backend, path: &str, limit: usize) -> Result<Vec<u8>, FsError> {
    let mut file = volumes.open(backend, path, OpenMode::Read)?;
    let mut data = Vec::new();
    let mut chunk = [0u8; 256];
    loop {
        let n = file.read(&mut chunk).map_err(|_| FsError::Io)?;
        if n == 0 {
            return Ok(data);
        }
        if data.len() + n > limit {
            return Err(FsError::Io);
        }
        data.extend_from_slice(&chunk[..n]);
    }
}
