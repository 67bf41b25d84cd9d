//! Existence resolution for record addresses
//!
//! An address `<root>/<collection>/<resource>` may name a directory (a whole
//! collection, or anything else living under that name) or a record file
//! stored as `<resource>.<ext>`. The bare path is checked first, then the
//! suffixed one. Symbolic links are never followed.

use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::error::{StoreError, StoreResult};

/// What an address resolved to on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Neither the bare path nor the suffixed path exists
    NotFound,
    /// The bare path is a directory
    Directory(PathBuf),
    /// A regular file sits at the bare or the suffixed path; holds the
    /// suffixed path, which may not exist when only the bare file does
    File(PathBuf),
    /// Something exists but is neither a directory nor a regular file
    /// (symlink, socket, ...)
    Other(PathBuf),
}

impl Resolution {
    pub(crate) fn exists(&self) -> bool {
        !matches!(self, Resolution::NotFound)
    }
}

/// Appends `.<extension>` to a path without touching existing extensions
pub(crate) fn with_extension_suffix(path: &Path, extension: &str) -> PathBuf {
    let mut name: OsString = path.as_os_str().to_owned();
    name.push(".");
    name.push(extension);
    PathBuf::from(name)
}

/// Resolves an extension-less path against the filesystem
pub fn resolve(path: &Path, extension: &str) -> StoreResult<Resolution> {
    let file_path = with_extension_suffix(path, extension);

    if let Some(meta) = stat_entry(path)? {
        return Ok(if meta.is_dir() {
            Resolution::Directory(path.to_path_buf())
        } else if meta.is_file() {
            Resolution::File(file_path)
        } else {
            Resolution::Other(path.to_path_buf())
        });
    }

    match stat_entry(&file_path)? {
        Some(meta) if meta.is_file() => Ok(Resolution::File(file_path)),
        Some(_) => Ok(Resolution::Other(file_path)),
        None => Ok(Resolution::NotFound),
    }
}

fn stat_entry(path: &Path) -> StoreResult<Option<fs::Metadata>> {
    match fs::symlink_metadata(path) {
        Ok(meta) => Ok(Some(meta)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(StoreError::io(
            format!("Failed to stat {}", path.display()),
            e,
        )),
    }
}
