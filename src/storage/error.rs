//! Error types for the record store

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result alias used throughout the storage layer
pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Unable to find file or directory named {}", .0.display())]
    NotFound(PathBuf),

    #[error("Refusing to delete {}: neither a regular file nor a directory", .0.display())]
    UnsupportedEntry(PathBuf),

    #[error("Serialization failed: {0}")]
    Serialization(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: io::Error,
    },
}

impl StoreError {
    pub(crate) fn io(context: impl Into<String>, source: io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Returns true for errors that mean "nothing lives at that address"
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound(_))
    }
}

/// Attaches a context message to `io::Result`s, mirroring `anyhow::Context`
pub(crate) trait IoContext<T> {
    fn io_context<F, S>(self, f: F) -> StoreResult<T>
    where
        F: FnOnce() -> S,
        S: Into<String>;
}

impl<T> IoContext<T> for io::Result<T> {
    fn io_context<F, S>(self, f: F) -> StoreResult<T>
    where
        F: FnOnce() -> S,
        S: Into<String>,
    {
        self.map_err(|e| StoreError::io(f(), e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_context_wraps_message() {
        let result: io::Result<()> = Err(io::Error::new(io::ErrorKind::Other, "disk on fire"));
        let err = result.io_context(|| "Failed to write temp file").unwrap_err();

        assert_eq!(err.to_string(), "Failed to write temp file: disk on fire");
        assert!(!err.is_not_found());
    }

    #[test]
    fn not_found_displays_path() {
        let err = StoreError::NotFound(PathBuf::from("/data/users/Jane"));
        assert!(err.is_not_found());
        assert!(err.to_string().contains("/data/users/Jane"));
    }
}
