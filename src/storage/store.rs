//! The record store
//!
//! Records live at `<root>/<collection>/<resource>.json`. Writes and deletes
//! take the collection's lock; reads take no lock and rely on every write
//! landing through a same-directory temp file and a single rename.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::error::{IoContext, StoreError, StoreResult};
use super::format::{Format, JsonFormat};
use super::locks::{CollectionLock, LockTable};
use super::maintenance;
use super::resolve::{resolve, with_extension_suffix, Resolution};
use crate::logger::{Logger, TracingLogger};

/// Options accepted when opening a store
#[derive(Debug, Clone, Default)]
pub struct StoreOptions {
    logger: Option<Arc<dyn Logger>>,
}

impl StoreOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the sink the store reports to
    pub fn logger(mut self, logger: impl Logger + 'static) -> Self {
        self.logger = Some(Arc::new(logger));
        self
    }

    /// Sets a sink that is shared with other owners
    pub fn shared_logger(mut self, logger: Arc<dyn Logger>) -> Self {
        self.logger = Some(logger);
        self
    }
}

/// A directory-backed store of named records grouped into collections
///
/// `Store` is `Send + Sync`; share it across threads by reference or
/// behind an `Arc`.
#[derive(Debug)]
pub struct Store<F: Format = JsonFormat> {
    root: PathBuf,
    locks: LockTable,
    log: Arc<dyn Logger>,
    format: F,
}

impl Store<JsonFormat> {
    /// Opens (creating if needed) a JSON store at `root` with default options
    pub fn open(root: impl AsRef<Path>) -> StoreResult<Self> {
        Self::open_with(root, StoreOptions::default())
    }

    /// Opens (creating if needed) a JSON store at `root`
    pub fn open_with(root: impl AsRef<Path>, options: StoreOptions) -> StoreResult<Self> {
        Self::with_format(root, options, JsonFormat)
    }
}

impl<F: Format> Store<F> {
    /// Opens a store that encodes records with `format`
    ///
    /// The root directory and its parents are created when missing; opening
    /// an existing root is not an error. The stored root is absolute with
    /// symlinks resolved. Stale temp files from interrupted writes are
    /// removed before returning.
    pub fn with_format(
        root: impl AsRef<Path>,
        options: StoreOptions,
        format: F,
    ) -> StoreResult<Self> {
        let log = options
            .logger
            .unwrap_or_else(|| Arc::new(TracingLogger::default()));
        let root = root.as_ref();

        if root.is_dir() {
            log.debug(format_args!(
                "Using '{}' (database already exists)",
                root.display()
            ));
        } else {
            log.debug(format_args!("Creating the database at '{}' ...", root.display()));
            fs::create_dir_all(root).io_context(|| {
                format!("Failed to create database directory: {}", root.display())
            })?;
        }

        let root = root
            .canonicalize()
            .io_context(|| format!("Failed to resolve database directory: {}", root.display()))?;

        maintenance::purge_stale_tmp(
            &root,
            format.extension(),
            maintenance::STALE_AFTER,
            log.as_ref(),
        );

        Ok(Self {
            root,
            locks: LockTable::new(),
            log,
            format,
        })
    }

    /// Returns the absolute root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Writes `value` as `<collection>/<resource>`, replacing any prior content
    ///
    /// The collection directory is created on first use. The record is
    /// written to `<resource>.json.tmp`, synced, then renamed into place, so
    /// readers see either the previous record or the new one in full.
    pub fn write<T: Serialize + ?Sized>(
        &self,
        collection: &str,
        resource: &str,
        value: &T,
    ) -> StoreResult<()> {
        check_name(collection, "collection", "no place to save records")?;
        check_name(resource, "resource", "unable to save record (no name)")?;

        let lock = self.collection_lock(collection);
        let _guard = lock.lock();

        let dir = self.root.join(collection);
        let final_path = self.record_path(&dir, resource);
        let tmp_path = with_extension_suffix(&final_path, "tmp");

        self.log.debug(format_args!("Creating directory: {}", dir.display()));
        self.logged(
            fs::create_dir_all(&dir)
                .io_context(|| format!("Failed to create directory: {}", dir.display())),
        )?;

        let bytes = self.logged(self.format.encode(value))?;

        self.log.debug(format_args!("Writing to temp file: {}", tmp_path.display()));
        if let Err(e) = write_synced(&tmp_path, &bytes) {
            let _ = fs::remove_file(&tmp_path);
            return self.logged(Err(StoreError::io(
                format!("Failed to write temp file: {}", tmp_path.display()),
                e,
            )));
        }

        self.log.debug(format_args!(
            "Renaming temp file to final: {}",
            final_path.display()
        ));
        if let Err(e) = fs::rename(&tmp_path, &final_path) {
            let _ = fs::remove_file(&tmp_path);
            return self.logged(Err(StoreError::io(
                format!(
                    "Failed to rename {} to {}",
                    tmp_path.display(),
                    final_path.display()
                ),
                e,
            )));
        }

        Ok(())
    }

    /// Reads `<collection>/<resource>` and decodes it as `T`
    ///
    /// Takes no lock. Fails with [`StoreError::NotFound`] when no record
    /// exists under that name.
    pub fn read<T: DeserializeOwned>(&self, collection: &str, resource: &str) -> StoreResult<T> {
        check_name(collection, "collection", "unable to read")?;
        check_name(resource, "resource", "unable to read (no name)")?;

        let record = self.root.join(collection).join(resource);
        if !self.logged(resolve(&record, self.format.extension()))?.exists() {
            return Err(StoreError::NotFound(record));
        }

        let file_path = with_extension_suffix(&record, self.format.extension());
        let bytes = match fs::read(&file_path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(StoreError::NotFound(record));
            }
            Err(e) => {
                return self.logged(Err(StoreError::io(
                    format!("Failed to read record: {}", file_path.display()),
                    e,
                )));
            }
        };

        self.logged(self.format.decode(&bytes))
    }

    /// Returns the raw body of every record in `collection`
    ///
    /// Bodies are not decoded; use [`Store::decode`] on each one. Order is
    /// whatever the directory listing yields. Temp files and nested
    /// directories are skipped. The listing is not a snapshot: concurrent
    /// writes and deletes may or may not be reflected, and a record removed
    /// between listing and reading fails the whole call.
    pub fn read_all(&self, collection: &str) -> StoreResult<Vec<Vec<u8>>> {
        check_name(collection, "collection", "unable to read")?;

        let dir = self.root.join(collection);
        match self.logged(resolve(&dir, self.format.extension()))? {
            Resolution::Directory(_) => {}
            _ => return Err(StoreError::NotFound(dir)),
        }

        let entries = self.logged(
            fs::read_dir(&dir)
                .io_context(|| format!("Failed to list collection: {}", dir.display())),
        )?;

        let suffix = format!(".{}", self.format.extension());
        let mut records = Vec::new();

        for entry in entries {
            let entry = self.logged(
                entry.io_context(|| format!("Failed to list collection: {}", dir.display())),
            )?;
            let path = entry.path();

            let is_record = entry.file_type().is_ok_and(|t| t.is_file())
                && entry
                    .file_name()
                    .to_str()
                    .is_some_and(|name| name.ends_with(&suffix));
            if !is_record {
                self.log
                    .trace(format_args!("Skipping non-record entry: {}", path.display()));
                continue;
            }

            let bytes = self.logged(
                fs::read(&path).io_context(|| format!("Failed to read record: {}", path.display())),
            )?;
            records.push(bytes);
        }

        self.log.debug(format_args!(
            "Read {} records from {}",
            records.len(),
            dir.display()
        ));
        Ok(records)
    }

    /// Deletes a single record, or a whole collection when `resource` is empty
    ///
    /// A name that resolves to a directory is removed recursively; one that
    /// resolves to a record file removes that file. Anything else (such as a
    /// symbolic link) is refused with [`StoreError::UnsupportedEntry`].
    pub fn delete(&self, collection: &str, resource: &str) -> StoreResult<()> {
        check_name(collection, "collection", "unable to delete")?;
        if !resource.is_empty() {
            check_name(resource, "resource", "unable to delete")?;
        }

        let lock = self.collection_lock(collection);
        let _guard = lock.lock();

        let collection_dir = self.root.join(collection);
        let target = if resource.is_empty() {
            collection_dir
        } else {
            collection_dir.join(resource)
        };

        match self.logged(resolve(&target, self.format.extension()))? {
            Resolution::NotFound => Err(StoreError::NotFound(target)),
            Resolution::Directory(path) => {
                self.log
                    .info(format_args!("Deleting directory: {}", path.display()));
                self.logged(
                    fs::remove_dir_all(&path)
                        .io_context(|| format!("Failed to delete directory: {}", path.display())),
                )
            }
            Resolution::File(path) => {
                self.log.debug(format_args!("Deleting record: {}", path.display()));
                match fs::remove_file(&path) {
                    Ok(()) => Ok(()),
                    // Only a foreign bare file lives under this name
                    Err(e) if e.kind() == io::ErrorKind::NotFound => {
                        Err(StoreError::NotFound(target))
                    }
                    Err(e) => self.logged(Err(StoreError::io(
                        format!("Failed to delete record: {}", path.display()),
                        e,
                    ))),
                }
            }
            Resolution::Other(path) => self.logged(Err(StoreError::UnsupportedEntry(path))),
        }
    }

    /// Decodes one body returned by [`Store::read_all`]
    pub fn decode<T: DeserializeOwned>(&self, body: &[u8]) -> StoreResult<T> {
        self.format.decode(body)
    }

    pub(crate) fn collection_lock(&self, collection: &str) -> CollectionLock {
        self.locks.acquire_or_create(collection)
    }

    fn record_path(&self, dir: &Path, resource: &str) -> PathBuf {
        with_extension_suffix(&dir.join(resource), self.format.extension())
    }

    /// Mirrors an error to the log sink and hands it back unchanged
    fn logged<T>(&self, result: StoreResult<T>) -> StoreResult<T> {
        if let Err(e) = &result {
            self.log.error(format_args!("{}", e));
        }
        result
    }
}

/// Rejects empty names and names that would address outside the collection
fn check_name(name: &str, kind: &str, action: &str) -> StoreResult<()> {
    if name.is_empty() {
        return Err(StoreError::InvalidArgument(format!(
            "missing {} - {}",
            kind, action
        )));
    }

    if name == "." || name == ".." || name.contains(['/', '\\', '\0']) {
        return Err(StoreError::InvalidArgument(format!(
            "invalid {} name '{}'",
            kind,
            name.escape_debug()
        )));
    }

    Ok(())
}

fn write_synced(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let mut file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)?;
    file.write_all(bytes)?;
    file.sync_all()
}
