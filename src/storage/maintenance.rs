//! Cleanup of temp files left behind by interrupted writes

use std::path::Path;
use std::time::{Duration, SystemTime};

use walkdir::{DirEntry, WalkDir};

use crate::logger::Logger;

/// Temp files younger than this may belong to a write still in progress
pub(crate) const STALE_AFTER: Duration = Duration::from_secs(300);

/// Removes stale `*.<ext>.tmp` files directly inside collection directories
///
/// Returns `(removed, failed)`. Failures are logged, never returned.
pub(crate) fn purge_stale_tmp(
    root: &Path,
    extension: &str,
    threshold: Duration,
    log: &dyn Logger,
) -> (usize, usize) {
    let suffix = format!(".{}.tmp", extension);
    let now = SystemTime::now();
    let mut removed = 0;
    let mut failed = 0;

    WalkDir::new(root)
        .min_depth(2)
        .max_depth(2)
        .into_iter()
        .flatten()
        .filter(|entry| is_tmp(entry, &suffix) && is_stale(entry, now, threshold))
        .for_each(|entry| match std::fs::remove_file(entry.path()) {
            Ok(()) => {
                log.debug(format_args!("Removed stale temp file: {}", entry.path().display()));
                removed += 1;
            }
            Err(e) => {
                log.warn(format_args!(
                    "Failed to remove stale temp file {}: {}",
                    entry.path().display(),
                    e
                ));
                failed += 1;
            }
        });

    if removed > 0 || failed > 0 {
        log.info(format_args!(
            "Temp file cleanup: {} removed, {} failed",
            removed, failed
        ));
    }

    (removed, failed)
}

fn is_tmp(entry: &DirEntry, suffix: &str) -> bool {
    entry.file_type().is_file()
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| name.ends_with(suffix))
}

fn is_stale(entry: &DirEntry, now: SystemTime, threshold: Duration) -> bool {
    entry
        .metadata()
        .ok()
        .and_then(|m| m.modified().ok())
        .and_then(|modified| now.duration_since(modified).ok())
        .map_or(true, |age| age >= threshold)
}
