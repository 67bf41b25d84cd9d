//! Per-collection write locks
//!
//! Each collection name maps to one mutex, created the first time the name
//! is used and kept for the lifetime of the table. The table itself sits
//! behind its own mutex, which is held only while looking up or inserting
//! an entry and never while a caller does I/O.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;

/// Shared handle to a single collection's lock
pub type CollectionLock = Arc<Mutex<()>>;

/// Table of collection locks, grown on demand
#[derive(Debug, Default)]
pub struct LockTable {
    locks: Mutex<HashMap<String, CollectionLock>>,
}

impl LockTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the lock for `collection`, registering a new one if needed
    ///
    /// Concurrent first-time callers for the same name always receive the
    /// same lock.
    pub fn acquire_or_create(&self, collection: &str) -> CollectionLock {
        let mut locks = self.locks.lock();
        Arc::clone(
            locks
                .entry(collection.to_string())
                .or_insert_with(|| Arc::new(Mutex::new(()))),
        )
    }

    /// Number of collection names that have ever been locked
    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.locks.lock().len()
    }

    #[cfg(test)]
    pub(crate) fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn same_name_shares_lock() {
        let table = LockTable::new();
        let a = table.acquire_or_create("users");
        let b = table.acquire_or_create("users");

        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn different_names_get_distinct_locks() {
        let table = LockTable::new();
        let users = table.acquire_or_create("users");
        let orders = table.acquire_or_create("orders");

        assert!(!Arc::ptr_eq(&users, &orders));

        // Holding one must not prevent taking the other
        let _held = users.lock();
        assert!(orders.try_lock().is_some());
    }

    #[test]
    fn concurrent_first_use_creates_one_lock() {
        let owned = LockTable::new();
        let table = &owned;

        let handles: Vec<CollectionLock> = thread::scope(|s| {
            let joins: Vec<_> = (0..16)
                .map(|_| s.spawn(move || table.acquire_or_create("fresh")))
                .collect();
            joins.into_iter().map(|j| j.join().unwrap()).collect()
        });

        assert_eq!(table.len(), 1);
        assert!(handles.windows(2).all(|w| Arc::ptr_eq(&w[0], &w[1])));
    }

    #[test]
    fn locks_are_never_removed() {
        let table = LockTable::new();
        assert!(table.is_empty());

        drop(table.acquire_or_create("temp"));
        assert_eq!(table.len(), 1);
    }
}
