//! Property tests for the record store

use std::collections::BTreeMap;

use fileshelf::{NoopLogger, Store, StoreOptions};
use proptest::prelude::*;
use tempfile::TempDir;

fn name_strategy() -> impl Strategy<Value = String> {
    "[A-Za-z0-9_][A-Za-z0-9_ .-]{0,15}".prop_filter("reserved names", |s| s != "." && s != "..")
}

fn record_strategy() -> impl Strategy<Value = BTreeMap<String, String>> {
    prop::collection::btree_map("[a-z]{1,8}", ".{0,24}", 0..6)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn write_then_read_returns_the_value(
        collection in name_strategy(),
        resource in name_strategy(),
        value in record_strategy(),
    ) {
        let dir = TempDir::new().unwrap();
        let store = Store::open_with(dir.path(), StoreOptions::new().logger(NoopLogger)).unwrap();

        store.write(&collection, &resource, &value).unwrap();
        let out: BTreeMap<String, String> = store.read(&collection, &resource).unwrap();

        prop_assert_eq!(out, value);
    }

    #[test]
    fn last_write_wins_without_residue(
        resource in name_strategy(),
        values in prop::collection::vec(record_strategy(), 1..5),
    ) {
        let dir = TempDir::new().unwrap();
        let store = Store::open_with(dir.path(), StoreOptions::new().logger(NoopLogger)).unwrap();

        for value in &values {
            store.write("things", &resource, value).unwrap();
        }

        let bodies = store.read_all("things").unwrap();
        prop_assert_eq!(bodies.len(), 1);

        let out: BTreeMap<String, String> = store.decode(&bodies[0]).unwrap();
        prop_assert_eq!(&out, values.last().unwrap());

        let entries = std::fs::read_dir(store.root().join("things")).unwrap().count();
        prop_assert_eq!(entries, 1);
    }
}
