//! Record commands: put, get, list, delete

use std::io::Read;

use anyhow::{Context, Result};
use serde_json::Value;

use super::output::Output;
use crate::storage::Store;

/// Stores a JSON value; reads stdin when `value` is absent or `-`
pub fn put(
    store: &Store,
    output: &Output,
    collection: &str,
    resource: &str,
    value: Option<&str>,
) -> Result<()> {
    let raw = match value {
        Some(text) if text != "-" => text.to_string(),
        _ => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read record from stdin")?;
            buf
        }
    };

    let value: Value = serde_json::from_str(&raw).context("Record is not valid JSON")?;

    store
        .write(collection, resource, &value)
        .with_context(|| format!("Failed to write {}/{}", collection, resource))?;

    output.success(&format!("Saved {}/{}", collection, resource));
    Ok(())
}

pub fn get(store: &Store, output: &Output, collection: &str, resource: &str) -> Result<()> {
    let value: Value = store
        .read(collection, resource)
        .with_context(|| format!("Failed to read {}/{}", collection, resource))?;

    output.data(&value);
    Ok(())
}

/// Prints every record in a collection
///
/// Records that fail to decode are reported and skipped; the rest are
/// still printed.
pub fn list(store: &Store, output: &Output, collection: &str) -> Result<()> {
    let bodies = store
        .read_all(collection)
        .with_context(|| format!("Failed to list {}", collection))?;

    let mut records = Vec::with_capacity(bodies.len());
    for body in &bodies {
        match store.decode::<Value>(body) {
            Ok(value) => records.push(value),
            Err(e) => output.error(&format!("Skipping unreadable record: {}", e)),
        }
    }

    if output.is_json() {
        output.data(&records);
    } else if records.is_empty() {
        println!("No records in '{}'", collection);
    } else {
        for record in &records {
            output.data(record);
        }
        println!();
        println!("Found {} record(s)", records.len());
    }

    Ok(())
}

/// Deletes a record, or the whole collection when `resource` is `None`
pub fn delete(store: &Store, output: &Output, collection: &str, resource: Option<&str>) -> Result<()> {
    let resource = resource.unwrap_or("");

    store.delete(collection, resource).with_context(|| {
        if resource.is_empty() {
            format!("Failed to delete collection {}", collection)
        } else {
            format!("Failed to delete {}/{}", collection, resource)
        }
    })?;

    if resource.is_empty() {
        output.success(&format!("Deleted collection {}", collection));
    } else {
        output.success(&format!("Deleted {}/{}", collection, resource));
    }
    Ok(())
}
