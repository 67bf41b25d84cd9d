//! Record serialization formats
//!
//! The store never looks inside a record. It hands values to a [`Format`]
//! to get bytes on the way in and hands bytes back on the way out.

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::error::{StoreError, StoreResult};

/// Encode/decode pair used by the store for record bodies
pub trait Format: Send + Sync {
    /// File extension of record files, without the leading dot
    fn extension(&self) -> &str;

    /// Serializes a value into the bytes stored on disk
    fn encode<T: Serialize + ?Sized>(&self, value: &T) -> StoreResult<Vec<u8>>;

    /// Deserializes a record body into the requested shape
    fn decode<T: DeserializeOwned>(&self, bytes: &[u8]) -> StoreResult<T>;
}

/// Human-readable JSON, tab indented, with a trailing newline
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonFormat;

impl Format for JsonFormat {
    fn extension(&self) -> &str {
        "json"
    }

    fn encode<T: Serialize + ?Sized>(&self, value: &T) -> StoreResult<Vec<u8>> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"\t");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        value
            .serialize(&mut ser)
            .map_err(|e| StoreError::Serialization(Box::new(e)))?;
        buf.push(b'\n');
        Ok(buf)
    }

    fn decode<T: DeserializeOwned>(&self, bytes: &[u8]) -> StoreResult<T> {
        serde_json::from_slice(bytes).map_err(|e| StoreError::Serialization(Box::new(e)))
    }
}
