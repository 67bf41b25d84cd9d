//! # Storage Layer
//!
//! A directory-backed record store with git-friendly, human-readable files.
//!
//! ## Layout
//!
//! ```text
//! <root>/
//! ├── users/                # one directory per collection
//! │   ├── John.json         # one indented JSON file per record
//! │   └── Alice.json
//! └── orders/
//!     └── 1001.json
//! ```
//!
//! ## Concurrency Safety
//!
//! - Writes and deletes hold a per-collection lock ([`LockTable`])
//! - Collections are locked independently of each other
//! - Reads take no lock; every write is a temp file + rename, so a reader
//!   sees a whole record or none
//!
//! ## Key Types
//!
//! - [`Store`] - Entry point: `write`, `read`, `read_all`, `delete`
//! - [`StoreOptions`] - Construction options (logging sink)
//! - [`Format`] / [`JsonFormat`] - Record encoding
//! - [`Resolution`] - What an address resolved to on disk
//! - [`StoreError`] - Everything that can go wrong

mod error;
mod format;
mod locks;
mod maintenance;
mod resolve;
mod store;

pub use error::{StoreError, StoreResult};
pub use format::{Format, JsonFormat};
pub use locks::{CollectionLock, LockTable};
pub use resolve::{resolve, Resolution};
pub use store::{Store, StoreOptions};
