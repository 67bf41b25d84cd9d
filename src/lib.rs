//! fileshelf - an embedded document store backed by plain files
//!
//! Records are JSON documents grouped into collections. Each collection is
//! a directory under the store root and each record is one `.json` file in
//! it, so the whole database can be inspected and backed up with
//! ordinary tools.
//!
//! ```no_run
//! use fileshelf::Store;
//! use serde_json::json;
//!
//! # fn main() -> Result<(), fileshelf::StoreError> {
//! let store = Store::open("./database")?;
//! store.write("users", "John", &json!({"Name": "John", "Age": "23"}))?;
//!
//! let john: serde_json::Value = store.read("users", "John")?;
//! for body in store.read_all("users")? {
//!     let user: serde_json::Value = store.decode(&body)?;
//!     println!("{}", user["Name"]);
//! }
//!
//! store.delete("users", "John")?;
//! store.delete("users", "")?; // the whole collection
//! # let _ = john;
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod logger;
pub mod storage;

pub use logger::{Level, Logger, NoopLogger, TracingLogger};
pub use storage::{JsonFormat, Store, StoreError, StoreOptions, StoreResult};
