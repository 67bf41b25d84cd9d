//! # Command-Line Interface
//!
//! A thin shell over [`Store`](crate::storage::Store) for inspecting and
//! editing a database from the terminal.
//!
//! | Command | Purpose |
//! |---------|---------|
//! | `put <collection> <resource> [json]` | Write a record (stdin when json is omitted) |
//! | `get <collection> <resource>` | Print one record |
//! | `list <collection>` | Print every record in a collection |
//! | `delete <collection> [resource]` | Delete a record or a whole collection |
//! | `demo` | Seed sample users and read them back |
//!
//! ## Output Formats
//!
//! All commands support `--format`:
//! - `text` (default) - Human-readable output
//! - `json` - Machine-parseable JSON
//!
//! ## Database Location
//!
//! `--root` (or `FILESHELF_ROOT`), then `root` from `config.toml`, then
//! `./database`.
//!
//! ## Entry Point
//!
//! Call [`run()`] to parse arguments and execute the appropriate command.

mod app;
mod config;
mod demo;
mod output;
mod record;

pub use app::{run, Cli, Commands};
pub use config::{Config, ConfigError};
pub use demo::{sample_users, Address, User};
pub use output::{Output, OutputFormat};
