//! Main CLI application structure

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use super::config::Config;
use super::output::{Output, OutputFormat};
use super::{demo, record};
use crate::logger::{Level, TracingLogger};
use crate::storage::{Store, StoreOptions};

#[derive(Parser)]
#[command(name = "fileshelf")]
#[command(author, version, about = "Embedded JSON document store backed by plain files")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Database root directory
    #[arg(long, short = 'r', global = true, env = "FILESHELF_ROOT")]
    pub root: Option<PathBuf>,

    /// Configuration file (defaults to the platform config directory)
    #[arg(long, global = true, env = "FILESHELF_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Enable verbose output for debugging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Store a JSON record, replacing any previous content
    Put {
        collection: String,
        resource: String,

        /// JSON value (reads stdin when omitted or '-')
        value: Option<String>,
    },

    /// Print a single record
    Get { collection: String, resource: String },

    /// Print every record in a collection
    List { collection: String },

    /// Delete a record, or the whole collection when no resource is given
    Delete {
        collection: String,
        resource: Option<String>,
    },

    /// Seed sample users and read them back
    Demo,
}

/// Main entry point for the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let output = Output::new(cli.format, cli.verbose);

    let config = Config::load(cli.config.as_deref())?;
    let level = if output.is_verbose() {
        Level::Debug
    } else {
        config.level()?
    };
    init_tracing(level);

    let root = config.root_or(cli.root);
    let store = Store::open_with(&root, StoreOptions::new().logger(store_logger()))
        .with_context(|| format!("Failed to open database at {}", root.display()))?;
    tracing::debug!(root = %store.root().display(), "Database ready");

    match cli.command {
        Commands::Put {
            collection,
            resource,
            value,
        } => record::put(&store, &output, &collection, &resource, value.as_deref())?,
        Commands::Get {
            collection,
            resource,
        } => record::get(&store, &output, &collection, &resource)?,
        Commands::List { collection } => record::list(&store, &output, &collection)?,
        Commands::Delete {
            collection,
            resource,
        } => record::delete(&store, &output, &collection, resource.as_deref())?,
        Commands::Demo => demo::run(&store, &output)?,
    }

    tracing::debug!("Command completed successfully");
    Ok(())
}

/// Sink handed to the store; the subscriber's `EnvFilter` does all filtering
fn store_logger() -> TracingLogger {
    TracingLogger::new(Level::Trace)
}

/// Installs a stderr subscriber; `RUST_LOG` overrides the configured level
fn init_tracing(level: Level) {
    let default = match level {
        Level::Fatal => "error",
        other => other.as_str(),
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .try_init();
}
