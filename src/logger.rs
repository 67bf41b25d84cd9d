//! Logging sink used by the store
//!
//! The store reports what it does through a small [`Logger`] trait so the
//! host decides where messages go. Nothing the store does depends on a
//! message being delivered.
//!
//! - [`TracingLogger`] forwards to `tracing` and is the default
//! - [`NoopLogger`] drops everything

use std::fmt;
use std::str::FromStr;

/// Message severity, lowest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Level {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
    Fatal,
}

impl Level {
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Trace => "trace",
            Level::Debug => "debug",
            Level::Info => "info",
            Level::Warn => "warn",
            Level::Error => "error",
            Level::Fatal => "fatal",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "trace" => Ok(Level::Trace),
            "debug" => Ok(Level::Debug),
            "info" => Ok(Level::Info),
            "warn" | "warning" => Ok(Level::Warn),
            "error" => Ok(Level::Error),
            "fatal" => Ok(Level::Fatal),
            other => Err(format!("unknown log level '{}'", other)),
        }
    }
}

/// Leveled message sink
///
/// Only [`Logger::log`] is required; the per-level helpers forward to it.
pub trait Logger: Send + Sync + fmt::Debug {
    fn log(&self, level: Level, args: fmt::Arguments<'_>);

    fn trace(&self, args: fmt::Arguments<'_>) {
        self.log(Level::Trace, args)
    }

    fn debug(&self, args: fmt::Arguments<'_>) {
        self.log(Level::Debug, args)
    }

    fn info(&self, args: fmt::Arguments<'_>) {
        self.log(Level::Info, args)
    }

    fn warn(&self, args: fmt::Arguments<'_>) {
        self.log(Level::Warn, args)
    }

    fn error(&self, args: fmt::Arguments<'_>) {
        self.log(Level::Error, args)
    }

    fn fatal(&self, args: fmt::Arguments<'_>) {
        self.log(Level::Fatal, args)
    }
}

/// Forwards messages at or above `min_level` to `tracing`
#[derive(Debug, Clone, Copy)]
pub struct TracingLogger {
    min_level: Level,
}

impl TracingLogger {
    pub fn new(min_level: Level) -> Self {
        Self { min_level }
    }

    pub fn min_level(&self) -> Level {
        self.min_level
    }
}

impl Default for TracingLogger {
    fn default() -> Self {
        Self::new(Level::Info)
    }
}

impl Logger for TracingLogger {
    fn log(&self, level: Level, args: fmt::Arguments<'_>) {
        if level < self.min_level {
            return;
        }

        match level {
            Level::Trace => tracing::trace!(target: "fileshelf", "{}", args),
            Level::Debug => tracing::debug!(target: "fileshelf", "{}", args),
            Level::Info => tracing::info!(target: "fileshelf", "{}", args),
            Level::Warn => tracing::warn!(target: "fileshelf", "{}", args),
            Level::Error => tracing::error!(target: "fileshelf", "{}", args),
            Level::Fatal => tracing::error!(target: "fileshelf", fatal = true, "{}", args),
        }
    }
}

/// Discards every message
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopLogger;

impl Logger for NoopLogger {
    fn log(&self, _level: Level, _args: fmt::Arguments<'_>) {}
}
