use std::fmt;

use serde::{Deserialize, Serialize};

/// Logging level for the application.
///
/// Overridden by `RUST_LOG` when that is set.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Only errors.
    Error,

    /// Warnings and errors (default level).
    #[default]
    Warn,

    /// Progress through the pipeline.
    Info,

    /// Per-entity detail while walking the dictionary.
    Debug,

    /// Everything.
    Trace,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogLevel::Error => write!(f, "error"),
            LogLevel::Warn => write!(f, "warn"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Debug => write!(f, "debug"),
            LogLevel::Trace => write!(f, "trace"),
        }
    }
}

/// Output format of log lines.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable multi-line output.
    #[default]
    Pretty,
    /// One JSON object per line.
    Json,
}

/// Diagnostic logging settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct LoggingConfig {
    /// Minimum level written to stderr.
    pub level: LogLevel,

    /// Line format.
    pub format: LogFormat,

    /// Also write a daily log file under `~/.rdoc-osa/logs`.
    pub file: bool,
}
