use std::{error::Error, io};

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{ConfigPaths, LogFormat, LoggingConfig};

/// Initialize tracing for the command-line tool
///
/// Logs go to stderr so the generator keeps stdout to itself. Uses the
/// RUST_LOG environment variable if set, otherwise the configured level.
/// With `file` enabled, a daily rolling log is written as well; keep the
/// returned guard alive until exit so buffered lines are flushed.
///
/// # Errors
/// Returns error if the log directory or tracing subscriber cannot be set up
pub fn init(config: &LoggingConfig) -> Result<Option<WorkerGuard>, Box<dyn Error>> {
    const DAYS_TO_KEEP: usize = 7;
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.level.to_string()));

    let (file_writer, guard) = if config.file {
        let log_dir = ConfigPaths::log_dir()?;
        let file_appender = tracing_appender::rolling::Builder::new()
            .rotation(tracing_appender::rolling::Rotation::DAILY)
            .max_log_files(DAYS_TO_KEEP)
            .filename_prefix("rdoc-osa")
            .filename_suffix("log")
            .build(&log_dir)?;
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
        (Some(non_blocking), Some(guard))
    } else {
        (None, None)
    };

    let registry = tracing_subscriber::registry().with(env_filter);

    match config.format {
        LogFormat::Json => {
            let file_layer = file_writer.map(|writer| {
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_level(true)
                    .with_writer(writer)
                    .with_ansi(false)
            });
            registry
                .with(
                    fmt::layer()
                        .json()
                        .with_target(true)
                        .with_level(true)
                        .with_writer(io::stderr),
                )
                .with(file_layer)
                .try_init()?;
        }
        LogFormat::Pretty => {
            let file_layer = file_writer.map(|writer| {
                fmt::layer()
                    .compact()
                    .with_target(true)
                    .with_level(true)
                    .with_writer(writer)
                    .with_ansi(false)
            });
            registry
                .with(
                    fmt::layer()
                        .pretty()
                        .with_target(true)
                        .with_level(true)
                        .with_writer(io::stderr),
                )
                .with(file_layer)
                .try_init()?;
        }
    }

    Ok(guard)
}
