//! Logging and tracing setup

use anyhow::{Context, Result};
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, fmt::writer::BoxMakeWriter, prelude::*, EnvFilter};

/// Initialize logging with custom configuration.
///
/// `RUST_LOG` wins over `level` when set. Logs go to stderr so command output
/// on stdout stays clean, or to `file` when one is given; hold the returned
/// guard until exit so buffered file output is flushed.
pub fn initialize_logging_with_config(
    level: &str,
    format: &str,
    file: Option<&Path>,
) -> Result<Option<WorkerGuard>> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let (writer, guard, ansi) = match file {
        Some(path) => {
            let directory =
                path.parent().filter(|dir| !dir.as_os_str().is_empty()).unwrap_or(Path::new("."));
            let file_name = path.file_name().context("Log file path has no file name")?;
            let appender = tracing_appender::rolling::never(directory, file_name);
            let (non_blocking, guard) = tracing_appender::non_blocking(appender);
            (BoxMakeWriter::new(non_blocking), Some(guard), false)
        }
        None => (BoxMakeWriter::new(std::io::stderr), None, true),
    };

    let fmt_layer = match format {
        "json" => fmt::layer()
            .json()
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .with_writer(writer)
            .boxed(),
        "pretty" => fmt::layer()
            .pretty()
            .with_target(false)
            .with_file(true)
            .with_line_number(true)
            .with_ansi(ansi)
            .with_writer(writer)
            .boxed(),
        _ => fmt::layer().compact().with_target(false).with_ansi(ansi).with_writer(writer).boxed(),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    Ok(guard)
}
