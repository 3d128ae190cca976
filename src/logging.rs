use std::fs::OpenOptions;
use std::path::Path;

use anyhow::{Context, Result};

/// Where log records go for this invocation.
pub enum LogTarget<'a> {
    /// Append to a file.
    File(&'a Path),
    /// Write to stderr.
    Stderr,
    /// Drop everything (the interactive page owns the terminal).
    Off,
}

/// Initialise the global logger. The level defaults to `warn` and can be
/// raised with `RUST_LOG`.
pub fn init(target: LogTarget<'_>) -> Result<()> {
    if matches!(target, LogTarget::Off) {
        return Ok(());
    }
    let mut builder = env_logger::Builder::new();
    builder
        .filter_level(log::LevelFilter::Warn)
        .parse_default_env()
        .format_timestamp_secs();

    match target {
        LogTarget::File(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("failed to open log file {}", path.display()))?;
            builder.target(env_logger::Target::Pipe(Box::new(file)));
        }
        LogTarget::Stderr | LogTarget::Off => {
            builder.target(env_logger::Target::Stderr);
        }
    }

    // A second init (e.g. from tests) keeps the first logger.
    let _ = builder.try_init();
    Ok(())
}
