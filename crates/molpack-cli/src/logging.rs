use crate::error::{CliError, Result};
use std::cmp;
use std::fs::File;
use std::path::PathBuf;
use tracing::Subscriber;
use tracing_subscriber::{
    filter::{LevelFilter, Targets},
    fmt,
    prelude::*,
};

const MOLPACK_TARGET: &str = "molpack";

/// Installs the global subscriber for the CLI.
///
/// The log file, when requested, is created before anything is installed, so an
/// unwritable path fails the run without touching the global dispatcher.
pub fn setup_logging(verbosity: u8, quiet: bool, log_file: Option<PathBuf>) -> Result<()> {
    let file = log_file.map(File::create).transpose()?;

    build_subscriber(level_for(verbosity, quiet), file)
        .try_init()
        .map_err(|e| CliError::Other(e.into()))
}

fn level_for(verbosity: u8, quiet: bool) -> LevelFilter {
    if quiet {
        return LevelFilter::ERROR;
    }
    match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

/// molpack's own events follow `level`; everything else is capped at WARN.
fn event_filter(level: LevelFilter) -> Targets {
    Targets::new()
        .with_target(MOLPACK_TARGET, level)
        .with_default(cmp::min(level, LevelFilter::WARN))
}

fn build_subscriber(level: LevelFilter, log_file: Option<File>) -> impl Subscriber + Send + Sync {
    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact();

    let file_layer = log_file.map(|file| {
        fmt::layer()
            .with_writer(file)
            .with_ansi(false)
            .with_target(true)
    });

    tracing_subscriber::registry()
        .with(event_filter(level))
        .with(stderr_layer)
        .with(file_layer)
}
