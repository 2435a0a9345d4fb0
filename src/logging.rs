// File: ./src/logging.rs
//! Logger bootstrap for the engine binary.
//!
//! Stdout carries the message protocol, so terminal logging goes to stderr.
//! When a log file path is available a copy is also written there.
//! Initialization happens at most once per process and never aborts startup.

use anyhow::{Context, Result};
use log::LevelFilter;
use once_cell::sync::OnceCell;
use simplelog::{
    ColorChoice, CombinedLogger, ConfigBuilder, SharedLogger, TermLogger, TerminalMode,
    WriteLogger,
};
use std::fs::OpenOptions;
use std::path::Path;
use std::str::FromStr;

static LOGGING_READY: OnceCell<LevelFilter> = OnceCell::new();

/// Parses a level name ("error", "warn", "info", "debug", "trace", "off").
/// Unknown names fall back to `Info`.
pub fn parse_level(level: &str) -> LevelFilter {
    LevelFilter::from_str(level.trim()).unwrap_or(LevelFilter::Info)
}

/// Installs the global logger. Calling it again is a no-op returning the
/// level chosen the first time.
pub fn init_logging(level: LevelFilter, log_file: Option<&Path>) -> Result<LevelFilter> {
    if let Some(active) = LOGGING_READY.get() {
        return Ok(*active);
    }

    let config = ConfigBuilder::new()
        .set_target_level(LevelFilter::Off)
        .set_thread_level(LevelFilter::Off)
        .build();

    let mut loggers: Vec<Box<dyn SharedLogger>> = vec![TermLogger::new(
        level,
        config.clone(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )];

    if let Some(path) = log_file {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("Failed to open log file '{}'", path.display()))?;
        loggers.push(WriteLogger::new(level, config, file));
    }

    CombinedLogger::init(loggers).context("A global logger is already installed")?;
    let _ = LOGGING_READY.set(level);
    Ok(level)
}
