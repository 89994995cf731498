//! Tracing setup for the `assetlink` binary.
//!
//! Events are appended to `assetlink.log` in the XDG state directory
//! (`~/.local/state/assetlink/` by default). If that file cannot be created,
//! [`init`] logs to stderr instead so linking still runs. `RUST_LOG`
//! overrides [`DEFAULT_FILTER`].

use anyhow::{Context, Result};
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::EnvFilter;

pub const DEFAULT_FILTER: &str = "info,assetlink_core=debug,assetlink=debug";
pub const LOG_FILE_NAME: &str = "assetlink.log";

/// Where [`init`] ended up sending events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogDestination {
    File(PathBuf),
    Stderr,
}

/// Append-mode log file shared by every event; each formatted event is a
/// single write on the same descriptor.
struct LogFile(File);

impl<'a> MakeWriter<'a> for LogFile {
    type Writer = &'a File;

    fn make_writer(&'a self) -> Self::Writer {
        &self.0
    }
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

fn open_append(path: &Path) -> Result<File> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("open log file: {}", path.display()))
}

/// `$XDG_STATE_HOME/assetlink/assetlink.log`, creating the directory.
pub fn log_file_path() -> Result<PathBuf> {
    let dirs = xdg::BaseDirectories::with_prefix("assetlink")
        .context("locate XDG state directory")?;
    dirs.place_state_file(LOG_FILE_NAME)
        .context("create assetlink state directory")
}

/// Install a subscriber appending to `path`. Fails without installing
/// anything if the file cannot be opened.
pub fn init_logging_to(path: &Path) -> Result<()> {
    let file = open_append(path)?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(LogFile(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!(e))?;
    tracing::info!(path = %path.display(), "assetlink logging to file");
    Ok(())
}

/// Log to the XDG state file.
pub fn init_logging() -> Result<PathBuf> {
    let path = log_file_path()?;
    init_logging_to(&path)?;
    Ok(path)
}

/// Log to stderr. A subscriber that is already installed stays in place.
pub fn init_logging_stderr() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .try_init();
}

/// Log to the XDG state file, or to stderr when it is unavailable.
pub fn init() -> LogDestination {
    match init_logging() {
        Ok(path) => LogDestination::File(path),
        Err(err) => {
            init_logging_stderr();
            tracing::warn!(error = %format!("{err:#}"), "log file unavailable; logging to stderr");
            LogDestination::Stderr
        }
    }
}
