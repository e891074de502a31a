//! CLI command implementations for gluasteal.
//!
//! - [`sanitize`] - Print sanitized paths
//! - [`paths`] - Print storage locations
//! - [`save`] - Store a script
//! - [`servers`] - List stored servers

pub mod paths;
pub mod sanitize;
pub mod save;
pub mod servers;

use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use gluasteal::config::Config;
use gluasteal::paths::Locations;

/// Initialize logging to stderr and, if given, append to `log_file`.
///
/// `RUST_LOG` controls the level (default `info`). A log file that cannot
/// be opened is reported and skipped.
pub fn init_logging(log_file: Option<&Path>) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let file_layer = log_file.and_then(|path| match open_log_file(path) {
        Ok(file) => Some(
            fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        ),
        Err(e) => {
            eprintln!("Warning: logging to {} disabled: {e:#}", path.display());
            None
        },
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(file_layer)
        .init();
}

fn open_log_file(path: &Path) -> Result<fs::File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open {}", path.display()))
}

/// Resolve the storage locations for the current user.
pub fn locations() -> Result<Locations> {
    Locations::discover().context("Failed to locate the gluasteal work directory")
}

/// Config path: the explicit one, else `<work>/config.toml`.
pub fn config_path(explicit: Option<&Path>, locations: Option<&Locations>) -> Option<PathBuf> {
    explicit
        .map(Path::to_path_buf)
        .or_else(|| locations.map(Locations::config_file))
}

/// Load configuration; defaults when no config path can be determined.
pub fn load_config(explicit: Option<&Path>, locations: Option<&Locations>) -> Result<Config> {
    match config_path(explicit, locations) {
        Some(path) => Config::load_or_default(&path)
            .with_context(|| format!("Failed to load config: {}", path.display())),
        None => Ok(Config::default()),
    }
}
