//! Path utilities for gluasteal storage.
//!
//! Provides centralized path resolution for every file gluasteal writes:
//!
//! # Base Directories
//! - [`get_base_dir`] - home directory (Unix) or Documents (Windows)
//! - [`get_work_dir`] - `<base>/gluasteal/`
//!
//! # Files
//! - [`get_log_file_path`] - `<work>/log.txt`
//! - [`get_server_store_path`] - `<work>/servers/`
//! - [`get_config_path`] - `<work>/config.toml`
//!
//! A missing base directory is an error, never an empty path: joining onto
//! an empty base would quietly produce a path relative to the current
//! directory.

use std::path::{Path, PathBuf};

use crate::constants;
use crate::error::{Error, Result};

// =============================================================================
// Locations
// =============================================================================

/// The set of storage locations derived from one work directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locations {
    work_dir: PathBuf,
}

impl Locations {
    /// Derive locations from a base directory (`<base>/gluasteal`).
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyBaseDir`] if `base` is empty.
    pub fn from_base(base: impl AsRef<Path>) -> Result<Self> {
        let base = base.as_ref();
        if base.as_os_str().is_empty() {
            return Err(Error::EmptyBaseDir);
        }
        Ok(Self {
            work_dir: base.join(constants::WORK_DIR_NAME),
        })
    }

    /// Use `work_dir` directly as the work directory.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyBaseDir`] if `work_dir` is empty.
    pub fn from_work_dir(work_dir: impl Into<PathBuf>) -> Result<Self> {
        let work_dir = work_dir.into();
        if work_dir.as_os_str().is_empty() {
            return Err(Error::EmptyBaseDir);
        }
        Ok(Self { work_dir })
    }

    /// Resolve locations for the current user.
    ///
    /// Resolution order:
    /// 1. `GLUASTEAL_HOME` environment variable (if set and non-empty)
    /// 2. `<base>/gluasteal/` where base comes from [`get_base_dir`]
    ///
    /// # Errors
    ///
    /// Returns [`Error::HomeDirUnavailable`] if no base directory exists.
    pub fn discover() -> Result<Self> {
        if let Ok(home) = std::env::var(constants::HOME_ENV_VAR)
            && !home.is_empty()
        {
            return Self::from_work_dir(home);
        }
        Self::from_base(get_base_dir()?)
    }

    /// The work directory.
    #[must_use]
    pub fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    /// The log file: `<work>/log.txt`
    #[must_use]
    pub fn log_file(&self) -> PathBuf {
        self.work_dir.join(constants::LOG_FILE_NAME)
    }

    /// The per-server script store: `<work>/servers/`
    #[must_use]
    pub fn server_store(&self) -> PathBuf {
        self.work_dir.join(constants::SERVERS_DIR_NAME)
    }

    /// The optional config file: `<work>/config.toml`
    #[must_use]
    pub fn config_file(&self) -> PathBuf {
        self.work_dir.join(constants::CONFIG_FILE_NAME)
    }
}

// =============================================================================
// Free functions
// =============================================================================

/// Get the platform base directory.
///
/// This is the user's Documents folder on Windows and the home directory
/// everywhere else.
///
/// # Errors
///
/// Returns [`Error::HomeDirUnavailable`] if the platform reports nothing.
pub fn get_base_dir() -> Result<PathBuf> {
    let base = if cfg!(windows) {
        dirs::document_dir()
    } else {
        dirs::home_dir()
    };
    base.filter(|p| !p.as_os_str().is_empty())
        .ok_or(Error::HomeDirUnavailable)
}

/// Get the work directory: `<base>/gluasteal/`
pub fn get_work_dir() -> Result<PathBuf> {
    Ok(Locations::discover()?.work_dir)
}

/// Get the log file path: `<work>/log.txt`
pub fn get_log_file_path() -> Result<PathBuf> {
    Ok(Locations::discover()?.log_file())
}

/// Get the server store path: `<work>/servers/`
pub fn get_server_store_path() -> Result<PathBuf> {
    Ok(Locations::discover()?.server_store())
}

/// Get the config file path: `<work>/config.toml`
pub fn get_config_path() -> Result<PathBuf> {
    Ok(Locations::discover()?.config_file())
}
