//! Configuration for gluasteal.
//!
//! Settings live in an optional `config.toml` inside the work directory:
//!
//! ```toml
//! [sanitize]
//! reserved = "auto"        # auto | windows | none
//! extension = "lua"
//! fallback_name = "noname"
//! overlong_name = "longfilename"
//! max_length = 200
//! ```
//!
//! A missing file means defaults. Every value is validated before a
//! [`Sanitizer`] is built from it, so a bad config can never weaken the
//! sanitizer's guarantees.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use serde::Deserialize;
use tracing::{debug, warn};

use crate::constants;
use crate::error::{Error, Result};
use crate::security::{ReservedNames, ReservedTable, SanitizeOptions, Sanitizer};

/// Root configuration struct.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub sanitize: SanitizeConfig,
}

/// `[sanitize]` section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct SanitizeConfig {
    pub reserved: ReservedTable,
    pub extension: String,
    pub fallback_name: String,
    pub overlong_name: String,
    pub max_length: usize,
}

impl Default for SanitizeConfig {
    fn default() -> Self {
        Self {
            reserved: ReservedTable::Auto,
            extension: constants::SCRIPT_EXTENSION.to_string(),
            fallback_name: constants::FALLBACK_STEM.to_string(),
            overlong_name: constants::OVERLONG_STEM.to_string(),
            max_length: constants::MAX_PATH_LENGTH,
        }
    }
}

impl Config {
    /// Load configuration from `path`, falling back to defaults if the file
    /// does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file exists but cannot be read
    /// - The file contains invalid TOML or unknown keys
    /// - A value fails [`Config::validate`]
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(content) => Self::from_toml(&content).map_err(|e| match e {
                Error::ConfigParse { source, .. } => Error::ConfigParse {
                    path: path.to_path_buf(),
                    source,
                },
                Error::InvalidConfig { field, reason } => {
                    warn!(
                        path = %path.display(),
                        field = field,
                        reason = %reason,
                        "Rejected config value"
                    );
                    Error::InvalidConfig { field, reason }
                },
                other => other,
            }),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "No config file, using defaults");
                Ok(Self::default())
            },
            Err(source) => Err(Error::ConfigRead {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// Parse and validate configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is malformed or a value is invalid.
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(|source| Error::ConfigParse {
            path: Path::new("<inline>").to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Validate every value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        let s = &self.sanitize;
        let reserved = s.reserved.resolve();

        if s.extension.is_empty() || !s.extension.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(Error::invalid_config(
                "extension",
                format!(
                    "'{}' must be non-empty and ASCII alphanumeric",
                    s.extension
                ),
            ));
        }

        validate_stem("fallback_name", &s.fallback_name, reserved)?;
        validate_stem("overlong_name", &s.overlong_name, reserved)?;

        // Room for the overlong fallback itself plus one character.
        let min_length = s.overlong_name.len() + s.extension.len() + 2;
        if s.max_length < min_length || s.max_length > constants::MAX_CONFIGURABLE_LENGTH {
            return Err(Error::invalid_config(
                "max_length",
                format!(
                    "{} is outside {min_length}..={}",
                    s.max_length,
                    constants::MAX_CONFIGURABLE_LENGTH
                ),
            ));
        }

        Ok(())
    }

    /// The reserved table this config selects.
    #[must_use]
    pub fn reserved_names(&self) -> ReservedNames {
        self.sanitize.reserved.resolve()
    }

    /// Build a sanitizer from this config.
    #[must_use]
    pub fn sanitizer(&self) -> Sanitizer {
        let s = &self.sanitize;
        Sanitizer::with_options(
            self.reserved_names(),
            SanitizeOptions {
                extension: s.extension.clone().into(),
                fallback_stem: s.fallback_name.clone().into(),
                overlong_stem: s.overlong_name.clone().into(),
                max_length: s.max_length,
            },
        )
    }
}

fn validate_stem(field: &'static str, value: &str, reserved: ReservedNames) -> Result<()> {
    if value.is_empty() {
        return Err(Error::invalid_config(field, "must not be empty"));
    }
    if !value
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    {
        return Err(Error::invalid_config(
            field,
            format!("'{value}' may only contain ASCII letters, digits, '_' and '-'"),
        ));
    }
    if reserved.contains(value) {
        return Err(Error::invalid_config(
            field,
            format!("'{value}' is a reserved device name"),
        ));
    }
    Ok(())
}
