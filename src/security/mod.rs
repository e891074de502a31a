//! Input sanitization for script paths.
//!
//! Scripts arrive with names chosen by whoever controls the remote end, so
//! every name is treated as hostile before it touches the filesystem.
//!
//! # Overview
//!
//! - [`reserved`] - Reserved device-name tables
//! - [`sanitize`] - The script path sanitizer
//!
//! # Key Items
//!
//! - [`Sanitizer::sanitize`] - Maps any string to a safe relative `.lua` path
//! - [`sanitize_script_path`] - Same, using the host platform's table
//! - [`ReservedNames`] - Case-insensitive reserved-name table
//!
//! # Examples
//!
//! ```
//! use std::path::Path;
//! use gluasteal::security::{ReservedNames, Sanitizer};
//!
//! let sanitizer = Sanitizer::new(ReservedNames::NONE);
//! assert_eq!(sanitizer.sanitize("autorun/init"), Path::new("autorun").join("init.lua"));
//! ```

pub mod reserved;
pub mod sanitize;

#[cfg(test)]
mod property_tests;

pub use reserved::{ReservedNames, ReservedTable, WINDOWS_RESERVED_NAMES};
pub use sanitize::{SanitizeOptions, Sanitizer, sanitize_script_path};
