//! gluasteal: store untrusted Lua scripts under safe, predictable paths.
//!
//! - [`security`] - Script path sanitization and reserved-name tables
//! - [`paths`] - Work directory, log file and server store locations
//! - [`config`] - Optional `config.toml` settings
//! - [`store`] - Per-server script storage
//!
//! ```
//! use std::path::Path;
//! use gluasteal::security::{ReservedNames, Sanitizer};
//!
//! let sanitizer = Sanitizer::new(ReservedNames::WINDOWS);
//! assert_eq!(sanitizer.sanitize("lua/autorun/CON.txt"), Path::new("lua/autorun/_CON.lua"));
//! ```

#![deny(unsafe_code)]

pub mod config;
pub mod constants;
pub mod error;
pub mod paths;
pub mod security;
pub mod store;

pub use error::{Error, Result};
