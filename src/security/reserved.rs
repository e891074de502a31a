//! Reserved device-name tables.
//!
//! Windows refuses to create files named after legacy devices (`CON`, `NUL`,
//! `COM1`, ...) in any directory. POSIX-like systems have no such names.
//! The table is a plain value so the sanitizer can be exercised against
//! either variant on any host.

use serde::Deserialize;

/// Windows device names, lowercase.
///
/// `com0`, `com10`, `lpt0` and `lpt10` are not devices on every Windows
/// release but are refused by enough tooling that they are kept here.
pub const WINDOWS_RESERVED_NAMES: &[&str] = &[
    "con", "prn", "aux", "nul", "com0", "com1", "com2", "com3", "com4", "com5", "com6", "com7",
    "com8", "com9", "com10", "lpt0", "lpt1", "lpt2", "lpt3", "lpt4", "lpt5", "lpt6", "lpt7",
    "lpt8", "lpt9", "lpt10",
];

/// A read-only, case-insensitive set of reserved filenames.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReservedNames {
    names: &'static [&'static str],
}

impl ReservedNames {
    /// The empty table used on targets without device names.
    pub const NONE: Self = Self { names: &[] };

    /// The Windows device-name table.
    pub const WINDOWS: Self = Self {
        names: WINDOWS_RESERVED_NAMES,
    };

    /// The table for the platform this binary was built for.
    #[must_use]
    pub const fn platform() -> Self {
        if cfg!(windows) { Self::WINDOWS } else { Self::NONE }
    }

    /// Returns true if `name` matches a reserved word, ignoring ASCII case.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|r| r.eq_ignore_ascii_case(name))
    }

    /// Returns true if the table has no entries.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// The raw entries, lowercase.
    #[must_use]
    pub const fn names(&self) -> &'static [&'static str] {
        self.names
    }
}

impl Default for ReservedNames {
    fn default() -> Self {
        Self::platform()
    }
}

/// Which reserved-name table to use, as written in configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ReservedTable {
    /// Follow the host platform.
    #[default]
    Auto,
    /// Always apply the Windows device names.
    Windows,
    /// Apply no reserved names.
    None,
}

impl ReservedTable {
    /// Resolve the selection to a concrete table.
    #[must_use]
    pub const fn resolve(self) -> ReservedNames {
        match self {
            Self::Auto => ReservedNames::platform(),
            Self::Windows => ReservedNames::WINDOWS,
            Self::None => ReservedNames::NONE,
        }
    }
}
