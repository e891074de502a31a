//! Script path sanitization.
//!
//! Turns an arbitrary, untrusted string (typically a script name reported by
//! a remote server) into a relative path that is safe to create under a
//! storage directory:
//!
//! 1. Drop every character that is not ASCII alphanumeric or one of
//!    `_ - . / \`. Control characters never survive.
//! 2. Trim trailing spaces and dots.
//! 3. Split on `/` and `\`, discarding any root or drive prefix.
//! 4. Drop `.` and `..` segments and prefix reserved device names with `_`,
//!    then check the final stem once more.
//! 5. Replace overlong paths wholesale, replace missing or hidden filenames,
//!    and force the script extension.
//!
//! The result is never empty and never escapes the directory it is joined
//! onto. It is not unique: distinct inputs can map to the same path.
//!
//! # Examples
//!
//! ```
//! use std::path::Path;
//! use gluasteal::security::{ReservedNames, Sanitizer};
//!
//! let sanitizer = Sanitizer::new(ReservedNames::WINDOWS);
//!
//! assert_eq!(sanitizer.sanitize("../../etc/passwd"), Path::new("etc").join("passwd.lua"));
//! assert_eq!(sanitizer.sanitize("con"), Path::new("_con.lua"));
//! assert_eq!(sanitizer.sanitize(""), Path::new("noname.lua"));
//! ```

use std::borrow::Cow;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::reserved::ReservedNames;
use crate::constants;

/// Tunable constants for [`Sanitizer`].
///
/// The defaults are the `lua` extension, `noname` and `longfilename`
/// fallbacks and a 200 character cap. Values are trusted: validate them
/// (see [`crate::config`]) before building a sanitizer from user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SanitizeOptions {
    /// Extension forced onto every output, without the leading dot.
    pub extension: Cow<'static, str>,
    /// Filename used when the input yields no usable filename.
    pub fallback_stem: Cow<'static, str>,
    /// Filename used when the assembled path is too long.
    pub overlong_stem: Cow<'static, str>,
    /// Paths whose native length reaches this value are replaced.
    pub max_length: usize,
}

impl SanitizeOptions {
    /// The built-in defaults.
    pub const DEFAULT: Self = Self {
        extension: Cow::Borrowed(constants::SCRIPT_EXTENSION),
        fallback_stem: Cow::Borrowed(constants::FALLBACK_STEM),
        overlong_stem: Cow::Borrowed(constants::OVERLONG_STEM),
        max_length: constants::MAX_PATH_LENGTH,
    };
}

impl Default for SanitizeOptions {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Maps untrusted strings to safe relative script paths.
///
/// Holds no mutable state; share it freely between threads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sanitizer {
    reserved: ReservedNames,
    options: SanitizeOptions,
}

/// Segments left after traversal and reserved-name rewriting.
struct Candidate {
    segments: Vec<String>,
    /// False when the input ended in a separator or had no segments.
    has_filename: bool,
}

impl Sanitizer {
    /// Build a sanitizer with default options and the given reserved table.
    #[must_use]
    pub const fn new(reserved: ReservedNames) -> Self {
        Self {
            reserved,
            options: SanitizeOptions::DEFAULT,
        }
    }

    /// Build a sanitizer with custom options.
    #[must_use]
    pub const fn with_options(reserved: ReservedNames, options: SanitizeOptions) -> Self {
        Self { reserved, options }
    }

    /// Sanitizer for the host platform with default options.
    #[must_use]
    pub const fn platform() -> Self {
        Self::new(ReservedNames::platform())
    }

    /// The reserved table in use.
    #[must_use]
    pub const fn reserved(&self) -> ReservedNames {
        self.reserved
    }

    /// The options in use.
    #[must_use]
    pub const fn options(&self) -> &SanitizeOptions {
        &self.options
    }

    /// Sanitize `input` into a relative path with the configured extension.
    ///
    /// Never fails. Degenerate inputs (empty, only control characters, only
    /// dots) resolve to the fallback filename.
    #[must_use]
    pub fn sanitize(&self, input: &str) -> PathBuf {
        let filtered = filter_chars(input);
        let trimmed = trim_trailing(&filtered);
        let Candidate {
            segments,
            has_filename,
        } = self.rewrite_segments(trimmed);

        let mut path: PathBuf = segments.iter().collect();

        // Coarse cutoff: the whole path is replaced, nothing is truncated.
        if self.too_long(&path) {
            debug!(
                security_event = "script_path_rewrite",
                path_len = path.as_os_str().len(),
                reason = "too_long",
                "Replaced overlong script path"
            );
            return self.overlong_fallback();
        }

        let hidden = segments.last().is_some_and(|name| name.starts_with('.'));
        if !has_filename {
            path.push(&*self.options.fallback_stem);
        } else if hidden {
            debug!(
                security_event = "script_path_rewrite",
                path = %path.display(),
                reason = "hidden_filename",
                "Replaced hidden script filename"
            );
            path.set_file_name(&*self.options.fallback_stem);
        }

        path.set_extension(&*self.options.extension);

        // The forced extension can push a path that just fit over the cap.
        if self.too_long(&path) {
            debug!(
                security_event = "script_path_rewrite",
                path_len = path.as_os_str().len(),
                reason = "too_long_with_extension",
                "Replaced overlong script path"
            );
            return self.overlong_fallback();
        }

        path
    }

    /// Returns true if `name` is a reserved word under this sanitizer's table.
    #[must_use]
    pub fn is_reserved(&self, name: &str) -> bool {
        self.reserved.contains(name)
    }

    /// The path returned for inputs that exceed the length cap.
    #[must_use]
    pub fn overlong_fallback(&self) -> PathBuf {
        PathBuf::from(format!(
            "{}.{}",
            self.options.overlong_stem, self.options.extension
        ))
    }

    fn too_long(&self, path: &Path) -> bool {
        path.as_os_str().len() >= self.options.max_length
    }

    fn rewrite_segments(&self, trimmed: &str) -> Candidate {
        let mut segments = Vec::new();

        // Empty segments come from leading roots, UNC prefixes and doubled
        // separators; skipping them makes the path relative.
        for segment in trimmed.split(is_separator).filter(|s| !s.is_empty()) {
            if segment == "." || segment == ".." {
                debug!(
                    security_event = "script_path_rewrite",
                    segment = %segment,
                    reason = "traversal_segment",
                    "Dropped traversal segment"
                );
                continue;
            }

            if self.reserved.contains(segment) {
                debug!(
                    security_event = "script_path_rewrite",
                    segment = %segment,
                    reason = "reserved_name",
                    "Prefixed reserved path segment"
                );
                segments.push(format!("_{segment}"));
            } else {
                segments.push(segment.to_owned());
            }
        }

        let has_filename = !segments.is_empty() && !trimmed.ends_with(is_separator);

        if has_filename
            && let Some(last) = segments.last_mut()
            && self.stem_is_reserved(last)
        {
            debug!(
                security_event = "script_path_rewrite",
                segment = %last,
                reason = "reserved_stem",
                "Prefixed filename with reserved stem"
            );
            last.insert(0, '_');
        }

        Candidate {
            segments,
            has_filename,
        }
    }

    fn stem_is_reserved(&self, filename: &str) -> bool {
        Path::new(filename)
            .file_stem()
            .and_then(|stem| stem.to_str())
            .is_some_and(|stem| self.reserved.contains(stem))
    }
}

impl Default for Sanitizer {
    fn default() -> Self {
        Self::platform()
    }
}

/// Sanitize `input` with the host platform's reserved table and defaults.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use gluasteal::security::sanitize_script_path;
///
/// assert_eq!(sanitize_script_path("report"), Path::new("report.lua"));
/// assert_eq!(sanitize_script_path(".hidden"), Path::new("noname.lua"));
/// ```
#[must_use]
pub fn sanitize_script_path(input: &str) -> PathBuf {
    Sanitizer::platform().sanitize(input)
}

/// Keep ASCII alphanumerics and `_ - . / \`; drop everything else.
pub(crate) fn filter_chars(input: &str) -> String {
    input.chars().filter(|&c| is_allowed_char(c)).collect()
}

fn is_allowed_char(c: char) -> bool {
    if c.is_ascii_control() {
        return false;
    }
    c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.' | '/' | '\\')
}

/// Strip trailing spaces and dots.
pub(crate) fn trim_trailing(input: &str) -> &str {
    input.trim_end_matches([' ', '.'])
}

fn is_separator(c: char) -> bool {
    c == '/' || c == '\\'
}
