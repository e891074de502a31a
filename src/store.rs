//! On-disk script store.
//!
//! Scripts are grouped by the server they came from:
//!
//! ```text
//! <work>/servers/
//! ├── 192.168.1.20_27015/
//! │   ├── autorun/init.lua
//! │   └── noname.lua
//! └── example.net/
//!     └── lua/_con.lua
//! ```
//!
//! Both the server name and the script name are untrusted. The script name
//! goes through the [`Sanitizer`]; the server name is reduced to a single
//! safe directory name.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::constants;
use crate::error::{Error, Result};
use crate::paths::Locations;
use crate::security::{ReservedNames, Sanitizer};

/// A directory of per-server script folders.
#[derive(Debug, Clone)]
pub struct ScriptStore {
    root: PathBuf,
    sanitizer: Sanitizer,
}

impl ScriptStore {
    /// Create a store rooted at `root`. Nothing is created on disk yet.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>, sanitizer: Sanitizer) -> Self {
        Self {
            root: root.into(),
            sanitizer,
        }
    }

    /// Create a store at the server store location of `locations`.
    #[must_use]
    pub fn at(locations: &Locations, sanitizer: Sanitizer) -> Self {
        Self::new(locations.server_store(), sanitizer)
    }

    /// The store's root directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The sanitizer applied to script names.
    #[must_use]
    pub fn sanitizer(&self) -> &Sanitizer {
        &self.sanitizer
    }

    /// Directory that holds scripts for `server`.
    #[must_use]
    pub fn server_dir(&self, server: &str) -> PathBuf {
        self.root.join(sanitize_server_name(server, self.sanitizer.reserved()))
    }

    /// Full path a script named `requested` from `server` would be saved to.
    #[must_use]
    pub fn path_for(&self, server: &str, requested: &str) -> PathBuf {
        self.server_dir(server).join(self.sanitizer.sanitize(requested))
    }

    /// Write `contents` for script `requested` from `server`, replacing any
    /// previous version. Returns the path written.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if a directory cannot be created or the file
    /// cannot be written.
    pub fn save(&self, server: &str, requested: &str, contents: &[u8]) -> Result<PathBuf> {
        let target = self.path_for(server, requested);

        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| Error::io(format!("creating {}", parent.display()), e))?;
        }
        fs::write(&target, contents)
            .map_err(|e| Error::io(format!("writing {}", target.display()), e))?;

        info!(
            server = %server,
            requested = %requested.escape_debug(),
            path = %target.display(),
            bytes = contents.len(),
            "Saved script"
        );
        Ok(target)
    }

    /// Names of the server directories present in the store, sorted.
    ///
    /// A store that has never been written to is empty, not an error.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the store exists but cannot be listed.
    pub fn servers(&self) -> Result<Vec<String>> {
        let entries = match fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(root = %self.root.display(), "Script store does not exist yet");
                return Ok(Vec::new());
            },
            Err(e) => {
                return Err(Error::io(format!("listing {}", self.root.display()), e));
            },
        };

        let mut servers = Vec::new();
        for entry in entries {
            let entry =
                entry.map_err(|e| Error::io(format!("listing {}", self.root.display()), e))?;
            let is_dir = entry.file_type().is_ok_and(|t| t.is_dir());
            if is_dir && let Some(name) = entry.file_name().to_str() {
                servers.push(name.to_string());
            }
        }
        servers.sort();
        Ok(servers)
    }
}

/// Reduce a server identifier (hostname, `ip:port`) to one directory name.
///
/// ASCII alphanumerics and `_ - .` are kept, `:` becomes `_`, everything
/// else (including separators) is removed. Trailing dots are trimmed;
/// empty or dot-leading names become `unknown`, names of 128 characters or
/// more become `longservername`, reserved names gain a `_` prefix.
///
/// # Examples
///
/// ```
/// use gluasteal::security::ReservedNames;
/// use gluasteal::store::sanitize_server_name;
///
/// assert_eq!(sanitize_server_name("10.0.0.1:27015", ReservedNames::NONE), "10.0.0.1_27015");
/// assert_eq!(sanitize_server_name("../..", ReservedNames::NONE), "unknown");
/// assert_eq!(sanitize_server_name("aux", ReservedNames::WINDOWS), "_aux");
/// ```
#[must_use]
pub fn sanitize_server_name(server: &str, reserved: ReservedNames) -> String {
    let mapped: String = server
        .chars()
        .filter_map(|c| match c {
            ':' => Some('_'),
            c if c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.') => Some(c),
            _ => None,
        })
        .collect();
    let trimmed = mapped.trim_end_matches('.');

    if trimmed.is_empty() || trimmed.starts_with('.') {
        return constants::UNKNOWN_SERVER.to_string();
    }

    if trimmed.len() >= constants::MAX_SERVER_NAME_LENGTH {
        debug!(
            security_event = "server_name_rewrite",
            name_len = trimmed.len(),
            reason = "too_long",
            "Replaced overlong server name"
        );
        return constants::OVERLONG_SERVER.to_string();
    }

    let stem = trimmed.split('.').next().unwrap_or(trimmed);
    if reserved.contains(trimmed) || reserved.contains(stem) {
        format!("_{trimmed}")
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn store(root: &Path) -> ScriptStore {
        ScriptStore::new(root, Sanitizer::new(ReservedNames::WINDOWS))
    }

    // =========================================================================
    // SERVER NAMES
    // =========================================================================

    #[test]
    fn test_server_name_host_port() {
        assert_eq!(
            sanitize_server_name("192.168.1.20:27015", ReservedNames::NONE),
            "192.168.1.20_27015"
        );
        assert_eq!(
            sanitize_server_name("[::1]:27015", ReservedNames::NONE),
            "__1_27015"
        );
    }

    #[test]
    fn test_server_name_strips_separators() {
        assert_eq!(
            sanitize_server_name("host/../x", ReservedNames::NONE),
            "host..x"
        );
        assert_eq!(sanitize_server_name("a/b\\c", ReservedNames::NONE), "abc");
    }

    #[test]
    fn test_server_name_degenerate() {
        for name in ["", "..", ".", "///", "../../etc", ".hidden", "\0\n", "é"] {
            assert_eq!(
                sanitize_server_name(name, ReservedNames::NONE),
                "unknown",
                "{name:?}"
            );
        }
    }

    #[test]
    fn test_server_name_length_cap() {
        let fits = "a".repeat(127);
        assert_eq!(sanitize_server_name(&fits, ReservedNames::NONE), fits);

        for len in [128, 300, 10_000] {
            assert_eq!(
                sanitize_server_name(&"a".repeat(len), ReservedNames::NONE),
                "longservername",
                "length {len}"
            );
        }

        // Measured after filtering.
        let padded = format!("{}host", "/".repeat(500));
        assert_eq!(sanitize_server_name(&padded, ReservedNames::NONE), "host");
    }

    #[test]
    fn test_server_name_reserved() {
        assert_eq!(sanitize_server_name("CON", ReservedNames::WINDOWS), "_CON");
        assert_eq!(
            sanitize_server_name("nul.example", ReservedNames::WINDOWS),
            "_nul.example"
        );
        assert_eq!(sanitize_server_name("CON", ReservedNames::NONE), "CON");
    }

    // =========================================================================
    // STORE
    // =========================================================================

    #[test]
    fn test_path_for_stays_under_root() {
        let root = Path::new("/stash/servers");
        let s = store(root);
        let path = s.path_for("evil/../..", "../../../etc/passwd");
        assert!(path.starts_with(root));
        assert_eq!(path, root.join("evil").join("etc").join("passwd.lua"));
    }

    #[test]
    fn test_save_writes_file() {
        let dir = tempdir().unwrap();
        let s = store(dir.path());

        let path = s
            .save("10.0.0.1:27015", "autorun/init.lua", b"print('hi')")
            .unwrap();

        assert_eq!(
            path,
            dir.path()
                .join("10.0.0.1_27015")
                .join("autorun")
                .join("init.lua")
        );
        assert_eq!(fs::read(&path).unwrap(), b"print('hi')");
    }

    #[test]
    fn test_save_overwrites() {
        let dir = tempdir().unwrap();
        let s = store(dir.path());

        s.save("srv", "a", b"one").unwrap();
        let path = s.save("srv", "a.lua", b"two").unwrap();
        assert_eq!(fs::read_to_string(path).unwrap(), "two");
    }

    #[test]
    fn test_save_reserved_name() {
        let dir = tempdir().unwrap();
        let s = store(dir.path());

        let path = s.save("srv", "lua/con", b"").unwrap();
        assert!(path.ends_with(Path::new("lua").join("_con.lua")));
        assert!(path.exists());
    }

    #[test]
    fn test_servers_lists_directories() {
        let dir = tempdir().unwrap();
        let s = store(dir.path());

        assert!(s.servers().unwrap().is_empty());

        s.save("b.example", "x", b"").unwrap();
        s.save("a.example:1", "y", b"").unwrap();
        fs::write(dir.path().join("stray.txt"), "").unwrap();

        assert_eq!(s.servers().unwrap(), vec!["a.example_1", "b.example"]);
    }

    #[test]
    fn test_servers_missing_root_is_empty() {
        let dir = tempdir().unwrap();
        let s = store(&dir.path().join("never-created"));
        assert!(s.servers().unwrap().is_empty());
    }

    #[test]
    fn test_save_with_overlong_server_name() {
        let dir = tempdir().unwrap();
        let s = store(dir.path());

        let path = s.save(&"a".repeat(300), "init", b"x").unwrap();
        assert_eq!(path, dir.path().join("longservername").join("init.lua"));
        assert_eq!(fs::read(&path).unwrap(), b"x");
    }

    #[test]
    fn test_save_fails_when_root_is_a_file() {
        let dir = tempdir().unwrap();
        let root = dir.path().join("servers");
        fs::write(&root, "not a directory").unwrap();

        let err = store(&root).save("srv", "x", b"").unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }
}
