//! Fixed names and limits shared across the crate.

/// Directory created under the user's base directory.
pub const WORK_DIR_NAME: &str = "gluasteal";

/// Log file inside the work directory.
pub const LOG_FILE_NAME: &str = "log.txt";

/// Per-server script directory inside the work directory.
pub const SERVERS_DIR_NAME: &str = "servers";

/// Optional configuration file inside the work directory.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Environment variable that replaces the work directory.
pub const HOME_ENV_VAR: &str = "GLUASTEAL_HOME";

/// Extension forced onto every sanitized path.
pub const SCRIPT_EXTENSION: &str = "lua";

/// Filename used when the input has no usable filename.
pub const FALLBACK_STEM: &str = "noname";

/// Filename used when the input is too long.
pub const OVERLONG_STEM: &str = "longfilename";

/// Sanitized paths at or above this length (native string form) are replaced.
pub const MAX_PATH_LENGTH: usize = 200;

/// Upper bound accepted for a configured length cap.
pub const MAX_CONFIGURABLE_LENGTH: usize = 4096;

/// Server directory used when the server name sanitizes to nothing.
pub const UNKNOWN_SERVER: &str = "unknown";

/// Server directory used when the server name is too long.
pub const OVERLONG_SERVER: &str = "longservername";

/// Server names at or above this length are replaced.
pub const MAX_SERVER_NAME_LENGTH: usize = 128;
