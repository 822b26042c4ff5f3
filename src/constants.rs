//! Constants used throughout mcpacker

/// Settings file name inside the data directory
pub const SETTINGS_FILENAME: &str = "build.setting.json";

/// Self-resolved working copy of the settings file
pub const RESOLVED_SETTINGS_FILENAME: &str = "build.setting.resolved.json";

/// Top-level key every settings document must carry
pub const PLACEHOLDER_SECTION: &str = "placeholder";

/// Prefix prepended to every placeholder path before lookup
pub const PLACEHOLDER_DATA_PREFIX: &str = "placeholder.data.";

/// Stored value that requests a freshly generated secret
pub const SECRET_SENTINEL: &str = "$(velocity.secret)";

/// Length of generated secrets
pub const SECRET_LENGTH: usize = 16;

/// Alphabet generated secrets are drawn from
pub const SECRET_CHARSET: &[u8] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Placeholder token syntax
pub mod tokens {
    pub const TEXT_PREFIX: &str = "$(mcp.";
    pub const TEXT_SUFFIX: &str = ")";
    pub const NUMBER_SUFFIX: &str = "(number)";
}

/// Directory layout relative to the data directory
pub mod layout {
    pub const DEFAULT_DIR: &str = "default";
    pub const BUILT_DIR: &str = "built";
    pub const BACKUP_DIR: &str = "backup";
    pub const FILES_DIR: &str = "files";
    pub const SERVERS_DIR: &str = "servers";
}

/// Backup archive names, e.g. `2024-05-01-13:45:10.zip`
pub const BACKUP_TIMESTAMP_FORMAT: &str = "%Y-%m-%d-%H:%M:%S";

/// Exit codes
pub mod exit_codes {
    pub const FAILURE: i32 = 1;
}

/// Verbosity levels
pub mod verbosity {
    pub const OFF: u8 = 0;
    pub const INFO: u8 = 1;
    pub const DEBUG: u8 = 2;
    pub const TRACE: u8 = 3;
}
