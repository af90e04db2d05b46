//! Application directory paths for paperscribe.
//!
//! Uses the [`dirs`] crate for platform-appropriate resolution.
//!
//! | Purpose | macOS | Linux |
//! |---------|-------|-------|
//! | Config | `~/Library/Application Support/paperscribe/` | `~/.config/paperscribe/` |
//!
//! Set `PAPERSCRIBE_CONFIG_DIR` to override the config directory.

use std::path::PathBuf;

/// Environment variable overriding [`config_dir`].
pub const CONFIG_DIR_ENV: &str = "PAPERSCRIBE_CONFIG_DIR";

/// Application config directory.
///
/// Resolves to `dirs::config_dir()/paperscribe/` by default.
#[must_use]
pub fn config_dir() -> PathBuf {
    if let Some(override_dir) = std::env::var_os(CONFIG_DIR_ENV) {
        return PathBuf::from(override_dir);
    }
    dirs::config_dir()
        .map(|d| d.join("paperscribe"))
        .unwrap_or_else(|| PathBuf::from("/tmp/paperscribe-config"))
}

/// Path of the main configuration file (`config_dir()/config.toml`).
#[must_use]
pub fn config_file() -> PathBuf {
    config_dir().join("config.toml")
}
