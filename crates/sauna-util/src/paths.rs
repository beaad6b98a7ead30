//! Default paths for the front desk
//!
//! Paths are user-writable by default (no root required):
//! - Config: `$XDG_CONFIG_HOME/sauna-desk/config.toml` or `~/.config/sauna-desk/config.toml`
//! - Data: `$XDG_DATA_HOME/sauna-desk` or `~/.local/share/sauna-desk`

use std::path::{Path, PathBuf};

/// Environment variable for overriding the config file path
pub const SAUNA_CONFIG_ENV: &str = "SAUNA_CONFIG";

/// Application subdirectory name
const APP_DIR: &str = "sauna-desk";

/// Config filename within the config directory
const CONFIG_FILENAME: &str = "config.toml";

/// Database filename within the data directory
const STORE_FILENAME: &str = "sauna-desk.db";

/// Get the default config file path.
///
/// Order of precedence:
/// 1. `$SAUNA_CONFIG` environment variable (if set)
/// 2. `$XDG_CONFIG_HOME/sauna-desk/config.toml` (if XDG_CONFIG_HOME is set)
/// 3. `~/.config/sauna-desk/config.toml` (fallback)
pub fn default_config_path() -> PathBuf {
    if let Ok(path) = std::env::var(SAUNA_CONFIG_ENV) {
        return PathBuf::from(path);
    }

    if let Ok(config_home) = std::env::var("XDG_CONFIG_HOME") {
        return PathBuf::from(config_home).join(APP_DIR).join(CONFIG_FILENAME);
    }

    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home)
            .join(".config")
            .join(APP_DIR)
            .join(CONFIG_FILENAME);
    }

    PathBuf::from("/etc").join(APP_DIR).join(CONFIG_FILENAME)
}

/// Get the default data directory: `$XDG_DATA_HOME/sauna-desk`, then
/// `~/.local/share/sauna-desk`. The CLI's `SAUNA_DATA_DIR` override is
/// applied on top of this.
pub fn default_data_dir() -> PathBuf {
    if let Ok(data_home) = std::env::var("XDG_DATA_HOME") {
        return PathBuf::from(data_home).join(APP_DIR);
    }

    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home)
            .join(".local")
            .join("share")
            .join(APP_DIR);
    }

    // Last resort
    PathBuf::from("/tmp").join(APP_DIR).join("data")
}

/// Path of the store database inside a data directory
pub fn store_path(data_dir: &Path) -> PathBuf {
    data_dir.join(STORE_FILENAME)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_dir_contains_app_name() {
        let path = default_data_dir();
        assert!(path.to_string_lossy().contains("sauna-desk"));
    }

    #[test]
    fn config_path_is_toml() {
        let path = default_config_path();
        assert_eq!(path.extension().and_then(|e| e.to_str()), Some("toml"));
    }

    #[test]
    fn store_path_is_inside_data_dir() {
        let dir = PathBuf::from("/var/lib/sauna");
        let path = store_path(&dir);
        assert_eq!(path.parent(), Some(dir.as_path()));
        assert!(path.to_string_lossy().ends_with(".db"));
    }
}
