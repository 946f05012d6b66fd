use super::ConfigError;
use std::path::PathBuf;

pub const GLOBAL_STATE_DIR: &str = ".nexo";
pub const SETTINGS_FILE_NAME: &str = "config.yaml";

pub fn default_state_root() -> Result<PathBuf, ConfigError> {
    let home = std::env::var_os("HOME").ok_or(ConfigError::HomeDirectoryUnavailable)?;
    Ok(PathBuf::from(home).join(GLOBAL_STATE_DIR))
}

/// Settings file location. `NEXO_CONFIG_PATH` overrides the default so
/// tests and scripted runs never touch the real home directory.
pub fn config_path() -> Result<PathBuf, ConfigError> {
    if let Some(raw) = std::env::var_os("NEXO_CONFIG_PATH") {
        if !raw.is_empty() {
            return Ok(PathBuf::from(raw));
        }
    }
    Ok(default_state_root()?.join(SETTINGS_FILE_NAME))
}
