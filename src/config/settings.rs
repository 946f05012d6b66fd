use super::{config_path, ConfigError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

fn default_api_base() -> String {
    crate::catalog::DEFAULT_API_BASE.to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    #[serde(default = "default_api_base")]
    pub api_base: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
        }
    }
}

impl Settings {
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let settings: Settings =
            serde_yaml::from_str(&raw).map_err(|source| ConfigError::Parse {
                path: path.display().to_string(),
                source,
            })?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let api_base = self.api_base.trim();
        if api_base.is_empty() {
            return Err(ConfigError::Settings("api_base must not be empty".to_string()));
        }
        if !api_base.starts_with("http://") && !api_base.starts_with("https://") {
            return Err(ConfigError::Settings(format!(
                "api_base `{api_base}` must start with http:// or https://"
            )));
        }
        Ok(())
    }
}

/// Missing settings file is not an error; the client falls back to the
/// default API base until the user saves one.
pub fn load_settings() -> Result<Settings, ConfigError> {
    let path = config_path()?;
    if !path.exists() {
        return Ok(Settings::default());
    }
    Settings::from_path(&path)
}

pub fn save_settings(settings: &Settings) -> Result<PathBuf, ConfigError> {
    settings.validate()?;
    let path = config_path()?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| ConfigError::CreateDir {
            path: parent.display().to_string(),
            source,
        })?;
    }
    let body = serde_yaml::to_string(settings).map_err(|source| ConfigError::Encode {
        path: path.display().to_string(),
        source,
    })?;
    fs::write(&path, body).map_err(|source| ConfigError::Write {
        path: path.display().to_string(),
        source,
    })?;
    Ok(path)
}
