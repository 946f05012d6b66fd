mod error;
mod paths;
mod settings;

pub use error::ConfigError;
pub use paths::{config_path, default_state_root, GLOBAL_STATE_DIR, SETTINGS_FILE_NAME};
pub use settings::{load_settings, save_settings, Settings};
