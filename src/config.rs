//! Persistent settings stored as `config.toml` in the app directory.

mod io;
mod types;

pub use io::{config_path, load_from_path, load_or_default, save, save_to_path};
pub use types::{AppSettings, ConfigError, DEFAULT_BASE_URL, ServiceSettings, ViewSettings};

/// Default filename used to store the app configuration.
pub const CONFIG_FILE_NAME: &str = "config.toml";
