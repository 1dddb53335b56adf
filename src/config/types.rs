use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::app_dirs::AppDirError;
use crate::prediction::ModelKind;

/// Base URL of a locally running prediction service.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Settings loaded from `config.toml`. Every field has a default so partial
/// files keep working.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppSettings {
    #[serde(default)]
    pub service: ServiceSettings,
    #[serde(default)]
    pub view: ViewSettings,
}

/// Where and how to reach the remote prediction service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceSettings {
    /// Service root; `/predict` and `/` are resolved against it.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
    /// Read/write timeout for a single request.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// Upper bound for any response body.
    #[serde(default = "default_max_response_bytes")]
    pub max_response_bytes: usize,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            connect_timeout_secs: default_connect_timeout_secs(),
            request_timeout_secs: default_request_timeout_secs(),
            max_response_bytes: default_max_response_bytes(),
        }
    }
}

impl ServiceSettings {
    /// Join `path` onto the base URL without doubling slashes.
    pub fn endpoint(&self, path: &str) -> String {
        let base = self.base_url.trim().trim_end_matches('/');
        let path = path.trim_start_matches('/');
        if path.is_empty() {
            format!("{base}/")
        } else {
            format!("{base}/{path}")
        }
    }
}

/// Remembered view preferences.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ViewSettings {
    #[serde(default)]
    pub last_model: ModelKind,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_request_timeout_secs() -> u64 {
    60
}

fn default_max_response_bytes() -> usize {
    256 * 1024
}

/// Errors that may occur while loading or saving app configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The app directory could not be resolved.
    #[error(transparent)]
    AppDir(#[from] AppDirError),
    /// Failed to create the config directory.
    #[error("Unable to create config directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Failed to read a config file.
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Failed to write a config file.
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Failed to parse TOML config.
    #[error("Invalid config at {path}: {source}")]
    ParseToml {
        path: PathBuf,
        source: toml::de::Error,
    },
    /// Failed to serialize config to TOML.
    #[error("Failed to serialize config to TOML at {path}: {source}")]
    SerializeToml {
        path: PathBuf,
        source: toml::ser::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_joins_without_double_slashes() {
        let settings = ServiceSettings {
            base_url: "http://example.test:8000/".into(),
            ..ServiceSettings::default()
        };
        assert_eq!(settings.endpoint("/predict"), "http://example.test:8000/predict");
        assert_eq!(settings.endpoint(""), "http://example.test:8000/");
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let settings: AppSettings = toml::from_str(
            r#"
            [service]
            base_url = "http://10.0.0.5:9000"

            [view]
            last_model = "pest"
            "#,
        )
        .unwrap();
        assert_eq!(settings.service.base_url, "http://10.0.0.5:9000");
        assert_eq!(settings.service.connect_timeout_secs, 10);
        assert_eq!(settings.service.max_response_bytes, 256 * 1024);
        assert_eq!(settings.view.last_model, ModelKind::Pest);
    }

    #[test]
    fn empty_toml_is_default() {
        let settings: AppSettings = toml::from_str("").unwrap();
        assert_eq!(settings, AppSettings::default());
        assert_eq!(settings.view.last_model, ModelKind::Soil);
    }
}
