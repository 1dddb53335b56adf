use std::io::Write;
use std::path::{Path, PathBuf};

use rand::Rng;

use super::CONFIG_FILE_NAME;
use super::types::{AppSettings, ConfigError};
use crate::app_dirs;

const TEMP_FILE_ATTEMPTS: usize = 5;

/// Resolve the configuration file path, ensuring the parent directory exists.
pub fn config_path() -> Result<PathBuf, ConfigError> {
    Ok(app_dirs::app_root_dir()?.join(CONFIG_FILE_NAME))
}

/// Load settings from the app directory, returning defaults if the file is missing.
pub fn load_or_default() -> Result<AppSettings, ConfigError> {
    load_from_path(&config_path()?)
}

/// Load settings from a specific file, returning defaults if it does not exist.
pub fn load_from_path(path: &Path) -> Result<AppSettings, ConfigError> {
    if !path.exists() {
        return Ok(AppSettings::default());
    }
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&text).map_err(|source| ConfigError::ParseToml {
        path: path.to_path_buf(),
        source,
    })
}

/// Persist settings to the app directory.
pub fn save(settings: &AppSettings) -> Result<(), ConfigError> {
    save_to_path(settings, &config_path()?)
}

/// Write settings to `path` atomically, creating parent directories as needed.
pub fn save_to_path(settings: &AppSettings, path: &Path) -> Result<(), ConfigError> {
    let dir = path
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    std::fs::create_dir_all(dir).map_err(|source| ConfigError::CreateDir {
        path: dir.to_path_buf(),
        source,
    })?;
    let data = toml::to_string_pretty(settings).map_err(|source| ConfigError::SerializeToml {
        path: path.to_path_buf(),
        source,
    })?;
    atomic_write(dir, path, data.as_bytes())
}

fn atomic_write(dir: &Path, path: &Path, data: &[u8]) -> Result<(), ConfigError> {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| CONFIG_FILE_NAME.to_string());
    let write_err = |path: &Path, source| ConfigError::Write {
        path: path.to_path_buf(),
        source,
    };

    let mut last_err = None;
    for _ in 0..TEMP_FILE_ATTEMPTS {
        let tmp_path = dir.join(format!("{file_name}.tmp-{}", temp_suffix()));
        let mut file = match std::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&tmp_path)
        {
            Ok(file) => file,
            Err(err) if err.kind() == std::io::ErrorKind::AlreadyExists => {
                last_err = Some(err);
                continue;
            }
            Err(err) => return Err(write_err(&tmp_path, err)),
        };
        let written = file.write_all(data).and_then(|()| file.sync_all());
        drop(file);
        if let Err(err) = written.and_then(|()| std::fs::rename(&tmp_path, path)) {
            let _ = std::fs::remove_file(&tmp_path);
            return Err(write_err(path, err));
        }
        return Ok(());
    }

    Err(write_err(
        path,
        last_err.unwrap_or_else(|| {
            std::io::Error::new(
                std::io::ErrorKind::AlreadyExists,
                "failed to create temporary config file",
            )
        }),
    ))
}

fn temp_suffix() -> String {
    let mut bytes = [0u8; 6];
    rand::rng().fill(&mut bytes);
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app_dirs::test_support::ConfigHomeGuard;
    use crate::prediction::ModelKind;
    use tempfile::tempdir;

    #[test]
    fn missing_file_loads_defaults() {
        let dir = tempdir().unwrap();
        let settings = load_from_path(&dir.path().join(CONFIG_FILE_NAME)).unwrap();
        assert_eq!(settings, AppSettings::default());
    }

    #[test]
    fn save_then_load_preserves_settings_and_leaves_no_temp_files() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join(CONFIG_FILE_NAME);
        let mut settings = AppSettings::default();
        settings.service.base_url = "http://192.168.1.20:8000".into();
        settings.view.last_model = ModelKind::Plant;

        save_to_path(&settings, &path).unwrap();

        assert_eq!(load_from_path(&path).unwrap(), settings);
        let entries: Vec<_> = std::fs::read_dir(path.parent().unwrap())
            .unwrap()
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(entries, vec![CONFIG_FILE_NAME.to_string()]);
    }

    #[test]
    fn invalid_toml_reports_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "[service\nbase_url = ").unwrap();
        let err = load_from_path(&path).unwrap_err();
        assert!(matches!(err, ConfigError::ParseToml { .. }));
        assert!(err.to_string().contains(CONFIG_FILE_NAME));
    }

    #[test]
    fn save_uses_app_directory() {
        let base = tempdir().unwrap();
        let _guard = ConfigHomeGuard::set(base.path().to_path_buf());
        let mut settings = AppSettings::default();
        settings.view.last_model = ModelKind::Pest;

        save(&settings).unwrap();

        let expected = base
            .path()
            .join(app_dirs::APP_DIR_NAME)
            .join(CONFIG_FILE_NAME);
        assert_eq!(config_path().unwrap(), expected);
        assert_eq!(load_or_default().unwrap().view.last_model, ModelKind::Pest);
    }
}
