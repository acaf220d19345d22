//! Settings file loading and parsing.

use std::io;
use std::path::Path;

use anyhow::{Context, Result};

use super::model::Settings;
use crate::error::SettingsError;
use crate::validation::{self, report};

/// Loads the settings file from disk. A missing or empty file yields defaults.
pub fn load_from_path(path: &Path) -> Result<Settings, SettingsError> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "No settings file, using defaults");
            return Ok(Settings::default());
        }
        Err(e) => {
            return Err(SettingsError::ReadFailed {
                path: path.to_path_buf(),
                source: e,
            })
        }
    };

    if content.trim().is_empty() {
        return Ok(Settings::default());
    }

    let settings: Settings =
        serde_yaml::from_str(&content).map_err(|e| SettingsError::ParseFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    Ok(settings)
}

/// Loads and fully validates the settings file.
pub fn load_and_validate(path: &Path) -> Result<Settings> {
    let settings = load_from_path(path).context("Failed to load settings")?;

    let report = validation::check(&settings);

    for issue in report.warnings() {
        tracing::warn!(
            field = issue.field,
            message = %issue.message,
            hint = ?issue.hint,
            "Settings validation warning"
        );
    }

    if !report.is_accepted() {
        tracing::error!("{}", report::render(&report, path));
        anyhow::bail!(SettingsError::ValidationFailed {
            error_count: report.error_count()
        });
    }

    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let settings = load_from_path(&temp_dir.path().join("settings.yaml")).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_empty_file_gives_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("settings.yaml");
        std::fs::write(&path, "\n").unwrap();
        assert_eq!(load_from_path(&path).unwrap(), Settings::default());
    }

    #[test]
    fn test_parse_failure_names_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("settings.yaml");
        std::fs::write(&path, "read_only: [not, a, bool]").unwrap();

        let err = load_from_path(&path).unwrap_err();
        assert!(matches!(err, SettingsError::ParseFailed { .. }));
        assert!(err.to_string().contains("settings.yaml"));
    }

    #[test]
    fn test_load_and_validate_rejects_invalid_settings() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("settings.yaml");
        std::fs::write(&path, "app_name: \"\"\nlanguage: klingon\n").unwrap();

        let err = load_and_validate(&path).unwrap_err();
        let settings_err = err.downcast_ref::<SettingsError>().unwrap();
        assert!(matches!(
            settings_err,
            SettingsError::ValidationFailed { error_count: 2 }
        ));
    }

    #[test]
    fn test_load_and_validate_accepts_valid_settings() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("settings.yaml");
        std::fs::write(&path, "language: cn\nread_only: true\n").unwrap();

        let settings = load_and_validate(&path).unwrap();
        assert!(settings.read_only);
    }
}
