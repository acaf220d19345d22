//! Field-level checks for the tool settings.

use std::path::Path;

use crate::config::model::Settings;
use crate::lang::Language;
use crate::platform::paths::is_single_component;

use super::SettingsReport;

/// Checks every settings field.
pub fn check(settings: &Settings) -> SettingsReport {
    let mut report = SettingsReport::default();

    check_app_name(&settings.app_name, &mut report);

    if let Some(language) = &settings.language {
        check_language(language, &mut report);
    }

    if let Some(username) = &settings.username {
        check_username(username, &mut report);
    }

    if let Some(storage_path) = &settings.storage_path {
        check_storage_path(storage_path, &mut report);

        if settings.username.is_some() {
            report.warning("username", "Ignored because storage_path is set");
        }
    }

    report
}

fn check_app_name(app_name: &str, report: &mut SettingsReport) {
    if app_name.trim().is_empty() {
        report
            .error("app_name", "Application name cannot be empty")
            .hint("remove the field to use the default 'Cursor'");
    } else if !is_single_component(app_name) {
        report.error(
            "app_name",
            format!("Application name must be a single directory name: '{}'", app_name),
        );
    }
}

fn check_language(language: &str, report: &mut SettingsReport) {
    if language.parse::<Language>().is_ok() {
        return;
    }

    let closest = closest_code(&language.to_lowercase());
    report
        .error("language", format!("Unknown language '{}'", language))
        .hint(format!(
            "did you mean '{}'? supported: {}",
            closest,
            Language::CODES.join(", ")
        ));
}

fn check_username(username: &str, report: &mut SettingsReport) {
    if username.trim().is_empty() {
        report.error("username", "User name cannot be empty");
    } else if !is_single_component(username) {
        report.error(
            "username",
            format!("User name must not contain path separators: '{}'", username),
        );
    }
}

fn check_storage_path(path: &Path, report: &mut SettingsReport) {
    if !path.is_absolute() {
        report
            .error("storage_path", format!("Path must be absolute: '{}'", path.display()))
            .hint("use the full path to storage.json");
    } else if path.file_name().is_none() {
        report.error(
            "storage_path",
            format!("Path does not name a file: '{}'", path.display()),
        );
    } else if path.extension().map_or(true, |ext| ext != "json") {
        report.warning(
            "storage_path",
            format!("Path does not end in .json: '{}'", path.display()),
        );
    }
}

/// Nearest supported language code by Levenshtein distance.
fn closest_code(input: &str) -> &'static str {
    Language::CODES
        .iter()
        .min_by_key(|code| strsim::levenshtein(input, code))
        .copied()
        .unwrap_or("en")
}
