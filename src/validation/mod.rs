//! Settings validation.
//!
//! Checks produce a [`SettingsReport`]; errors reject the settings file,
//! warnings are only logged.

pub mod report;
pub mod settings;

use std::fmt;

use crate::config::model::Settings;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
        })
    }
}

/// One problem with a settings field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsIssue {
    pub severity: Severity,
    /// Settings key, e.g. `storage_path`.
    pub field: &'static str,
    pub message: String,
    pub hint: Option<String>,
}

impl SettingsIssue {
    pub fn hint(&mut self, hint: impl Into<String>) -> &mut Self {
        self.hint = Some(hint.into());
        self
    }
}

impl fmt::Display for SettingsIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.severity, self.field, self.message)?;
        if let Some(hint) = &self.hint {
            write!(f, " ({})", hint)?;
        }
        Ok(())
    }
}

/// Every issue found in one settings file, in the order checked.
#[derive(Debug, Default)]
pub struct SettingsReport {
    issues: Vec<SettingsIssue>,
}

impl SettingsReport {
    pub fn error(
        &mut self,
        field: &'static str,
        message: impl Into<String>,
    ) -> &mut SettingsIssue {
        self.push(Severity::Error, field, message.into())
    }

    pub fn warning(
        &mut self,
        field: &'static str,
        message: impl Into<String>,
    ) -> &mut SettingsIssue {
        self.push(Severity::Warning, field, message.into())
    }

    fn push(
        &mut self,
        severity: Severity,
        field: &'static str,
        message: String,
    ) -> &mut SettingsIssue {
        self.issues.push(SettingsIssue {
            severity,
            field,
            message,
            hint: None,
        });
        let last = self.issues.len() - 1;
        &mut self.issues[last]
    }

    pub fn issues(&self) -> &[SettingsIssue] {
        &self.issues
    }

    pub fn errors(&self) -> impl Iterator<Item = &SettingsIssue> {
        self.by_severity(Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &SettingsIssue> {
        self.by_severity(Severity::Warning)
    }

    fn by_severity(&self, severity: Severity) -> impl Iterator<Item = &SettingsIssue> {
        self.issues.iter().filter(move |i| i.severity == severity)
    }

    /// Warnings alone do not reject the settings.
    pub fn is_accepted(&self) -> bool {
        self.errors().next().is_none()
    }

    pub fn error_count(&self) -> usize {
        self.errors().count()
    }
}

/// Runs every field check against the tool settings.
pub fn check(settings: &Settings) -> SettingsReport {
    settings::check(settings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_display_includes_hint() {
        let mut report = SettingsReport::default();
        report
            .error("language", "Unknown language 'cm'")
            .hint("did you mean 'cn'?");

        let issue = &report.issues()[0];
        assert_eq!(
            issue.to_string(),
            "[error] language: Unknown language 'cm' (did you mean 'cn'?)"
        );
    }

    #[test]
    fn test_warnings_do_not_reject() {
        let mut report = SettingsReport::default();
        report.warning("username", "Ignored because storage_path is set");

        assert!(report.is_accepted());
        assert_eq!(report.error_count(), 0);
        assert_eq!(report.warnings().count(), 1);

        report.error("app_name", "Application name cannot be empty");
        assert!(!report.is_accepted());
        assert_eq!(report.error_count(), 1);
    }
}
