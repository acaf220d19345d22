//! Plain-text rendering of a [`SettingsReport`].

use std::fmt::Write;
use std::path::Path;

use super::SettingsReport;

/// Renders the report for the settings file at `source`, errors first.
pub fn render(report: &SettingsReport, source: &Path) -> String {
    let mut out = format!("Settings file {}", source.display());

    if report.issues().is_empty() {
        out.push_str(": ok");
        return out;
    }

    out.push(':');
    for issue in report.errors().chain(report.warnings()) {
        let _ = write!(out, "\n  {}", issue);
    }

    let errors = report.error_count();
    let warnings = report.issues().len() - errors;
    let _ = write!(out, "\n{} error(s), {} warning(s)", errors, warnings);
    if !report.is_accepted() {
        out.push_str("; nothing was changed");
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_clean_report() {
        let report = SettingsReport::default();
        assert_eq!(
            render(&report, Path::new("tool.yaml")),
            "Settings file tool.yaml: ok"
        );
    }

    #[test]
    fn test_render_lists_errors_before_warnings() {
        let mut report = SettingsReport::default();
        report.warning("read_only", "careful");
        report
            .error("language", "Unknown language 'cm'")
            .hint("did you mean 'cn'?");

        let text = render(&report, Path::new("tool.yaml"));
        let error_at = text.find("[error] language").unwrap();
        let warning_at = text.find("[warning] read_only").unwrap();
        assert!(error_at < warning_at);
        assert!(text.starts_with("Settings file tool.yaml:"));
        assert!(text.contains("(did you mean 'cn'?)"));
        assert!(text.ends_with("1 error(s), 1 warning(s); nothing was changed"));
    }
}
