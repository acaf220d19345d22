//! Localized console output.

use std::fmt::Display;
use std::path::Path;

use super::{Language, Messages};
use crate::platform::Platform;
use crate::storage::StorageConfig;

/// Renders user-facing text in one language.
#[derive(Debug, Clone, Copy)]
pub struct Console {
    language: Language,
}

impl Console {
    pub fn new(language: Language) -> Self {
        Self { language }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn messages(&self) -> &'static Messages {
        self.language.messages()
    }

    /// Prints a line to stdout.
    pub fn say(&self, line: impl Display) {
        println!("{}", line);
    }

    /// Prints a line to stderr.
    pub fn warn(&self, line: impl Display) {
        eprintln!("{}", line);
    }

    pub fn config_location(&self, path: &Path) -> String {
        format!("{} {}", self.messages().config_location, path.display())
    }

    pub fn error(&self, error: impl Display) -> String {
        fill(self.messages().error_prefix, error)
    }

    /// Lines telling the user how to rerun with elevated privileges.
    pub fn privilege_hints(&self, platform: &Platform, program: &str) -> Vec<String> {
        let messages = self.messages();
        let mut lines = vec![messages.privilege_error.to_string()];

        if platform.is_windows() {
            lines.push(messages.run_as_admin.to_string());
        } else {
            lines.push(messages.run_with_sudo.to_string());
            lines.push(fill(messages.sudo_example, program));
        }

        lines
    }

    /// Formats the managed fields for display.
    pub fn storage_summary(&self, config: &StorageConfig) -> String {
        let rows = [
            ("telemetry.machineId", &config.machine_id),
            ("telemetry.macMachineId", &config.mac_machine_id),
            ("telemetry.devDeviceId", &config.dev_device_id),
            ("telemetry.sqmId", &config.sqm_id),
            ("lastModified", &config.last_modified),
            ("version", &config.version),
        ];

        rows.iter()
            .map(|(key, value)| format!("  {:<24} {}", key, value))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

fn fill(template: &str, value: impl Display) -> String {
    template.replacen("{}", &value.to_string(), 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_privilege_hints_unix_include_sudo_example() {
        let console = Console::new(Language::En);
        let lines = console.privilege_hints(&Platform::Linux, "cursor-id-modifier");
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[2], "Example: sudo cursor-id-modifier");
    }

    #[test]
    fn test_privilege_hints_windows() {
        let console = Console::new(Language::PtBr);
        let lines = console.privilege_hints(&Platform::Windows, "ignored");
        assert_eq!(lines.len(), 2);
        assert!(lines[1].contains("Administrador"));
    }

    #[test]
    fn test_error_fills_prefix() {
        let console = Console::new(Language::Cn);
        assert_eq!(console.error("boom"), "程序发生严重错误: boom");
    }

    #[test]
    fn test_storage_summary_lists_every_managed_key() {
        let console = Console::new(Language::En);
        let config = StorageConfig {
            machine_id: "abc".to_string(),
            version: "1.0.1".to_string(),
            ..Default::default()
        };
        let summary = console.storage_summary(&config);
        assert_eq!(summary.lines().count(), 6);
        assert!(summary.contains("abc"));
        assert!(summary.contains("1.0.1"));
    }
}
