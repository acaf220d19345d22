//! Console message languages and locale detection.
//!
//! The language is chosen once at startup and handed to [`Console`]
//! explicitly; nothing here keeps process-wide state.

pub mod console;
pub mod messages;

use std::fmt;
use std::str::FromStr;

use crate::error::SettingsError;
use crate::platform::Environment;
pub use console::Console;
pub use messages::Messages;

/// Locale variables checked during detection, in priority order.
const LOCALE_VARS: [&str; 3] = ["LANG", "LANGUAGE", "LC_ALL"];

/// Supported console languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Language {
    #[default]
    En,
    Cn,
    PtBr,
}

impl Language {
    /// Canonical codes accepted in settings files and on the command line.
    pub const CODES: [&'static str; 3] = ["en", "cn", "pt_br"];

    pub fn code(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Cn => "cn",
            Language::PtBr => "pt_br",
        }
    }

    /// Returns the string table for this language.
    pub fn messages(self) -> &'static Messages {
        match self {
            Language::En => &messages::EN,
            Language::Cn => &messages::CN,
            Language::PtBr => &messages::PT_BR,
        }
    }

    /// Detects the language from locale environment variables.
    ///
    /// Chinese is checked across all variables before Portuguese; anything
    /// else falls back to English.
    pub fn detect(env: &dyn Environment) -> Self {
        let values: Vec<String> = LOCALE_VARS
            .iter()
            .filter_map(|key| env.var(key))
            .map(|v| v.to_lowercase())
            .collect();

        if values.iter().any(|v| v.contains("zh")) {
            return Language::Cn;
        }

        if values.iter().any(|v| is_brazilian_portuguese(v)) {
            return Language::PtBr;
        }

        Language::En
    }
}

fn is_brazilian_portuguese(locale: &str) -> bool {
    ["pt_br", "pt-br", "portuguese", "brasil"]
        .iter()
        .any(|marker| locale.contains(marker))
}

impl FromStr for Language {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "en" | "english" => Ok(Language::En),
            "cn" | "zh" | "zh_cn" | "zh-cn" | "chinese" => Ok(Language::Cn),
            "pt_br" | "pt-br" | "portuguese" => Ok(Language::PtBr),
            _ => Err(SettingsError::UnknownLanguage(s.to_string())),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::MockEnvironment;

    fn env_with(pairs: &'static [(&'static str, &'static str)]) -> MockEnvironment {
        let mut env = MockEnvironment::new();
        env.expect_var().returning(move |key| {
            pairs
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| v.to_string())
        });
        env
    }

    #[test]
    fn test_detect_defaults_to_english() {
        assert_eq!(Language::detect(&env_with(&[])), Language::En);
        assert_eq!(
            Language::detect(&env_with(&[("LANG", "en_US.UTF-8")])),
            Language::En
        );
    }

    #[test]
    fn test_detect_chinese() {
        assert_eq!(
            Language::detect(&env_with(&[("LANG", "zh_CN.UTF-8")])),
            Language::Cn
        );
    }

    #[test]
    fn test_detect_portuguese() {
        assert_eq!(
            Language::detect(&env_with(&[("LC_ALL", "pt_BR.UTF-8")])),
            Language::PtBr
        );
    }

    #[test]
    fn test_detect_chinese_wins_over_portuguese() {
        assert_eq!(
            Language::detect(&env_with(&[("LANG", "pt_BR.UTF-8"), ("LC_ALL", "zh_TW")])),
            Language::Cn
        );
    }

    #[test]
    fn test_from_str_accepts_aliases() {
        assert_eq!("EN".parse::<Language>().unwrap(), Language::En);
        assert_eq!("zh".parse::<Language>().unwrap(), Language::Cn);
        assert_eq!("pt-BR".parse::<Language>().unwrap(), Language::PtBr);
        assert!(matches!(
            "fr".parse::<Language>(),
            Err(SettingsError::UnknownLanguage(_))
        ));
    }

    #[test]
    fn test_codes_round_trip() {
        for code in Language::CODES {
            assert_eq!(code.parse::<Language>().unwrap().code(), code);
        }
    }
}
