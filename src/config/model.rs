//! Tool settings data structures.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::platform::paths::DEFAULT_APP_NAME;

/// Optional settings file for the tool itself.
///
/// Every field has a default, so an absent file behaves like an empty one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    /// Console language code (en, cn, pt_br). Detected from the locale when unset.
    #[serde(default)]
    pub language: Option<String>,

    /// Application directory name under the per-user config root.
    #[serde(default = "default_app_name")]
    pub app_name: String,

    /// Account whose storage file is targeted on macOS and Linux.
    #[serde(default)]
    pub username: Option<String>,

    /// Explicit storage file location, bypassing path resolution.
    #[serde(default)]
    pub storage_path: Option<PathBuf>,

    /// Leave storage.json read-only after writing new identifiers.
    #[serde(default)]
    pub read_only: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            language: None,
            app_name: default_app_name(),
            username: None,
            storage_path: None,
            read_only: false,
        }
    }
}

fn default_app_name() -> String {
    DEFAULT_APP_NAME.to_string()
}
