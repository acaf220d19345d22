//! Storage file path resolution.

use std::path::{Path, PathBuf};

use super::{Environment, Platform};
use crate::error::StorageError;

/// Default application directory name under the per-user config root.
pub const DEFAULT_APP_NAME: &str = "Cursor";

/// Environment variables consulted for the user name, in priority order.
/// `SUDO_USER` comes first so an elevated run still targets the invoking user.
const USER_VARS: [&str; 3] = ["SUDO_USER", "USER", "USERNAME"];

/// Inputs to path resolution gathered from the process boundary.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathHints {
    /// Account name used to build Unix home directory paths.
    pub username: Option<String>,
    /// Per-user application data root (`APPDATA` on Windows).
    pub app_data: Option<PathBuf>,
}

impl PathHints {
    /// Collects hints from the environment. An explicit user name wins over
    /// anything found in the environment.
    pub fn from_env(env: &dyn Environment, explicit_user: Option<&str>) -> Self {
        let username = explicit_user
            .map(str::to_string)
            .or_else(|| USER_VARS.iter().find_map(|key| env.var(key)));

        Self {
            username,
            app_data: env.var("APPDATA").map(PathBuf::from),
        }
    }
}

/// Resolves the absolute path of `storage.json` for `app_name`.
///
/// Pure path arithmetic: nothing is read from or written to disk.
pub fn resolve(
    platform: &Platform,
    hints: &PathHints,
    app_name: &str,
) -> Result<PathBuf, StorageError> {
    let app_dir = match platform {
        Platform::Windows => {
            let root = hints.app_data.as_deref().ok_or(StorageError::MissingAppData)?;
            root.join(app_name)
        }
        Platform::MacOs => user_home(platform, hints, "/Users")?
            .join("Library")
            .join("Application Support")
            .join(app_name),
        Platform::Linux => user_home(platform, hints, "/home")?
            .join(".config")
            .join(app_name),
        Platform::Other(os) => {
            return Err(StorageError::UnsupportedPlatform {
                platform: os.clone(),
            })
        }
    };

    Ok(app_dir.join("User").join("globalStorage").join("storage.json"))
}

fn user_home(platform: &Platform, hints: &PathHints, root: &str) -> Result<PathBuf, StorageError> {
    let name = hints
        .username
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .ok_or_else(|| StorageError::MissingIdentity {
            platform: platform.to_string(),
        })?;

    if !is_single_component(name) {
        return Err(StorageError::InvalidIdentity {
            name: name.to_string(),
        });
    }

    Ok(Path::new(root).join(name))
}

/// Returns true if `name` is a plain file name with no separators or dot segments.
pub(crate) fn is_single_component(name: &str) -> bool {
    !name.contains(['/', '\\']) && name != "." && name != ".."
}
