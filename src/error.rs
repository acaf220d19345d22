//! Error types for the storage identifier modifier.

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised by path resolution and the storage mutation engine.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Unsupported operating system: {platform}")]
    UnsupportedPlatform { platform: String },

    #[error("Cannot locate the {platform} user directory: no user name was given")]
    MissingIdentity { platform: String },

    #[error("Invalid user name '{name}': must be a single path component")]
    InvalidIdentity { name: String },

    #[error("Cannot locate the application data directory: APPDATA is not set")]
    MissingAppData,

    #[error("Storage file '{path}' is not a valid JSON object: {message}")]
    CorruptDocument { path: PathBuf, message: String },

    #[error("Permission denied on '{path}': {source}")]
    PermissionDenied { path: PathBuf, source: io::Error },

    #[error("I/O error on '{path}': {source}")]
    Io { path: PathBuf, source: io::Error },
}

impl StorageError {
    /// Classifies an I/O failure on `path` into `PermissionDenied` or `Io`.
    pub(crate) fn from_io(path: &Path, source: io::Error) -> Self {
        if source.kind() == io::ErrorKind::PermissionDenied {
            StorageError::PermissionDenied {
                path: path.to_path_buf(),
                source,
            }
        } else {
            StorageError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    }

    pub(crate) fn corrupt(path: &Path, message: impl Into<String>) -> Self {
        StorageError::CorruptDocument {
            path: path.to_path_buf(),
            message: message.into(),
        }
    }

    /// Returns true if the caller should retry with elevated privileges.
    pub fn is_permission_denied(&self) -> bool {
        matches!(self, StorageError::PermissionDenied { .. })
    }

    /// Returns the file path the error refers to, if any.
    pub fn path(&self) -> Option<&Path> {
        match self {
            StorageError::CorruptDocument { path, .. }
            | StorageError::PermissionDenied { path, .. }
            | StorageError::Io { path, .. } => Some(path),
            _ => None,
        }
    }
}

/// Tool settings loading and parsing errors.
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Failed to read settings file '{path}': {source}")]
    ReadFailed { path: PathBuf, source: io::Error },

    #[error("Failed to parse settings file '{path}': {message}")]
    ParseFailed { path: PathBuf, message: String },

    #[error("Settings validation failed with {error_count} error(s)")]
    ValidationFailed { error_count: usize },

    #[error("Unknown language '{0}'")]
    UnknownLanguage(String),
}
