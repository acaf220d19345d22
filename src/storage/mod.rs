//! Storage file mutation engine.
//!
//! [`StorageManager`] owns every read and write of one `storage.json`.
//! Writes merge the managed telemetry keys into the existing JSON object,
//! keep every other key, and replace the file through a sibling temporary
//! file and an atomic rename.

pub mod model;
mod permissions;

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use serde_json::{Map, Value};
use tempfile::NamedTempFile;

use crate::error::StorageError;
pub use model::{FileMode, StorageConfig, TelemetryIds, SCHEMA_VERSION};
use model::{KEY_LAST_MODIFIED, KEY_VERSION};
use permissions::RelaxedMode;

type Document = Map<String, Value>;

/// Reads and atomically rewrites a single storage file.
///
/// Reads may run concurrently; a write excludes all other reads and writes
/// on the same instance. There is no cross-process locking: the rename makes
/// the last writer win and readers never see a partial file.
#[derive(Debug)]
pub struct StorageManager {
    path: PathBuf,
    lock: RwLock<()>,
}

impl StorageManager {
    /// Creates a manager bound to `path`. Nothing is touched on disk.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: RwLock::new(()),
        }
    }

    /// Returns the path of the storage file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the managed fields of the storage file.
    ///
    /// Returns `Ok(None)` when the file does not exist, and
    /// [`StorageError::CorruptDocument`] when it exists but is not a JSON
    /// object with string-valued managed keys.
    pub fn read(&self) -> Result<Option<StorageConfig>, StorageError> {
        let _guard = self.lock.read().unwrap_or_else(PoisonError::into_inner);

        let Some(document) = load_document(&self.path)? else {
            return Ok(None);
        };

        let config = serde_json::from_value(Value::Object(document))
            .map_err(|e| StorageError::corrupt(&self.path, e.to_string()))?;

        Ok(Some(config))
    }

    /// Writes `ids` into the storage file and leaves it in `mode`.
    ///
    /// Creates the file and its parent directories if needed. A previously
    /// locked file is relaxed for the write. On failure the original file
    /// keeps its content and permissions and no temporary file is left behind.
    pub fn write(&self, ids: &TelemetryIds, mode: FileMode) -> Result<(), StorageError> {
        self.write_with(ids, mode, Utc::now(), persist)
    }

    fn write_with<F>(
        &self,
        ids: &TelemetryIds,
        mode: FileMode,
        now: DateTime<Utc>,
        commit: F,
    ) -> Result<(), StorageError>
    where
        F: FnOnce(NamedTempFile, &Path) -> io::Result<()>,
    {
        let _guard = self.lock.write().unwrap_or_else(PoisonError::into_inner);

        let dir = self.parent_dir()?;
        permissions::create_dir_all(dir).map_err(|e| StorageError::from_io(dir, e))?;

        let relaxed =
            RelaxedMode::acquire(&self.path).map_err(|source| StorageError::PermissionDenied {
                path: self.path.clone(),
                source,
            })?;

        let mut document = load_document(&self.path)?.unwrap_or_default();
        apply_managed(&mut document, ids, now);

        let content = to_pretty_json(&document).map_err(|e| StorageError::Io {
            path: self.path.clone(),
            source: e.into(),
        })?;

        let temp = write_temp(dir, &self.path, &content, mode)?;
        commit(temp, &self.path).map_err(|e| StorageError::from_io(&self.path, e))?;

        // The path now names the new file; the old mode must not be restored onto it.
        relaxed.release();
        permissions::sync_dir(dir);

        Ok(())
    }

    fn parent_dir(&self) -> Result<&Path, StorageError> {
        self.path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .ok_or_else(|| StorageError::Io {
                path: self.path.clone(),
                source: io::Error::new(
                    io::ErrorKind::InvalidInput,
                    "storage path has no parent directory",
                ),
            })
    }
}

/// Loads the whole JSON object, or `None` if the file does not exist.
fn load_document(path: &Path) -> Result<Option<Document>, StorageError> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(StorageError::from_io(path, e)),
    };

    match serde_json::from_slice::<Value>(&bytes) {
        Ok(Value::Object(document)) => Ok(Some(document)),
        Ok(other) => Err(StorageError::corrupt(
            path,
            format!("top-level value is {}, expected an object", json_kind(&other)),
        )),
        Err(e) => Err(StorageError::corrupt(path, e.to_string())),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Overwrites the managed keys. Existing keys keep their position.
fn apply_managed(document: &mut Document, ids: &TelemetryIds, now: DateTime<Utc>) {
    for (key, value) in ids.entries() {
        document.insert(key.to_string(), Value::String(value.to_string()));
    }
    document.insert(
        KEY_LAST_MODIFIED.to_string(),
        Value::String(now.to_rfc3339_opts(SecondsFormat::Secs, true)),
    );
    document.insert(
        KEY_VERSION.to_string(),
        Value::String(SCHEMA_VERSION.to_string()),
    );
}

fn to_pretty_json(document: &Document) -> serde_json::Result<Vec<u8>> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    document.serialize(&mut serializer)?;
    Ok(buf)
}

/// Writes `content` to a temporary file next to `target` and sets its mode.
/// The file is removed again if any step fails.
fn write_temp(
    dir: &Path,
    target: &Path,
    content: &[u8],
    mode: FileMode,
) -> Result<NamedTempFile, StorageError> {
    let prefix = match target.file_name() {
        Some(name) => format!("{}.", name.to_string_lossy()),
        None => ".storage.".to_string(),
    };

    let mut temp = tempfile::Builder::new()
        .prefix(&prefix)
        .suffix(".tmp")
        .tempfile_in(dir)
        .map_err(|e| StorageError::from_io(dir, e))?;

    temp.write_all(content)
        .and_then(|()| temp.as_file().sync_all())
        .map_err(|e| StorageError::from_io(temp.path(), e))?;

    permissions::set_file_mode(temp.as_file(), mode)
        .map_err(|e| StorageError::from_io(temp.path(), e))?;

    Ok(temp)
}

/// Renames the temporary file over `target`. On failure the temporary file
/// is dropped, which deletes it.
fn persist(temp: NamedTempFile, target: &Path) -> io::Result<()> {
    temp.persist(target).map(drop).map_err(io::Error::from)
}
