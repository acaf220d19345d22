//! File mode handling for the storage file and its directories.

use std::fs::{self, File, Permissions};
use std::io;
use std::path::{Path, PathBuf};

use super::model::FileMode;

/// Creates `dir` and any missing parents (0755 on Unix).
pub(crate) fn create_dir_all(dir: &Path) -> io::Result<()> {
    let mut builder = fs::DirBuilder::new();
    builder.recursive(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(0o755);
    }

    builder.create(dir)
}

/// Applies `mode` to the file at `path`.
pub(crate) fn set_path_mode(path: &Path, mode: FileMode) -> io::Result<()> {
    let current = fs::metadata(path)?.permissions();
    fs::set_permissions(path, permissions_for(mode, current))
}

/// Applies `mode` to an open file handle.
pub(crate) fn set_file_mode(file: &File, mode: FileMode) -> io::Result<()> {
    let current = file.metadata()?.permissions();
    file.set_permissions(permissions_for(mode, current))
}

#[cfg(unix)]
fn permissions_for(mode: FileMode, _current: Permissions) -> Permissions {
    use std::os::unix::fs::PermissionsExt;
    Permissions::from_mode(mode.bits())
}

#[cfg(not(unix))]
fn permissions_for(mode: FileMode, mut current: Permissions) -> Permissions {
    current.set_readonly(mode.is_locked());
    current
}

/// Flushes directory metadata so a completed rename survives a crash.
/// Best effort: failures are ignored.
pub(crate) fn sync_dir(dir: &Path) {
    #[cfg(unix)]
    {
        if let Ok(handle) = File::open(dir) {
            let _ = handle.sync_all();
        }
    }

    #[cfg(not(unix))]
    let _ = dir;
}

/// A file whose mode was relaxed to writable for the duration of a write.
///
/// Dropping the guard puts the original permissions back. Call
/// [`RelaxedMode::release`] once the file has been replaced, since the
/// original permissions then belong to a file that no longer exists.
#[derive(Debug)]
pub(crate) struct RelaxedMode {
    path: PathBuf,
    original: Option<Permissions>,
}

impl RelaxedMode {
    /// Makes the file at `path` writable if it exists. A missing file is
    /// not an error and yields a guard with nothing to restore.
    pub(crate) fn acquire(path: &Path) -> io::Result<Self> {
        let original = match fs::metadata(path) {
            Ok(metadata) => Some(metadata.permissions()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => None,
            Err(e) => return Err(e),
        };

        let original = match original {
            Some(perms) => match set_path_mode(path, FileMode::Writable) {
                Ok(()) => Some(perms),
                Err(e) if e.kind() == io::ErrorKind::NotFound => None,
                Err(e) => return Err(e),
            },
            None => None,
        };

        Ok(Self {
            path: path.to_path_buf(),
            original,
        })
    }

    /// Forgets the original permissions without restoring them.
    pub(crate) fn release(mut self) {
        self.original = None;
    }
}

impl Drop for RelaxedMode {
    fn drop(&mut self) {
        if let Some(perms) = self.original.take() {
            let _ = fs::set_permissions(&self.path, perms);
        }
    }
}
