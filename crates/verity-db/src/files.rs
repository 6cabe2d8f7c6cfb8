//! Upload file store.
//!
//! Task attachments and verification evidence are written as individual files
//! under one upload directory and referenced from the `tasks` table by path
//! string. File writes are not coordinated with database writes: a crash
//! between the two can leave an orphaned file or a dangling path.

use std::fs::OpenOptions;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use uuid::Uuid;

use crate::error::DatabaseError;

/// Writes and removes uploaded blobs inside a fixed directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Create a store rooted at `root`. The directory is created on first
    /// write, not here.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The upload directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Save `bytes` under a fresh UUID name that keeps the original extension.
    ///
    /// Returns the stored path. Nothing is returned for a failed write, so a
    /// caller cannot persist a path to a file that does not exist.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::File` if the directory cannot be created or the
    /// file cannot be written (disk full, permission denied).
    pub fn store(&self, bytes: &[u8], original_name: &str) -> Result<String, DatabaseError> {
        std::fs::create_dir_all(&self.root).map_err(|source| DatabaseError::File {
            path: self.root.display().to_string(),
            source,
        })?;

        let file_name = match Path::new(original_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .filter(|ext| !ext.is_empty())
        {
            Some(ext) => format!("{}.{ext}", Uuid::new_v4()),
            None => Uuid::new_v4().to_string(),
        };
        let path = self.root.join(file_name);
        let shown = path.display().to_string();

        let write = || -> std::io::Result<()> {
            let mut file = OpenOptions::new().write(true).create_new(true).open(&path)?;
            file.write_all(bytes)?;
            file.sync_all()
        };
        if let Err(source) = write() {
            // Do not leave a truncated file behind.
            let _ = std::fs::remove_file(&path);
            return Err(DatabaseError::File {
                path: shown,
                source,
            });
        }

        tracing::debug!(path = %shown, original = original_name, size = bytes.len(), "stored upload");
        Ok(shown)
    }

    /// Remove a stored file. Returns whether a file was actually removed.
    ///
    /// A path that does not exist is not an error.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::File` for OS-level failures other than
    /// "not found". Callers treat this as non-fatal.
    pub fn delete(&self, path: &str) -> Result<bool, DatabaseError> {
        match std::fs::remove_file(path) {
            Ok(()) => {
                tracing::debug!(path, "removed upload");
                Ok(true)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(source) => Err(DatabaseError::File {
                path: path.to_string(),
                source,
            }),
        }
    }
}
