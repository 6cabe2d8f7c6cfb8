//! Service layer tying the database handle to the upload file store.
//!
//! `VerityService` owns a `VerityDb` and a `FileStore`. All repository
//! methods are implemented as `impl VerityService` blocks in `repos/`.

use std::path::PathBuf;

use crate::VerityDb;
use crate::error::DatabaseError;
use crate::files::FileStore;

pub struct VerityService {
    db: VerityDb,
    files: FileStore,
}

impl VerityService {
    /// Open (and migrate) a local database and attach an upload directory.
    ///
    /// # Arguments
    ///
    /// * `db_path` - Path to the libSQL database file, or `":memory:"` for tests.
    /// * `upload_dir` - Directory for attachments and evidence files. Created
    ///   on the first stored upload.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened.
    pub async fn new_local(
        db_path: &str,
        upload_dir: impl Into<PathBuf>,
    ) -> Result<Self, DatabaseError> {
        let db = VerityDb::open_local(db_path).await?;
        Ok(Self::from_db(db, FileStore::new(upload_dir)))
    }

    /// Create from an existing `VerityDb` (for testing).
    #[must_use]
    pub const fn from_db(db: VerityDb, files: FileStore) -> Self {
        Self { db, files }
    }

    /// Access the underlying database handle.
    #[must_use]
    pub const fn db(&self) -> &VerityDb {
        &self.db
    }

    /// Access the upload file store.
    #[must_use]
    pub const fn files(&self) -> &FileStore {
        &self.files
    }
}
