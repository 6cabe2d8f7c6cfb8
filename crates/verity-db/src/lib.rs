//! # verity-db
//!
//! libSQL storage for Verity: the `tasks` table, its versioned schema
//! migrations, and the upload file store for attachments and evidence.
//!
//! All repository operations live on [`service::VerityService`] as
//! `impl VerityService` blocks under [`repos`]. Every statement binds its
//! values as parameters; user text is never spliced into SQL.

pub mod error;
pub mod files;
pub mod helpers;
pub mod migrations;
pub mod repos;
pub mod service;
pub mod updates;

#[cfg(test)]
mod test_support;

use std::path::Path;

use error::DatabaseError;
use libsql::Builder;
use migrations::MigrationReport;

/// Database handle owning the libSQL database and its single connection.
///
/// `:memory:` databases are private to one connection, so the handle keeps
/// one connection for its whole lifetime instead of opening one per call.
pub struct VerityDb {
    #[allow(dead_code)]
    db: libsql::Database,
    conn: libsql::Connection,
    migration_report: MigrationReport,
}

impl VerityDb {
    /// Open a local database at `path` (or `":memory:"`), migrate an
    /// existing `tasks` table, and create it if it is missing.
    ///
    /// The parent directory of a file path is created when absent. Failing
    /// migration steps do not fail the open; they are available from
    /// [`Self::migration_report`].
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or the
    /// `tasks` table cannot be created.
    pub async fn open_local(path: &str) -> Result<Self, DatabaseError> {
        let mut db = Self::open_unmigrated(path).await?;
        let mut report = db.migrate().await?;
        report.created_table = db.ensure_schema().await?;
        db.migration_report = report;
        Ok(db)
    }

    /// Open without touching the schema.
    pub(crate) async fn open_unmigrated(path: &str) -> Result<Self, DatabaseError> {
        if path != ":memory:" {
            if let Some(parent) = Path::new(path).parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent).map_err(|source| DatabaseError::File {
                    path: parent.display().to_string(),
                    source,
                })?;
            }
        }

        let db = Builder::new_local(path).build().await?;
        let conn = db.connect()?;

        // Enable foreign keys (must be per-connection in SQLite)
        conn.execute("PRAGMA foreign_keys = ON", ())
            .await
            .map_err(|e| DatabaseError::Migration(format!("PRAGMA foreign_keys: {e}")))?;

        tracing::debug!(path, "opened database");
        Ok(Self {
            db,
            conn,
            migration_report: MigrationReport::default(),
        })
    }

    /// Access the underlying libSQL connection for direct queries.
    #[must_use]
    pub const fn conn(&self) -> &libsql::Connection {
        &self.conn
    }

    /// What the migration run at open time did.
    #[must_use]
    pub const fn migration_report(&self) -> &MigrationReport {
        &self.migration_report
    }

    /// Whether a table named `name` exists.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the catalog query fails.
    pub async fn table_exists(&self, name: &str) -> Result<bool, DatabaseError> {
        let mut rows = self
            .conn
            .query(
                "SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1",
                [name],
            )
            .await?;
        Ok(rows.next().await?.is_some())
    }
}
