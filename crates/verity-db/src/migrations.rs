//! Versioned schema migration runner.
//!
//! Brings an existing `tasks` table up to the current column set. Each step
//! runs in its own transaction together with its row in the
//! `schema_migrations` ledger, so a step is either fully applied and recorded
//! or not applied at all. Steps already in the ledger never run again.
//!
//! Tables created by [`VerityDb::ensure_schema`] already have the full column
//! set and are stamped with every version at creation.
//!
//! A failing step is rolled back and reported as a [`MigrationWarning`];
//! the remaining steps are skipped and startup continues.

use chrono::Utc;
use serde::Serialize;

use crate::VerityDb;
use crate::error::DatabaseError;
use crate::helpers::format_timestamp;

/// Column definitions of the current `tasks` table.
const TASK_COLUMNS_DDL: &str = include_str!("../migrations/tasks_columns.sql");
const SCHEMA_MIGRATIONS_DDL: &str = include_str!("../migrations/schema_migrations.sql");

/// Every column of the current `tasks` table, in table order.
const TASK_COLUMNS: [&str; 15] = [
    "id",
    "created_at",
    "title",
    "description",
    "category",
    "status",
    "start_date",
    "due_date",
    "priority",
    "document_path",
    "verification_status",
    "verification_comments",
    "verification_evidence_path",
    "verified_at",
    "reminder_sent",
];

const VERIFICATION_COLUMNS: &[(&str, &str)] = &[
    ("verification_comments", "TEXT"),
    ("verification_evidence_path", "TEXT"),
    ("verified_at", "TEXT"),
];

const REGULAR_COLUMNS: &[(&str, &str)] = &[
    ("title", "TEXT"),
    ("description", "TEXT"),
    ("start_date", "TEXT"),
    ("due_date", "TEXT"),
    ("priority", "TEXT DEFAULT 'Normal'"),
    ("category", "TEXT DEFAULT 'Other'"),
    ("status", "TEXT DEFAULT 'Pending'"),
    ("document_path", "TEXT"),
    ("verification_status", "TEXT"),
    ("reminder_sent", "INTEGER DEFAULT 0"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    AddColumns(&'static [(&'static str, &'static str)]),
    CreatedAtRebuild,
}

#[derive(Debug, Clone, Copy)]
struct Migration {
    version: u32,
    name: &'static str,
    step: Step,
}

/// All migrations in application order. Never reorder or renumber.
const MIGRATIONS: &[Migration] = &[
    Migration {
        version: 1,
        name: "verification_columns",
        step: Step::AddColumns(VERIFICATION_COLUMNS),
    },
    Migration {
        version: 2,
        name: "regular_columns",
        step: Step::AddColumns(REGULAR_COLUMNS),
    },
    Migration {
        version: 3,
        name: "created_at_rebuild",
        step: Step::CreatedAtRebuild,
    },
];

/// Highest version known to this build.
pub const LATEST_VERSION: u32 = 3;

/// A migration step that was applied during this run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppliedMigration {
    pub version: u32,
    pub name: &'static str,
    /// Human-readable schema changes (e.g. `"added column verified_at"`).
    /// Empty when the table already had everything the step provides.
    pub changes: Vec<String>,
}

/// A step that failed and was rolled back. Non-fatal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MigrationWarning {
    pub version: u32,
    pub name: &'static str,
    pub message: String,
}

/// What one migration run did.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MigrationReport {
    pub applied: Vec<AppliedMigration>,
    pub warnings: Vec<MigrationWarning>,
    /// Whether the `tasks` table was created from scratch.
    pub created_table: bool,
}

impl MigrationReport {
    /// True when the run changed nothing at all.
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.applied.is_empty() && self.warnings.is_empty() && !self.created_table
    }
}

/// `CREATE TABLE` statement for the current schema under `table`.
pub(crate) fn tasks_table_ddl(table: &str) -> String {
    format!("CREATE TABLE IF NOT EXISTS {table} (\n{TASK_COLUMNS_DDL})")
}

impl VerityDb {
    /// Apply every pending migration to an existing `tasks` table.
    ///
    /// A missing `tasks` table makes this a no-op; see [`Self::ensure_schema`].
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Migration` only when the ledger itself cannot
    /// be read or created. Failing steps are reported in the returned
    /// [`MigrationReport`] instead.
    pub async fn migrate(&self) -> Result<MigrationReport, DatabaseError> {
        let mut report = MigrationReport::default();
        if !self.table_exists("tasks").await? {
            return Ok(report);
        }

        self.conn
            .execute_batch(SCHEMA_MIGRATIONS_DDL)
            .await
            .map_err(|e| DatabaseError::Migration(format!("schema_migrations: {e}")))?;
        let applied = self.applied_versions().await?;

        for migration in MIGRATIONS {
            if applied.contains(&migration.version) {
                continue;
            }
            match self.apply(migration).await {
                Ok(changes) => {
                    tracing::info!(
                        version = migration.version,
                        name = migration.name,
                        changes = changes.len(),
                        "applied schema migration"
                    );
                    report.applied.push(AppliedMigration {
                        version: migration.version,
                        name: migration.name,
                        changes,
                    });
                }
                Err(error) => {
                    tracing::warn!(
                        version = migration.version,
                        name = migration.name,
                        %error,
                        "schema migration failed; skipping remaining steps"
                    );
                    report.warnings.push(MigrationWarning {
                        version: migration.version,
                        name: migration.name,
                        message: error.to_string(),
                    });
                    break;
                }
            }
        }
        Ok(report)
    }

    /// Create the `tasks` table with the full current schema if it does not
    /// exist, and stamp every migration version as applied.
    ///
    /// Returns whether the table was created.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Migration` if creation fails.
    pub async fn ensure_schema(&self) -> Result<bool, DatabaseError> {
        if self.table_exists("tasks").await? {
            return Ok(false);
        }

        let tx = self.conn.transaction().await?;
        let result = async {
            tx.execute(&tasks_table_ddl("tasks"), ()).await?;
            tx.execute_batch(SCHEMA_MIGRATIONS_DDL).await?;
            let now = format_timestamp(Utc::now());
            for migration in MIGRATIONS {
                tx.execute(
                    "INSERT OR IGNORE INTO schema_migrations (version, name, applied_at) VALUES (?1, ?2, ?3)",
                    libsql::params![i64::from(migration.version), migration.name, now.as_str()],
                )
                .await?;
            }
            Ok::<(), libsql::Error>(())
        }
        .await;

        match result {
            Ok(()) => {
                tx.commit()
                    .await
                    .map_err(|e| DatabaseError::Migration(format!("create tasks: {e}")))?;
                tracing::info!("created tasks table at schema version {LATEST_VERSION}");
                Ok(true)
            }
            Err(e) => {
                let _ = tx.rollback().await;
                Err(DatabaseError::Migration(format!("create tasks: {e}")))
            }
        }
    }

    /// Versions recorded in the ledger. Empty when the ledger does not exist.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the ledger query fails.
    pub async fn applied_versions(&self) -> Result<Vec<u32>, DatabaseError> {
        if !self.table_exists("schema_migrations").await? {
            return Ok(Vec::new());
        }
        let mut rows = self
            .conn
            .query("SELECT version FROM schema_migrations ORDER BY version", ())
            .await?;
        let mut versions = Vec::new();
        while let Some(row) = rows.next().await? {
            let version = row.get::<i64>(0)?;
            versions.push(u32::try_from(version).map_err(|_| {
                DatabaseError::InvalidState(format!("bad migration version {version}"))
            })?);
        }
        Ok(versions)
    }

    async fn apply(&self, migration: &Migration) -> Result<Vec<String>, DatabaseError> {
        let rebuild = migration.step == Step::CreatedAtRebuild;
        // PRAGMA foreign_keys is a no-op inside a transaction, so it brackets it.
        if rebuild {
            self.conn.execute("PRAGMA foreign_keys = OFF", ()).await?;
        }
        let result = self.apply_in_transaction(migration).await;
        if rebuild {
            self.conn.execute("PRAGMA foreign_keys = ON", ()).await?;
        }
        result
    }

    async fn apply_in_transaction(
        &self,
        migration: &Migration,
    ) -> Result<Vec<String>, DatabaseError> {
        let tx = self.conn.transaction().await?;

        let changes = match run_step(&tx, migration.step).await {
            Ok(changes) => changes,
            Err(e) => {
                let _ = tx.rollback().await;
                return Err(e);
            }
        };

        let recorded = tx
            .execute(
                "INSERT INTO schema_migrations (version, name, applied_at) VALUES (?1, ?2, ?3)",
                libsql::params![
                    i64::from(migration.version),
                    migration.name,
                    format_timestamp(Utc::now())
                ],
            )
            .await;
        if let Err(e) = recorded {
            let _ = tx.rollback().await;
            return Err(e.into());
        }

        tx.commit().await?;
        Ok(changes)
    }
}

async fn run_step(conn: &libsql::Connection, step: Step) -> Result<Vec<String>, DatabaseError> {
    let existing = column_names(conn, "tasks").await?;
    let mut changes = Vec::new();

    match step {
        Step::AddColumns(columns) => {
            for (column, ty) in columns {
                if existing.iter().any(|c| c == column) {
                    continue;
                }
                conn.execute(&format!("ALTER TABLE tasks ADD COLUMN {column} {ty}"), ())
                    .await
                    .map_err(|e| DatabaseError::Migration(format!("add column {column}: {e}")))?;
                changes.push(format!("added column {column}"));
            }
        }
        Step::CreatedAtRebuild => {
            if existing.iter().any(|c| c == "created_at") {
                return Ok(changes);
            }
            rebuild_with_created_at(conn).await?;
            changes.push(String::from("added column created_at"));
            changes.push(String::from("rebuilt tasks with NOT NULL created_at"));
        }
    }
    Ok(changes)
}

/// Add `created_at`, backfill it, then rebuild the table so the column is
/// `NOT NULL` with a default (SQLite cannot alter a column constraint).
async fn rebuild_with_created_at(conn: &libsql::Connection) -> Result<(), DatabaseError> {
    let columns = TASK_COLUMNS.join(", ");
    let statements = [
        String::from("ALTER TABLE tasks ADD COLUMN created_at TEXT"),
        String::from("UPDATE tasks SET created_at = datetime('now') WHERE created_at IS NULL"),
        String::from("DROP TABLE IF EXISTS tasks_new"),
        tasks_table_ddl("tasks_new"),
        format!("INSERT INTO tasks_new ({columns}) SELECT {columns} FROM tasks"),
        String::from("DROP TABLE tasks"),
        String::from("ALTER TABLE tasks_new RENAME TO tasks"),
    ];
    for sql in &statements {
        conn.execute(sql, ())
            .await
            .map_err(|e| DatabaseError::Migration(format!("created_at rebuild: {e}")))?;
    }
    Ok(())
}

/// Column names of `table`, in table order.
pub(crate) async fn column_names(
    conn: &libsql::Connection,
    table: &str,
) -> Result<Vec<String>, DatabaseError> {
    let mut rows = conn
        .query("SELECT name FROM pragma_table_info(?1)", [table])
        .await?;
    let mut names = Vec::new();
    while let Some(row) = rows.next().await? {
        names.push(row.get::<String>(0)?);
    }
    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    async fn raw_db() -> VerityDb {
        VerityDb::open_unmigrated(":memory:").await.unwrap()
    }

    #[tokio::test]
    async fn missing_table_is_a_noop() {
        let db = raw_db().await;
        let report = db.migrate().await.unwrap();
        assert!(report.is_noop());
        assert!(!db.table_exists("schema_migrations").await.unwrap());
    }

    #[tokio::test]
    async fn ensure_schema_stamps_all_versions() {
        let db = raw_db().await;
        assert!(db.ensure_schema().await.unwrap());
        assert!(!db.ensure_schema().await.unwrap());
        assert_eq!(db.applied_versions().await.unwrap(), vec![1, 2, 3]);

        let columns = column_names(db.conn(), "tasks").await.unwrap();
        assert_eq!(columns, TASK_COLUMNS.to_vec());

        let report = db.migrate().await.unwrap();
        assert!(report.is_noop());
    }

    #[tokio::test]
    async fn adds_missing_columns_to_legacy_table() {
        let db = raw_db().await;
        db.conn()
            .execute_batch(
                "CREATE TABLE tasks (id INTEGER PRIMARY KEY AUTOINCREMENT, created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP, title TEXT NOT NULL, status TEXT DEFAULT 'Pending');
                 INSERT INTO tasks (title) VALUES ('legacy');",
            )
            .await
            .unwrap();

        let report = db.migrate().await.unwrap();
        assert!(report.warnings.is_empty(), "{:?}", report.warnings);
        assert_eq!(
            report.applied.iter().map(|m| m.version).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
        assert_eq!(
            report.applied[0].changes,
            vec![
                "added column verification_comments",
                "added column verification_evidence_path",
                "added column verified_at",
            ]
        );
        // created_at already present: recorded with no changes.
        assert!(report.applied[2].changes.is_empty());

        let mut columns = column_names(db.conn(), "tasks").await.unwrap();
        columns.sort();
        let mut expected = TASK_COLUMNS.map(String::from).to_vec();
        expected.sort();
        assert_eq!(columns, expected);

        let mut rows = db
            .conn()
            .query("SELECT category, priority, reminder_sent FROM tasks", ())
            .await
            .unwrap();
        let row = rows.next().await.unwrap().unwrap();
        assert_eq!(row.get::<String>(0).unwrap(), "Other");
        assert_eq!(row.get::<String>(1).unwrap(), "Normal");
        assert_eq!(row.get::<i64>(2).unwrap(), 0);
    }

    #[tokio::test]
    async fn second_run_changes_nothing() {
        let db = raw_db().await;
        db.conn()
            .execute("CREATE TABLE tasks (id INTEGER PRIMARY KEY, title TEXT)", ())
            .await
            .unwrap();

        let first = db.migrate().await.unwrap();
        assert_eq!(first.applied.len(), 3);

        let before = column_names(db.conn(), "tasks").await.unwrap();
        let second = db.migrate().await.unwrap();
        assert!(second.is_noop(), "{second:?}");
        assert_eq!(column_names(db.conn(), "tasks").await.unwrap(), before);
    }

    #[tokio::test]
    async fn failed_step_rolls_back_and_halts() {
        let db = raw_db().await;
        // A NULL title cannot be copied into the rebuilt NOT NULL column.
        db.conn()
            .execute_batch(
                "CREATE TABLE tasks (id INTEGER PRIMARY KEY, title TEXT);
                 INSERT INTO tasks (id, title) VALUES (1, NULL);",
            )
            .await
            .unwrap();

        let report = db.migrate().await.unwrap();
        assert_eq!(report.applied.len(), 2);
        assert_eq!(report.warnings.len(), 1);
        assert_eq!(report.warnings[0].name, "created_at_rebuild");

        // The rebuild was rolled back: no created_at, no shadow table, row kept.
        let columns = column_names(db.conn(), "tasks").await.unwrap();
        assert!(!columns.contains(&"created_at".to_string()));
        assert!(!db.table_exists("tasks_new").await.unwrap());
        assert_eq!(db.applied_versions().await.unwrap(), vec![1, 2]);

        // The failed step is retried on the next run.
        let retry = db.migrate().await.unwrap();
        assert_eq!(retry.warnings.len(), 1);
        assert!(retry.applied.is_empty());
    }
}
