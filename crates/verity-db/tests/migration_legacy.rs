//! Migrating a database file written by an older build.

use pretty_assertions::assert_eq;
use tempfile::TempDir;

use verity_core::enums::{TaskFilter, TaskStatus, VerificationStatus};
use verity_db::VerityDb;
use verity_db::files::FileStore;
use verity_db::service::VerityService;

/// Oldest known layout: no `created_at`, no verification columns.
const LEGACY_DDL: &str = "
    CREATE TABLE tasks (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        title TEXT NOT NULL,
        description TEXT,
        status TEXT DEFAULT 'Pending',
        due_date TEXT
    );
    INSERT INTO tasks (title, description, status, due_date)
        VALUES ('Draft report', 'Q2', 'Completed', '2025-06-01');
    INSERT INTO tasks (title, description, status, due_date)
        VALUES ('Book venue', NULL, NULL, '2025-05-20');
";

async fn write_legacy_db(path: &str) {
    let db = libsql::Builder::new_local(path).build().await.unwrap();
    let conn = db.connect().unwrap();
    conn.execute_batch(LEGACY_DDL).await.unwrap();
}

#[tokio::test]
async fn legacy_rows_survive_and_gain_created_at() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("tasks.db");
    let path = path.to_str().unwrap();
    write_legacy_db(path).await;

    let db = VerityDb::open_local(path).await.unwrap();
    let report = db.migration_report().clone();
    assert!(report.warnings.is_empty(), "{:?}", report.warnings);
    assert!(!report.created_table);
    assert_eq!(
        report.applied.iter().map(|m| m.name).collect::<Vec<_>>(),
        vec!["verification_columns", "regular_columns", "created_at_rebuild"]
    );
    assert_eq!(db.applied_versions().await.unwrap(), vec![1, 2, 3]);

    let svc = VerityService::from_db(db, FileStore::new(tmp.path().join("uploads")));
    let tasks = svc.list_tasks(TaskFilter::All, None).await.unwrap();
    assert_eq!(
        tasks.iter().map(|t| t.title.as_str()).collect::<Vec<_>>(),
        vec!["Book venue", "Draft report"]
    );
    let draft = &tasks[1];
    assert_eq!(draft.status, TaskStatus::Completed);
    assert_eq!(draft.description.as_deref(), Some("Q2"));
    assert_eq!(draft.verification_status, VerificationStatus::NotVerified);
    assert_eq!(draft.category, "Other");
    assert!(draft.created_at.timestamp() > 0);
    assert_eq!(tasks[0].status, TaskStatus::Pending);
}

#[tokio::test]
async fn rebuilt_table_enforces_created_at_and_keeps_autoincrement() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("tasks.db");
    let path = path.to_str().unwrap();
    write_legacy_db(path).await;

    let svc = VerityService::new_local(path, tmp.path().join("uploads"))
        .await
        .unwrap();
    let mut rows = svc
        .db()
        .conn()
        .query(
            "SELECT \"notnull\", dflt_value FROM pragma_table_info('tasks') WHERE name = 'created_at'",
            (),
        )
        .await
        .unwrap();
    let row = rows.next().await.unwrap().unwrap();
    assert_eq!(row.get::<i64>(0).unwrap(), 1);
    assert_eq!(row.get::<String>(1).unwrap(), "CURRENT_TIMESTAMP");

    let created = svc
        .create_task(verity_db::updates::task::NewTaskBuilder::new("New").build())
        .await
        .unwrap();
    assert_eq!(created.id, 3);
}

#[tokio::test]
async fn reopening_applies_nothing() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("tasks.db");
    let path = path.to_str().unwrap();
    write_legacy_db(path).await;

    let first = VerityDb::open_local(path).await.unwrap();
    assert_eq!(first.migration_report().applied.len(), 3);
    drop(first);

    let second = VerityDb::open_local(path).await.unwrap();
    assert!(second.migration_report().is_noop());
    let again = second.migrate().await.unwrap();
    assert!(again.applied.is_empty());
    assert!(!second.table_exists("tasks_new").await.unwrap());
}
