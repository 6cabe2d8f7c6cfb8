//! Shared test utilities for verity-db unit tests.

use std::path::Path;

use chrono::NaiveDate;

use crate::VerityDb;
use crate::files::FileStore;
use crate::service::VerityService;
use crate::updates::task::NewTaskBuilder;
use verity_core::entities::Task;

/// In-memory service whose uploads go to `upload_dir`.
pub async fn test_service(upload_dir: &Path) -> VerityService {
    let db = VerityDb::open_local(":memory:").await.unwrap();
    VerityService::from_db(db, FileStore::new(upload_dir))
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Insert a task with just a title and due date.
pub async fn add_task(svc: &VerityService, title: &str, due: NaiveDate) -> Task {
    svc.create_task(NewTaskBuilder::new(title).due_date(Some(due)).build())
        .await
        .unwrap()
}
