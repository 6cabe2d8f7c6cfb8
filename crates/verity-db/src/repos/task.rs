//! Task repository: CRUD, list filtering and search, verification writes.

use chrono::{DateTime, Utc};

use verity_core::entities::Task;
use verity_core::enums::{TaskFilter, TaskStatus, VerificationStatus};
use verity_core::responses::DeleteReport;
use verity_core::validation::{optional_text, require_text};

use crate::error::DatabaseError;
use crate::helpers::{
    ColumnIndex, escape_like, format_optional_date, format_timestamp, parse_datetime,
    parse_optional_date, parse_optional_datetime,
};
use crate::service::VerityService;
use crate::updates::task::{NewTask, TaskEdit, VerificationSubmission};

/// Decode a `tasks` row by column name.
///
/// Columns the table lacks (a migration step failed) read as their defaults.
/// A row without `created_at` reports the Unix epoch. A stored value that
/// does not decode (unknown status, non-ISO date) is logged and replaced by
/// the column default so one odd row cannot hide the rest of the board.
pub(crate) fn row_to_task(cols: &ColumnIndex, row: &libsql::Row) -> Result<Task, DatabaseError> {
    let id = cols.i64(row, "id")?;
    let created_at = match cols.opt_string(row, "created_at")? {
        Some(s) => or_default(id, "created_at", parse_datetime(&s), DateTime::<Utc>::UNIX_EPOCH),
        None => DateTime::<Utc>::UNIX_EPOCH,
    };
    let status = cols.opt_string(row, "status")?;
    let start_date = cols.opt_string(row, "start_date")?;
    let due_date = cols.opt_string(row, "due_date")?;
    let verification_status = cols.opt_string(row, "verification_status")?;
    let verified_at = cols.opt_string(row, "verified_at")?;

    Ok(Task {
        id,
        created_at,
        title: cols.string_or(row, "title", "")?,
        description: cols.opt_string(row, "description")?,
        category: cols.string_or(row, "category", Task::DEFAULT_CATEGORY)?,
        status: or_default(
            id,
            "status",
            TaskStatus::from_stored(status.as_deref()),
            TaskStatus::Pending,
        ),
        start_date: or_default(id, "start_date", parse_optional_date(start_date.as_deref()), None),
        due_date: or_default(id, "due_date", parse_optional_date(due_date.as_deref()), None),
        priority: cols.string_or(row, "priority", Task::DEFAULT_PRIORITY)?,
        document_path: cols.opt_string(row, "document_path")?,
        verification_status: or_default(
            id,
            "verification_status",
            VerificationStatus::from_stored(verification_status.as_deref()),
            VerificationStatus::NotVerified,
        ),
        verification_comments: cols.opt_string(row, "verification_comments")?,
        verification_evidence_path: cols.opt_string(row, "verification_evidence_path")?,
        verified_at: or_default(
            id,
            "verified_at",
            parse_optional_datetime(verified_at.as_deref()),
            None,
        ),
        reminder_sent: cols.opt_i64(row, "reminder_sent")?.unwrap_or(0) != 0,
    })
}

fn or_default<T, E: std::fmt::Display>(
    id: i64,
    column: &'static str,
    decoded: Result<T, E>,
    fallback: T,
) -> T {
    decoded.unwrap_or_else(|error| {
        tracing::warn!(id, column, %error, "unreadable stored value, using default");
        fallback
    })
}

impl VerityService {
    /// Insert a new task (status Pending, not verified) and return it.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Validation` for a blank title (nothing is
    /// inserted) and a storage error if the insert fails.
    pub async fn create_task(&self, new: NewTask) -> Result<Task, DatabaseError> {
        let title = require_text("a task title", &new.title)?;
        let category = optional_text(new.category.as_deref())
            .unwrap_or_else(|| Task::DEFAULT_CATEGORY.to_string());
        let priority = optional_text(new.priority.as_deref())
            .unwrap_or_else(|| Task::DEFAULT_PRIORITY.to_string());

        self.db()
            .conn()
            .execute(
                "INSERT INTO tasks (created_at, title, description, category, status, start_date,
                                    due_date, priority, document_path, verification_status, reminder_sent)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, 0)",
                libsql::params![
                    format_timestamp(Utc::now()),
                    title.as_str(),
                    optional_text(new.description.as_deref()),
                    category,
                    TaskStatus::Pending.as_str(),
                    format_optional_date(new.start_date),
                    format_optional_date(new.due_date),
                    priority,
                    new.document_path,
                    VerificationStatus::NotVerified.as_str()
                ],
            )
            .await?;

        let id = self.db().conn().last_insert_rowid();
        tracing::debug!(id, title = %title, "created task");
        self.get_task(id).await?.ok_or(DatabaseError::NoResult)
    }

    /// Fetch one task.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails or the row cannot be decoded.
    pub async fn get_task(&self, id: i64) -> Result<Option<Task>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query("SELECT * FROM tasks WHERE id = ?1", [id])
            .await?;
        let cols = ColumnIndex::from_rows(&rows);
        match rows.next().await? {
            Some(row) => Ok(Some(row_to_task(&cols, &row)?)),
            None => Ok(None),
        }
    }

    /// List tasks matching `filter` and, when non-empty, containing `search`
    /// in the title or description. Ordered by due date, then id.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails or a row cannot be decoded.
    pub async fn list_tasks(
        &self,
        filter: TaskFilter,
        search: Option<&str>,
    ) -> Result<Vec<Task>, DatabaseError> {
        let mut conditions: Vec<String> = Vec::new();
        let mut params: Vec<libsql::Value> = Vec::new();

        match filter {
            TaskFilter::All => {}
            // Anything not stored as Completed (any case, NULL, unknown)
            // decodes as Pending, so the filters split on that one value.
            TaskFilter::Pending | TaskFilter::Completed => {
                let op = if filter == TaskFilter::Pending { "<>" } else { "=" };
                params.push(TaskStatus::Completed.as_str().to_ascii_lowercase().into());
                conditions.push(format!(
                    "LOWER(TRIM(COALESCE(status, ''))) {op} ?{}",
                    params.len()
                ));
            }
            TaskFilter::Verified => {
                params.push(format!("{}%", VerificationStatus::VERIFIED_PREFIX).into());
                conditions.push(format!("verification_status LIKE ?{}", params.len()));
            }
        }

        if let Some(text) = search.filter(|s| !s.is_empty()) {
            params.push(format!("%{}%", escape_like(text)).into());
            let n = params.len();
            conditions.push(format!(
                "(title LIKE ?{n} ESCAPE '\\' OR description LIKE ?{n} ESCAPE '\\')"
            ));
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", conditions.join(" AND "))
        };
        let sql = format!("SELECT * FROM tasks{where_clause} ORDER BY due_date ASC, id ASC");

        let mut rows = self
            .db()
            .conn()
            .query(&sql, libsql::params_from_iter(params))
            .await?;
        let cols = ColumnIndex::from_rows(&rows);
        let mut tasks = Vec::new();
        while let Some(row) = rows.next().await? {
            tasks.push(row_to_task(&cols, &row)?);
        }
        Ok(tasks)
    }

    /// Set a task's status and return the updated task.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` if no task has this id.
    pub async fn update_status(&self, id: i64, status: TaskStatus) -> Result<Task, DatabaseError> {
        let changed = self
            .db()
            .conn()
            .execute(
                "UPDATE tasks SET status = ?1 WHERE id = ?2",
                libsql::params![status.as_str(), id],
            )
            .await?;
        if changed == 0 {
            return Err(DatabaseError::NotFound { id });
        }
        tracing::debug!(id, status = %status, "updated task status");
        self.get_task(id).await?.ok_or(DatabaseError::NotFound { id })
    }

    /// Replace title, description and dates. Verification fields are untouched.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Validation` for a blank title and
    /// `DatabaseError::NotFound` if no task has this id.
    pub async fn update_fields(&self, id: i64, edit: TaskEdit) -> Result<Task, DatabaseError> {
        let title = require_text("a task title", &edit.title)?;
        let changed = self
            .db()
            .conn()
            .execute(
                "UPDATE tasks SET title = ?1, description = ?2, start_date = ?3, due_date = ?4
                 WHERE id = ?5",
                libsql::params![
                    title,
                    optional_text(edit.description.as_deref()),
                    format_optional_date(edit.start_date),
                    format_optional_date(edit.due_date),
                    id
                ],
            )
            .await?;
        if changed == 0 {
            return Err(DatabaseError::NotFound { id });
        }
        tracing::debug!(id, "edited task");
        self.get_task(id).await?.ok_or(DatabaseError::NotFound { id })
    }

    /// Record a verification outcome with comments and optional evidence.
    ///
    /// Eligibility (completed and not yet verified) is checked by the caller;
    /// this only writes the review columns and stamps `verified_at`.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Validation` for blank comments and
    /// `DatabaseError::NotFound` if no task has this id.
    pub async fn submit_verification(
        &self,
        id: i64,
        submission: VerificationSubmission,
    ) -> Result<Task, DatabaseError> {
        let comments = require_text("verification comments", &submission.comments)?;
        let status = submission.outcome.status();
        let changed = self
            .db()
            .conn()
            .execute(
                "UPDATE tasks SET verification_status = ?1, verification_comments = ?2,
                                  verification_evidence_path = ?3, verified_at = ?4
                 WHERE id = ?5",
                libsql::params![
                    status.as_str(),
                    comments,
                    submission.evidence_path,
                    format_timestamp(Utc::now()),
                    id
                ],
            )
            .await?;
        if changed == 0 {
            return Err(DatabaseError::NotFound { id });
        }
        tracing::info!(id, status = %status, "recorded verification");
        self.get_task(id).await?.ok_or(DatabaseError::NotFound { id })
    }

    /// Delete a task and its stored files.
    ///
    /// File removal failures are collected in the report and logged; the row
    /// is deleted regardless. A missing id yields `deleted: false`.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the lookup or the row delete fails.
    pub async fn delete_task(&self, id: i64) -> Result<DeleteReport, DatabaseError> {
        let mut report = DeleteReport {
            id,
            ..DeleteReport::default()
        };
        let Some(task) = self.get_task(id).await? else {
            return Ok(report);
        };

        for path in task.stored_files() {
            match self.files().delete(path) {
                Ok(true) => report.removed_files.push(path.to_string()),
                Ok(false) => {}
                Err(error) => {
                    tracing::warn!(id, path, %error, "failed to remove task file");
                    report.file_errors.push(error.to_string());
                }
            }
        }

        let changed = self
            .db()
            .conn()
            .execute("DELETE FROM tasks WHERE id = ?1", [id])
            .await?;
        report.deleted = changed > 0;
        tracing::debug!(id, files = report.removed_files.len(), "deleted task");
        Ok(report)
    }
}
