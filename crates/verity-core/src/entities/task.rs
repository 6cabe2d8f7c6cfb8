use chrono::{DateTime, NaiveDate, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{TaskAction, TaskStatus, VerificationStatus};

/// A tracked unit of work together with its review state.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Task {
    pub id: i64,
    pub created_at: DateTime<Utc>,
    pub title: String,
    pub description: Option<String>,
    pub category: String,
    pub status: TaskStatus,
    pub start_date: Option<NaiveDate>,
    pub due_date: Option<NaiveDate>,
    pub priority: String,
    pub document_path: Option<String>,
    pub verification_status: VerificationStatus,
    pub verification_comments: Option<String>,
    pub verification_evidence_path: Option<String>,
    pub verified_at: Option<DateTime<Utc>>,
    pub reminder_sent: bool,
}

impl Task {
    pub const DEFAULT_CATEGORY: &'static str = "Other";
    pub const DEFAULT_PRIORITY: &'static str = "Normal";

    /// A task may enter review once it is completed and has not been
    /// reviewed yet.
    #[must_use]
    pub const fn is_verification_eligible(&self) -> bool {
        matches!(self.status, TaskStatus::Completed) && !self.verification_status.is_verified()
    }

    /// Actions a renderer should offer for this task.
    #[must_use]
    pub fn available_actions(&self) -> Vec<TaskAction> {
        let mut actions = Vec::with_capacity(4);
        if self.status != TaskStatus::Completed {
            actions.push(TaskAction::Complete);
        }
        actions.push(TaskAction::Edit);
        actions.push(TaskAction::Delete);
        if self.is_verification_eligible() {
            actions.push(TaskAction::Verify);
        }
        actions
    }

    /// Files on disk that belong to this task.
    pub fn stored_files(&self) -> impl Iterator<Item = &str> {
        [
            self.document_path.as_deref(),
            self.verification_evidence_path.as_deref(),
        ]
        .into_iter()
        .flatten()
    }
}
