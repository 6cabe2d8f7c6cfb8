//! Field values submitted by a form renderer.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use verity_core::enums::VerificationOutcome;

/// An uploaded file as received from the renderer.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Upload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl Upload {
    pub fn new(file_name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes: bytes.into(),
        }
    }
}

impl std::fmt::Debug for Upload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Upload")
            .field("file_name", &self.file_name)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// The "assign a new task" form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTaskForm {
    pub title: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub priority: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub due_date: Option<NaiveDate>,
    pub attachment: Option<Upload>,
}

impl NewTaskForm {
    /// A blank form: starts today, due `due_offset_days` later.
    ///
    /// A renderer reapplies these after an `Ack` with `reset_form: true`.
    #[must_use]
    pub fn defaults(today: NaiveDate, due_offset_days: u64) -> Self {
        Self {
            start_date: Some(today),
            due_date: today.checked_add_days(Days::new(due_offset_days)),
            ..Self::default()
        }
    }
}

/// The reviewer's form for a completed task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationForm {
    pub outcome: VerificationOutcome,
    pub comments: String,
    pub evidence: Option<Upload>,
}

/// The edit form. Only these fields are editable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditForm {
    pub title: String,
    pub description: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub due_date: Option<NaiveDate>,
}
