//! Task insert/edit inputs and the new-task builder.

use chrono::NaiveDate;
use serde::Serialize;
use verity_core::enums::VerificationOutcome;

/// Values for a task insert. Unset category and priority fall back to the
/// column defaults ("Other", "Normal").
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NewTask {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    /// Path returned by `FileStore::store` for the task attachment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document_path: Option<String>,
}

pub struct NewTaskBuilder(NewTask);

impl NewTaskBuilder {
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self(NewTask {
            title: title.into(),
            ..NewTask::default()
        })
    }

    #[must_use]
    pub fn description(mut self, description: Option<String>) -> Self {
        self.0.description = description;
        self
    }

    #[must_use]
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.0.category = Some(category.into());
        self
    }

    #[must_use]
    pub fn priority(mut self, priority: impl Into<String>) -> Self {
        self.0.priority = Some(priority.into());
        self
    }

    #[must_use]
    pub const fn start_date(mut self, start_date: Option<NaiveDate>) -> Self {
        self.0.start_date = start_date;
        self
    }

    #[must_use]
    pub const fn due_date(mut self, due_date: Option<NaiveDate>) -> Self {
        self.0.due_date = due_date;
        self
    }

    #[must_use]
    pub fn document_path(mut self, document_path: Option<String>) -> Self {
        self.0.document_path = document_path;
        self
    }

    #[must_use]
    pub fn build(self) -> NewTask {
        self.0
    }
}

/// Replacement values for the editable fields. Verification columns are not
/// reachable through an edit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskEdit {
    pub title: String,
    pub description: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub due_date: Option<NaiveDate>,
}

/// A reviewer's decision on a completed task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerificationSubmission {
    pub outcome: VerificationOutcome,
    pub comments: String,
    /// Path returned by `FileStore::store` for the evidence file.
    pub evidence_path: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn builder_leaves_defaults_unset() {
        let task = NewTaskBuilder::new("Draft report")
            .due_date(NaiveDate::from_ymd_opt(2025, 6, 1))
            .build();
        assert_eq!(task.title, "Draft report");
        assert_eq!(task.category, None);
        assert_eq!(task.priority, None);
        assert_eq!(
            serde_json::to_value(&task).unwrap(),
            serde_json::json!({ "title": "Draft report", "due_date": "2025-06-01" })
        );
    }
}
