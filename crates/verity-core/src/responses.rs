//! Response types handed to form renderers.
//!
//! These structs define the shape of what the workflow returns for display:
//! the task board with analytics and the outcome of a delete.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::analytics::AnalyticsReport;
use crate::entities::Task;
use crate::enums::{TaskAction, TaskFilter};

/// A task together with the buttons a renderer should show for it.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct TaskView {
    #[serde(flatten)]
    pub task: Task,
    pub actions: Vec<TaskAction>,
}

impl From<Task> for TaskView {
    fn from(task: Task) -> Self {
        let actions = task.available_actions();
        Self { task, actions }
    }
}

/// Filtered task list plus the analytics dashboard.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct TaskBoard {
    pub filter: TaskFilter,
    pub search: Option<String>,
    pub tasks: Vec<TaskView>,
    pub analytics: AnalyticsReport,
}

/// Outcome of deleting a task and its files.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct DeleteReport {
    pub id: i64,
    /// Whether a row was removed. Deleting a missing id is a no-op.
    pub deleted: bool,
    pub removed_files: Vec<String>,
    /// Files that could not be removed; the row is deleted regardless.
    pub file_errors: Vec<String>,
}
