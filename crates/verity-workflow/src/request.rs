//! The renderer boundary: one request in, one reply out.

use serde::Serialize;
use verity_core::enums::TaskFilter;
use verity_core::responses::{TaskBoard, TaskView};

use crate::forms::{EditForm, NewTaskForm, VerificationForm};

/// A user interaction forwarded by the renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    AssignTask(NewTaskForm),
    OpenVerification { id: i64 },
    SubmitVerification { id: i64, form: VerificationForm },
    Complete { id: i64 },
    Edit { id: i64, form: EditForm },
    Delete { id: i64 },
    Board {
        filter: TaskFilter,
        search: Option<String>,
    },
}

/// What the renderer should display next.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Reply {
    /// The action succeeded. With `reset_form` set, the renderer clears the
    /// submitted form back to its defaults. `task_id` names the task acted on
    /// when it still exists.
    Ack {
        message: String,
        reset_form: bool,
        #[serde(skip_serializing_if = "Option::is_none")]
        task_id: Option<i64>,
    },
    /// Input was rejected; nothing changed.
    Invalid { message: String },
    /// Storage failed; the renderer shows the message and stays usable.
    Failed { message: String },
    /// Show the verification form for this task.
    VerificationForm { task: TaskView },
    /// Show the task list and dashboard.
    Board(TaskBoard),
}

impl Reply {
    pub(crate) fn ack(task_id: Option<i64>, message: impl Into<String>, reset_form: bool) -> Self {
        Self::Ack {
            message: message.into(),
            reset_form,
            task_id,
        }
    }

    /// Whether the request was carried out.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        !matches!(self, Self::Invalid { .. } | Self::Failed { .. })
    }
}
