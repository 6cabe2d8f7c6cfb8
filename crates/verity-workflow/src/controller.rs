//! Workflow controller: validation, upload handling, repository calls.

use chrono::NaiveDate;

use verity_config::WorkflowConfig;
use verity_core::entities::Task;
use verity_core::enums::{TaskFilter, TaskStatus, UploadKind};
use verity_core::responses::{DeleteReport, TaskBoard, TaskView};
use verity_core::validation::{check_extension, optional_text, require_text};
use verity_db::service::VerityService;
use verity_db::updates::task::{NewTaskBuilder, TaskEdit, VerificationSubmission};

use crate::error::WorkflowError;
use crate::forms::{EditForm, NewTaskForm, Upload, VerificationForm};
use crate::request::{Reply, Request};

pub struct WorkflowController {
    service: VerityService,
    config: WorkflowConfig,
}

impl WorkflowController {
    #[must_use]
    pub const fn new(service: VerityService, config: WorkflowConfig) -> Self {
        Self { service, config }
    }

    #[must_use]
    pub const fn service(&self) -> &VerityService {
        &self.service
    }

    #[must_use]
    pub const fn config(&self) -> &WorkflowConfig {
        &self.config
    }

    /// A fresh new-task form with the configured default dates.
    #[must_use]
    pub fn new_task_form(&self, today: NaiveDate) -> NewTaskForm {
        let offset = u64::try_from(self.config.default_due_offset_days).unwrap_or_default();
        NewTaskForm::defaults(today, offset)
    }

    /// Dispatch a renderer request. Every outcome, including failures,
    /// becomes a [`Reply`].
    pub async fn handle(&self, request: Request) -> Reply {
        let result = match request {
            Request::AssignTask(form) => self.assign_task(form).await.map(|task| {
                Reply::ack(
                    Some(task.id),
                    format!("Task '{}' assigned successfully!", task.title),
                    true,
                )
            }),
            Request::OpenVerification { id } => self
                .open_verification(id)
                .await
                .map(|task| Reply::VerificationForm { task: task.into() }),
            Request::SubmitVerification { id, form } => self
                .submit_verification(id, form)
                .await
                .map(|task| {
                    Reply::ack(
                        Some(task.id),
                        format!("Task '{}' marked as {}", task.title, task.verification_status),
                        true,
                    )
                }),
            Request::Complete { id } => self
                .complete(id)
                .await
                .map(|task| {
                    Reply::ack(
                        Some(task.id),
                        format!("Task '{}' marked as completed!", task.title),
                        false,
                    )
                }),
            Request::Edit { id, form } => self
                .edit(id, form)
                .await
                .map(|task| {
                    Reply::ack(
                        Some(task.id),
                        format!("Task '{}' updated successfully!", task.title),
                        true,
                    )
                }),
            Request::Delete { id } => self.delete(id).await.map(|report| delete_ack(&report)),
            Request::Board { filter, search } => {
                self.board(filter, search.as_deref()).await.map(Reply::Board)
            }
        };

        result.unwrap_or_else(|error| match error {
            WorkflowError::Validation(message) => Reply::Invalid { message },
            WorkflowError::Storage(error) => {
                tracing::warn!(%error, "request failed");
                Reply::Failed {
                    message: error.to_string(),
                }
            }
        })
    }

    /// Validate and store a new task, including its attachment.
    ///
    /// # Errors
    ///
    /// `WorkflowError::Validation` for a blank title or a disallowed
    /// attachment type (nothing is written), `WorkflowError::Storage` if the
    /// file or the row cannot be written.
    pub async fn assign_task(&self, form: NewTaskForm) -> Result<Task, WorkflowError> {
        let title = require_text("a task title", &form.title)?;
        if let Some(upload) = &form.attachment {
            self.check_upload(UploadKind::Attachment, upload)?;
        }

        let document_path = self.store_upload(form.attachment.as_ref())?;
        let new = NewTaskBuilder::new(title)
            .description(optional_text(form.description.as_deref()))
            .start_date(form.start_date)
            .due_date(form.due_date)
            .document_path(document_path.clone());
        let new = match optional_text(form.category.as_deref()) {
            Some(category) => new.category(category),
            None => new,
        };
        let new = match optional_text(form.priority.as_deref()) {
            Some(priority) => new.priority(priority),
            None => new,
        };

        match self.service.create_task(new.build()).await {
            Ok(task) => {
                tracing::info!(id = task.id, "assigned task");
                Ok(task)
            }
            Err(error) => {
                self.discard_upload(document_path.as_deref());
                Err(error.into())
            }
        }
    }

    /// Load a task for the verification form.
    ///
    /// # Errors
    ///
    /// `WorkflowError::Validation` when the task is missing, not completed,
    /// or already verified.
    pub async fn open_verification(&self, id: i64) -> Result<Task, WorkflowError> {
        let task = self
            .service
            .get_task(id)
            .await?
            .ok_or_else(|| WorkflowError::validation(format!("Task {id} does not exist")))?;
        if !task.is_verification_eligible() {
            return Err(WorkflowError::validation(ineligible_message(&task)));
        }
        Ok(task)
    }

    /// Record a verification with optional evidence.
    ///
    /// # Errors
    ///
    /// `WorkflowError::Validation` for an ineligible task, blank comments, or
    /// a disallowed evidence type; `WorkflowError::Storage` on write failure.
    pub async fn submit_verification(
        &self,
        id: i64,
        form: VerificationForm,
    ) -> Result<Task, WorkflowError> {
        self.open_verification(id).await?;
        let comments = require_text("verification comments", &form.comments)?;
        if let Some(upload) = &form.evidence {
            self.check_upload(UploadKind::Evidence, upload)?;
        }

        let evidence_path = self.store_upload(form.evidence.as_ref())?;
        let submission = VerificationSubmission {
            outcome: form.outcome,
            comments,
            evidence_path: evidence_path.clone(),
        };
        match self.service.submit_verification(id, submission).await {
            Ok(task) => Ok(task),
            Err(error) => {
                self.discard_upload(evidence_path.as_deref());
                Err(error.into())
            }
        }
    }

    /// Mark a task completed.
    ///
    /// # Errors
    ///
    /// `WorkflowError::Storage` if the task is missing or the write fails.
    pub async fn complete(&self, id: i64) -> Result<Task, WorkflowError> {
        Ok(self.service.update_status(id, TaskStatus::Completed).await?)
    }

    /// Apply an edit form.
    ///
    /// # Errors
    ///
    /// `WorkflowError::Validation` for a blank title, `WorkflowError::Storage`
    /// if the task is missing or the write fails.
    pub async fn edit(&self, id: i64, form: EditForm) -> Result<Task, WorkflowError> {
        let edit = TaskEdit {
            title: form.title,
            description: form.description,
            start_date: form.start_date,
            due_date: form.due_date,
        };
        Ok(self.service.update_fields(id, edit).await?)
    }

    /// Delete a task and its files.
    ///
    /// # Errors
    ///
    /// `WorkflowError::Storage` if the row cannot be deleted.
    pub async fn delete(&self, id: i64) -> Result<DeleteReport, WorkflowError> {
        Ok(self.service.delete_task(id).await?)
    }

    /// Tasks matching the filter and search, plus the analytics dashboard.
    ///
    /// # Errors
    ///
    /// `WorkflowError::Storage` if a query fails.
    pub async fn board(
        &self,
        filter: TaskFilter,
        search: Option<&str>,
    ) -> Result<TaskBoard, WorkflowError> {
        let search = search.filter(|s| !s.is_empty());
        let tasks = self.service.list_tasks(filter, search).await?;
        let summary = self
            .service
            .analytics_with_recent(self.config.recent_verifications)
            .await?;
        Ok(TaskBoard {
            filter,
            search: search.map(String::from),
            tasks: tasks.into_iter().map(TaskView::from).collect(),
            analytics: summary.report(),
        })
    }

    fn check_upload(&self, kind: UploadKind, upload: &Upload) -> Result<(), WorkflowError> {
        check_extension(kind, &upload.file_name, self.config.extensions_for(kind))?;
        Ok(())
    }

    fn store_upload(&self, upload: Option<&Upload>) -> Result<Option<String>, WorkflowError> {
        upload
            .map(|u| self.service.files().store(&u.bytes, &u.file_name))
            .transpose()
            .map_err(WorkflowError::from)
    }

    /// Remove a file stored for a write that then failed.
    fn discard_upload(&self, path: Option<&str>) {
        if let Some(path) = path {
            if let Err(error) = self.service.files().delete(path) {
                tracing::warn!(path, %error, "failed to remove orphaned upload");
            }
        }
    }
}

fn ineligible_message(task: &Task) -> String {
    if task.status != TaskStatus::Completed {
        format!("Task '{}' must be completed before it can be verified", task.title)
    } else {
        format!(
            "Task '{}' has already been verified ({})",
            task.title, task.verification_status
        )
    }
}

fn delete_ack(report: &DeleteReport) -> Reply {
    if !report.deleted {
        return Reply::ack(None, format!("Task {} does not exist; nothing deleted", report.id), false);
    }
    let message = if report.file_errors.is_empty() {
        format!("Task {} deleted", report.id)
    } else {
        format!(
            "Task {} deleted; could not remove files: {}",
            report.id,
            report.file_errors.join("; ")
        )
    };
    Reply::ack(None, message, false)
}
