use anyhow::Context;
use verity_config::VerityConfig;
use verity_db::service::VerityService;
use verity_workflow::WorkflowController;

/// Shared application resources initialized once at startup.
pub struct AppContext {
    pub controller: WorkflowController,
    pub config: VerityConfig,
}

impl AppContext {
    /// Open the database (running migrations) and build the controller.
    pub async fn init(config: VerityConfig) -> anyhow::Result<Self> {
        let storage = &config.storage;
        let service = VerityService::new_local(&storage.database_path, &storage.upload_dir)
            .await
            .with_context(|| format!("failed to open database '{}'", storage.database_path))?;

        let report = service.db().migration_report();
        for warning in &report.warnings {
            tracing::warn!(
                version = warning.version,
                name = warning.name,
                "migration did not complete: {}",
                warning.message
            );
        }

        let controller = WorkflowController::new(service, config.workflow.clone());
        Ok(Self { controller, config })
    }

    pub const fn service(&self) -> &VerityService {
        self.controller.service()
    }
}
