use serde::Serialize;
use verity_db::migrations::{LATEST_VERSION, MigrationReport};

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct MigrateResponse<'a> {
    database: &'a str,
    latest_version: u32,
    applied_versions: Vec<u32>,
    report: &'a MigrationReport,
}

/// Handle `vrt migrate`. Migrations already ran when the database opened;
/// this reports what happened and which versions the ledger holds.
pub async fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let db = ctx.service().db();
    let response = MigrateResponse {
        database: &ctx.config.storage.database_path,
        latest_version: LATEST_VERSION,
        applied_versions: db.applied_versions().await?,
        report: db.migration_report(),
    };
    output(&response, flags.format)
}
