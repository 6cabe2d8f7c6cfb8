use anyhow::bail;
use schemars::schema_for;
use verity_core::analytics::AnalyticsReport;
use verity_core::entities::Task;
use verity_core::responses::{DeleteReport, TaskBoard};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::SchemaArgs;

/// Handle `vrt schema`.
pub fn handle(args: &SchemaArgs, _flags: &GlobalFlags) -> anyhow::Result<()> {
    let schema = match args.type_name.as_str() {
        "task" => schema_for!(Task),
        "board" => schema_for!(TaskBoard),
        "analytics" => schema_for!(AnalyticsReport),
        "delete-report" => schema_for!(DeleteReport),
        other => bail!("unknown schema type '{other}' (expected task, board, analytics, delete-report)"),
    };
    println!("{}", serde_json::to_string_pretty(&schema)?);
    Ok(())
}
