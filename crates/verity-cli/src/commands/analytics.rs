use crate::cli::GlobalFlags;
use crate::cli::root_commands::AnalyticsArgs;
use crate::context::AppContext;
use crate::output::output;

/// Handle `vrt analytics`.
pub async fn handle(args: &AnalyticsArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let recent = args
        .recent
        .unwrap_or(ctx.config.workflow.recent_verifications);
    let summary = ctx.service().analytics_with_recent(recent).await?;
    output(&summary.report(), flags.format)
}
