use anyhow::Context;
use verity_core::responses::TaskView;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

pub async fn run(id: i64, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let task = ctx
        .service()
        .get_task(id)
        .await?
        .with_context(|| format!("task {id} not found"))?;
    output(&TaskView::from(task), flags.format)
}
