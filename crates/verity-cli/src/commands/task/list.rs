use verity_core::enums::TaskFilter;
use verity_workflow::Request;

use crate::cli::GlobalFlags;
use crate::commands::task::render_reply;
use crate::context::AppContext;

pub async fn run(
    filter: TaskFilter,
    search: Option<String>,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let reply = ctx.controller.handle(Request::Board { filter, search }).await;
    render_reply(reply, flags)
}
