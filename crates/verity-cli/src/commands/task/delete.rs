use verity_workflow::Request;

use crate::cli::GlobalFlags;
use crate::commands::task::render_reply;
use crate::context::AppContext;

pub async fn run(id: i64, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let reply = ctx.controller.handle(Request::Delete { id }).await;
    render_reply(reply, flags)
}
