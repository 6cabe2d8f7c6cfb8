use anyhow::Context;
use chrono::NaiveDate;
use verity_workflow::Request;
use verity_workflow::forms::EditForm;

use crate::cli::GlobalFlags;
use crate::commands::task::render_reply;
use crate::context::AppContext;

pub struct EditArgs {
    pub title: Option<String>,
    pub description: Option<String>,
    pub clear_description: bool,
    pub start: Option<NaiveDate>,
    pub due: Option<NaiveDate>,
}

/// Unset flags keep the stored value, so the edit form is seeded from the task.
pub async fn run(id: i64, args: EditArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let current = ctx
        .service()
        .get_task(id)
        .await?
        .with_context(|| format!("task {id} not found"))?;

    let description = if args.clear_description {
        None
    } else {
        args.description.or(current.description)
    };
    let form = EditForm {
        title: args.title.unwrap_or(current.title),
        description,
        start_date: args.start.or(current.start_date),
        due_date: args.due.or(current.due_date),
    };
    let reply = ctx.controller.handle(Request::Edit { id, form }).await;
    render_reply(reply, flags)
}
