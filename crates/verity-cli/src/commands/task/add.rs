use std::path::PathBuf;

use chrono::{Local, NaiveDate};
use verity_workflow::Request;

use crate::cli::GlobalFlags;
use crate::commands::task::{read_upload, render_reply};
use crate::context::AppContext;

pub struct AddArgs {
    pub title: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub priority: Option<String>,
    pub start: Option<NaiveDate>,
    pub due: Option<NaiveDate>,
    pub attachment: Option<PathBuf>,
}

pub async fn run(args: AddArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let mut form = ctx.controller.new_task_form(Local::now().date_naive());
    form.title = args.title;
    form.description = args.description;
    form.category = args.category;
    form.priority = args.priority;
    if args.start.is_some() {
        form.start_date = args.start;
    }
    if args.due.is_some() {
        form.due_date = args.due;
    }
    form.attachment = args.attachment.as_deref().map(read_upload).transpose()?;

    let reply = ctx.controller.handle(Request::AssignTask(form)).await;
    render_reply(reply, flags)
}
