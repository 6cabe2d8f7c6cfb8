mod add;
mod complete;
mod delete;
mod edit;
mod get;
mod list;
mod verify;

use std::path::Path;

use anyhow::Context;
use verity_workflow::Reply;
use verity_workflow::forms::Upload;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::TaskCommands;
use crate::context::AppContext;
use crate::output::output;

/// Handle `vrt task`.
pub async fn handle(action: TaskCommands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match action {
        TaskCommands::Add {
            title,
            description,
            category,
            priority,
            start,
            due,
            attachment,
        } => {
            let args = add::AddArgs {
                title,
                description,
                category,
                priority,
                start,
                due,
                attachment,
            };
            add::run(args, ctx, flags).await
        }
        TaskCommands::List { filter, search } => list::run(filter, search, ctx, flags).await,
        TaskCommands::Get { id } => get::run(id, ctx, flags).await,
        TaskCommands::Complete { id } => complete::run(id, ctx, flags).await,
        TaskCommands::Edit {
            id,
            title,
            description,
            clear_description,
            start,
            due,
        } => {
            let args = edit::EditArgs {
                title,
                description,
                clear_description,
                start,
                due,
            };
            edit::run(id, args, ctx, flags).await
        }
        TaskCommands::Delete { id } => delete::run(id, ctx, flags).await,
        TaskCommands::Verify {
            id,
            outcome,
            comments,
            evidence,
        } => verify::run(id, outcome, comments, evidence.as_deref(), ctx, flags).await,
    }
}

/// Print a controller reply. Rejected and failed requests become errors so
/// the process exits non-zero.
fn render_reply(reply: Reply, flags: &GlobalFlags) -> anyhow::Result<()> {
    match reply {
        Reply::Invalid { message } | Reply::Failed { message } => anyhow::bail!(message),
        Reply::Board(board) => output(&board.tasks, flags.format),
        other => output(&other, flags.format),
    }
}

/// Read a file named on the command line into an upload.
fn read_upload(path: &Path) -> anyhow::Result<Upload> {
    let bytes = std::fs::read(path).with_context(|| format!("failed to read '{}'", path.display()))?;
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .with_context(|| format!("'{}' has no usable file name", path.display()))?;
    Ok(Upload::new(file_name, bytes))
}
