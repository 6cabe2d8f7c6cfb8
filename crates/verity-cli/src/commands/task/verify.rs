use std::path::Path;

use verity_core::enums::VerificationOutcome;
use verity_workflow::Request;
use verity_workflow::forms::VerificationForm;

use crate::cli::GlobalFlags;
use crate::commands::task::{read_upload, render_reply};
use crate::context::AppContext;

pub async fn run(
    id: i64,
    outcome: VerificationOutcome,
    comments: String,
    evidence: Option<&Path>,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let form = VerificationForm {
        outcome,
        comments,
        evidence: evidence.map(read_upload).transpose()?,
    };
    let reply = ctx
        .controller
        .handle(Request::SubmitVerification { id, form })
        .await;
    render_reply(reply, flags)
}
