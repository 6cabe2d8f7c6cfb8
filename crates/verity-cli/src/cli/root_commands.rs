use clap::{Args, Subcommand};

use crate::cli::subcommands::TaskCommands;

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Tasks.
    Task {
        #[command(subcommand)]
        action: TaskCommands,
    },
    /// Verification dashboard: counts, rates, recent reviews.
    Analytics(AnalyticsArgs),
    /// Report the schema migrations applied when the database was opened.
    Migrate,
    /// Print the JSON Schema of a response type.
    Schema(SchemaArgs),
}

#[derive(Clone, Debug, Args)]
pub struct AnalyticsArgs {
    /// How many recent verifications to list (defaults to config).
    #[arg(long)]
    pub recent: Option<u32>,
}

#[derive(Clone, Debug, Args)]
pub struct SchemaArgs {
    /// One of: task, board, analytics, delete-report
    #[arg(default_value = "task")]
    pub type_name: String,
}
