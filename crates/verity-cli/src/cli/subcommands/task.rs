use std::path::PathBuf;

use chrono::NaiveDate;
use clap::Subcommand;
use verity_core::enums::{TaskFilter, VerificationOutcome};

/// Task commands.
#[derive(Clone, Debug, Subcommand)]
pub enum TaskCommands {
    /// Assign a new task. Dates default to today and today + the configured offset.
    Add {
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        priority: Option<String>,
        /// Start date (YYYY-MM-DD)
        #[arg(long)]
        start: Option<NaiveDate>,
        /// Due date (YYYY-MM-DD)
        #[arg(long)]
        due: Option<NaiveDate>,
        /// File to attach
        #[arg(long)]
        attachment: Option<PathBuf>,
    },
    /// List tasks ordered by due date.
    List {
        /// all, pending, completed, verified
        #[arg(long, default_value = "all")]
        filter: TaskFilter,
        /// Substring of title or description
        #[arg(long)]
        search: Option<String>,
    },
    /// Get a task by ID.
    Get { id: i64 },
    /// Mark a task completed.
    Complete { id: i64 },
    /// Edit title, description, or dates. Unset flags keep their value.
    Edit {
        id: i64,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        /// Remove the stored description
        #[arg(long, conflicts_with = "description")]
        clear_description: bool,
        #[arg(long)]
        start: Option<NaiveDate>,
        #[arg(long)]
        due: Option<NaiveDate>,
    },
    /// Delete a task and its files.
    Delete { id: i64 },
    /// Review a completed task.
    Verify {
        id: i64,
        /// approved, needs-revision, rejected
        #[arg(long)]
        outcome: VerificationOutcome,
        #[arg(long)]
        comments: String,
        /// Evidence file to store with the review
        #[arg(long)]
        evidence: Option<PathBuf>,
    },
}
