//! Repository modules implementing task storage operations.
//!
//! Each module adds methods to `VerityService` via `impl VerityService` blocks.

pub mod analytics;
pub mod task;
