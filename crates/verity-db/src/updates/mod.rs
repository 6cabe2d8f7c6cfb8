//! Input types for task mutations.
//!
//! `NewTask` is assembled with a builder; `TaskEdit` and
//! `VerificationSubmission` replace a fixed group of columns in one write.

pub mod task;
