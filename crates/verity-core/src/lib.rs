//! # verity-core
//!
//! Core types and error types for Verity.
//!
//! This crate provides the foundational types shared across all Verity crates:
//! - The `Task` entity and its verification fields
//! - Status enums, verification outcomes, and list filters
//! - Analytics summary types with guarded percentages
//! - Input validation helpers for form fields
//! - Cross-cutting error types
//! - Response types handed to form renderers

pub mod analytics;
pub mod entities;
pub mod enums;
pub mod errors;
pub mod responses;
pub mod validation;
