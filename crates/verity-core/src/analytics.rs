//! Verification analytics types.
//!
//! Counts come from a single aggregate query over `tasks`. Derived percentages
//! are `None` whenever their denominator is zero; renderers show that as
//! `"N/A"` via [`format_percent`].

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::VerificationStatus;

/// Aggregate counts over all tasks plus recent review activity.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct AnalyticsSummary {
    pub total: u64,
    pub completed: u64,
    pub verified: u64,
    pub approved: u64,
    pub needs_revision: u64,
    pub rejected: u64,
    pub with_evidence: u64,
    /// Most recently verified tasks, newest first.
    pub recent: Vec<RecentVerification>,
}

/// One line of the "recent verification activity" list.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct RecentVerification {
    pub title: String,
    pub verification_status: VerificationStatus,
    pub verified_at: DateTime<Utc>,
}

impl AnalyticsSummary {
    /// Share of all tasks that are completed.
    #[must_use]
    pub fn completion_rate(&self) -> Option<f64> {
        percent(self.completed, self.total)
    }

    /// Share of completed tasks that have been verified.
    #[must_use]
    pub fn verification_rate(&self) -> Option<f64> {
        percent(self.verified, self.completed)
    }

    /// Share of verified tasks that carry an evidence file.
    #[must_use]
    pub fn evidence_rate(&self) -> Option<f64> {
        percent(self.with_evidence, self.verified)
    }

    /// Whether there is anything to chart at all.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Flatten counts and rates into a renderer-friendly view.
    #[must_use]
    pub fn report(&self) -> AnalyticsReport {
        AnalyticsReport {
            total: self.total,
            completed: self.completed,
            verified: self.verified,
            approved: self.approved,
            needs_revision: self.needs_revision,
            rejected: self.rejected,
            with_evidence: self.with_evidence,
            completion_rate: format_percent(self.completion_rate()),
            verification_rate: format_percent(self.verification_rate()),
            evidence_rate: format_percent(self.evidence_rate()),
            recent: self.recent.clone(),
        }
    }
}

/// Display form of [`AnalyticsSummary`] with percentages already formatted.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct AnalyticsReport {
    pub total: u64,
    pub completed: u64,
    pub verified: u64,
    pub approved: u64,
    pub needs_revision: u64,
    pub rejected: u64,
    pub with_evidence: u64,
    pub completion_rate: String,
    pub verification_rate: String,
    pub evidence_rate: String,
    pub recent: Vec<RecentVerification>,
}

#[allow(clippy::cast_precision_loss)]
fn percent(numerator: u64, denominator: u64) -> Option<f64> {
    if denominator == 0 {
        return None;
    }
    Some(numerator as f64 / denominator as f64 * 100.0)
}

/// Render a percentage with one decimal place, or `"N/A"`.
#[must_use]
pub fn format_percent(value: Option<f64>) -> String {
    value.map_or_else(|| String::from("N/A"), |v| format!("{v:.1}%"))
}
