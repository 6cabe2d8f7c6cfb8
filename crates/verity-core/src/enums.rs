//! Status enums, verification outcomes, filters, and actions for Verity.
//!
//! Variants serialize to the exact strings stored in the `tasks` table
//! ("Pending", "Verified - Approved", ...) so that JSON output and SQL storage
//! agree. `from_stored` is the lenient reader for table values, which may be
//! NULL or carry legacy spellings.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::CoreError;

// ---------------------------------------------------------------------------
// TaskStatus
// ---------------------------------------------------------------------------

/// Completion status of a task.
///
/// ```text
/// Pending → Completed
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum TaskStatus {
    Pending,
    Completed,
}

impl TaskStatus {
    /// Return the string representation used in SQL storage.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Completed => "Completed",
        }
    }

    /// Read a stored `status` column. NULL falls back to the column default.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::UnknownValue` for strings that are not a status.
    pub fn from_stored(value: Option<&str>) -> Result<Self, CoreError> {
        match value {
            None | Some("") => Ok(Self::Pending),
            Some(s) => s.parse(),
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "completed" => Ok(Self::Completed),
            _ => Err(CoreError::UnknownValue {
                field: "status",
                value: s.to_string(),
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// VerificationOutcome
// ---------------------------------------------------------------------------

/// Verdict a reviewer can submit for a completed task.
///
/// This is the only way to write a "Verified - ..." status: the repository's
/// verification method takes an outcome, never a free-form string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum VerificationOutcome {
    #[serde(rename = "Verified - Approved")]
    Approved,
    #[serde(rename = "Verified - Needs Revision")]
    NeedsRevision,
    #[serde(rename = "Verified - Rejected")]
    Rejected,
}

impl VerificationOutcome {
    pub const ALL: [Self; 3] = [Self::Approved, Self::NeedsRevision, Self::Rejected];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Approved => "Verified - Approved",
            Self::NeedsRevision => "Verified - Needs Revision",
            Self::Rejected => "Verified - Rejected",
        }
    }

    /// The status a task carries after this outcome is recorded.
    #[must_use]
    pub const fn status(self) -> VerificationStatus {
        match self {
            Self::Approved => VerificationStatus::Approved,
            Self::NeedsRevision => VerificationStatus::NeedsRevision,
            Self::Rejected => VerificationStatus::Rejected,
        }
    }
}

impl fmt::Display for VerificationOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VerificationOutcome {
    type Err = CoreError;

    /// Accepts the stored form ("Verified - Approved") or the bare verdict
    /// ("approved", "needs revision", "needs-revision", "rejected").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace(['-', '_'], " ");
        let verdict = normalized
            .strip_prefix("verified")
            .map_or(normalized.as_str(), str::trim);
        match verdict.split_whitespace().collect::<Vec<_>>().join(" ").as_str() {
            "approved" => Ok(Self::Approved),
            "needs revision" => Ok(Self::NeedsRevision),
            "rejected" => Ok(Self::Rejected),
            _ => Err(CoreError::UnknownValue {
                field: "verification outcome",
                value: s.to_string(),
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// VerificationStatus
// ---------------------------------------------------------------------------

/// Verification state of a task as stored in `verification_status`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema)]
pub enum VerificationStatus {
    #[default]
    #[serde(rename = "Not Verified")]
    NotVerified,
    #[serde(rename = "Verified - Approved")]
    Approved,
    #[serde(rename = "Verified - Needs Revision")]
    NeedsRevision,
    #[serde(rename = "Verified - Rejected")]
    Rejected,
    /// A stored value that starts with "Verified" but names no known verdict.
    /// It counts as verified everywhere; no further review is offered.
    #[serde(rename = "Verified")]
    Unspecified,
}

impl VerificationStatus {
    /// Prefix shared by every verified state; the `Verified` list filter
    /// matches on it.
    pub const VERIFIED_PREFIX: &'static str = "Verified";

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotVerified => "Not Verified",
            Self::Approved => "Verified - Approved",
            Self::NeedsRevision => "Verified - Needs Revision",
            Self::Rejected => "Verified - Rejected",
            Self::Unspecified => "Verified",
        }
    }

    /// Whether a verification outcome has been recorded.
    #[must_use]
    pub const fn is_verified(self) -> bool {
        !matches!(self, Self::NotVerified)
    }

    /// The outcome behind a verified state.
    #[must_use]
    pub const fn outcome(self) -> Option<VerificationOutcome> {
        match self {
            Self::NotVerified | Self::Unspecified => None,
            Self::Approved => Some(VerificationOutcome::Approved),
            Self::NeedsRevision => Some(VerificationOutcome::NeedsRevision),
            Self::Rejected => Some(VerificationOutcome::Rejected),
        }
    }

    /// Read a stored `verification_status` column.
    ///
    /// NULL, empty, the literal `"None"`, and `"Not Verified"` all mean the
    /// task has not been reviewed yet. Any other value starting with
    /// "Verified" (case-insensitive, as the SQL filter matches) is verified:
    /// a known verdict maps to its variant, the rest to `Unspecified`.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::UnknownValue` for a value that is neither.
    pub fn from_stored(value: Option<&str>) -> Result<Self, CoreError> {
        match value.map(str::trim) {
            None | Some("" | "None" | "Not Verified") => Ok(Self::NotVerified),
            Some(s) => match s.parse::<VerificationOutcome>() {
                Ok(outcome) => Ok(outcome.status()),
                Err(_) if has_verified_prefix(s) => Ok(Self::Unspecified),
                Err(_) => Err(CoreError::UnknownValue {
                    field: "verification_status",
                    value: s.to_string(),
                }),
            },
        }
    }
}

fn has_verified_prefix(s: &str) -> bool {
    let prefix = VerificationStatus::VERIFIED_PREFIX;
    s.get(..prefix.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
}

impl fmt::Display for VerificationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// TaskFilter
// ---------------------------------------------------------------------------

/// List filter offered by the task board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema)]
pub enum TaskFilter {
    #[default]
    All,
    Pending,
    Completed,
    Verified,
}

impl TaskFilter {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Pending => "Pending",
            Self::Completed => "Completed",
            Self::Verified => "Verified",
        }
    }

    /// Check a task's state against the filter in memory.
    #[must_use]
    pub const fn matches(self, status: TaskStatus, verification: VerificationStatus) -> bool {
        match self {
            Self::All => true,
            Self::Pending => matches!(status, TaskStatus::Pending),
            Self::Completed => matches!(status, TaskStatus::Completed),
            Self::Verified => verification.is_verified(),
        }
    }
}

impl fmt::Display for TaskFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskFilter {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Self::All),
            "pending" => Ok(Self::Pending),
            "completed" => Ok(Self::Completed),
            "verified" => Ok(Self::Verified),
            _ => Err(CoreError::UnknownValue {
                field: "filter",
                value: s.to_string(),
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// TaskAction
// ---------------------------------------------------------------------------

/// Per-task buttons a renderer may offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum TaskAction {
    Complete,
    Edit,
    Delete,
    Verify,
}

impl TaskAction {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Complete => "complete",
            Self::Edit => "edit",
            Self::Delete => "delete",
            Self::Verify => "verify",
        }
    }
}

impl fmt::Display for TaskAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// UploadKind
// ---------------------------------------------------------------------------

/// What an uploaded file is for. Each kind has its own extension allow-list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum UploadKind {
    Attachment,
    Evidence,
}

impl UploadKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Attachment => "attachment",
            Self::Evidence => "evidence",
        }
    }

    /// Extensions accepted when nothing else is configured.
    #[must_use]
    pub const fn default_extensions(self) -> &'static [&'static str] {
        match self {
            Self::Attachment => &["pdf", "docx", "txt", "ppt", "pptx", "xls", "xlsx"],
            Self::Evidence => &["pdf", "jpg", "png", "docx"],
        }
    }
}

impl fmt::Display for UploadKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(None)]
    #[case(Some(""))]
    #[case(Some("None"))]
    #[case(Some("Not Verified"))]
    fn unreviewed_spellings_read_as_not_verified(#[case] stored: Option<&str>) {
        assert_eq!(
            VerificationStatus::from_stored(stored).unwrap(),
            VerificationStatus::NotVerified
        );
    }

    #[rstest]
    #[case("Verified - Approved", VerificationOutcome::Approved)]
    #[case("Verified - Needs Revision", VerificationOutcome::NeedsRevision)]
    #[case("Verified - Rejected", VerificationOutcome::Rejected)]
    #[case("approved", VerificationOutcome::Approved)]
    #[case("needs-revision", VerificationOutcome::NeedsRevision)]
    #[case("Needs Revision", VerificationOutcome::NeedsRevision)]
    #[case("REJECTED", VerificationOutcome::Rejected)]
    fn outcome_parses_stored_and_bare_forms(
        #[case] input: &str,
        #[case] expected: VerificationOutcome,
    ) {
        assert_eq!(input.parse::<VerificationOutcome>().unwrap(), expected);
    }

    #[test]
    fn outcome_as_str_round_trips_through_stored_status() {
        for outcome in VerificationOutcome::ALL {
            let status = VerificationStatus::from_stored(Some(outcome.as_str())).unwrap();
            assert_eq!(status, outcome.status());
            assert_eq!(status.outcome(), Some(outcome));
            assert!(status.as_str().starts_with(VerificationStatus::VERIFIED_PREFIX));
        }
    }

    #[rstest]
    #[case("Verified")]
    #[case("Verified - Maybe")]
    #[case("verified by phone")]
    fn unknown_verified_values_stay_verified(#[case] stored: &str) {
        let status = VerificationStatus::from_stored(Some(stored)).unwrap();
        assert_eq!(status, VerificationStatus::Unspecified);
        assert!(status.is_verified());
        assert_eq!(status.outcome(), None);
    }

    #[test]
    fn unknown_verification_status_is_rejected() {
        let err = VerificationStatus::from_stored(Some("Awaiting review")).unwrap_err();
        assert!(matches!(
            err,
            CoreError::UnknownValue {
                field: "verification_status",
                ..
            }
        ));
    }

    #[test]
    fn null_status_defaults_to_pending() {
        assert_eq!(TaskStatus::from_stored(None).unwrap(), TaskStatus::Pending);
        assert_eq!(
            TaskStatus::from_stored(Some("Completed")).unwrap(),
            TaskStatus::Completed
        );
        assert!(TaskStatus::from_stored(Some("Archived")).is_err());
    }

    #[rstest]
    #[case(TaskFilter::All, TaskStatus::Pending, VerificationStatus::NotVerified, true)]
    #[case(TaskFilter::Pending, TaskStatus::Completed, VerificationStatus::NotVerified, false)]
    #[case(TaskFilter::Completed, TaskStatus::Completed, VerificationStatus::NotVerified, true)]
    #[case(TaskFilter::Verified, TaskStatus::Completed, VerificationStatus::NotVerified, false)]
    #[case(TaskFilter::Verified, TaskStatus::Completed, VerificationStatus::Rejected, true)]
    fn filter_matches(
        #[case] filter: TaskFilter,
        #[case] status: TaskStatus,
        #[case] verification: VerificationStatus,
        #[case] expected: bool,
    ) {
        assert_eq!(filter.matches(status, verification), expected);
    }

    #[test]
    fn serde_uses_stored_strings() {
        let json = serde_json::to_string(&VerificationStatus::NeedsRevision).unwrap();
        assert_eq!(json, "\"Verified - Needs Revision\"");
        let json = serde_json::to_string(&TaskStatus::Completed).unwrap();
        assert_eq!(json, "\"Completed\"");
    }
}
