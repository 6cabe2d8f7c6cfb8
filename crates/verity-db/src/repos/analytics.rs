//! Verification analytics over the `tasks` table.

use verity_core::analytics::{AnalyticsSummary, RecentVerification};
use verity_core::enums::{TaskStatus, VerificationOutcome, VerificationStatus};

use crate::error::DatabaseError;
use crate::helpers::{count_from, parse_datetime};
use crate::service::VerityService;

/// Number of recent verifications listed by [`VerityService::analytics`].
pub const DEFAULT_RECENT_LIMIT: u32 = 5;

const SUMMARY_SQL: &str = "SELECT
        COUNT(*),
        COALESCE(SUM(CASE WHEN LOWER(TRIM(status)) = ?1 THEN 1 ELSE 0 END), 0),
        COALESCE(SUM(CASE WHEN verification_status LIKE ?2 THEN 1 ELSE 0 END), 0),
        COALESCE(SUM(CASE WHEN verification_status = ?3 THEN 1 ELSE 0 END), 0),
        COALESCE(SUM(CASE WHEN verification_status = ?4 THEN 1 ELSE 0 END), 0),
        COALESCE(SUM(CASE WHEN verification_status = ?5 THEN 1 ELSE 0 END), 0),
        COALESCE(SUM(CASE WHEN verification_evidence_path IS NOT NULL
                           AND verification_evidence_path != '' THEN 1 ELSE 0 END), 0)
    FROM tasks";

impl VerityService {
    /// Aggregate counts plus the five most recent verifications.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if either query fails.
    pub async fn analytics(&self) -> Result<AnalyticsSummary, DatabaseError> {
        self.analytics_with_recent(DEFAULT_RECENT_LIMIT).await
    }

    /// Aggregate counts plus the `recent_limit` most recent verifications,
    /// newest first.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if either query fails.
    pub async fn analytics_with_recent(
        &self,
        recent_limit: u32,
    ) -> Result<AnalyticsSummary, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                SUMMARY_SQL,
                libsql::params![
                    TaskStatus::Completed.as_str().to_ascii_lowercase(),
                    format!("{}%", VerificationStatus::VERIFIED_PREFIX),
                    VerificationOutcome::Approved.as_str(),
                    VerificationOutcome::NeedsRevision.as_str(),
                    VerificationOutcome::Rejected.as_str()
                ],
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;

        let mut summary = AnalyticsSummary {
            total: count_from(row.get::<i64>(0)?)?,
            completed: count_from(row.get::<i64>(1)?)?,
            verified: count_from(row.get::<i64>(2)?)?,
            approved: count_from(row.get::<i64>(3)?)?,
            needs_revision: count_from(row.get::<i64>(4)?)?,
            rejected: count_from(row.get::<i64>(5)?)?,
            with_evidence: count_from(row.get::<i64>(6)?)?,
            recent: Vec::new(),
        };
        summary.recent = self.recent_verifications(recent_limit).await?;
        Ok(summary)
    }

    async fn recent_verifications(
        &self,
        limit: u32,
    ) -> Result<Vec<RecentVerification>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT title, verification_status, verified_at FROM tasks
                 WHERE verified_at IS NOT NULL AND verified_at != ''
                 ORDER BY julianday(verified_at) DESC, id DESC
                 LIMIT ?1",
                [i64::from(limit)],
            )
            .await?;

        let mut recent = Vec::new();
        while let Some(row) = rows.next().await? {
            let title = row.get::<Option<String>>(0)?.unwrap_or_default();
            let stored_at = row.get::<String>(2)?;
            let verified_at = match parse_datetime(&stored_at) {
                Ok(ts) => ts,
                Err(error) => {
                    tracing::warn!(title = %title, %error, "skipping unreadable verified_at");
                    continue;
                }
            };
            let verification_status =
                VerificationStatus::from_stored(row.get::<Option<String>>(1)?.as_deref())
                    .unwrap_or_else(|error| {
                        tracing::warn!(title = %title, %error, "unreadable verification_status");
                        VerificationStatus::Unspecified
                    });
            recent.push(RecentVerification {
                title,
                verification_status,
                verified_at,
            });
        }
        Ok(recent)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    use super::*;
    use crate::test_support::{add_task, date, test_service};
    use crate::updates::task::VerificationSubmission;

    async fn verify(svc: &VerityService, id: i64, outcome: VerificationOutcome, evidence: bool) {
        svc.update_status(id, TaskStatus::Completed).await.unwrap();
        let evidence_path = evidence.then(|| svc.files().store(b"e", "proof.jpg").unwrap());
        svc.submit_verification(
            id,
            VerificationSubmission {
                outcome,
                comments: "checked".into(),
                evidence_path,
            },
        )
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn empty_table_has_no_rates() {
        let tmp = TempDir::new().unwrap();
        let svc = test_service(tmp.path()).await;
        let summary = svc.analytics().await.unwrap();
        assert_eq!(summary, AnalyticsSummary::default());
        assert_eq!(summary.completion_rate(), None);
        assert_eq!(summary.verification_rate(), None);
        assert_eq!(summary.evidence_rate(), None);
    }

    #[tokio::test]
    async fn counts_each_outcome() {
        let tmp = TempDir::new().unwrap();
        let svc = test_service(tmp.path()).await;
        let a = add_task(&svc, "a", date(2025, 1, 1)).await;
        let b = add_task(&svc, "b", date(2025, 1, 2)).await;
        let c = add_task(&svc, "c", date(2025, 1, 3)).await;
        let d = add_task(&svc, "d", date(2025, 1, 4)).await;
        add_task(&svc, "pending", date(2025, 1, 5)).await;

        verify(&svc, a.id, VerificationOutcome::Approved, true).await;
        verify(&svc, b.id, VerificationOutcome::NeedsRevision, false).await;
        verify(&svc, c.id, VerificationOutcome::Rejected, true).await;
        svc.update_status(d.id, TaskStatus::Completed).await.unwrap();

        let summary = svc.analytics().await.unwrap();
        assert_eq!(
            (
                summary.total,
                summary.completed,
                summary.verified,
                summary.approved,
                summary.needs_revision,
                summary.rejected,
                summary.with_evidence,
            ),
            (5, 4, 3, 1, 1, 1, 2)
        );
        assert_eq!(summary.completion_rate(), Some(80.0));
        assert_eq!(summary.verification_rate(), Some(75.0));
        assert_eq!(
            summary.recent.iter().map(|r| r.title.as_str()).collect::<Vec<_>>(),
            vec!["c", "b", "a"]
        );
    }

    #[tokio::test]
    async fn recent_list_orders_mixed_timestamp_formats_by_time() {
        let tmp = TempDir::new().unwrap();
        let svc = test_service(tmp.path()).await;
        svc.db()
            .conn()
            .execute(
                "INSERT INTO tasks (title, status, verification_status, verified_at) VALUES
                    ('legacy later', 'Completed', 'Verified - Approved', '2026-02-09 15:00:00'),
                    ('current earlier', 'Completed', 'Verified - Rejected', '2026-02-09T14:30:00.000000Z'),
                    ('garbled', 'Completed', 'Verified - Approved', 'last tuesday')",
                (),
            )
            .await
            .unwrap();

        let summary = svc.analytics().await.unwrap();
        assert_eq!(
            summary.recent.iter().map(|r| r.title.as_str()).collect::<Vec<_>>(),
            vec!["legacy later", "current earlier"]
        );
        assert_eq!(summary.verified, 3);
    }

    #[tokio::test]
    async fn recent_list_is_limited() {
        let tmp = TempDir::new().unwrap();
        let svc = test_service(tmp.path()).await;
        for n in 0..7 {
            let task = add_task(&svc, &format!("t{n}"), date(2025, 1, 1)).await;
            verify(&svc, task.id, VerificationOutcome::Approved, false).await;
        }
        assert_eq!(svc.analytics().await.unwrap().recent.len(), 5);
        let summary = svc.analytics_with_recent(2).await.unwrap();
        assert_eq!(summary.recent.len(), 2);
        assert_eq!(summary.recent[0].title, "t6");
        assert_eq!(summary.approved, 7);
    }
}
