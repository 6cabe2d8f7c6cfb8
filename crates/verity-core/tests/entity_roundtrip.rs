//! Serde roundtrip and JsonSchema validation tests for Verity core types.

use chrono::{NaiveDate, Utc};
use schemars::schema_for;
use verity_core::analytics::{AnalyticsSummary, RecentVerification};
use verity_core::entities::Task;
use verity_core::enums::*;
use verity_core::responses::{DeleteReport, TaskBoard, TaskView};

/// Validate a JSON value against a schemars-generated schema.
fn validate_against_schema(
    schema: &serde_json::Value,
    instance: &serde_json::Value,
) -> Vec<String> {
    let validator = jsonschema::validator_for(schema).expect("schema should be valid");
    validator
        .iter_errors(instance)
        .map(|e| format!("{e}"))
        .collect()
}

macro_rules! roundtrip_and_validate {
    ($name:ident, $ty:ty, $instance:expr) => {
        #[test]
        fn $name() {
            let val: $ty = $instance;

            let json_str = serde_json::to_string_pretty(&val).unwrap();
            let recovered: $ty = serde_json::from_str(&json_str).unwrap();
            assert_eq!(
                recovered,
                val,
                "serde roundtrip failed for {}",
                stringify!($ty)
            );

            let schema = serde_json::to_value(schema_for!($ty)).unwrap();
            let instance = serde_json::to_value(&val).unwrap();
            let errors = validate_against_schema(&schema, &instance);
            assert!(
                errors.is_empty(),
                "Schema validation failed for {}: {:?}",
                stringify!($ty),
                errors
            );
        }
    };
}

fn verified_task() -> Task {
    Task {
        id: 7,
        created_at: Utc::now(),
        title: "Draft report".into(),
        description: Some("Quarterly numbers".into()),
        category: "Other".into(),
        status: TaskStatus::Completed,
        start_date: NaiveDate::from_ymd_opt(2025, 5, 25),
        due_date: NaiveDate::from_ymd_opt(2025, 6, 1),
        priority: "Normal".into(),
        document_path: Some("task_documents/0b9e.pdf".into()),
        verification_status: VerificationStatus::Rejected,
        verification_comments: Some("missing data".into()),
        verification_evidence_path: None,
        verified_at: Some(Utc::now()),
        reminder_sent: false,
    }
}

roundtrip_and_validate!(task_roundtrip, Task, verified_task());

roundtrip_and_validate!(
    analytics_roundtrip,
    AnalyticsSummary,
    AnalyticsSummary {
        total: 3,
        completed: 2,
        verified: 1,
        rejected: 1,
        recent: vec![RecentVerification {
            title: "Draft report".into(),
            verification_status: VerificationStatus::Rejected,
            verified_at: Utc::now(),
        }],
        ..Default::default()
    }
);

roundtrip_and_validate!(
    board_roundtrip,
    TaskBoard,
    TaskBoard {
        filter: TaskFilter::Verified,
        search: Some("report".into()),
        tasks: vec![TaskView::from(verified_task())],
        analytics: AnalyticsSummary::default().report(),
    }
);

roundtrip_and_validate!(
    delete_report_roundtrip,
    DeleteReport,
    DeleteReport {
        id: 7,
        deleted: true,
        removed_files: vec!["task_documents/0b9e.pdf".into()],
        file_errors: vec![],
    }
);

#[test]
fn task_json_uses_stored_status_strings() {
    let value = serde_json::to_value(verified_task()).unwrap();
    assert_eq!(value["status"], "Completed");
    assert_eq!(value["verification_status"], "Verified - Rejected");
    assert_eq!(value["due_date"], "2025-06-01");
}

#[test]
fn task_view_flattens_task_fields() {
    let value = serde_json::to_value(TaskView::from(verified_task())).unwrap();
    assert_eq!(value["title"], "Draft report");
    assert_eq!(value["actions"], serde_json::json!(["edit", "delete"]));
}
