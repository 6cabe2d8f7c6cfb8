//! Workflow defaults: form dates, upload allow-lists, dashboard size.

use serde::{Deserialize, Serialize};
use verity_core::enums::UploadKind;

use crate::ConfigError;

const fn default_due_offset_days() -> i64 {
    7
}

const fn default_recent_verifications() -> u32 {
    5
}

fn default_attachment_extensions() -> Vec<String> {
    to_owned(UploadKind::Attachment.default_extensions())
}

fn default_evidence_extensions() -> Vec<String> {
    to_owned(UploadKind::Evidence.default_extensions())
}

fn to_owned(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| (*s).to_string()).collect()
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct WorkflowConfig {
    /// Days between a new task's default start date and due date.
    #[serde(default = "default_due_offset_days")]
    pub default_due_offset_days: i64,

    /// Extensions accepted for task attachments.
    #[serde(default = "default_attachment_extensions")]
    pub attachment_extensions: Vec<String>,

    /// Extensions accepted for verification evidence.
    #[serde(default = "default_evidence_extensions")]
    pub evidence_extensions: Vec<String>,

    /// How many entries the recent-verification list shows.
    #[serde(default = "default_recent_verifications")]
    pub recent_verifications: u32,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            default_due_offset_days: default_due_offset_days(),
            attachment_extensions: default_attachment_extensions(),
            evidence_extensions: default_evidence_extensions(),
            recent_verifications: default_recent_verifications(),
        }
    }
}

impl WorkflowConfig {
    /// The allow-list for a given upload kind.
    #[must_use]
    pub fn extensions_for(&self, kind: UploadKind) -> &[String] {
        match kind {
            UploadKind::Attachment => &self.attachment_extensions,
            UploadKind::Evidence => &self.evidence_extensions,
        }
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.default_due_offset_days < 0 {
            return Err(ConfigError::InvalidValue {
                field: "workflow.default_due_offset_days".into(),
                reason: format!("must be >= 0, got {}", self.default_due_offset_days),
            });
        }
        for (field, list) in [
            ("workflow.attachment_extensions", &self.attachment_extensions),
            ("workflow.evidence_extensions", &self.evidence_extensions),
        ] {
            if let Some(bad) = list.iter().find(|ext| ext.trim().is_empty() || ext.contains('.')) {
                return Err(ConfigError::InvalidValue {
                    field: field.into(),
                    reason: format!("'{bad}' is not a bare extension (use \"pdf\", not \".pdf\")"),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        let config = WorkflowConfig::default();
        assert_eq!(config.default_due_offset_days, 7);
        assert_eq!(config.recent_verifications, 5);
        assert!(config.extensions_for(UploadKind::Attachment).contains(&"pptx".to_string()));
        assert!(config.extensions_for(UploadKind::Evidence).contains(&"jpg".to_string()));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn negative_offset_is_invalid() {
        let config = WorkflowConfig {
            default_due_offset_days: -1,
            ..WorkflowConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn dotted_extension_is_invalid() {
        let config = WorkflowConfig {
            evidence_extensions: vec![".png".into()],
            ..WorkflowConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { field, .. }) if field == "workflow.evidence_extensions"
        ));
    }
}
