//! Storage locations: the task database and the upload directory.

use serde::{Deserialize, Serialize};

use crate::ConfigError;

fn default_database_path() -> String {
    String::from(".verity/tasks.db")
}

fn default_upload_dir() -> String {
    String::from(".verity/task_documents")
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct StorageConfig {
    /// libSQL database file, or `":memory:"`.
    #[serde(default = "default_database_path")]
    pub database_path: String,

    /// Directory that receives task attachments and verification evidence.
    #[serde(default = "default_upload_dir")]
    pub upload_dir: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            upload_dir: default_upload_dir(),
        }
    }
}

impl StorageConfig {
    /// Whether the database lives in memory only.
    #[must_use]
    pub fn is_in_memory(&self) -> bool {
        self.database_path == ":memory:"
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.database_path.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "storage.database_path".into(),
                reason: "must not be empty".into(),
            });
        }
        if self.upload_dir.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "storage.upload_dir".into(),
                reason: "must not be empty".into(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        let config = StorageConfig::default();
        assert_eq!(config.database_path, ".verity/tasks.db");
        assert_eq!(config.upload_dir, ".verity/task_documents");
        assert!(!config.is_in_memory());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn blank_database_path_is_invalid() {
        let config = StorageConfig {
            database_path: "  ".into(),
            ..StorageConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { field, .. }) if field == "storage.database_path"
        ));
    }
}
