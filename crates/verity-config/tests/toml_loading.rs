//! Integration tests for TOML configuration loading.
//!
//! Uses figment::Jail for sandboxed working directories and env vars.

use std::path::Path;

use figment::Jail;
use pretty_assertions::assert_eq;
use verity_config::{ConfigError, VerityConfig};

#[test]
fn loads_project_local_config() {
    Jail::expect_with(|jail| {
        jail.create_dir(".verity")?;
        jail.create_file(
            ".verity/config.toml",
            r#"
[storage]
database_path = "data/tasks.db"
upload_dir = "data/uploads"

[workflow]
default_due_offset_days = 14
recent_verifications = 10
"#,
        )?;

        let config = VerityConfig::load(None).expect("config loads");
        assert_eq!(config.storage.database_path, "data/tasks.db");
        assert_eq!(config.storage.upload_dir, "data/uploads");
        assert_eq!(config.workflow.default_due_offset_days, 14);
        assert_eq!(config.workflow.recent_verifications, 10);
        Ok(())
    });
}

#[test]
fn explicit_file_replaces_project_local_config() {
    Jail::expect_with(|jail| {
        jail.create_dir(".verity")?;
        jail.create_file(
            ".verity/config.toml",
            "[storage]\ndatabase_path = \"local.db\"\n",
        )?;
        jail.create_file(
            "custom.toml",
            "[storage]\ndatabase_path = \"custom.db\"\n",
        )?;

        let config = VerityConfig::load(Some(Path::new("custom.toml"))).expect("config loads");
        assert_eq!(config.storage.database_path, "custom.db");
        Ok(())
    });
}

#[test]
fn partial_sections_keep_defaults() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "verity.toml",
            r#"
[workflow]
evidence_extensions = ["pdf", "heic"]
"#,
        )?;

        let config = VerityConfig::load(Some(Path::new("verity.toml"))).expect("config loads");
        assert_eq!(config.workflow.evidence_extensions, vec!["pdf", "heic"]);
        assert_eq!(config.workflow.default_due_offset_days, 7);
        assert_eq!(config.storage.upload_dir, ".verity/task_documents");
        Ok(())
    });
}

#[test]
fn out_of_range_values_fail_validation() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "verity.toml",
            "[workflow]\ndefault_due_offset_days = -3\n",
        )?;

        let err = VerityConfig::load(Some(Path::new("verity.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }), "{err}");
        Ok(())
    });
}

#[test]
fn malformed_toml_is_a_figment_error() {
    Jail::expect_with(|jail| {
        jail.create_file("verity.toml", "[storage\ndatabase_path = ")?;

        let err = VerityConfig::load(Some(Path::new("verity.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::Figment(_)), "{err}");
        Ok(())
    });
}
