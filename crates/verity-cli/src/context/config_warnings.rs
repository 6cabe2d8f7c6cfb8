/// Config sections that can be set from `VERITY_<SECTION>__<KEY>` variables.
const SECTIONS: [&str; 2] = ["STORAGE", "WORKFLOW"];

/// Emit warnings for likely mistyped env var keys that silently fell back to defaults.
pub fn warn_unconfigured() {
    for warning in collect_unconfigured_warnings(std::env::vars()) {
        tracing::warn!("{warning}");
    }
}

fn collect_unconfigured_warnings<I>(env: I) -> Vec<String>
where
    I: IntoIterator<Item = (String, String)>,
{
    let mut warnings = Vec::new();
    for (key, _) in env {
        for section in SECTIONS {
            let single = format!("VERITY_{section}_");
            let double = format!("VERITY_{section}__");
            if key.starts_with(&single) && !key.starts_with(&double) {
                let field = &key[single.len()..];
                warnings.push(format!(
                    "{key} is ignored. Use double underscores (example: {double}{field})."
                ));
            }
        }
    }
    warnings
}

#[cfg(test)]
mod tests {
    use super::collect_unconfigured_warnings;

    fn env(keys: &[&str]) -> Vec<(String, String)> {
        keys.iter().map(|k| ((*k).to_string(), String::new())).collect()
    }

    #[test]
    fn single_underscore_keys_are_reported() {
        let warnings = collect_unconfigured_warnings(env(&["VERITY_STORAGE_DATABASE_PATH"]));
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("VERITY_STORAGE__DATABASE_PATH"));
    }

    #[test]
    fn well_formed_keys_are_silent() {
        let warnings = collect_unconfigured_warnings(env(&[
            "VERITY_STORAGE__UPLOAD_DIR",
            "VERITY_WORKFLOW__DEFAULT_DUE_OFFSET_DAYS",
            "VERITY_LOG",
            "PATH",
        ]));
        assert!(warnings.is_empty(), "{warnings:?}");
    }
}
