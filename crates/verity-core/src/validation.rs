//! Form field validation shared by the repository and the workflow layer.

use std::path::Path;

use crate::enums::UploadKind;
use crate::errors::CoreError;

/// Require a non-blank text field. Returns the trimmed value.
///
/// # Errors
///
/// Returns `CoreError::Validation` naming the field when it is empty or
/// whitespace-only.
pub fn require_text(field: &str, value: &str) -> Result<String, CoreError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CoreError::validation(format!("Please provide {field}")));
    }
    Ok(trimmed.to_string())
}

/// Collapse a blank optional text field to `None`.
#[must_use]
pub fn optional_text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
}

/// Lower-cased extension of an uploaded file name, without the dot.
#[must_use]
pub fn file_extension(file_name: &str) -> Option<String> {
    Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .filter(|ext| !ext.is_empty())
        .map(str::to_ascii_lowercase)
}

/// Check an upload's extension against an allow-list (case-insensitive).
///
/// # Errors
///
/// Returns `CoreError::Validation` when the name has no extension or the
/// extension is not listed.
pub fn check_extension<S: AsRef<str>>(
    kind: UploadKind,
    file_name: &str,
    allowed: &[S],
) -> Result<String, CoreError> {
    let ext = file_extension(file_name).ok_or_else(|| {
        CoreError::validation(format!("The {kind} '{file_name}' has no file extension"))
    })?;
    if allowed
        .iter()
        .any(|candidate| candidate.as_ref().eq_ignore_ascii_case(&ext))
    {
        return Ok(ext);
    }
    let list = allowed
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(", ");
    Err(CoreError::validation(format!(
        "Files of type .{ext} are not accepted as {kind}; allowed: {list}"
    )))
}
