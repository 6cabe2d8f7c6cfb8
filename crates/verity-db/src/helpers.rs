//! Row-to-entity parsing helpers.
//!
//! Rows are decoded by column *name* rather than position. A table left
//! behind by a failed migration may lack some columns; [`ColumnIndex`] reports
//! those as absent so callers can substitute the column's documented default.
//!
//! Timestamps: the service writes RFC 3339 with fixed microseconds
//! (`"2026-02-09T14:30:00.000000Z"`), while SQLite defaults and migration
//! backfills produce `"2026-02-09 14:30:00"`. Both parse.

use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};

use crate::error::DatabaseError;

/// Format a timestamp the way every write path stores it.
///
/// Fixed precision keeps lexicographic order equal to chronological order
/// among values written here. Legacy rows use the space-separated form, so
/// queries that order across both compare `julianday(..)` instead.
#[must_use]
pub fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Parse a required TEXT column as `DateTime<Utc>`.
///
/// Handles both RFC 3339 and `SQLite`'s `datetime('now')` format.
///
/// # Errors
///
/// Returns `DatabaseError::Query` if the string cannot be parsed as either format.
pub fn parse_datetime(s: &str) -> Result<DateTime<Utc>, DatabaseError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
        .map(|naive| naive.and_utc())
        .map_err(|e| DatabaseError::Query(format!("Failed to parse datetime '{s}': {e}")))
}

/// Parse an optional TEXT column as `Option<DateTime<Utc>>`.
///
/// # Errors
///
/// Returns `DatabaseError::Query` if a non-empty string cannot be parsed.
pub fn parse_optional_datetime(s: Option<&str>) -> Result<Option<DateTime<Utc>>, DatabaseError> {
    match s {
        Some(s) if !s.is_empty() => Ok(Some(parse_datetime(s)?)),
        _ => Ok(None),
    }
}

/// Parse an optional ISO date column (`YYYY-MM-DD`).
///
/// # Errors
///
/// Returns `DatabaseError::Query` if a non-empty string is not an ISO date.
pub fn parse_optional_date(s: Option<&str>) -> Result<Option<NaiveDate>, DatabaseError> {
    match s.map(str::trim) {
        Some(s) if !s.is_empty() => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(Some)
            .map_err(|e| DatabaseError::Query(format!("Failed to parse date '{s}': {e}"))),
        _ => Ok(None),
    }
}

/// Format an optional date for storage.
#[must_use]
pub fn format_optional_date(date: Option<NaiveDate>) -> Option<String> {
    date.map(|d| d.format("%Y-%m-%d").to_string())
}

/// Escape `LIKE` wildcards so user text matches literally under `ESCAPE '\'`.
#[must_use]
pub fn escape_like(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}

/// Convert a SQL count into `u64`.
///
/// # Errors
///
/// Returns `DatabaseError::InvalidState` for negative values.
pub fn count_from(value: i64) -> Result<u64, DatabaseError> {
    u64::try_from(value)
        .map_err(|_| DatabaseError::InvalidState(format!("negative count {value}")))
}

/// Column-name lookup for a result set.
#[derive(Debug, Default)]
pub struct ColumnIndex {
    names: HashMap<String, i32>,
}

impl ColumnIndex {
    /// Capture the column names of a result set before iterating it.
    #[must_use]
    pub fn from_rows(rows: &libsql::Rows) -> Self {
        let names = (0..rows.column_count())
            .filter_map(|idx| rows.column_name(idx).map(|name| (name.to_string(), idx)))
            .collect();
        Self { names }
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains_key(name)
    }

    /// Read a nullable TEXT column. Returns `None` for SQL NULL, empty
    /// string, and a column the table does not have.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the column read fails.
    pub fn opt_string(&self, row: &libsql::Row, name: &str) -> Result<Option<String>, DatabaseError> {
        let Some(&idx) = self.names.get(name) else {
            return Ok(None);
        };
        match row.get::<Option<String>>(idx)? {
            Some(s) if s.is_empty() => Ok(None),
            other => Ok(other),
        }
    }

    /// Read a TEXT column, falling back to `default` when it is absent or NULL.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the column read fails.
    pub fn string_or(
        &self,
        row: &libsql::Row,
        name: &str,
        default: &str,
    ) -> Result<String, DatabaseError> {
        Ok(self
            .opt_string(row, name)?
            .unwrap_or_else(|| default.to_string()))
    }

    /// Read a nullable INTEGER column.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the column read fails.
    pub fn opt_i64(&self, row: &libsql::Row, name: &str) -> Result<Option<i64>, DatabaseError> {
        match self.names.get(name) {
            Some(&idx) => Ok(row.get::<Option<i64>>(idx)?),
            None => Ok(None),
        }
    }

    /// Read a required INTEGER column.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Query` if the column is missing or NULL.
    pub fn i64(&self, row: &libsql::Row, name: &str) -> Result<i64, DatabaseError> {
        self.opt_i64(row, name)?
            .ok_or_else(|| DatabaseError::Query(format!("column '{name}' is missing or NULL")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_both_timestamp_formats() {
        let rfc = parse_datetime("2026-02-09T14:30:00.123456Z").unwrap();
        let sqlite = parse_datetime("2026-02-09 14:30:00").unwrap();
        assert_eq!(rfc.date_naive(), sqlite.date_naive());
        assert!(parse_datetime("yesterday").is_err());
    }

    #[test]
    fn formatted_timestamps_sort_chronologically() {
        let earlier = parse_datetime("2026-02-09T14:30:00Z").unwrap();
        let later = earlier + chrono::Duration::microseconds(1500);
        assert!(format_timestamp(earlier) < format_timestamp(later));
        assert_eq!(format_timestamp(earlier), "2026-02-09T14:30:00.000000Z");
    }

    #[test]
    fn optional_date_handles_blank_and_invalid() {
        assert_eq!(parse_optional_date(None).unwrap(), None);
        assert_eq!(parse_optional_date(Some("")).unwrap(), None);
        assert_eq!(
            parse_optional_date(Some("2025-06-01")).unwrap(),
            NaiveDate::from_ymd_opt(2025, 6, 1)
        );
        assert!(parse_optional_date(Some("06/01/2025")).is_err());
    }

    #[test]
    fn escape_like_escapes_wildcards() {
        assert_eq!(escape_like("50%_off\\"), "50\\%\\_off\\\\");
        assert_eq!(escape_like("O'Brien"), "O'Brien");
    }

    #[test]
    fn negative_counts_are_rejected() {
        assert_eq!(count_from(3).unwrap(), 3);
        assert!(count_from(-1).is_err());
    }
}
