//! Timestamp codec for the wire format.
//!
//! The backend serialises `datetime` values with Python's `isoformat()`, which
//! produces naive values (no offset) for most columns and RFC 3339 for others.
//! Naive values are taken as UTC.

use super::error::ContractError;
use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};

const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Parse a wire timestamp, reporting `field` on failure
pub fn parse_field(field: &'static str, value: &str) -> Result<DateTime<Utc>, ContractError> {
    parse_timestamp(value).ok_or_else(|| ContractError::InvalidTimestamp {
        field,
        value: value.to_string(),
    })
}

/// Parse an optional wire timestamp; empty strings count as absent
pub fn parse_optional_field(
    field: &'static str,
    value: Option<&str>,
) -> Result<Option<DateTime<Utc>>, ContractError> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(v) => parse_field(field, v).map(Some),
    }
}

pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .map(|naive| naive.and_utc())
}

/// RFC 3339 with millisecond precision, e.g. `2024-03-15T14:02:26.123Z`
pub fn format_timestamp(value: &DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub fn format_optional(value: Option<&DateTime<Utc>>) -> Option<String> {
    value.map(format_timestamp)
}
