//! Date/time serde helpers
//!
//! The backend is not consistent about timestamps: audit fields come as
//! RFC3339 (`2025-10-15T13:00:00.000Z`) while birth dates and expiration
//! dates sometimes come as a bare `YYYY-MM-DD`. Use with
//! `#[serde(default, with = "crate::utils::datetime")]` on
//! `Option<DateTime<Utc>>` fields.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serializer};

/// Serialize `Option<DateTime<Utc>>` as an optional RFC3339 string.
pub fn serialize<S>(dt: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match dt {
        Some(dt) => serializer.serialize_some(&dt.to_rfc3339()),
        None => serializer.serialize_none(),
    }
}

/// Deserialize an RFC3339 timestamp or a `YYYY-MM-DD` date (midnight UTC).
///
/// `null` and the empty string both become `None`.
pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    match Option::<String>::deserialize(deserializer)? {
        None => Ok(None),
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => parse_flexible(&s)
            .map(Some)
            .ok_or_else(|| Error::custom(format!("Invalid date/time: {s}"))),
    }
}

/// Parse either an RFC3339 timestamp or a plain calendar date.
pub fn parse_flexible(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
