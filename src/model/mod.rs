pub mod admin;
pub mod content;
pub mod quote;

use chrono::{DateTime, Utc};

/// Parses one of the RFC 3339 timestamps stored on our documents.
pub(crate) fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|t| t.with_timezone(&Utc))
}
