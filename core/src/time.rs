//! Time related utils.

use chrono::Utc;

/// DateTime in UTC, the only timezone used for signing.
pub type DateTime = chrono::DateTime<Utc>;

/// Create a datetime of now.
pub fn now() -> DateTime {
    Utc::now()
}

/// Format time into RFC 3339 with second precision: `2022-03-13T07:20:04Z`
pub fn format_rfc3339(t: DateTime) -> String {
    t.format("%Y-%m-%dT%H:%M:%SZ").to_string()
}
