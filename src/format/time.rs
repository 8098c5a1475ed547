//! Capture timestamp formatting.

use chrono::{DateTime, SecondsFormat};

/// Format a microsecond Unix timestamp as RFC 3339 in UTC.
///
/// Falls back to the raw microsecond count when the value is outside the
/// range chrono can represent.
pub fn format_timestamp_us(timestamp_us: i64) -> String {
    let secs = timestamp_us.div_euclid(1_000_000);
    let nanos = (timestamp_us.rem_euclid(1_000_000) * 1_000) as u32;
    match DateTime::from_timestamp(secs, nanos) {
        Some(dt) => dt.to_rfc3339_opts(SecondsFormat::Micros, true),
        None => timestamp_us.to_string(),
    }
}
