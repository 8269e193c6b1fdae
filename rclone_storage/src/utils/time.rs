use chrono::{DateTime, FixedOffset};

/// Timestamp layout without fractional seconds, e.g. "2021-01-21T05:52:50+0000".
const FORMAT_SECONDS: &str = "%Y-%m-%dT%H:%M:%S%z";
/// Timestamp layout with fractional seconds, e.g. "2021-01-21T05:52:50.123456789+0000".
const FORMAT_FRACTIONAL: &str = "%Y-%m-%dT%H:%M:%S%.f%z";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("Unrecognized timestamp '{0}'")]
pub struct TimestampError(pub String);

/// Parses a modification time as printed by `rclone lsjson`.
///
/// The whole-second layout is tried first, then the fractional one. A
/// trailing `Z` is read as UTC.
///
/// # Errors
/// Returns a `TimestampError` carrying the input when neither layout matches.
pub fn parse_mod_time(s: &str) -> Result<DateTime<FixedOffset>, TimestampError> {
    let normalized = match s.strip_suffix('Z') {
        Some(head) => format!("{}+0000", head),
        None => s.to_string(),
    };
    DateTime::parse_from_str(&normalized, FORMAT_SECONDS)
        .or_else(|_| DateTime::parse_from_str(&normalized, FORMAT_FRACTIONAL))
        .map_err(|_| TimestampError(s.to_string()))
}
