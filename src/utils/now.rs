use chrono::{SecondsFormat, Utc};

/// Returns the current UTC time as an ISO-8601 / RFC 3339 string with
/// microsecond precision and a `Z` suffix, e.g.
/// `2025-11-17T14:03:27.412907Z`.
///
/// This is the `timestamp` attached to every published sample.
///
/// # Example:
/// ```rust
/// use thinkgear::utils::now_iso8601;
/// let timestamp = now_iso8601();
/// assert!(timestamp.ends_with('Z'));
/// ```
pub fn now_iso8601() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}
