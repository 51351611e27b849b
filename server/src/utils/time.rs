//! Time utility functions
//!
//! The store keeps every timestamp as INTEGER unix milliseconds (UTC).

use chrono::{DateTime, Utc};

/// Convert milliseconds since Unix epoch to DateTime<Utc>
pub fn millis_to_datetime(millis: i64) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(millis).unwrap_or_else(|| {
        tracing::warn!(millis, "Invalid timestamp, using epoch");
        DateTime::UNIX_EPOCH
    })
}

/// Nullable column variant of [`millis_to_datetime`]
pub fn opt_millis_to_datetime(millis: Option<i64>) -> Option<DateTime<Utc>> {
    millis.map(millis_to_datetime)
}
