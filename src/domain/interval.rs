//! Rolling-interval arithmetic
//!
//! Temporary Exposure Keys are scoped to 10-minute "rolling intervals"
//! counted from the Unix epoch. All interval math is done in UTC.

use chrono::{DateTime, NaiveTime, Utc};

/// Length of an exposure key in bytes
pub const KEY_LENGTH: usize = 16;

/// Length of one rolling interval in seconds
pub const INTERVAL_LENGTH_SECS: i64 = 600;

/// Maximum number of rolling intervals a key may be valid for (one day)
pub const MAX_INTERVAL_COUNT: i32 = 144;

/// Returns the rolling-interval number containing the given instant.
pub fn interval_number(timestamp: DateTime<Utc>) -> i64 {
    timestamp.timestamp() / INTERVAL_LENGTH_SECS
}

/// Returns the instant at which the given rolling interval starts.
pub fn interval_start(interval: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(interval * INTERVAL_LENGTH_SECS, 0)
        .expect("interval start is within chrono's representable range")
}

/// Returns UTC midnight of the day containing the given instant.
pub fn start_of_day_utc(timestamp: DateTime<Utc>) -> DateTime<Utc> {
    timestamp
        .date_naive()
        .and_time(NaiveTime::MIN)
        .and_utc()
}
