//! Leaderboard time windows. All timestamps are Unix milliseconds in UTC.

use crate::models::TimePeriod;
use chrono::{DateTime, Datelike, Duration, TimeZone, Utc};

pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Inclusive lower bound of the aggregation window for `period`.
pub fn window_start(period: TimePeriod, now: DateTime<Utc>) -> i64 {
    match period {
        TimePeriod::Weekly => (now - Duration::days(7)).timestamp_millis(),
        TimePeriod::Monthly => first_of_month(now.year(), now.month()),
        // Quarters start in January, April, July, October.
        TimePeriod::Seasonal => first_of_month(now.year(), (now.month0() / 3) * 3 + 1),
        TimePeriod::AllTime => 0,
    }
}

fn first_of_month(year: i32, month: u32) -> i64 {
    Utc.with_ymd_and_hms(year, month, 1, 0, 0, 0)
        .single()
        .map(|dt| dt.timestamp_millis())
        .unwrap_or(0)
}
