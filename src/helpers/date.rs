//! Date helper functions

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use std::time::SystemTime;

/// Format a date as `YYYY-MM-DD`
pub fn format_ymd<Tz: TimeZone>(date: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    date.format("%Y-%m-%d").to_string()
}

/// Convert a filesystem timestamp to UTC
pub fn from_system_time(time: SystemTime) -> DateTime<Utc> {
    DateTime::<Utc>::from(time)
}

/// Midnight UTC on the given day
pub fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(chrono::NaiveTime::MIN).and_utc()
}
