// Test fixtures - reusable targets and instants
#![allow(dead_code)]

use chrono::{DateTime, Duration, TimeZone, Utc};
use std::sync::Arc;

use celebration_countdown::services::clock::TargetInstant;

/// The birthday: midnight on 10 December 2024 in India.
pub fn birthday() -> Arc<TargetInstant> {
    Arc::new(TargetInstant::parse("2024-12-10T00:00:00", "Asia/Kolkata").expect("valid target"))
}

/// 18:30 UTC on 9 December 2024, the same instant as [`birthday`].
pub fn birthday_utc() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 12, 9, 18, 30, 0).unwrap()
}

/// `days` and `hours` before the birthday.
pub fn before_birthday(days: i64, hours: i64) -> DateTime<Utc> {
    birthday_utc() - Duration::days(days) - Duration::hours(hours)
}
