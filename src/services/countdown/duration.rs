//! Splitting a millisecond difference into display fields.

use chrono::{DateTime, Utc};

use crate::models::countdown::{
    RemainingDuration, MS_PER_DAY, MS_PER_HOUR, MS_PER_MINUTE, MS_PER_SECOND,
    MS_PER_SUB_SECOND_UNIT,
};

/// Decomposes a signed millisecond difference. Every field truncates, so the
/// fields never add up to more time than is actually left.
pub fn decompose(diff_ms: i64) -> RemainingDuration {
    if diff_ms <= 0 {
        return RemainingDuration::expired();
    }

    // All remainders below are < 100, < 60 or < 24, so the narrowing casts are exact.
    RemainingDuration {
        days: (diff_ms / MS_PER_DAY) as u64,
        hours: (diff_ms % MS_PER_DAY / MS_PER_HOUR) as u8,
        minutes: (diff_ms % MS_PER_HOUR / MS_PER_MINUTE) as u8,
        seconds: (diff_ms % MS_PER_MINUTE / MS_PER_SECOND) as u8,
        sub_second_units: (diff_ms % MS_PER_SECOND / MS_PER_SUB_SECOND_UNIT) as u8,
        total_ms: diff_ms as u64,
        is_expired: false,
    }
}

/// Remaining time from `now` until `target`.
pub fn remaining_between(now: DateTime<Utc>, target: DateTime<Utc>) -> RemainingDuration {
    decompose((target - now).num_milliseconds())
}
