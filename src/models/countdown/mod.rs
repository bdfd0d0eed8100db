//! Countdown value types.
//!
//! A [`RemainingDuration`] is recomputed from scratch on every tick and is
//! never mutated in place. [`CountdownSnapshot`] pairs it with the state the
//! session was in when it was computed, which is what views read.

use serde::{Deserialize, Serialize};

pub const MS_PER_DAY: i64 = 86_400_000;
pub const MS_PER_HOUR: i64 = 3_600_000;
pub const MS_PER_MINUTE: i64 = 60_000;
pub const MS_PER_SECOND: i64 = 1_000;
/// Milliseconds per sub-second display unit (centiseconds).
pub const MS_PER_SUB_SECOND_UNIT: i64 = 10;

/// Time left until the target, split into display fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct RemainingDuration {
    pub days: u64,
    pub hours: u8,
    pub minutes: u8,
    pub seconds: u8,
    /// Centiseconds, 0..=99.
    pub sub_second_units: u8,
    /// Raw milliseconds left; zero once expired.
    pub total_ms: u64,
    pub is_expired: bool,
}

impl RemainingDuration {
    /// The all-zero terminal value.
    pub const fn expired() -> Self {
        Self {
            days: 0,
            hours: 0,
            minutes: 0,
            seconds: 0,
            sub_second_units: 0,
            total_ms: 0,
            is_expired: true,
        }
    }

    /// Milliseconds represented by the decomposed fields. Never exceeds
    /// `total_ms` and trails it by less than one sub-second unit.
    pub fn reconstructed_ms(&self) -> u64 {
        self.days * MS_PER_DAY as u64
            + u64::from(self.hours) * MS_PER_HOUR as u64
            + u64::from(self.minutes) * MS_PER_MINUTE as u64
            + u64::from(self.seconds) * MS_PER_SECOND as u64
            + u64::from(self.sub_second_units) * MS_PER_SUB_SECOND_UNIT as u64
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CountdownState {
    #[default]
    Running,
    /// Terminal.
    Expired,
}

/// What a view reads between ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountdownSnapshot {
    pub remaining: RemainingDuration,
    pub state: CountdownState,
}

impl CountdownSnapshot {
    pub fn is_expired(&self) -> bool {
        self.state == CountdownState::Expired
    }
}
