//! Zero-padded text for the countdown widget.

use std::fmt;

use serde::Serialize;

use crate::models::countdown::{CountdownSnapshot, RemainingDuration};

/// Every field padded to at least two digits. Days grow past two digits when
/// the event is more than 99 days out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormattedDuration {
    pub days: String,
    pub hours: String,
    pub minutes: String,
    pub seconds: String,
    pub centis: String,
}

impl From<&RemainingDuration> for FormattedDuration {
    fn from(remaining: &RemainingDuration) -> Self {
        Self {
            days: format!("{:02}", remaining.days),
            hours: format!("{:02}", remaining.hours),
            minutes: format!("{:02}", remaining.minutes),
            seconds: format!("{:02}", remaining.seconds),
            centis: format!("{:02}", remaining.sub_second_units),
        }
    }
}

impl FormattedDuration {
    /// Text for a live countdown. An expired countdown is hidden, not shown
    /// as zeroes.
    pub fn visible(snapshot: &CountdownSnapshot) -> Option<Self> {
        if snapshot.is_expired() {
            return None;
        }
        Some(Self::from(&snapshot.remaining))
    }
}

impl fmt::Display for FormattedDuration {
    /// `DD:HH:MM:SS.CC`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}:{}.{}",
            self.days, self.hours, self.minutes, self.seconds, self.centis
        )
    }
}
