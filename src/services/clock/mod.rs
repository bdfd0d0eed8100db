//! Clock sources and the resolved countdown target.
//!
//! The target is pinned to a UTC instant once, when it is parsed. Every tick
//! after that only subtracts two UTC timestamps, so the host's local zone never
//! leaks into the result.

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, NaiveDateTime, Utc};
use chrono_tz::Tz;

use crate::utils::date::{parse_target, parse_timezone, resolve_in_zone, ParsedTarget};
use crate::utils::error::Result;

/// Source of "now".
#[cfg_attr(test, mockall::automock)]
pub trait Clock: Send {
    fn now(&self) -> DateTime<Utc>;
}

/// Reads the system wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Always reports the same instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// A clock that only moves when told to. Share it through an `Arc` to keep a
/// handle while a session owns the other end.
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(start),
        }
    }

    pub fn set(&self, instant: DateTime<Utc>) {
        *self.lock() = instant;
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.lock();
        *now = *now + by;
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, DateTime<Utc>> {
        // A poisoned guard still holds a valid timestamp.
        self.now.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.lock()
    }
}

impl<C: Clock + Sync + ?Sized> Clock for Arc<C> {
    fn now(&self) -> DateTime<Utc> {
        (**self).now()
    }
}

/// The instant a countdown runs toward. Built once from configuration and
/// shared read-only between sessions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetInstant {
    utc: DateTime<Utc>,
    timezone: Tz,
    source: String,
}

impl TargetInstant {
    /// Parses `target` as a civil time in `timezone`. Strings that carry their
    /// own offset are taken as absolute instants.
    pub fn parse(target: &str, timezone: &str) -> Result<Self> {
        let tz = parse_timezone(timezone)?;
        let utc = match parse_target(target)? {
            ParsedTarget::Civil(naive) => resolve_in_zone(naive, tz)?,
            ParsedTarget::Absolute(instant) => instant.with_timezone(&Utc),
        };

        log::debug!("Resolved countdown target '{}' ({}) to {}", target, tz.name(), utc);

        Ok(Self {
            utc,
            timezone: tz,
            source: target.trim().to_string(),
        })
    }

    pub fn from_utc(utc: DateTime<Utc>, timezone: Tz) -> Self {
        Self {
            utc,
            timezone,
            source: utc.to_rfc3339(),
        }
    }

    pub fn utc(&self) -> DateTime<Utc> {
        self.utc
    }

    pub fn timezone(&self) -> Tz {
        self.timezone
    }

    /// The configuration string this target was built from.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The target as wall-clock time in its own zone.
    pub fn civil(&self) -> NaiveDateTime {
        self.utc.with_timezone(&self.timezone).naive_local()
    }

    /// `now` projected into the target's zone.
    pub fn civil_now(&self, clock: &dyn Clock) -> NaiveDateTime {
        clock.now().with_timezone(&self.timezone).naive_local()
    }

    /// Signed milliseconds from `now` until the target.
    pub fn millis_from(&self, now: DateTime<Utc>) -> i64 {
        (self.utc - now).num_milliseconds()
    }
}
