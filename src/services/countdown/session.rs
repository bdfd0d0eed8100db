//! The countdown state machine.
//!
//! A session starts `Running` (or `Expired` when the target has already
//! passed) and moves to `Expired` at most once. The completion callback is
//! consumed on that transition, so it cannot run twice no matter how many
//! ticks observe the expired duration afterwards.

use std::fmt;
use std::sync::Arc;

use crate::models::countdown::{CountdownSnapshot, CountdownState, RemainingDuration};
use crate::models::settings::CountdownSettings;
use crate::services::clock::{Clock, TargetInstant};
use crate::utils::error::Result;

use super::duration::decompose;

/// Invoked once when the countdown reaches zero.
pub type ExpireCallback = Box<dyn FnOnce() + Send + 'static>;

pub struct CountdownSession<C: Clock> {
    target: Arc<TargetInstant>,
    clock: C,
    latest: RemainingDuration,
    state: CountdownState,
    has_fired: bool,
    cancelled: bool,
    on_expire: Option<ExpireCallback>,
}

impl<C: Clock> CountdownSession<C> {
    /// Computes the initial duration immediately. A target that has already
    /// passed yields an `Expired` session and fires `on_expire` before this
    /// returns.
    pub fn new(target: Arc<TargetInstant>, clock: C, on_expire: Option<ExpireCallback>) -> Self {
        let latest = decompose(target.millis_from(clock.now()));
        let mut session = Self {
            target,
            clock,
            latest,
            state: CountdownState::Running,
            has_fired: false,
            cancelled: false,
            on_expire,
        };

        log::info!(
            "Countdown session started for {} ({}), {} ms remaining",
            session.target.source(),
            session.target.timezone().name(),
            session.latest.total_ms
        );

        if session.latest.is_expired {
            session.expire();
        }
        session
    }

    /// Parses the configured target and zone first; on failure no session
    /// exists and nothing is polled.
    pub fn from_settings(
        settings: &CountdownSettings,
        clock: C,
        on_expire: Option<ExpireCallback>,
    ) -> Result<Self> {
        let target = TargetInstant::parse(&settings.target, &settings.timezone)?;
        Ok(Self::new(Arc::new(target), clock, on_expire))
    }

    /// Re-derives the remaining duration from the clock and returns the new
    /// snapshot. Once expired or cancelled this leaves the state untouched.
    pub fn tick(&mut self) -> CountdownSnapshot {
        if self.cancelled || self.state == CountdownState::Expired {
            return self.snapshot();
        }

        self.latest = decompose(self.target.millis_from(self.clock.now()));
        if self.latest.is_expired {
            self.expire();
        }
        self.snapshot()
    }

    pub fn snapshot(&self) -> CountdownSnapshot {
        CountdownSnapshot {
            remaining: self.latest,
            state: self.state,
        }
    }

    /// Stops further ticks from doing anything. Safe to call repeatedly.
    pub fn cancel(&mut self) {
        if !self.cancelled {
            log::debug!("Countdown session for {} cancelled", self.target.source());
            self.cancelled = true;
        }
    }

    pub fn state(&self) -> CountdownState {
        self.state
    }

    pub fn is_expired(&self) -> bool {
        self.state == CountdownState::Expired
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    pub fn has_fired(&self) -> bool {
        self.has_fired
    }

    pub fn target(&self) -> &Arc<TargetInstant> {
        &self.target
    }

    fn expire(&mut self) {
        self.state = CountdownState::Expired;
        self.latest = RemainingDuration::expired();

        if self.has_fired {
            return;
        }
        self.has_fired = true;

        log::info!("Countdown for {} reached zero", self.target.source());
        if let Some(callback) = self.on_expire.take() {
            callback();
        }
    }
}

impl<C: Clock> fmt::Debug for CountdownSession<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CountdownSession")
            .field("target", &self.target)
            .field("latest", &self.latest)
            .field("state", &self.state)
            .field("has_fired", &self.has_fired)
            .field("cancelled", &self.cancelled)
            .finish_non_exhaustive()
    }
}
