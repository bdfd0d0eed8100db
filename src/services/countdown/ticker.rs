//! Drives a [`CountdownSession`] from a recurring tokio interval.
//!
//! One task per session. `MissedTickBehavior::Skip` keeps the task
//! single-flight: a late tick is dropped rather than queued, and each tick runs
//! to completion before the next is awaited. Readers only ever see whole
//! snapshots through the watch channel.

use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};

use crate::models::countdown::CountdownSnapshot;
use crate::services::clock::Clock;
use crate::utils::error::{ConfigurationError, Result};

use super::session::CountdownSession;

pub struct CountdownTicker;

impl CountdownTicker {
    /// Spawns the polling task on the current tokio runtime. The returned
    /// handle owns the timer; dropping it cancels polling.
    pub fn spawn<C>(mut session: CountdownSession<C>, cadence: Duration) -> Result<CountdownHandle>
    where
        C: Clock + 'static,
    {
        if cadence.is_zero() {
            return Err(ConfigurationError::InvalidTickInterval);
        }

        let (tx, rx) = watch::channel(session.snapshot());

        let task = tokio::spawn(async move {
            if session.is_expired() {
                return;
            }

            let mut interval = time::interval(cadence);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            // The first tick completes immediately; the construction-time
            // snapshot is already published.
            interval.tick().await;

            loop {
                interval.tick().await;
                let snapshot = session.tick();
                if tx.send(snapshot).is_err() {
                    log::debug!("All countdown readers gone; stopping ticker");
                    break;
                }
                if snapshot.is_expired() {
                    break;
                }
            }
        });

        Ok(CountdownHandle {
            rx,
            task: Some(task),
        })
    }
}

/// Read and cancellation side of a running countdown.
#[derive(Debug)]
pub struct CountdownHandle {
    rx: watch::Receiver<CountdownSnapshot>,
    task: Option<JoinHandle<()>>,
}

impl CountdownHandle {
    /// Latest fully computed snapshot. Before the first tick this is the
    /// value computed when the session was created.
    pub fn snapshot(&self) -> CountdownSnapshot {
        *self.rx.borrow()
    }

    /// Waits for the next published snapshot. Returns `false` once the
    /// ticker has stopped and nothing new will arrive.
    pub async fn changed(&mut self) -> bool {
        self.rx.changed().await.is_ok()
    }

    /// Stops polling. Calling it again, or after expiry, does nothing.
    pub fn cancel(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
            log::debug!("Countdown ticker cancelled");
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.task.is_none()
    }

    /// True once the polling task has exited, for whatever reason.
    pub fn is_finished(&self) -> bool {
        self.task.as_ref().map_or(true, |task| task.is_finished())
    }
}

impl Drop for CountdownHandle {
    fn drop(&mut self) {
        self.cancel();
    }
}
