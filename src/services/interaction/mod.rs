//! One-shot trigger for the first user interaction.
//!
//! Browsers refuse to start audio until the visitor has clicked, touched or
//! pressed a key. The latch listens for any of those, fires its callback for
//! the first one, then drops every listener. The fire path is a single
//! compare-exchange, so events racing in from several sources still fire once.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InteractionKind {
    Click,
    TouchStart,
    KeyDown,
}

impl InteractionKind {
    pub const ALL: [InteractionKind; 3] = [
        InteractionKind::Click,
        InteractionKind::TouchStart,
        InteractionKind::KeyDown,
    ];
}

type InteractionCallback = Box<dyn FnOnce(InteractionKind) + Send + 'static>;

pub struct FirstInteractionLatch {
    fired: AtomicBool,
    listeners: Mutex<Vec<InteractionKind>>,
    callback: Mutex<Option<InteractionCallback>>,
}

impl FirstInteractionLatch {
    pub fn new<F>(kinds: &[InteractionKind], callback: F) -> Self
    where
        F: FnOnce(InteractionKind) + Send + 'static,
    {
        let mut listeners = Vec::with_capacity(kinds.len());
        for kind in kinds {
            if !listeners.contains(kind) {
                listeners.push(*kind);
            }
        }
        Self {
            fired: AtomicBool::new(false),
            listeners: Mutex::new(listeners),
            callback: Mutex::new(Some(Box::new(callback))),
        }
    }

    /// Listens for clicks, touches and key presses.
    pub fn for_all<F>(callback: F) -> Self
    where
        F: FnOnce(InteractionKind) + Send + 'static,
    {
        Self::new(&InteractionKind::ALL, callback)
    }

    /// Delivers an event. Returns `true` only for the call that fired.
    pub fn notify(&self, kind: InteractionKind) -> bool {
        if !self.is_listening_for(kind) {
            return false;
        }
        if self
            .fired
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return false;
        }

        self.unregister_all();
        let callback = self
            .callback
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .take();
        if let Some(callback) = callback {
            log::debug!("First interaction ({:?}) received", kind);
            callback(kind);
        }
        true
    }

    /// Drops all listeners without firing, as on view teardown.
    pub fn disarm(&self) {
        self.fired.store(true, Ordering::SeqCst);
        self.unregister_all();
        self.callback
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .take();
    }

    pub fn has_fired(&self) -> bool {
        self.fired.load(Ordering::SeqCst)
    }

    pub fn is_listening_for(&self, kind: InteractionKind) -> bool {
        self.listeners
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .contains(&kind)
    }

    pub fn listener_count(&self) -> usize {
        self.listeners
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }

    fn unregister_all(&self) {
        self.listeners
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clear();
    }
}

impl std::fmt::Debug for FirstInteractionLatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FirstInteractionLatch")
            .field("fired", &self.has_fired())
            .field("listeners", &self.listener_count())
            .finish()
    }
}
