//! Transient user notifications.
//!
//! At most one notification is visible. Publishing replaces whatever is
//! showing, there is no backlog. Each notification expires a fixed time after
//! it was published unless it is held (hovered) or dismissed first.
//!
//! Expiry is deadline based and checked on read, using [`tokio::time::Instant`]
//! so tests can drive it with a paused clock.

use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use showroom_core::Severity;
use tokio::time::Instant;
use tracing::debug;
use uuid::Uuid;

/// A user-facing notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub id: Uuid,
    pub message: String,
    pub severity: Severity,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Default)]
struct Slot {
    current: Option<Notification>,
    /// `None` while held or when nothing is showing.
    deadline: Option<Instant>,
}

impl Slot {
    fn expire_if_due(&mut self, now: Instant) {
        if self.deadline.is_some_and(|deadline| now >= deadline) {
            if let Some(expired) = self.current.take() {
                debug!(id = %expired.id, "Notification expired");
            }
            self.deadline = None;
        }
    }
}

/// Single-slot notification holder.
#[derive(Debug)]
pub struct NotificationCenter {
    slot: Mutex<Slot>,
    ttl: Duration,
}

impl Default for NotificationCenter {
    fn default() -> Self {
        Self::new(Self::DEFAULT_TTL)
    }
}

impl NotificationCenter {
    /// How long a notification stays up by default.
    pub const DEFAULT_TTL: Duration = Duration::from_millis(3000);

    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self {
            slot: Mutex::new(Slot::default()),
            ttl,
        }
    }

    #[must_use]
    pub const fn ttl(&self) -> Duration {
        self.ttl
    }

    fn slot(&self) -> MutexGuard<'_, Slot> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Show a notification, replacing any current one, and start its countdown.
    pub fn publish(&self, message: impl Into<String>, severity: Severity) -> Uuid {
        let notification = Notification {
            id: Uuid::new_v4(),
            message: message.into(),
            severity,
            created_at: Utc::now(),
        };
        let id = notification.id;
        debug!(%id, %severity, message = %notification.message, "Notification published");

        let mut slot = self.slot();
        slot.current = Some(notification);
        slot.deadline = Some(Instant::now() + self.ttl);
        id
    }

    /// The visible notification, if any.
    #[must_use]
    pub fn current(&self) -> Option<Notification> {
        let mut slot = self.slot();
        slot.expire_if_due(Instant::now());
        slot.current.clone()
    }

    /// Close the current notification early. Returns what was showing.
    pub fn dismiss(&self) -> Option<Notification> {
        let mut slot = self.slot();
        slot.expire_if_due(Instant::now());
        slot.deadline = None;
        slot.current.take()
    }

    /// Suspend auto-dismiss while the pointer is over the notification.
    ///
    /// Returns false if nothing is showing.
    pub fn hold(&self) -> bool {
        let mut slot = self.slot();
        slot.expire_if_due(Instant::now());
        if slot.current.is_none() {
            return false;
        }
        slot.deadline = None;
        true
    }

    /// Resume auto-dismiss after a hold, with a fresh full countdown.
    pub fn release(&self) {
        let mut slot = self.slot();
        if slot.current.is_some() && slot.deadline.is_none() {
            slot.deadline = Some(Instant::now() + self.ttl);
        }
    }

    /// Time left before the current notification expires.
    ///
    /// `None` when nothing is showing or the notification is held.
    #[must_use]
    pub fn remaining(&self) -> Option<Duration> {
        let mut slot = self.slot();
        let now = Instant::now();
        slot.expire_if_due(now);
        slot.deadline.map(|deadline| deadline.saturating_duration_since(now))
    }
}
