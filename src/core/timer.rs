//! The live-tracking timer.
//!
//! A single optional deadline. Arming replaces whatever was pending, so at
//! most one tick is ever outstanding. The owning controller polls it; nothing
//! fires on its own.

use chrono::{DateTime, Utc};
use tracing::trace;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LiveTimer {
    deadline: Option<DateTime<Utc>>,
}

impl LiveTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancel any pending deadline and schedule a new one.
    pub fn arm(&mut self, deadline: DateTime<Utc>) {
        if let Some(previous) = self.deadline.replace(deadline) {
            trace!(%previous, %deadline, "live timer re-armed");
        } else {
            trace!(%deadline, "live timer armed");
        }
    }

    /// Cancel the pending deadline, if any.
    pub fn disarm(&mut self) {
        if let Some(deadline) = self.deadline.take() {
            trace!(%deadline, "live timer disarmed");
        }
    }

    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn deadline(&self) -> Option<DateTime<Utc>> {
        self.deadline
    }

    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        self.deadline.is_some_and(|deadline| now >= deadline)
    }
}
