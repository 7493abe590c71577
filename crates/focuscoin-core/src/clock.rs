//! Recurring tick scheduling.
//!
//! The timer never owns a thread. It asks a [`Scheduler`] for a recurring
//! registration and gets back a [`TickToken`]; the host delivers each firing
//! back through `SessionTimer::tick(token)`.

use std::collections::BTreeMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Cancellation handle for one recurring registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TickToken(pub u64);

/// Source of recurring ticks.
///
/// After `cancel(token)` returns, the scheduler must not deliver `token`
/// again. Tokens already in flight are rejected by the timer.
pub trait Scheduler {
    fn schedule_recurring(&mut self, interval: Duration) -> TickToken;
    fn cancel(&mut self, token: TickToken);
}

/// Deterministic scheduler: registrations are recorded and fired by hand.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    next_id: u64,
    active: BTreeMap<TickToken, Duration>,
    cancelled: u64,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    pub fn is_active(&self, token: TickToken) -> bool {
        self.active.contains_key(&token)
    }

    pub fn interval_of(&self, token: TickToken) -> Option<Duration> {
        self.active.get(&token).copied()
    }

    /// Number of registrations cancelled so far.
    pub fn cancelled_count(&self) -> u64 {
        self.cancelled
    }
}

impl Scheduler for ManualScheduler {
    fn schedule_recurring(&mut self, interval: Duration) -> TickToken {
        self.next_id += 1;
        let token = TickToken(self.next_id);
        self.active.insert(token, interval);
        token
    }

    fn cancel(&mut self, token: TickToken) {
        if self.active.remove(&token).is_some() {
            self.cancelled += 1;
        }
    }
}
