//! Tokio-backed tick source.
//!
//! Each registration spawns an interval task that pushes its token into a
//! channel; the session loop pulls tokens out and hands them to the timer.

use std::collections::HashMap;
use std::time::Duration;

use focuscoin_core::storage::MAX_TICK_INTERVAL_MS;
use focuscoin_core::{Scheduler, TickToken};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

pub struct TokioScheduler {
    next_id: u64,
    tx: mpsc::UnboundedSender<TickToken>,
    tasks: HashMap<TickToken, JoinHandle<()>>,
}

impl TokioScheduler {
    /// Must be called inside a tokio runtime.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<TickToken>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let scheduler = Self {
            next_id: 0,
            tx,
            tasks: HashMap::new(),
        };
        (scheduler, rx)
    }
}

impl Scheduler for TokioScheduler {
    fn schedule_recurring(&mut self, interval: Duration) -> TickToken {
        self.next_id += 1;
        let token = TickToken(self.next_id);
        let tx = self.tx.clone();
        // tokio panics on a zero period; keep every interval in range.
        let interval = interval.clamp(
            Duration::from_millis(1),
            Duration::from_millis(MAX_TICK_INTERVAL_MS),
        );
        let first = Instant::now() + interval;

        let handle = tokio::spawn(async move {
            // First firing one full interval from now, not immediately.
            let mut ticker = time::interval_at(first, interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                if tx.send(token).is_err() {
                    break;
                }
            }
        });
        self.tasks.insert(token, handle);
        tracing::debug!(?token, ?interval, "ticker spawned");
        token
    }

    fn cancel(&mut self, token: TickToken) {
        if let Some(handle) = self.tasks.remove(&token) {
            handle.abort();
            tracing::debug!(?token, "ticker aborted");
        }
    }
}

impl Drop for TokioScheduler {
    fn drop(&mut self) {
        for (_, handle) in self.tasks.drain() {
            handle.abort();
        }
    }
}
