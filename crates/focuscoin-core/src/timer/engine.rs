//! Session timer implementation.
//!
//! The session timer is a tick-driven state machine. It does not use
//! internal threads - a [`Scheduler`] hands out tick tokens and the host
//! feeds each firing back through `tick()`.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Running <-> Paused
//!            |
//!            v
//!        Completed -> (acknowledge) -> Idle
//!
//! any -> (exit) -> Idle
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! let mut timer = SessionTimer::new(scheduler);
//! timer.start(3600, "Write report");
//! // For each tick delivered by the scheduler:
//! if let Some(Event::SessionCompleted { .. }) = timer.tick(token) { ... }
//! timer.acknowledge(&mut wallet, &mut store);
//! ```

use std::time::Duration;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::clock::{Scheduler, TickToken};
use crate::events::{Event, Snapshot};
use crate::reward::{compute_reward, parse_custom_minutes, Preset};
use crate::storage::{KeyValueStore, Wallet};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerState {
    Idle,
    Running,
    Paused,
    /// Countdown finished; reward waits for acknowledgement.
    Completed,
}

/// Fields that exist only while a session is in progress.
#[derive(Debug, Clone)]
struct Session {
    task_label: String,
    total_secs: u64,
    remaining_secs: u64,
}

/// Countdown and reward state machine for one focus session at a time.
///
/// Holds at most one live tick registration. Every transition out of
/// `Running` cancels it before anything else happens.
#[derive(Debug)]
pub struct SessionTimer<S: Scheduler> {
    scheduler: S,
    interval: Duration,
    state: TimerState,
    session: Option<Session>,
    tick: Option<TickToken>,
    pending_reward: Option<u64>,
}

impl<S: Scheduler> SessionTimer<S> {
    /// Create an idle timer ticking once per second.
    pub fn new(scheduler: S) -> Self {
        Self::with_interval(scheduler, Duration::from_secs(1))
    }

    /// Create an idle timer with a custom tick interval. Each tick still
    /// counts as one second of the session.
    pub fn with_interval(scheduler: S, interval: Duration) -> Self {
        Self {
            scheduler,
            interval,
            state: TimerState::Idle,
            session: None,
            tick: None,
            pending_reward: None,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn remaining_secs(&self) -> u64 {
        self.session.as_ref().map(|s| s.remaining_secs).unwrap_or(0)
    }

    pub fn total_secs(&self) -> u64 {
        self.session.as_ref().map(|s| s.total_secs).unwrap_or(0)
    }

    pub fn task_label(&self) -> &str {
        self.session.as_ref().map(|s| s.task_label.as_str()).unwrap_or("")
    }

    /// Reward waiting for acknowledgement; only set while `Completed`.
    pub fn pending_reward(&self) -> Option<u64> {
        self.pending_reward
    }

    /// The live tick registration, if the timer is running.
    pub fn tick_token(&self) -> Option<TickToken> {
        self.tick
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn snapshot(&self, wallet: &Wallet) -> Snapshot {
        Snapshot {
            state: self.state,
            remaining_secs: self.remaining_secs(),
            total_secs: self.total_secs(),
            task_label: self.task_label().to_string(),
            pending_reward: self.pending_reward,
            wallet_balance: wallet.balance(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Begin a session. No-op unless idle and `duration_secs > 0`.
    pub fn start(&mut self, duration_secs: u64, task_label: impl Into<String>) -> Option<Event> {
        if self.state != TimerState::Idle || duration_secs == 0 {
            debug!(state = ?self.state, duration_secs, "start ignored");
            return None;
        }
        let task_label = task_label.into();
        self.session = Some(Session {
            task_label: task_label.clone(),
            total_secs: duration_secs,
            remaining_secs: duration_secs,
        });
        self.state = TimerState::Running;
        self.arm_tick();
        debug!(duration_secs, task = %task_label, "session started");
        Some(Event::SessionStarted {
            task_label,
            total_secs: duration_secs,
            at: Utc::now(),
        })
    }

    pub fn start_preset(&mut self, preset: Preset, task_label: impl Into<String>) -> Option<Event> {
        self.start(preset.duration_secs(), task_label)
    }

    /// Start from user-typed minutes. Unparseable or non-positive input
    /// leaves the timer untouched.
    pub fn start_custom(&mut self, minutes: &str, task_label: impl Into<String>) -> Option<Event> {
        let Some(secs) = parse_custom_minutes(minutes) else {
            debug!(input = minutes, "custom duration rejected");
            return None;
        };
        self.start(secs, task_label)
    }

    pub fn pause(&mut self) -> Option<Event> {
        if self.state != TimerState::Running {
            return None;
        }
        self.disarm_tick();
        self.state = TimerState::Paused;
        Some(Event::SessionPaused {
            remaining_secs: self.remaining_secs(),
            at: Utc::now(),
        })
    }

    pub fn resume(&mut self) -> Option<Event> {
        if self.state != TimerState::Paused || self.remaining_secs() == 0 {
            return None;
        }
        self.state = TimerState::Running;
        self.arm_tick();
        Some(Event::SessionResumed {
            remaining_secs: self.remaining_secs(),
            at: Utc::now(),
        })
    }

    /// Abandon whatever is in progress. Always succeeds; an unacknowledged
    /// reward is forfeited.
    pub fn exit(&mut self) -> Event {
        let from = self.state;
        let remaining_secs = self.remaining_secs();
        self.clear();
        debug!(?from, remaining_secs, "session exited");
        Event::SessionExited {
            from,
            remaining_secs,
            at: Utc::now(),
        }
    }

    /// Handle one firing of the recurring tick.
    ///
    /// Ticks carrying anything but the live token, or arriving outside
    /// `Running`, are stale and ignored. Returns `SessionCompleted` on the
    /// tick that brings the countdown to zero.
    pub fn tick(&mut self, token: TickToken) -> Option<Event> {
        if self.state != TimerState::Running || self.tick != Some(token) {
            debug!(?token, live = ?self.tick, state = ?self.state, "stale tick ignored");
            return None;
        }
        let session = self.session.as_mut()?;
        session.remaining_secs = session.remaining_secs.saturating_sub(1);
        if session.remaining_secs > 0 {
            return None;
        }

        let total_secs = session.total_secs;
        let task_label = session.task_label.clone();
        self.disarm_tick();
        let reward = compute_reward(total_secs);
        self.state = TimerState::Completed;
        self.pending_reward = Some(reward);
        debug!(total_secs, reward, "session completed");
        Some(Event::SessionCompleted {
            task_label,
            total_secs,
            reward,
            at: Utc::now(),
        })
    }

    /// Credit the pending reward to `wallet` and persist it.
    ///
    /// No-op outside `Completed`, so a second call cannot double-credit.
    /// A failed write is reported in the event; the in-memory credit stands.
    pub fn acknowledge(
        &mut self,
        wallet: &mut Wallet,
        store: &mut dyn KeyValueStore,
    ) -> Option<Event> {
        if self.state != TimerState::Completed {
            return None;
        }
        let reward = self.pending_reward.unwrap_or(0);
        let balance = wallet.credit(reward);
        self.clear();

        let persist_error = match wallet.persist(store) {
            Ok(()) => None,
            Err(e) => {
                warn!(error = %e, balance, "failed to persist wallet balance");
                Some(e.to_string())
            }
        };
        Some(Event::RewardCredited {
            reward,
            balance,
            persist_error,
            at: Utc::now(),
        })
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn arm_tick(&mut self) {
        self.disarm_tick();
        self.tick = Some(self.scheduler.schedule_recurring(self.interval));
    }

    fn disarm_tick(&mut self) {
        if let Some(token) = self.tick.take() {
            self.scheduler.cancel(token);
        }
    }

    fn clear(&mut self) {
        self.disarm_tick();
        self.state = TimerState::Idle;
        self.session = None;
        self.pending_reward = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualScheduler;
    use crate::storage::MemoryStore;

    fn timer() -> SessionTimer<ManualScheduler> {
        SessionTimer::new(ManualScheduler::new())
    }

    fn fire(timer: &mut SessionTimer<ManualScheduler>, n: u64) -> Vec<Event> {
        let mut events = Vec::new();
        for _ in 0..n {
            let Some(token) = timer.tick_token() else {
                break;
            };
            events.extend(timer.tick(token));
        }
        events
    }

    #[test]
    fn start_pause_resume() {
        let mut t = timer();
        assert_eq!(t.state(), TimerState::Idle);

        assert!(t.start(10, "Read").is_some());
        assert_eq!(t.state(), TimerState::Running);
        assert_eq!(t.task_label(), "Read");

        assert!(t.pause().is_some());
        assert_eq!(t.state(), TimerState::Paused);
        assert!(t.pause().is_none());

        assert!(t.resume().is_some());
        assert_eq!(t.state(), TimerState::Running);
        assert!(t.resume().is_none());
    }

    #[test]
    fn zero_duration_is_rejected() {
        let mut t = timer();
        assert!(t.start(0, "x").is_none());
        assert_eq!(t.state(), TimerState::Idle);
        assert_eq!(t.scheduler().active_count(), 0);
    }

    #[test]
    fn start_while_running_is_ignored() {
        let mut t = timer();
        t.start(100, "first");
        assert!(t.start(50, "second").is_none());
        assert_eq!(t.total_secs(), 100);
        assert_eq!(t.task_label(), "first");
        assert_eq!(t.scheduler().active_count(), 1);
    }

    #[test]
    fn countdown_completes_once() {
        let mut t = timer();
        t.start(3, "Short");
        let token = t.tick_token().unwrap();
        assert!(t.tick(token).is_none());
        assert!(t.tick(token).is_none());
        match t.tick(token) {
            Some(Event::SessionCompleted { reward, total_secs, .. }) => {
                assert_eq!(total_secs, 3);
                assert_eq!(reward, 0);
            }
            other => panic!("expected completion, got {other:?}"),
        }
        assert_eq!(t.state(), TimerState::Completed);
        assert_eq!(t.remaining_secs(), 0);
        assert!(t.tick(token).is_none());
        assert_eq!(t.scheduler().active_count(), 0);
    }

    #[test]
    fn one_hour_pays_canonical_reward() {
        let mut t = timer();
        t.start_preset(Preset::OneHour, "Deep work");
        let events = fire(&mut t, 3600);
        assert_eq!(events.len(), 1);
        assert_eq!(t.pending_reward(), Some(250));
    }

    #[test]
    fn paused_timer_ignores_ticks() {
        let mut t = timer();
        t.start(10, "x");
        fire(&mut t, 4);
        let token = t.tick_token().unwrap();
        t.pause();
        for _ in 0..5 {
            assert!(t.tick(token).is_none());
        }
        assert_eq!(t.remaining_secs(), 6);
        assert!(!t.scheduler().is_active(token));
    }

    #[test]
    fn resume_issues_fresh_token() {
        let mut t = timer();
        t.start(10, "x");
        let old = t.tick_token().unwrap();
        t.pause();
        t.resume();
        let new = t.tick_token().unwrap();
        assert_ne!(old, new);
        assert!(t.tick(old).is_none());
        assert_eq!(t.remaining_secs(), 10);
        t.tick(new);
        assert_eq!(t.remaining_secs(), 9);
        assert_eq!(t.scheduler().active_count(), 1);
    }

    #[test]
    fn resume_without_time_left_is_noop() {
        let mut t = timer();
        assert!(t.resume().is_none());
        assert_eq!(t.state(), TimerState::Idle);

        t.start(1, "x");
        fire(&mut t, 1);
        assert_eq!(t.state(), TimerState::Completed);
        assert!(t.resume().is_none());
        assert_eq!(t.state(), TimerState::Completed);
    }

    #[test]
    fn exit_clears_everything() {
        for prepare in [0u8, 1, 2, 3] {
            let mut t = timer();
            let mut stale = None;
            match prepare {
                0 => {}
                1 => {
                    t.start(5, "run");
                    stale = t.tick_token();
                }
                2 => {
                    t.start(5, "pause");
                    stale = t.tick_token();
                    t.pause();
                }
                _ => {
                    t.start(1, "done");
                    stale = t.tick_token();
                    fire(&mut t, 1);
                }
            }
            let ev = t.exit();
            assert!(matches!(ev, Event::SessionExited { .. }));
            assert_eq!(t.state(), TimerState::Idle);
            assert_eq!(t.remaining_secs(), 0);
            assert_eq!(t.total_secs(), 0);
            assert_eq!(t.task_label(), "");
            assert_eq!(t.pending_reward(), None);
            assert_eq!(t.scheduler().active_count(), 0);
            if let Some(token) = stale {
                assert!(t.tick(token).is_none());
                assert_eq!(t.remaining_secs(), 0);
            }
        }
    }

    #[test]
    fn acknowledge_credits_once() {
        let mut t = timer();
        let mut store = MemoryStore::new();
        let mut wallet = Wallet::new(100);
        t.start(1800, "Half hour");
        fire(&mut t, 1800);

        match t.acknowledge(&mut wallet, &mut store) {
            Some(Event::RewardCredited { reward, balance, persist_error, .. }) => {
                assert_eq!(reward, 125);
                assert_eq!(balance, 225);
                assert!(persist_error.is_none());
            }
            other => panic!("expected credit, got {other:?}"),
        }
        assert_eq!(Wallet::load(&store).unwrap().balance(), 225);
        assert!(t.acknowledge(&mut wallet, &mut store).is_none());
        assert_eq!(wallet.balance(), 225);
        assert_eq!(t.state(), TimerState::Idle);
    }

    #[test]
    fn acknowledge_before_completion_is_noop() {
        let mut t = timer();
        let mut store = MemoryStore::new();
        let mut wallet = Wallet::default();
        t.start(10, "x");
        assert!(t.acknowledge(&mut wallet, &mut store).is_none());
        assert_eq!(wallet.balance(), 0);
        assert_eq!(t.state(), TimerState::Running);
    }

    #[test]
    fn persist_failure_keeps_credit() {
        let mut t = timer();
        let mut store = MemoryStore::new();
        store.set_unavailable(true);
        let mut wallet = Wallet::new(10);
        t.start(3600, "x");
        fire(&mut t, 3600);

        match t.acknowledge(&mut wallet, &mut store) {
            Some(Event::RewardCredited { balance, persist_error, .. }) => {
                assert_eq!(balance, 260);
                assert!(persist_error.is_some());
            }
            other => panic!("expected credit, got {other:?}"),
        }
        assert_eq!(wallet.balance(), 260);
        assert_eq!(t.state(), TimerState::Idle);
    }

    #[test]
    fn custom_minutes() {
        let mut t = timer();
        assert!(t.start_custom("abc", "x").is_none());
        assert!(t.start_custom("-5", "x").is_none());
        assert_eq!(t.state(), TimerState::Idle);
        assert!(t.start_custom("45", "x").is_some());
        assert_eq!(t.total_secs(), 2700);
    }

    #[test]
    fn snapshot_reflects_state() {
        let mut t = timer();
        let wallet = Wallet::new(75);
        t.start(90, "Emails");
        fire(&mut t, 30);
        let snap = t.snapshot(&wallet);
        assert_eq!(snap.state, TimerState::Running);
        assert_eq!(snap.remaining_secs, 60);
        assert_eq!(snap.total_secs, 90);
        assert_eq!(snap.task_label, "Emails");
        assert_eq!(snap.pending_reward, None);
        assert_eq!(snap.wallet_balance, 75);
    }

    #[test]
    fn custom_interval_is_passed_to_scheduler() {
        let mut t = SessionTimer::with_interval(ManualScheduler::new(), Duration::from_millis(10));
        t.start(5, "fast");
        let token = t.tick_token().unwrap();
        assert_eq!(
            t.scheduler().interval_of(token),
            Some(Duration::from_millis(10))
        );
    }
}
