use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::timer::TimerState;

/// Every state change of a session produces an Event.
/// The host renders them; nothing in the core consumes them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    SessionStarted {
        task_label: String,
        total_secs: u64,
        at: DateTime<Utc>,
    },
    SessionPaused {
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    SessionResumed {
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    /// Countdown reached zero. The reward is pending until acknowledged.
    SessionCompleted {
        task_label: String,
        total_secs: u64,
        reward: u64,
        at: DateTime<Utc>,
    },
    SessionExited {
        /// State the timer was in before the exit.
        from: TimerState,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    /// Reward added to the wallet. `persist_error` is set when the new
    /// balance could not be written; the in-memory balance still stands.
    RewardCredited {
        reward: u64,
        balance: u64,
        persist_error: Option<String>,
        at: DateTime<Utc>,
    },
}

/// Read-only view handed to the presentation layer after every mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub state: TimerState,
    pub remaining_secs: u64,
    pub total_secs: u64,
    pub task_label: String,
    pub pending_reward: Option<u64>,
    pub wallet_balance: u64,
}
