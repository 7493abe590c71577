//! # focuscoin Core Library
//!
//! Business logic for a focus timer that pays virtual currency for
//! finished sessions. Hosts (the CLI, or any UI) drive it; nothing here
//! spawns threads or touches the terminal.
//!
//! ## Architecture
//!
//! - **Session Timer**: a tick-driven state machine. The host supplies a
//!   [`Scheduler`] and feeds its ticks back through `tick()`
//! - **Rewards**: fixed payouts for the canonical presets, pro rata otherwise
//! - **Storage**: a key-value port ([`KeyValueStore`]) with SQLite and
//!   in-memory backends, the persisted [`Wallet`], and TOML [`Config`]
//!
//! ## Key Components
//!
//! - [`SessionTimer`]: countdown and reward state machine
//! - [`Wallet`]: persisted balance
//! - [`Event`]: emitted on every state change

pub mod clock;
pub mod error;
pub mod events;
pub mod quotes;
pub mod reward;
pub mod storage;
pub mod timer;

pub use clock::{ManualScheduler, Scheduler, TickToken};
pub use error::{ConfigError, CoreError, StoreError};
pub use events::{Event, Snapshot};
pub use reward::{compute_reward, format_time, parse_custom_minutes, Preset};
pub use storage::{Config, KeyValueStore, MemoryStore, SqliteStore, Wallet};
pub use timer::{SessionTimer, TimerState};
