mod config;
pub mod database;
mod wallet;

pub use config::{Config, DisplayConfig, TimerConfig, WalletConfig, MAX_TICK_INTERVAL_MS};
pub use database::SqliteStore;
pub use wallet::{Wallet, WALLET_KEY};

use std::collections::HashMap;
use std::path::PathBuf;

use crate::error::StoreError;

/// String key-value persistence port.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// In-process store. Can be flipped to unavailable to simulate a
/// storage outage.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    values: HashMap<String, String>,
    unavailable: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_unavailable(&mut self, unavailable: bool) {
        self.unavailable = unavailable;
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        if self.unavailable {
            return Err(StoreError::Unavailable);
        }
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        if self.unavailable {
            return Err(StoreError::Unavailable);
        }
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Returns the data directory, creating it if needed.
///
/// `FOCUSCOIN_DATA_DIR` wins when set. Otherwise `~/.config/focuscoin`, or
/// `~/.config/focuscoin-dev` with `FOCUSCOIN_ENV=dev`.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> std::io::Result<PathBuf> {
    let dir = match std::env::var_os("FOCUSCOIN_DATA_DIR") {
        Some(dir) => PathBuf::from(dir),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");
            let env = std::env::var("FOCUSCOIN_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("focuscoin-dev")
            } else {
                base_dir.join("focuscoin")
            }
        }
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
