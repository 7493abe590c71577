use serde::{Deserialize, Serialize};

use super::KeyValueStore;
use crate::error::StoreError;

/// Key under which the balance is stored, as a base-10 integer string.
pub const WALLET_KEY: &str = "@total_money";

/// Accumulated currency. Lives with the host and is handed to the timer
/// only when a reward is acknowledged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wallet {
    balance: u64,
}

impl Wallet {
    pub fn new(balance: u64) -> Self {
        Self { balance }
    }

    pub fn balance(&self) -> u64 {
        self.balance
    }

    /// Load the persisted balance. A missing key is an empty wallet.
    ///
    /// # Errors
    /// Fails if the store is unreachable or holds a non-integer value.
    pub fn load(store: &dyn KeyValueStore) -> Result<Self, StoreError> {
        match store.get(WALLET_KEY)? {
            None => Ok(Self::default()),
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .map(Self::new)
                .map_err(|_| StoreError::Corrupt {
                    key: WALLET_KEY.to_string(),
                    value: raw,
                }),
        }
    }

    /// Add `amount` and return the new balance.
    pub fn credit(&mut self, amount: u64) -> u64 {
        self.balance = self.balance.saturating_add(amount);
        self.balance
    }

    pub fn persist(&self, store: &mut dyn KeyValueStore) -> Result<(), StoreError> {
        store.set(WALLET_KEY, &self.balance.to_string())
    }
}
