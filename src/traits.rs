//! Traits for storage abstraction and extensibility

use async_trait::async_trait;
use rand::Rng;
use std::ops::RangeInclusive;

use crate::config::{DEFAULT_IDENTIFIER_RANGE, DEFAULT_PASSCODE_RANGE};
use crate::types::*;

/// Storage abstraction for the banking system
///
/// The whole account set is read once at startup and rewritten on every
/// change, so backends only need a bulk load and a bulk save.
#[async_trait]
pub trait AccountStorage: Send + Sync {
    /// Load every persisted account. A store that does not exist yet is empty.
    async fn load_accounts(&self) -> BankResult<Vec<Account>>;

    /// Replace the persisted account set with `accounts`
    async fn save_accounts(&mut self, accounts: &[&Account]) -> BankResult<()>;
}

/// Source of identifiers and passcodes for newly opened accounts
pub trait CredentialGenerator: Send + Sync {
    /// Draw a candidate account identifier
    fn identifier(&mut self) -> String;

    /// Draw a passcode
    fn passcode(&mut self) -> String;
}

/// Default generator drawing numeric credentials uniformly at random
#[derive(Debug, Clone)]
pub struct RandomCredentials {
    identifier_range: RangeInclusive<u32>,
    passcode_range: RangeInclusive<u32>,
}

impl RandomCredentials {
    /// Create a generator over the given numeric ranges
    pub fn new(identifier_range: RangeInclusive<u32>, passcode_range: RangeInclusive<u32>) -> Self {
        Self {
            identifier_range,
            passcode_range,
        }
    }
}

impl Default for RandomCredentials {
    fn default() -> Self {
        Self::new(DEFAULT_IDENTIFIER_RANGE, DEFAULT_PASSCODE_RANGE)
    }
}

impl CredentialGenerator for RandomCredentials {
    fn identifier(&mut self) -> String {
        rand::thread_rng()
            .gen_range(self.identifier_range.clone())
            .to_string()
    }

    fn passcode(&mut self) -> String {
        rand::thread_rng()
            .gen_range(self.passcode_range.clone())
            .to_string()
    }
}
