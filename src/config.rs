//! Runtime configuration for the banking system

use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use std::path::PathBuf;

/// Store file used when none is configured
pub const DEFAULT_STORE_PATH: &str = "account.txt";

/// Identifiers are 5 to 6 digit numbers
pub const DEFAULT_IDENTIFIER_RANGE: RangeInclusive<u32> = 10_000..=999_999;

/// Passcodes are 4 digit numbers
pub const DEFAULT_PASSCODE_RANGE: RangeInclusive<u32> = 1_000..=9_999;

/// Upper bound on identifier draws before account opening gives up
pub const DEFAULT_MAX_ISSUE_ATTEMPTS: u32 = 32;

/// Banking system configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BankConfig {
    /// Path of the flat-file account store
    pub store_path: PathBuf,
    /// Range identifiers are drawn from
    pub identifier_range: RangeInclusive<u32>,
    /// Range passcodes are drawn from
    pub passcode_range: RangeInclusive<u32>,
    /// How many identifiers to draw before reporting exhaustion
    pub max_issue_attempts: u32,
}

impl Default for BankConfig {
    fn default() -> Self {
        Self {
            store_path: PathBuf::from(DEFAULT_STORE_PATH),
            identifier_range: DEFAULT_IDENTIFIER_RANGE,
            passcode_range: DEFAULT_PASSCODE_RANGE,
            max_issue_attempts: DEFAULT_MAX_ISSUE_ATTEMPTS,
        }
    }
}

impl BankConfig {
    /// Default configuration pointing at a different store file
    pub fn with_store_path(store_path: impl Into<PathBuf>) -> Self {
        Self {
            store_path: store_path.into(),
            ..Self::default()
        }
    }
}
