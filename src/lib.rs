//! # Banking Core
//!
//! A small banking simulator: personal and business accounts kept in a
//! flat text file, with deposits, withdrawals, transfers and passcode login
//! driven from an interactive teller menu.
//!
//! ## Features
//!
//! - **Accounts**: validated deposit, withdrawal and transfer that never drive a balance negative
//! - **Banking system**: account opening with random numeric credentials, login, deletion
//! - **Storage abstraction**: trait-based storage with flat-file and in-memory backends
//! - **Teller shell**: menu loop over any reader/writer pair
//!
//! ## Quick Start
//!
//! ```rust
//! use banking_core::{AccountCategory, BankingSystem};
//! use banking_core::utils::MemoryStorage;
//! use bigdecimal::BigDecimal;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), banking_core::BankError> {
//! let mut bank = BankingSystem::load(MemoryStorage::new()).await?;
//! let account = bank.create_account(AccountCategory::Personal).await?;
//! let outcome = bank.deposit(&account.id, &BigDecimal::from(100)).await?;
//! assert!(outcome.is_ok());
//! assert_eq!(bank.account(&account.id).unwrap().balance, BigDecimal::from(100));
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod ledger;
pub mod shell;
pub mod traits;
pub mod types;
pub mod utils;

// Re-export commonly used types
pub use config::*;
pub use ledger::*;
pub use shell::Shell;
pub use traits::*;
pub use types::*;
