//! Ledger module containing account operations and the banking system

pub mod account;
pub mod core;

pub use self::core::*;
