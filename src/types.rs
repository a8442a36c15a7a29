//! Core types and data structures for the banking system

use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Account categories offered at account opening
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AccountCategory {
    /// Personal account held by an individual
    Personal,
    /// Business account held by an organisation
    Business,
}

impl AccountCategory {
    /// Label written to the persisted store
    pub fn label(&self) -> &'static str {
        match self {
            AccountCategory::Personal => "Personal",
            AccountCategory::Business => "Business",
        }
    }

    /// Resolve a stored label. Anything other than the literal `Personal`
    /// is treated as a business account.
    pub fn from_label(label: &str) -> Self {
        if label == "Personal" {
            AccountCategory::Personal
        } else {
            AccountCategory::Business
        }
    }
}

impl fmt::Display for AccountCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Core account structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Unique identifier for the account
    pub id: String,
    /// Shared secret checked on login
    pub passcode: String,
    /// Category chosen when the account was opened
    pub category: AccountCategory,
    /// Current balance of the account
    pub balance: BigDecimal,
}

impl Account {
    /// Create a new account with a zero balance
    pub fn new(id: String, passcode: String, category: AccountCategory) -> Self {
        Self::with_balance(id, passcode, category, BigDecimal::from(0))
    }

    /// Create an account with an existing balance (used when loading from storage)
    pub fn with_balance(
        id: String,
        passcode: String,
        category: AccountCategory,
        balance: BigDecimal,
    ) -> Self {
        Self {
            id,
            passcode,
            category,
            balance,
        }
    }

    /// Create a personal account
    pub fn personal(id: String, passcode: String) -> Self {
        Self::new(id, passcode, AccountCategory::Personal)
    }

    /// Create a business account
    pub fn business(id: String, passcode: String) -> Self {
        Self::new(id, passcode, AccountCategory::Business)
    }
}

/// Successful outcome of a balance-changing operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionCompleted {
    Deposit,
    Withdrawal,
    Transfer,
}

impl fmt::Display for TransactionCompleted {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionCompleted::Deposit => f.write_str("Deposit completed."),
            TransactionCompleted::Withdrawal => f.write_str("Withdrawal completed."),
            TransactionCompleted::Transfer => f.write_str("Transfer completed."),
        }
    }
}

/// Rejected balance-changing operation; the balance is left untouched
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TransactionRejected {
    #[error("Invalid amount for deposit.")]
    InvalidDepositAmount,
    #[error("Insufficiency of funds or invalid withdrawal sum.")]
    InsufficientFunds,
}

/// Reported result of a deposit, withdrawal or transfer
pub type TransactionOutcome = Result<TransactionCompleted, TransactionRejected>;

/// Errors that can occur in the banking system
#[derive(Debug, thiserror::Error)]
pub enum BankError {
    #[error("Account number or password is not recognized")]
    NotRecognized,
    #[error("Account does not exist")]
    AccountDoesNotExist(String),
    #[error("Recipient account does not exist.")]
    RecipientNotFound(String),
    #[error("Malformed record on line {line}: {reason}")]
    MalformedRecord { line: usize, reason: String },
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Could not issue a free account id after {attempts} attempts")]
    IdentifierSpaceExhausted { attempts: u32 },
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl BankError {
    /// Build a malformed record error
    pub fn malformed(line: usize, reason: impl Into<String>) -> Self {
        Self::MalformedRecord {
            line,
            reason: reason.into(),
        }
    }
}

/// Result type for banking operations
pub type BankResult<T> = Result<T, BankError>;
