//! In-memory storage implementation for testing

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

use crate::traits::*;
use crate::types::*;

/// In-memory storage implementation for testing and development
///
/// Clones share the same underlying data, so a test can keep a handle and
/// inspect what the banking system persisted.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    accounts: Arc<RwLock<Vec<Account>>>,
    saves: Arc<AtomicUsize>,
}

impl MemoryStorage {
    /// Create a new, empty memory storage instance
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a memory storage pre-populated with accounts
    pub fn with_accounts(accounts: Vec<Account>) -> Self {
        Self {
            accounts: Arc::new(RwLock::new(accounts)),
            saves: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Snapshot of the currently persisted accounts
    pub fn persisted(&self) -> BankResult<Vec<Account>> {
        self.accounts
            .read()
            .map(|accounts| accounts.clone())
            .map_err(|_| BankError::Storage("memory storage lock poisoned".to_string()))
    }

    /// Number of completed saves
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    /// Clear all data (useful for testing)
    pub fn clear(&self) {
        if let Ok(mut accounts) = self.accounts.write() {
            accounts.clear();
        }
    }
}

#[async_trait]
impl AccountStorage for MemoryStorage {
    async fn load_accounts(&self) -> BankResult<Vec<Account>> {
        self.persisted()
    }

    async fn save_accounts(&mut self, accounts: &[&Account]) -> BankResult<()> {
        let mut stored = self
            .accounts
            .write()
            .map_err(|_| BankError::Storage("memory storage lock poisoned".to_string()))?;
        *stored = accounts.iter().map(|account| (*account).clone()).collect();

        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
