//! Banking system orchestrating accounts and their persistence

use bigdecimal::BigDecimal;
use std::collections::HashMap;
use tracing::{debug, info, warn};

use crate::config::BankConfig;
use crate::traits::*;
use crate::types::*;

/// Keyed collection of accounts backed by a storage implementation
///
/// Every mutating operation rewrites the whole store.
pub struct BankingSystem<S: AccountStorage> {
    storage: S,
    accounts: HashMap<String, Account>,
    generator: Box<dyn CredentialGenerator>,
    config: BankConfig,
}

impl<S: AccountStorage> BankingSystem<S> {
    /// Load a banking system from storage using the default configuration
    pub async fn load(storage: S) -> BankResult<Self> {
        Self::with_config(storage, BankConfig::default()).await
    }

    /// Load a banking system with a custom configuration
    pub async fn with_config(storage: S, config: BankConfig) -> BankResult<Self> {
        let generator = Box::new(RandomCredentials::new(
            config.identifier_range.clone(),
            config.passcode_range.clone(),
        ));
        Self::with_generator(storage, config, generator).await
    }

    /// Load a banking system with a custom credential generator
    pub async fn with_generator(
        storage: S,
        config: BankConfig,
        generator: Box<dyn CredentialGenerator>,
    ) -> BankResult<Self> {
        let mut system = Self {
            storage,
            accounts: HashMap::new(),
            generator,
            config,
        };
        system.reload().await?;
        Ok(system)
    }

    /// Replace the in-memory accounts with the persisted ones
    pub async fn reload(&mut self) -> BankResult<()> {
        let loaded = self.storage.load_accounts().await?;
        self.accounts = loaded
            .into_iter()
            .map(|account| (account.id.clone(), account))
            .collect();
        info!(count = self.accounts.len(), "accounts loaded");
        Ok(())
    }

    /// Persist every account, ordered by id
    pub async fn save(&mut self) -> BankResult<()> {
        let mut accounts: Vec<&Account> = self.accounts.values().collect();
        accounts.sort_by(|a, b| a.id.cmp(&b.id));
        self.storage.save_accounts(&accounts).await?;
        debug!(count = accounts.len(), "accounts saved");
        Ok(())
    }

    /// Open a new account with freshly issued credentials
    pub async fn create_account(&mut self, category: AccountCategory) -> BankResult<Account> {
        let id = self.issue_identifier()?;
        let passcode = self.generator.passcode();
        let account = Account::new(id.clone(), passcode, category);

        self.accounts.insert(id.clone(), account.clone());
        if let Err(err) = self.save().await {
            self.accounts.remove(&id);
            return Err(err);
        }

        info!(account_id = %id, %category, "account opened");
        Ok(account)
    }

    /// Authenticate with an account id and passcode
    pub fn login(&self, account_id: &str, passcode: &str) -> BankResult<&Account> {
        match self.accounts.get(account_id) {
            Some(account) if account.passcode == passcode => {
                info!(account_id, "login succeeded");
                Ok(account)
            }
            _ => {
                warn!(account_id, "login rejected");
                Err(BankError::NotRecognized)
            }
        }
    }

    /// Delete an account and persist the change
    pub async fn delete_account(&mut self, account_id: &str) -> BankResult<Account> {
        let removed = self
            .accounts
            .remove(account_id)
            .ok_or_else(|| BankError::AccountDoesNotExist(account_id.to_string()))?;

        if let Err(err) = self.save().await {
            self.accounts.insert(removed.id.clone(), removed);
            return Err(err);
        }

        info!(account_id, "account deleted");
        Ok(removed)
    }

    /// Deposit into an account and persist
    ///
    /// The previous balance is restored when the save fails.
    pub async fn deposit(
        &mut self,
        account_id: &str,
        amount: &BigDecimal,
    ) -> BankResult<TransactionOutcome> {
        let previous = self.balances_of(&[account_id]);
        let outcome = self.existing_mut(account_id)?.deposit(amount);
        Self::record(account_id, "deposit", amount, &outcome);
        self.save_or_restore(previous).await?;
        Ok(outcome)
    }

    /// Withdraw from an account and persist
    pub async fn withdraw(
        &mut self,
        account_id: &str,
        amount: &BigDecimal,
    ) -> BankResult<TransactionOutcome> {
        let previous = self.balances_of(&[account_id]);
        let outcome = self.existing_mut(account_id)?.withdraw(amount);
        Self::record(account_id, "withdrawal", amount, &outcome);
        self.save_or_restore(previous).await?;
        Ok(outcome)
    }

    /// Move funds between two accounts held by the system and persist
    ///
    /// Fails with [`BankError::RecipientNotFound`] before touching any balance
    /// when the recipient is unknown. If the save fails both balances are put
    /// back.
    pub async fn transfer(
        &mut self,
        source_id: &str,
        recipient_id: &str,
        amount: &BigDecimal,
    ) -> BankResult<TransactionOutcome> {
        if !self.accounts.contains_key(recipient_id) {
            return Err(BankError::RecipientNotFound(recipient_id.to_string()));
        }

        let previous = self.balances_of(&[source_id, recipient_id]);
        let outcome = if source_id == recipient_id {
            let account = self.existing_mut(source_id)?;
            account.withdraw(amount).map(|_| {
                let _ = account.deposit(amount);
                TransactionCompleted::Transfer
            })
        } else {
            let mut source = self
                .accounts
                .remove(source_id)
                .ok_or_else(|| BankError::AccountDoesNotExist(source_id.to_string()))?;
            let outcome = self
                .accounts
                .get_mut(recipient_id)
                .map(|recipient| source.transfer(amount, recipient));
            self.accounts.insert(source.id.clone(), source);
            outcome.ok_or_else(|| BankError::RecipientNotFound(recipient_id.to_string()))?
        };

        Self::record(source_id, "transfer", amount, &outcome);
        self.save_or_restore(previous).await?;
        Ok(outcome)
    }

    /// Look up an account by id
    pub fn account(&self, account_id: &str) -> Option<&Account> {
        self.accounts.get(account_id)
    }

    /// Iterate over all accounts in no particular order
    pub fn accounts(&self) -> impl Iterator<Item = &Account> {
        self.accounts.values()
    }

    /// Number of accounts held
    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    /// Whether the system holds no accounts
    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    fn existing_mut(&mut self, account_id: &str) -> BankResult<&mut Account> {
        self.accounts
            .get_mut(account_id)
            .ok_or_else(|| BankError::AccountDoesNotExist(account_id.to_string()))
    }

    fn issue_identifier(&mut self) -> BankResult<String> {
        let attempts = self.config.max_issue_attempts;
        for _ in 0..attempts {
            let candidate = self.generator.identifier();
            if !self.accounts.contains_key(&candidate) {
                return Ok(candidate);
            }
            debug!(candidate = %candidate, "account id already taken, drawing again");
        }
        Err(BankError::IdentifierSpaceExhausted { attempts })
    }

    /// Save, putting `previous` balances back if the store refuses the write
    async fn save_or_restore(&mut self, previous: Vec<(String, BigDecimal)>) -> BankResult<()> {
        if let Err(err) = self.save().await {
            for (account_id, balance) in previous {
                if let Some(account) = self.accounts.get_mut(&account_id) {
                    account.balance = balance;
                }
            }
            warn!(%err, "save failed, balances restored");
            return Err(err);
        }
        Ok(())
    }

    fn balances_of(&self, account_ids: &[&str]) -> Vec<(String, BigDecimal)> {
        account_ids
            .iter()
            .filter_map(|account_id| self.accounts.get(*account_id))
            .map(|account| (account.id.clone(), account.balance.clone()))
            .collect()
    }

    fn record(
        account_id: &str,
        operation: &str,
        amount: &BigDecimal,
        outcome: &TransactionOutcome,
    ) {
        match outcome {
            Ok(_) => debug!(account_id, operation, %amount, "transaction completed"),
            Err(rejection) => warn!(account_id, operation, %amount, %rejection, "transaction rejected"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::memory_storage::MemoryStorage;
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::str::FromStr;

    fn dec(s: &str) -> BigDecimal {
        BigDecimal::from_str(s).unwrap()
    }

    /// Hands out a fixed sequence of identifiers
    struct ScriptedCredentials {
        identifiers: VecDeque<String>,
    }

    impl ScriptedCredentials {
        fn new(identifiers: &[&str]) -> Box<Self> {
            Box::new(Self {
                identifiers: identifiers.iter().map(|id| id.to_string()).collect(),
            })
        }
    }

    impl CredentialGenerator for ScriptedCredentials {
        fn identifier(&mut self) -> String {
            self.identifiers.pop_front().unwrap_or_else(|| "00000".to_string())
        }

        fn passcode(&mut self) -> String {
            "1234".to_string()
        }
    }

    /// Loads a fixed set of accounts and refuses every save
    struct FailingStorage {
        accounts: Vec<Account>,
    }

    #[async_trait]
    impl AccountStorage for FailingStorage {
        async fn load_accounts(&self) -> BankResult<Vec<Account>> {
            Ok(self.accounts.clone())
        }

        async fn save_accounts(&mut self, _accounts: &[&Account]) -> BankResult<()> {
            Err(BankError::Storage("disk full".to_string()))
        }
    }

    fn funded(id: &str, balance: &str) -> Account {
        Account::with_balance(
            id.to_string(),
            "1111".to_string(),
            AccountCategory::Personal,
            dec(balance),
        )
    }

    #[tokio::test]
    async fn test_create_login_delete() {
        let storage = MemoryStorage::new();
        let mut bank = BankingSystem::load(storage.clone()).await.unwrap();
        assert!(bank.is_empty());

        let account = bank.create_account(AccountCategory::Personal).await.unwrap();
        assert_eq!(account.balance, dec("0"));
        assert_eq!(storage.persisted().unwrap(), vec![account.clone()]);

        assert_eq!(bank.login(&account.id, &account.passcode).unwrap(), &account);
        assert!(matches!(
            bank.login(&account.id, "wrong"),
            Err(BankError::NotRecognized)
        ));
        assert!(matches!(
            bank.login("nobody", &account.passcode),
            Err(BankError::NotRecognized)
        ));

        bank.delete_account(&account.id).await.unwrap();
        assert!(bank.account(&account.id).is_none());
        assert!(storage.persisted().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_missing_account_leaves_store() {
        let existing = Account::personal("12345".to_string(), "1111".to_string());
        let storage = MemoryStorage::with_accounts(vec![existing.clone()]);
        let mut bank = BankingSystem::load(storage.clone()).await.unwrap();

        assert!(matches!(
            bank.delete_account("99999").await,
            Err(BankError::AccountDoesNotExist(_))
        ));
        assert_eq!(storage.save_count(), 0);
        assert_eq!(bank.len(), 1);
    }

    #[tokio::test]
    async fn test_identifier_collisions_are_retried() {
        let existing = Account::personal("11111".to_string(), "1111".to_string());
        let storage = MemoryStorage::with_accounts(vec![existing]);
        let mut bank = BankingSystem::with_generator(
            storage,
            BankConfig::default(),
            ScriptedCredentials::new(&["11111", "11111", "22222"]),
        )
        .await
        .unwrap();

        let account = bank.create_account(AccountCategory::Business).await.unwrap();
        assert_eq!(account.id, "22222");
        assert_eq!(account.category, AccountCategory::Business);
        assert_eq!(bank.len(), 2);
    }

    #[tokio::test]
    async fn test_identifier_exhaustion() {
        let existing = Account::personal("11111".to_string(), "1111".to_string());
        let storage = MemoryStorage::with_accounts(vec![existing]);
        let config = BankConfig {
            max_issue_attempts: 3,
            ..BankConfig::default()
        };
        let mut bank = BankingSystem::with_generator(
            storage.clone(),
            config,
            ScriptedCredentials::new(&["11111", "11111", "11111", "33333"]),
        )
        .await
        .unwrap();

        assert!(matches!(
            bank.create_account(AccountCategory::Personal).await,
            Err(BankError::IdentifierSpaceExhausted { attempts: 3 })
        ));
        assert_eq!(bank.len(), 1);
        assert_eq!(storage.save_count(), 0);
    }

    #[tokio::test]
    async fn test_balance_operations_persist() {
        let storage = MemoryStorage::new();
        let mut bank = BankingSystem::load(storage.clone()).await.unwrap();
        let account = bank.create_account(AccountCategory::Personal).await.unwrap();

        assert_eq!(
            bank.deposit(&account.id, &dec("100")).await.unwrap(),
            Ok(TransactionCompleted::Deposit)
        );
        assert_eq!(
            bank.withdraw(&account.id, &dec("500")).await.unwrap(),
            Err(TransactionRejected::InsufficientFunds)
        );
        assert_eq!(
            bank.withdraw(&account.id, &dec("30")).await.unwrap(),
            Ok(TransactionCompleted::Withdrawal)
        );

        assert_eq!(storage.persisted().unwrap()[0].balance, dec("70"));
        assert!(matches!(
            bank.deposit("missing", &dec("1")).await,
            Err(BankError::AccountDoesNotExist(_))
        ));
    }

    #[tokio::test]
    async fn test_transfer_between_accounts() {
        let storage = MemoryStorage::with_accounts(vec![
            Account::with_balance(
                "11111".to_string(),
                "1111".to_string(),
                AccountCategory::Personal,
                dec("70"),
            ),
            Account::business("22222".to_string(), "2222".to_string()),
        ]);
        let mut bank = BankingSystem::load(storage).await.unwrap();

        assert_eq!(
            bank.transfer("11111", "22222", &dec("20")).await.unwrap(),
            Ok(TransactionCompleted::Transfer)
        );
        assert_eq!(bank.account("11111").unwrap().balance, dec("50"));
        assert_eq!(bank.account("22222").unwrap().balance, dec("20"));

        assert_eq!(
            bank.transfer("11111", "22222", &dec("50.01")).await.unwrap(),
            Err(TransactionRejected::InsufficientFunds)
        );
        assert_eq!(bank.account("11111").unwrap().balance, dec("50"));
        assert_eq!(bank.account("22222").unwrap().balance, dec("20"));

        assert!(matches!(
            bank.transfer("11111", "33333", &dec("1")).await,
            Err(BankError::RecipientNotFound(_))
        ));
        assert_eq!(bank.account("11111").unwrap().balance, dec("50"));
    }

    #[tokio::test]
    async fn test_transfer_to_self_keeps_balance() {
        let storage = MemoryStorage::with_accounts(vec![Account::with_balance(
            "11111".to_string(),
            "1111".to_string(),
            AccountCategory::Personal,
            dec("10"),
        )]);
        let mut bank = BankingSystem::load(storage).await.unwrap();

        assert_eq!(
            bank.transfer("11111", "11111", &dec("10")).await.unwrap(),
            Ok(TransactionCompleted::Transfer)
        );
        assert_eq!(
            bank.transfer("11111", "11111", &dec("11")).await.unwrap(),
            Err(TransactionRejected::InsufficientFunds)
        );
        assert_eq!(bank.account("11111").unwrap().balance, dec("10"));
    }

    #[tokio::test]
    async fn test_failed_create_is_rolled_back() {
        let existing = funded("11111", "0");
        let mut bank = BankingSystem::with_generator(
            FailingStorage {
                accounts: vec![existing.clone()],
            },
            BankConfig::default(),
            ScriptedCredentials::new(&["22222"]),
        )
        .await
        .unwrap();

        let err = bank.create_account(AccountCategory::Business).await.unwrap_err();
        assert_eq!(err.to_string(), "Storage error: disk full");
        assert_eq!(bank.len(), 1);
        assert!(bank.account("22222").is_none());
        assert_eq!(bank.account("11111"), Some(&existing));
    }

    #[tokio::test]
    async fn test_failed_delete_is_rolled_back() {
        let existing = funded("11111", "42.50");
        let mut bank = BankingSystem::load(FailingStorage {
            accounts: vec![existing.clone()],
        })
        .await
        .unwrap();

        assert!(matches!(
            bank.delete_account("11111").await,
            Err(BankError::Storage(_))
        ));
        assert_eq!(bank.len(), 1);
        assert_eq!(bank.account("11111"), Some(&existing));
        assert!(bank.login("11111", "1111").is_ok());
    }

    #[tokio::test]
    async fn test_failed_save_restores_balances() {
        let mut bank = BankingSystem::load(FailingStorage {
            accounts: vec![funded("11111", "70"), funded("22222", "5")],
        })
        .await
        .unwrap();

        assert!(matches!(
            bank.deposit("11111", &dec("100")).await,
            Err(BankError::Storage(_))
        ));
        assert_eq!(bank.account("11111").unwrap().balance, dec("70"));

        assert!(matches!(
            bank.withdraw("11111", &dec("30")).await,
            Err(BankError::Storage(_))
        ));
        assert_eq!(bank.account("11111").unwrap().balance, dec("70"));

        assert!(matches!(
            bank.transfer("11111", "22222", &dec("20")).await,
            Err(BankError::Storage(_))
        ));
        assert_eq!(bank.account("11111").unwrap().balance, dec("70"));
        assert_eq!(bank.account("22222").unwrap().balance, dec("5"));

        assert!(matches!(
            bank.transfer("22222", "22222", &dec("5")).await,
            Err(BankError::Storage(_))
        ));
        assert_eq!(bank.account("22222").unwrap().balance, dec("5"));
    }
}
