//! Balance-changing operations on a single account

use bigdecimal::BigDecimal;

use crate::types::*;

impl Account {
    /// Add funds to the account. Only strictly positive amounts are accepted.
    pub fn deposit(&mut self, amount: &BigDecimal) -> TransactionOutcome {
        if *amount > BigDecimal::from(0) {
            self.balance += amount;
            Ok(TransactionCompleted::Deposit)
        } else {
            Err(TransactionRejected::InvalidDepositAmount)
        }
    }

    /// Take funds out of the account. The amount must be positive and
    /// covered by the current balance.
    pub fn withdraw(&mut self, amount: &BigDecimal) -> TransactionOutcome {
        if *amount > BigDecimal::from(0) && *amount <= self.balance {
            self.balance -= amount;
            Ok(TransactionCompleted::Withdrawal)
        } else {
            Err(TransactionRejected::InsufficientFunds)
        }
    }

    /// Withdraw from this account and deposit into `recipient`.
    ///
    /// A rejected withdrawal is returned as-is and the recipient is not touched.
    pub fn transfer(&mut self, amount: &BigDecimal, recipient: &mut Account) -> TransactionOutcome {
        self.withdraw(amount)?;
        // a successful withdrawal guarantees a positive amount
        let _ = recipient.deposit(amount);
        Ok(TransactionCompleted::Transfer)
    }
}
