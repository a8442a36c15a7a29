//! Interactive teller menu
//!
//! The shell reads choices from any [`BufRead`] and prints to any [`Write`],
//! so a whole session can be scripted in tests. Errors from the banking
//! system are printed and the loop carries on; only terminal I/O failures
//! end the shell early.

use bigdecimal::BigDecimal;
use std::io::{self, BufRead, Write};

use crate::ledger::BankingSystem;
use crate::traits::AccountStorage;
use crate::types::*;
use crate::utils::validation::{parse_amount, parse_category_choice};

const MAIN_MENU: &str = "\nHello. How can I assist you?\n1. Open Account\n2. Login to your Account\n3. Exit";
const SESSION_MENU: &str =
    "\n1. Check funds\n2. Deposit\n3. Withdraw\n4. Transfer\n5. Delete Account\n6. Logout";

/// Result of handling one session menu choice
enum SessionStep {
    Continue,
    End,
}

/// Menu-driven front end over a [`BankingSystem`]
pub struct Shell<S: AccountStorage, R, W> {
    bank: BankingSystem<S>,
    input: R,
    output: W,
}

impl<S: AccountStorage, R: BufRead, W: Write> Shell<S, R, W> {
    /// Create a shell reading from `input` and writing to `output`
    pub fn new(bank: BankingSystem<S>, input: R, output: W) -> Self {
        Self {
            bank,
            input,
            output,
        }
    }

    /// Give back the banking system once the shell is done
    pub fn into_bank(self) -> BankingSystem<S> {
        self.bank
    }

    /// Run the main menu until the user exits or input runs out
    pub async fn run(&mut self) -> io::Result<()> {
        loop {
            writeln!(self.output, "{}", MAIN_MENU)?;
            let Some(choice) = self.prompt("Enter your choice: ")? else {
                return Ok(());
            };

            match choice.as_str() {
                "1" => self.open_account().await?,
                "2" => self.login().await?,
                "3" => return Ok(()),
                _ => writeln!(self.output, "Please select a valid option..")?,
            }
        }
    }

    async fn open_account(&mut self) -> io::Result<()> {
        let Some(choice) = self.prompt("Select account type (1 for Personal, 2 for Business): ")?
        else {
            return Ok(());
        };

        let Some(category) = parse_category_choice(&choice) else {
            return writeln!(self.output, "Unsupported account type");
        };

        match self.bank.create_account(category).await {
            Ok(account) => writeln!(
                self.output,
                "Account created. Account id: {}, Passcode: {}",
                account.id, account.passcode
            ),
            Err(err) => writeln!(self.output, "{}", err),
        }
    }

    async fn login(&mut self) -> io::Result<()> {
        let Some(account_id) = self.prompt("Enter your account id: ")? else {
            return Ok(());
        };
        let Some(passcode) = self.prompt("Enter your passcode: ")? else {
            return Ok(());
        };

        if let Err(err) = self.bank.login(&account_id, &passcode) {
            return writeln!(self.output, "{}", err);
        }

        loop {
            writeln!(self.output, "{}", SESSION_MENU)?;
            let Some(action) = self.prompt("Enter your choice: ")? else {
                return Ok(());
            };

            if let SessionStep::End = self.session_action(&account_id, &action).await? {
                return Ok(());
            }
        }
    }

    async fn session_action(&mut self, account_id: &str, action: &str) -> io::Result<SessionStep> {
        match action {
            "1" => match self.bank.account(account_id) {
                Some(account) => {
                    writeln!(self.output, "Your funds is {}", account.balance)?;
                }
                None => {
                    writeln!(self.output, "{}", BankError::AccountDoesNotExist(account_id.to_string()))?;
                    return Ok(SessionStep::End);
                }
            },
            "2" => {
                if let Some(amount) = self.prompt_amount("Please input the deposit amount: ")? {
                    let result = self.bank.deposit(account_id, &amount).await;
                    self.report(result)?;
                }
            }
            "3" => {
                if let Some(amount) = self.prompt_amount("Please input the withdrawal amount: ")? {
                    let result = self.bank.withdraw(account_id, &amount).await;
                    self.report(result)?;
                }
            }
            "4" => {
                let Some(recipient_id) = self.prompt("Enter recipient account id: ")? else {
                    return Ok(SessionStep::End);
                };
                if let Some(amount) = self.prompt_amount("Enter amount to transfer: ")? {
                    let result = self.bank.transfer(account_id, &recipient_id, &amount).await;
                    self.report(result)?;
                }
            }
            "5" => {
                match self.bank.delete_account(account_id).await {
                    Ok(_) => writeln!(self.output, "Account deletion successful")?,
                    Err(err) => writeln!(self.output, "{}", err)?,
                }
                return Ok(SessionStep::End);
            }
            "6" => return Ok(SessionStep::End),
            _ => writeln!(self.output, "Please select a valid option.")?,
        }
        Ok(SessionStep::Continue)
    }

    /// Print the outcome of a balance-changing operation
    fn report(&mut self, result: BankResult<TransactionOutcome>) -> io::Result<()> {
        match result {
            Ok(Ok(completed)) => writeln!(self.output, "{}", completed),
            Ok(Err(rejected)) => writeln!(self.output, "{}", rejected),
            Err(err) => writeln!(self.output, "{}", err),
        }
    }

    /// Prompt for an amount; unparsable input is reported and yields `None`
    fn prompt_amount(&mut self, text: &str) -> io::Result<Option<BigDecimal>> {
        let Some(input) = self.prompt(text)? else {
            return Ok(None);
        };
        match parse_amount(&input) {
            Ok(amount) => Ok(Some(amount)),
            Err(err) => {
                writeln!(self.output, "{}", err)?;
                Ok(None)
            }
        }
    }

    /// Print `text` and read one trimmed line; `None` at end of input
    fn prompt(&mut self, text: &str) -> io::Result<Option<String>> {
        write!(self.output, "{}", text)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::memory_storage::MemoryStorage;
    use std::io::Cursor;

    async fn run_script(storage: MemoryStorage, script: &str) -> (String, BankingSystem<MemoryStorage>) {
        let bank = BankingSystem::load(storage).await.unwrap();
        let mut output = Vec::new();
        let mut shell = Shell::new(bank, Cursor::new(script.to_string()), &mut output);
        shell.run().await.unwrap();
        let bank = shell.into_bank();
        (String::from_utf8(output).unwrap(), bank)
    }

    fn seeded() -> MemoryStorage {
        MemoryStorage::with_accounts(vec![
            Account::with_balance(
                "11111".to_string(),
                "1111".to_string(),
                AccountCategory::Personal,
                BigDecimal::from(100),
            ),
            Account::business("22222".to_string(), "2222".to_string()),
        ])
    }

    #[tokio::test]
    async fn test_exit_and_eof() {
        let (output, _) = run_script(MemoryStorage::new(), "3\n").await;
        assert!(output.contains("Hello. How can I assist you?"));

        let (output, _) = run_script(MemoryStorage::new(), "").await;
        assert!(output.ends_with("Enter your choice: "));
    }

    #[tokio::test]
    async fn test_open_account() {
        let (output, bank) = run_script(MemoryStorage::new(), "1\n1\n1\n9\n3\n").await;
        assert!(output.contains("Account created. Account id: "));
        assert!(output.contains("Unsupported account type"));
        assert_eq!(bank.len(), 1);
        assert_eq!(
            bank.accounts().next().unwrap().category,
            AccountCategory::Personal
        );
    }

    #[tokio::test]
    async fn test_bad_login_returns_to_menu() {
        let (output, _) = run_script(seeded(), "2\n11111\n0000\n3\n").await;
        assert!(output.contains("Account number or password is not recognized"));
    }

    #[tokio::test]
    async fn test_session_operations() {
        let script = "2\n11111\n1111\n\
                      1\n\
                      2\nabc\n\
                      2\n-5\n\
                      3\n30\n\
                      4\n99999\n5\n\
                      4\n22222\n20\n\
                      7\n\
                      6\n3\n";
        let (output, bank) = run_script(seeded(), script).await;

        assert!(output.contains("Your funds is 100"));
        assert!(output.contains("Invalid amount: 'abc' is not a number"));
        assert!(output.contains("Invalid amount for deposit."));
        assert!(output.contains("Withdrawal completed."));
        assert!(output.contains("Recipient account does not exist."));
        assert!(output.contains("Transfer completed."));
        assert!(output.contains("Please select a valid option."));

        assert_eq!(bank.account("11111").unwrap().balance, BigDecimal::from(50));
        assert_eq!(bank.account("22222").unwrap().balance, BigDecimal::from(20));
    }

    #[tokio::test]
    async fn test_tiny_amounts_are_refused_and_funds_print_plainly() {
        let script = "2\n11111\n1111\n\
                      3\n1e-2000000\n\
                      3\n0.0000001\n\
                      2\n0.05\n\
                      1\n\
                      6\n3\n";
        let (output, bank) = run_script(seeded(), script).await;

        assert!(output.contains("Invalid amount: '1e-2000000' uses exponent notation"));
        assert!(output.contains("Invalid amount: '0.0000001' has more than 2 decimal places"));
        assert!(output.contains("Your funds is 100.05"));
        assert!(!output.contains("E-"));
        assert_eq!(
            bank.account("11111").unwrap().balance,
            "100.05".parse::<BigDecimal>().unwrap()
        );
    }

    #[tokio::test]
    async fn test_delete_ends_session() {
        let storage = seeded();
        let (output, bank) = run_script(storage.clone(), "2\n22222\n2222\n5\n2\n22222\n2222\n3\n").await;

        assert!(output.contains("Account deletion successful"));
        assert!(output.contains("Account number or password is not recognized"));
        assert!(bank.account("22222").is_none());
        assert_eq!(storage.persisted().unwrap().len(), 1);
    }
}
