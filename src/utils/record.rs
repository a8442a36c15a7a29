//! Line codec for the flat-file account store
//!
//! Each account is one line: `identifier,passcode,category,balance`.

use bigdecimal::BigDecimal;

use crate::types::*;
use crate::utils::validation::parse_bounded_decimal;

const FIELD_COUNT: usize = 4;

/// Render an account as a store line (without the trailing newline)
pub fn format_record(account: &Account) -> String {
    format!(
        "{},{},{},{}",
        account.id,
        account.passcode,
        account.category.label(),
        account.balance
    )
}

/// Parse one store line. `line_number` is 1-based and only used for errors.
pub fn parse_record(line: &str, line_number: usize) -> BankResult<Account> {
    let fields: Vec<&str> = line.trim().split(',').collect();
    if fields.len() != FIELD_COUNT {
        return Err(BankError::malformed(
            line_number,
            format!("expected {} fields, found {}", FIELD_COUNT, fields.len()),
        ));
    }

    let (id, passcode, label, balance) = (fields[0], fields[1], fields[2], fields[3]);

    if id.is_empty() {
        return Err(BankError::malformed(line_number, "empty account id"));
    }
    if passcode.is_empty() {
        return Err(BankError::malformed(line_number, "empty passcode"));
    }

    let balance = parse_bounded_decimal(balance)
        .map_err(|reason| BankError::malformed(line_number, format!("balance {}", reason)))?;
    if balance < BigDecimal::from(0) {
        return Err(BankError::malformed(
            line_number,
            format!("balance {} is negative", balance),
        ));
    }

    Ok(Account::with_balance(
        id.to_string(),
        passcode.to_string(),
        AccountCategory::from_label(label),
        balance,
    ))
}

/// Parse a whole store document, skipping blank lines
pub fn parse_records(contents: &str) -> BankResult<Vec<Account>> {
    contents
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(index, line)| parse_record(line, index + 1))
        .collect()
}

/// Render a whole store document, one line per account
pub fn format_records(accounts: &[&Account]) -> String {
    let mut contents = String::new();
    for account in accounts {
        contents.push_str(&format_record(account));
        contents.push('\n');
    }
    contents
}
