//! Validation of untrusted text input

use bigdecimal::BigDecimal;
use std::str::FromStr;

use crate::types::*;

/// Most decimal places an amount or balance may carry
pub const MAX_AMOUNT_SCALE: usize = 2;

/// Most significant digits allowed before the decimal point
pub const MAX_AMOUNT_INTEGER_DIGITS: usize = 15;

const MAX_AMOUNT_TEXT_LEN: usize = 32;

/// Parse plain decimal text such as `70`, `-3` or `12.50`.
///
/// Exponent notation, more than [`MAX_AMOUNT_SCALE`] decimal places and more
/// than [`MAX_AMOUNT_INTEGER_DIGITS`] integer digits are refused, so every
/// balance stays short enough to print and store. The error is only the
/// reason; callers wrap it in their own variant.
pub fn parse_bounded_decimal(text: &str) -> Result<BigDecimal, String> {
    if text.len() > MAX_AMOUNT_TEXT_LEN {
        return Err(format!("longer than {} characters", MAX_AMOUNT_TEXT_LEN));
    }
    if text.contains(['e', 'E']) {
        return Err(format!("'{}' uses exponent notation", text));
    }

    let unsigned = text.strip_prefix(['-', '+']).unwrap_or(text);
    let (whole, fraction) = unsigned.split_once('.').unwrap_or((unsigned, ""));
    let is_digits = |part: &str| part.chars().all(|c| c.is_ascii_digit());
    if (whole.is_empty() && fraction.is_empty()) || !is_digits(whole) || !is_digits(fraction) {
        return Err(format!("'{}' is not a number", text));
    }
    if fraction.len() > MAX_AMOUNT_SCALE {
        return Err(format!(
            "'{}' has more than {} decimal places",
            text, MAX_AMOUNT_SCALE
        ));
    }
    if whole.trim_start_matches('0').len() > MAX_AMOUNT_INTEGER_DIGITS {
        return Err(format!(
            "'{}' has more than {} integer digits",
            text, MAX_AMOUNT_INTEGER_DIGITS
        ));
    }

    BigDecimal::from_str(text).map_err(|_| format!("'{}' is not a number", text))
}

/// Parse an amount typed at the shell.
///
/// Only the text is checked here; sign and balance rules belong to the
/// account operations, which report their own rejections.
pub fn parse_amount(input: &str) -> BankResult<BigDecimal> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(BankError::InvalidAmount("no amount entered".to_string()));
    }

    parse_bounded_decimal(trimmed).map_err(BankError::InvalidAmount)
}

/// Map the account type menu choice to a category
pub fn parse_category_choice(input: &str) -> Option<AccountCategory> {
    match input.trim() {
        "1" => Some(AccountCategory::Personal),
        "2" => Some(AccountCategory::Business),
        _ => None,
    }
}
