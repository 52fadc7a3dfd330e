use std::str::FromStr;

use rust_decimal::Decimal;
use thiserror::Error;

use super::entry::{check_amount, max_amount, EntryKind, NewEntry};

/// Raised when user-typed text cannot become a [`NewEntry`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EntryInputError {
    #[error("an amount is required")]
    MissingAmount,
    #[error("`{0}` is not a valid amount (use digits, e.g. 25.50)")]
    InvalidAmount(String),
    #[error("amount must not be negative (got {0})")]
    NegativeAmount(Decimal),
    #[error("amount {0} is above the maximum of {}", max_amount())]
    AmountTooLarge(Decimal),
}

/// Raw answers collected by the shell before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryDraft {
    pub amount: String,
    pub category: String,
    pub description: String,
    pub account: String,
}

impl EntryDraft {
    /// Validates the draft into an append request for `kind`.
    pub fn parse(&self, kind: EntryKind) -> Result<NewEntry, EntryInputError> {
        let amount = parse_amount(&self.amount)?;
        Ok(NewEntry::new(kind, self.category.trim(), amount)?
            .with_description(self.description.trim())
            .with_account(self.account.trim()))
    }
}

/// Parses an amount typed by a user.
///
/// Accepts `1234.56`, and `1234,56` when the text has no dot.
pub fn parse_amount(input: &str) -> Result<Decimal, EntryInputError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(EntryInputError::MissingAmount);
    }

    let normalized = if !trimmed.contains('.') && trimmed.matches(',').count() == 1 {
        trimmed.replace(',', ".")
    } else {
        trimmed.to_string()
    };

    let amount = Decimal::from_str(&normalized)
        .map_err(|_| EntryInputError::InvalidAmount(trimmed.to_string()))?;
    check_amount(amount)
}
