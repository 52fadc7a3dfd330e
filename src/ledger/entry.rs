use std::{fmt, str::FromStr};

use chrono::NaiveDateTime;
use rust_decimal::{Decimal, RoundingStrategy};

use super::draft::EntryInputError;

/// Text layout of the `data` column and of every timestamp shown to the user.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Account label used when an entry does not name one.
pub const DEFAULT_ACCOUNT: &str = "Caixa";

/// Decimal places kept for every stored amount.
pub const AMOUNT_SCALE: u32 = 2;

/// Largest accepted amount, in cents: one trillion currency units. Amounts up
/// to it keep their exact cents through the `REAL` column.
pub const MAX_AMOUNT_CENTS: i64 = 100_000_000_000_000;

pub fn max_amount() -> Decimal {
    Decimal::new(MAX_AMOUNT_CENTS, AMOUNT_SCALE)
}

/// Checks the range every amount must fall in: not negative, not above
/// [`max_amount`].
pub fn check_amount(amount: Decimal) -> Result<Decimal, EntryInputError> {
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(EntryInputError::NegativeAmount(amount));
    }
    if amount > max_amount() {
        return Err(EntryInputError::AmountTooLarge(amount));
    }
    Ok(amount)
}

/// Direction of a ledger entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    Income,
    Expense,
}

impl EntryKind {
    /// Value persisted in the `tipo` column.
    pub fn as_str(self) -> &'static str {
        match self {
            EntryKind::Income => "receita",
            EntryKind::Expense => "despesa",
        }
    }

    /// Human readable label.
    pub fn label(self) -> &'static str {
        match self {
            EntryKind::Income => "Income",
            EntryKind::Expense => "Expense",
        }
    }

    /// Multiplier applied to the stored amount when deriving balances.
    pub fn sign(self) -> Decimal {
        match self {
            EntryKind::Income => Decimal::ONE,
            EntryKind::Expense => Decimal::NEGATIVE_ONE,
        }
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Error returned when a stored `tipo` value is not a known kind.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown entry kind `{0}`")]
pub struct UnknownKind(pub String);

impl FromStr for EntryKind {
    type Err = UnknownKind;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "receita" => Ok(EntryKind::Income),
            "despesa" => Ok(EntryKind::Expense),
            other => Err(UnknownKind(other.to_string())),
        }
    }
}

/// A stored ledger record. Never mutated after append.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub id: i64,
    pub timestamp: NaiveDateTime,
    pub kind: EntryKind,
    pub category: String,
    pub amount: Decimal,
    pub description: String,
    pub account: String,
}

impl Entry {
    /// Amount with the kind's sign applied.
    pub fn signed_amount(&self) -> Decimal {
        self.amount * self.kind.sign()
    }

    pub fn formatted_timestamp(&self) -> String {
        self.timestamp.format(TIMESTAMP_FORMAT).to_string()
    }
}

/// A validated append request.
///
/// Holding one guarantees the amount is non-negative and rounded to cents, so
/// the store never has to reason about malformed input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEntry {
    kind: EntryKind,
    category: String,
    amount: Decimal,
    description: String,
    account: Option<String>,
}

impl NewEntry {
    pub fn new(
        kind: EntryKind,
        category: impl Into<String>,
        amount: Decimal,
    ) -> Result<Self, EntryInputError> {
        let amount = check_amount(amount)?
            .round_dp_with_strategy(AMOUNT_SCALE, RoundingStrategy::MidpointAwayFromZero);
        Ok(Self {
            kind,
            category: category.into(),
            amount: amount.abs(),
            description: String::new(),
            account: None,
        })
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the account; blank labels fall back to the store default.
    pub fn with_account(mut self, account: impl Into<String>) -> Self {
        let account = account.into();
        self.account = if account.trim().is_empty() {
            None
        } else {
            Some(account)
        };
        self
    }

    pub fn kind(&self) -> EntryKind {
        self.kind
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn account(&self) -> Option<&str> {
        self.account.as_deref()
    }

    /// Resolves the account label against the store's fallback.
    pub fn account_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.account().unwrap_or(fallback)
    }
}
