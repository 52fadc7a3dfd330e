use rust_decimal::Decimal;
use thiserror::Error;

/// Failures raised by the ledger store.
///
/// Every variant is a storage fault: nothing here is retried, callers decide
/// how to report it.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),
    #[error("Corrupt ledger record #{id}: {reason}")]
    CorruptRecord { id: i64, reason: String },
    #[error("Amount {0} cannot be stored")]
    AmountOutOfRange(Decimal),
}

pub type Result<T> = std::result::Result<T, LedgerError>;
