pub mod sqlite_backend;

use crate::{
    errors::Result,
    ledger::{Entry, NewEntry},
};

/// Append-only persistence for ledger entries.
///
/// There is no update or delete. A mistaken entry is corrected by
/// appending a compensating one.
pub trait EntryStore {
    /// Ensures the backing table exists. Safe to call on every startup.
    fn initialize(&self) -> Result<()>;

    /// Persists a validated request, assigning its id and timestamp.
    fn append(&self, entry: &NewEntry) -> Result<Entry>;

    /// Every stored entry, oldest first; ties keep insertion order.
    fn list_all(&self) -> Result<Vec<Entry>>;
}

pub use sqlite_backend::{SqliteStore, TABLE_NAME};
