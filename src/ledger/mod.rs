//! Ledger domain model: stored entries, validated append requests and the
//! parser that turns typed answers into them.

pub mod clock;
pub mod draft;
pub mod entry;

pub use clock::{Clock, SystemClock};
pub use draft::{parse_amount, EntryDraft, EntryInputError};
pub use entry::{
    check_amount, max_amount, Entry, EntryKind, NewEntry, UnknownKind, AMOUNT_SCALE,
    DEFAULT_ACCOUNT, MAX_AMOUNT_CENTS, TIMESTAMP_FORMAT,
};
