#![doc(test(attr(deny(warnings))))]

//! Cashbook records dated income and expense entries in a local SQLite
//! ledger and rebuilds the running cash balance as a table and a text chart.

pub mod balance;
pub mod cli;
pub mod config;
pub mod errors;
pub mod ledger;
pub mod report;
pub mod storage;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup debug log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::debug!("Cashbook tracing initialized.");
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
        super::init();
    }
}
