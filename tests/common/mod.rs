#![allow(dead_code)]

use std::{collections::VecDeque, path::PathBuf, sync::Mutex};

use cashbook::{
    ledger::{Clock, EntryKind, NewEntry, TIMESTAMP_FORMAT},
    storage::{EntryStore, SqliteStore},
};
use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use tempfile::TempDir;

/// Hands out pre-set timestamps in order, then repeats the last one.
pub struct ScriptedClock {
    times: Mutex<VecDeque<NaiveDateTime>>,
    last: Mutex<NaiveDateTime>,
}

impl ScriptedClock {
    pub fn new(times: &[&str]) -> Self {
        let times: VecDeque<_> = times.iter().map(|t| at(t)).collect();
        let last = times.front().copied().unwrap_or_else(|| at("2025-01-01 00:00:00"));
        Self {
            times: Mutex::new(times),
            last: Mutex::new(last),
        }
    }
}

impl Clock for ScriptedClock {
    fn now(&self) -> NaiveDateTime {
        let mut last = self.last.lock().unwrap();
        if let Some(next) = self.times.lock().unwrap().pop_front() {
            *last = next;
        }
        *last
    }
}

pub fn at(text: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(text, TIMESTAMP_FORMAT).unwrap()
}

pub fn cents(value: i64) -> Decimal {
    Decimal::new(value, 2)
}

pub fn request(kind: EntryKind, category: &str, amount: Decimal) -> NewEntry {
    NewEntry::new(kind, category, amount).unwrap()
}

/// A store in its own temporary directory; keep the `TempDir` alive for the test.
pub fn temp_store(times: &[&str]) -> (TempDir, SqliteStore<ScriptedClock>) {
    let dir = TempDir::new().expect("create temp dir");
    let store = SqliteStore::with_clock(db_path(&dir), ScriptedClock::new(times));
    store.initialize().expect("initialize store");
    (dir, store)
}

pub fn db_path(dir: &TempDir) -> PathBuf {
    dir.path().join("ledger.db")
}
