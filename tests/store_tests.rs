mod common;

use cashbook::{
    errors::LedgerError,
    ledger::{max_amount, EntryInputError, EntryKind, NewEntry, DEFAULT_ACCOUNT},
    storage::{EntryStore, SqliteStore},
};
use common::{at, cents, request, temp_store, ScriptedClock};
use rust_decimal::Decimal;
use tempfile::tempdir;

#[test]
fn empty_store_lists_nothing() {
    let (_dir, store) = temp_store(&[]);
    assert!(store.list_all().unwrap().is_empty());
}

#[test]
fn appended_entries_round_trip() {
    let (_dir, store) = temp_store(&[
        "2025-03-01 08:00:00",
        "2025-03-01 09:15:30",
        "2025-03-02 17:45:00",
    ]);

    let requests = vec![
        request(EntryKind::Income, "Sales", cents(10000))
            .with_description("Invoice 12")
            .with_account("Banco1"),
        request(EntryKind::Expense, "Rent", cents(4000)).with_description("March"),
        request(EntryKind::Expense, "Energy", cents(2550)),
    ];

    let appended: Vec<_> = requests
        .iter()
        .map(|req| store.append(req).unwrap())
        .collect();
    let listed = store.list_all().unwrap();

    assert_eq!(listed, appended);
    assert_eq!(listed.len(), requests.len());
    for (entry, req) in listed.iter().zip(&requests) {
        assert_eq!(entry.kind, req.kind());
        assert_eq!(entry.category, req.category());
        assert_eq!(entry.amount, req.amount());
        assert_eq!(entry.description, req.description());
        assert_eq!(entry.account, req.account_or(DEFAULT_ACCOUNT));
    }
    assert_eq!(listed[0].timestamp, at("2025-03-01 08:00:00"));
    assert_eq!(listed[1].timestamp, at("2025-03-01 09:15:30"));
}

#[test]
fn ids_increase_monotonically() {
    let (_dir, store) = temp_store(&[]);
    let ids: Vec<i64> = (0..5)
        .map(|_| {
            store
                .append(&request(EntryKind::Income, "Sales", cents(100)))
                .unwrap()
                .id
        })
        .collect();
    assert!(ids.windows(2).all(|pair| pair[0] < pair[1]));
}

#[test]
fn listing_orders_by_timestamp_not_id() {
    // The second append is backdated, as after a clock adjustment.
    let (_dir, store) = temp_store(&[
        "2025-05-10 12:00:00",
        "2025-05-01 12:00:00",
        "2025-05-20 12:00:00",
    ]);
    let first = store
        .append(&request(EntryKind::Income, "Sales", cents(500)))
        .unwrap();
    let backdated = store
        .append(&request(EntryKind::Expense, "Supplier", cents(200)))
        .unwrap();
    let last = store
        .append(&request(EntryKind::Income, "Sales", cents(100)))
        .unwrap();

    let ids: Vec<i64> = store.list_all().unwrap().iter().map(|e| e.id).collect();
    assert_eq!(ids, vec![backdated.id, first.id, last.id]);
}

#[test]
fn identical_timestamps_keep_insertion_order() {
    let (_dir, store) = temp_store(&["2025-06-01 10:00:00"]);
    let appended: Vec<i64> = ["A", "B", "C", "D"]
        .iter()
        .map(|category| {
            store
                .append(&request(EntryKind::Income, category, cents(100)))
                .unwrap()
                .id
        })
        .collect();

    let listed: Vec<i64> = store.list_all().unwrap().iter().map(|e| e.id).collect();
    assert_eq!(listed, appended);
}

#[test]
fn missing_description_and_account_use_defaults() {
    let (_dir, store) = temp_store(&[]);
    store
        .append(&request(EntryKind::Income, "Sales", cents(1000)))
        .unwrap();

    let entry = &store.list_all().unwrap()[0];
    assert_eq!(entry.description, "");
    assert_eq!(entry.account, "Caixa");
}

#[test]
fn configured_default_account_is_recorded() {
    let dir = tempdir().unwrap();
    let store = SqliteStore::with_clock(dir.path().join("ledger.db"), ScriptedClock::new(&[]))
        .with_default_account("Cartao");
    store.initialize().unwrap();
    let entry = store
        .append(&request(EntryKind::Expense, "Fuel", cents(5000)))
        .unwrap();
    assert_eq!(entry.account, "Cartao");
}

#[test]
fn data_survives_a_new_store_handle() {
    let (dir, store) = temp_store(&["2025-01-01 10:00:00"]);
    store
        .append(&request(EntryKind::Income, "Sales", Decimal::new(1999, 2)))
        .unwrap();
    drop(store);

    let reopened = SqliteStore::new(common::db_path(&dir));
    reopened.initialize().unwrap();
    let entries = reopened.list_all().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].amount, cents(1999));
}

#[test]
fn unopenable_path_is_a_storage_fault() {
    let dir = tempdir().unwrap();
    let store = SqliteStore::new(dir.path().join("missing").join("nested").join("ledger.db"));

    assert!(matches!(store.initialize(), Err(LedgerError::Storage(_))));
    assert!(matches!(
        store.append(&request(EntryKind::Income, "Sales", cents(100))),
        Err(LedgerError::Storage(_))
    ));
}

#[test]
fn listing_before_initialize_is_a_storage_fault() {
    let dir = tempdir().unwrap();
    let store = SqliteStore::new(dir.path().join("fresh.db"));
    assert!(matches!(store.list_all(), Err(LedgerError::Storage(_))));
}

#[test]
fn amounts_near_the_ceiling_round_trip_to_the_cent() {
    let (_dir, store) = temp_store(&["2025-07-01 08:00:00", "2025-07-01 09:00:00"]);
    let appended = vec![
        store
            .append(&request(EntryKind::Income, "Sale of property", max_amount()))
            .unwrap(),
        store
            .append(&request(
                EntryKind::Expense,
                "Construction",
                Decimal::new(98_765_432_109_877, 2),
            ))
            .unwrap(),
    ];

    assert_eq!(store.list_all().unwrap(), appended);
}

#[test]
fn amounts_beyond_the_ceiling_never_reach_the_store() {
    let (_dir, store) = temp_store(&[]);
    for text in ["12345678901234567.89", "79228162514264337593543950335"] {
        let amount: Decimal = text.parse().unwrap();
        assert_eq!(
            NewEntry::new(EntryKind::Income, "Sales", amount),
            Err(EntryInputError::AmountTooLarge(amount))
        );
    }
    assert!(store.list_all().unwrap().is_empty());
}
