//! Running-balance derivation.
//!
//! Pure transformation: no I/O and no hidden state.

use rust_decimal::Decimal;

use crate::ledger::Entry;

/// One entry together with its signed amount and the balance after it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BalanceRow {
    pub entry: Entry,
    pub signed_amount: Decimal,
    pub running_balance: Decimal,
}

/// Builds the cumulative balance series for `entries`.
///
/// `entries` must already be in chronological order (as returned by
/// `EntryStore::list_all`). The input is never re-sorted: out-of-order input
/// yields a meaningless series, so debug builds assert the precondition.
pub fn derive(entries: &[Entry]) -> Vec<BalanceRow> {
    debug_assert!(
        is_chronological(entries),
        "balance derivation requires chronologically ordered entries"
    );

    entries
        .iter()
        .scan(Decimal::ZERO, |balance, entry| {
            let signed_amount = entry.signed_amount();
            // Rows read from foreign files are not bound by the amount ceiling.
            *balance = balance.saturating_add(signed_amount);
            Some(BalanceRow {
                entry: entry.clone(),
                signed_amount,
                running_balance: *balance,
            })
        })
        .collect()
}

/// True when entries are ordered by timestamp, ties by id.
pub fn is_chronological(entries: &[Entry]) -> bool {
    entries
        .windows(2)
        .all(|pair| (pair[0].timestamp, pair[0].id) <= (pair[1].timestamp, pair[1].id))
}

/// Balance after the last row, zero for an empty series.
pub fn closing_balance(rows: &[BalanceRow]) -> Decimal {
    rows.last()
        .map(|row| row.running_balance)
        .unwrap_or(Decimal::ZERO)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDateTime;

    use super::*;
    use crate::ledger::{EntryKind, DEFAULT_ACCOUNT, TIMESTAMP_FORMAT};

    fn entry(id: i64, at: &str, kind: EntryKind, cents: i64) -> Entry {
        Entry {
            id,
            timestamp: NaiveDateTime::parse_from_str(at, TIMESTAMP_FORMAT).unwrap(),
            kind,
            category: String::new(),
            amount: Decimal::new(cents, 2),
            description: String::new(),
            account: DEFAULT_ACCOUNT.into(),
        }
    }

    #[test]
    fn empty_input_yields_empty_series() {
        assert!(derive(&[]).is_empty());
        assert_eq!(closing_balance(&[]), Decimal::ZERO);
    }

    #[test]
    fn income_then_expense() {
        let entries = vec![
            entry(1, "2025-01-01 09:00:00", EntryKind::Income, 10000),
            entry(2, "2025-01-01 10:00:00", EntryKind::Expense, 4000),
        ];
        let rows = derive(&entries);
        let balances: Vec<_> = rows.iter().map(|row| row.running_balance).collect();
        assert_eq!(balances, vec![Decimal::new(10000, 2), Decimal::new(6000, 2)]);
        assert_eq!(rows[1].signed_amount, Decimal::new(-4000, 2));
        assert_eq!(closing_balance(&rows), Decimal::new(6000, 2));
    }

    #[test]
    fn single_expense_goes_negative() {
        let rows = derive(&[entry(1, "2025-01-01 09:00:00", EntryKind::Expense, 2550)]);
        assert_eq!(rows[0].running_balance, Decimal::new(-2550, 2));
    }

    #[test]
    fn running_balance_follows_recurrence() {
        let entries: Vec<_> = (0..50)
            .map(|i| {
                let kind = if i % 3 == 0 {
                    EntryKind::Expense
                } else {
                    EntryKind::Income
                };
                entry(i + 1, "2025-02-01 12:00:00", kind, 10 + i * 7)
            })
            .collect();
        let rows = derive(&entries);

        let mut previous = Decimal::ZERO;
        for row in &rows {
            let expected_sign = row.entry.kind.sign();
            assert_eq!(row.signed_amount, row.entry.amount * expected_sign);
            assert_eq!(row.running_balance, previous + row.signed_amount);
            previous = row.running_balance;
        }
    }

    #[test]
    fn cents_do_not_drift() {
        let entries: Vec<_> = (0..1000)
            .map(|i| entry(i + 1, "2025-03-01 00:00:00", EntryKind::Income, 10))
            .collect();
        assert_eq!(closing_balance(&derive(&entries)), Decimal::new(100, 0));
    }

    #[test]
    fn huge_totals_saturate_instead_of_panicking() {
        let half = Decimal::MAX / Decimal::TWO;
        let mut entries = vec![
            entry(1, "2025-01-01 09:00:00", EntryKind::Income, 0),
            entry(2, "2025-01-01 10:00:00", EntryKind::Income, 0),
            entry(3, "2025-01-01 11:00:00", EntryKind::Income, 0),
        ];
        for entry in &mut entries {
            entry.amount = half;
        }

        let rows = derive(&entries);
        assert_eq!(rows.len(), 3);
        assert_eq!(closing_balance(&rows), Decimal::MAX);
    }

    #[test]
    fn derive_is_pure() {
        let entries = vec![
            entry(1, "2025-01-01 09:00:00", EntryKind::Income, 500),
            entry(2, "2025-01-02 09:00:00", EntryKind::Expense, 125),
        ];
        assert_eq!(derive(&entries), derive(&entries));
    }

    #[test]
    fn detects_out_of_order_input() {
        let entries = vec![
            entry(2, "2025-01-02 09:00:00", EntryKind::Income, 500),
            entry(1, "2025-01-01 09:00:00", EntryKind::Income, 500),
        ];
        assert!(!is_chronological(&entries));
        assert!(is_chronological(&entries[..1]));
    }
}
