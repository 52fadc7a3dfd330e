//! Presentation of a derived balance series: a text table and a line chart.
//!
//! Everything here is read-only over its input.

pub mod chart;
pub mod format;
pub mod table;

use colored::Colorize;

use crate::balance::BalanceRow;

pub use chart::{render_chart, ChartOptions};
pub use format::format_money;
use table::{Table, TableColumn};

/// Shown instead of a table when the ledger has no entries.
pub const EMPTY_LEDGER_MESSAGE: &str = "No entries recorded yet.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportStyle {
    pub currency_symbol: String,
    /// ASCII rule and no colours.
    pub plain: bool,
}

impl ReportStyle {
    pub fn new(currency_symbol: impl Into<String>, plain: bool) -> Self {
        Self {
            currency_symbol: currency_symbol.into(),
            plain,
        }
    }
}

impl Default for ReportStyle {
    fn default() -> Self {
        Self::new("R$", true)
    }
}

/// One line per row: date, type, category, signed amount, description,
/// running balance.
pub fn render_table(rows: &[BalanceRow], style: &ReportStyle) -> String {
    if rows.is_empty() {
        return EMPTY_LEDGER_MESSAGE.to_string();
    }

    let money = |value| {
        let text = format_money(value, &style.currency_symbol);
        if !style.plain && text.starts_with('-') {
            text.red().to_string()
        } else {
            text
        }
    };

    let table = Table {
        columns: vec![
            TableColumn::left("Date"),
            TableColumn::left("Type"),
            TableColumn::left("Category").max_width(24),
            TableColumn::right("Amount"),
            TableColumn::left("Description").max_width(32),
            TableColumn::right("Balance"),
        ],
        rows: rows
            .iter()
            .map(|row| {
                vec![
                    row.entry.formatted_timestamp(),
                    row.entry.kind.label().to_string(),
                    row.entry.category.clone(),
                    money(row.signed_amount),
                    row.entry.description.clone(),
                    money(row.running_balance),
                ]
            })
            .collect(),
        padding: 1,
        plain: style.plain,
    };
    table.render()
}
