use rust_decimal::{Decimal, RoundingStrategy};

use crate::ledger::AMOUNT_SCALE;

/// Formats `value` with two decimals and the currency symbol, sign first:
/// `R$ 1234.50`, `-R$ 40.00`.
pub fn format_money(value: Decimal, symbol: &str) -> String {
    let mut rounded =
        value.round_dp_with_strategy(AMOUNT_SCALE, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(AMOUNT_SCALE);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    let magnitude = rounded.abs();
    if symbol.is_empty() {
        format!("{sign}{magnitude}")
    } else {
        format!("{sign}{symbol} {magnitude}")
    }
}
