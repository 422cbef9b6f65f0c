//! Fixed-point display rounding shared by the engines.
//!
//! Everything rounds half away from zero, the way the dashboard formats numbers.

use rust_decimal::{Decimal, RoundingStrategy};

/// Decimal places used for currency amounts.
pub const MONEY_DP: u32 = 2;

/// Rounds `value` to `dp` decimal places, midpoints away from zero.
pub fn round_dp(value: Decimal, dp: u32) -> Decimal {
    value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
}

/// Rounds a currency amount to cents.
pub fn round_money(value: Decimal) -> Decimal {
    round_dp(value, MONEY_DP)
}
