use crate::error::PortfolioError;
use core_types::Allocation;
use core_types::rounding::round_dp;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Totals inside this band are accepted as-is.
pub const ACCEPTED_TOTAL_MIN: Decimal = dec!(95);
pub const ACCEPTED_TOTAL_MAX: Decimal = dec!(105);

/// Rescales an allocation whose weights stray too far from 100.
///
/// Totals within [`ACCEPTED_TOTAL_MIN`]..=[`ACCEPTED_TOTAL_MAX`] are left
/// untouched. Anything else is scaled by `100 / total` and each weight is
/// rounded to a whole percentage point, so the result may still be off by a
/// point or two. Returns whether the allocation was changed.
pub fn normalize(allocation: &mut Allocation) -> Result<bool, PortfolioError> {
    let total = allocation.total_weight();
    if (ACCEPTED_TOTAL_MIN..=ACCEPTED_TOTAL_MAX).contains(&total) {
        return Ok(false);
    }
    if total.is_zero() {
        return Err(PortfolioError::ZeroTotal);
    }

    let overflow = || PortfolioError::Overflow { total };
    let factor = dec!(100).checked_div(total).ok_or_else(overflow)?;
    let scaled = allocation
        .iter()
        .map(|(_, weight)| weight.checked_mul(factor).map(|w| round_dp(w, 0)))
        .collect::<Option<Vec<_>>>()
        .ok_or_else(overflow)?;
    for ((_, weight), value) in allocation.iter_mut().zip(scaled) {
        *weight = value;
    }

    tracing::debug!(%total, "Normalized allocation weights to 100.");
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alloc(entries: &[(&str, i64)]) -> Allocation {
        entries.iter().map(|&(k, v)| (k, Decimal::from(v))).collect()
    }

    #[test]
    fn near_hundred_is_left_alone() {
        let mut a = alloc(&[("eETH", 50), ("Cash/FD", 48)]);
        assert!(!normalize(&mut a).unwrap());
        assert_eq!(a.get("Cash/FD"), Some(dec!(48)));
    }

    #[test]
    fn proportions_are_scaled_up() {
        let mut a = alloc(&[("eETH", 30), ("BTC/Alts", 10), ("US Stocks", 10)]);
        assert!(normalize(&mut a).unwrap());
        assert_eq!(a.get("eETH"), Some(dec!(60)));
        assert_eq!(a.get("BTC/Alts"), Some(dec!(20)));
        assert_eq!(a.total_weight(), dec!(100));
    }

    #[test]
    fn scaled_weights_are_whole_points() {
        let mut a = alloc(&[("a", 1), ("b", 1), ("c", 1)]);
        normalize(&mut a).unwrap();
        // 33.33.. rounds to 33 each; the total is allowed to drift.
        assert_eq!(a.get("a"), Some(dec!(33)));
        assert_eq!(a.total_weight(), dec!(99));
    }

    #[test]
    fn near_zero_total_is_an_error_and_leaves_weights_alone() {
        let tiny = Decimal::new(1, 28);
        let mut a: Allocation = [("x", tiny), ("y", Decimal::ZERO), ("z", Decimal::ZERO)]
            .into_iter()
            .collect();
        assert!(matches!(normalize(&mut a), Err(PortfolioError::Overflow { .. })));
        assert_eq!(a.get("x"), Some(tiny));

        // The factor fits but one scaled weight does not.
        let big = 10i128.pow(28);
        let mut b: Allocation = [
            ("x", Decimal::from_i128_with_scale(big, 0)),
            ("y", Decimal::from_i128_with_scale(1 - big, 0)),
        ]
        .into_iter()
        .collect();
        assert!(matches!(normalize(&mut b), Err(PortfolioError::Overflow { .. })));
    }

    #[test]
    fn zero_total_is_an_error() {
        let mut a = alloc(&[("a", 0), ("b", 0)]);
        assert!(matches!(normalize(&mut a), Err(PortfolioError::ZeroTotal)));
    }
}
