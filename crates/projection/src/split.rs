use core_types::rounding::round_money;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Fraction of profit kept by the principal holder.
pub const USER_RATIO: Decimal = dec!(0.96);
/// Fraction of profit paid to the reviewer whose recommendation was followed.
pub const REVIEWER_RATIO: Decimal = dec!(0.03);
/// Fraction of profit retained by the platform.
pub const PLATFORM_RATIO: Decimal = dec!(0.01);

/// The fixed three-way division of a profit.
///
/// `user + reviewer + platform == total` holds exactly: the platform share is
/// the residual after the other two are rounded to cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardSplit {
    pub user: Decimal,
    pub reviewer: Decimal,
    pub platform: Decimal,
    pub total: Decimal,
}

impl RewardSplit {
    /// Splits `total` (rounded to cents first) 96 / 3 / 1.
    pub fn from_total(total: Decimal) -> Self {
        let total = round_money(total);
        let user = round_money(total * USER_RATIO);
        let reviewer = round_money(total * REVIEWER_RATIO);
        let platform = total - user - reviewer;

        Self {
            user,
            reviewer,
            platform,
            total,
        }
    }

    pub fn zero() -> Self {
        Self::from_total(Decimal::ZERO)
    }

    /// Sum of the three shares. Always equal to `total`.
    pub fn shares_sum(&self) -> Decimal {
        self.user + self.reviewer + self.platform
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ratios_cover_the_whole_profit() {
        assert_eq!(USER_RATIO + REVIEWER_RATIO + PLATFORM_RATIO, Decimal::ONE);
    }

    #[test]
    fn round_hundred_splits_cleanly() {
        let split = RewardSplit::from_total(dec!(100));
        assert_eq!(split.user, dec!(96));
        assert_eq!(split.reviewer, dec!(3));
        assert_eq!(split.platform, dec!(1));
    }

    #[test]
    fn platform_absorbs_the_rounding_residual() {
        // 0.96 * 0.05 = 0.048 -> 0.05, 0.03 * 0.05 = 0.0015 -> 0.00
        let split = RewardSplit::from_total(dec!(0.05));
        assert_eq!(split.user, dec!(0.05));
        assert_eq!(split.reviewer, dec!(0.00));
        assert_eq!(split.platform, dec!(0.00));
        assert_eq!(split.shares_sum(), split.total);

        let split = RewardSplit::from_total(dec!(49.86));
        assert_eq!(split.user, dec!(47.87));
        assert_eq!(split.reviewer, dec!(1.50));
        assert_eq!(split.platform, dec!(0.49));
    }

    #[test]
    fn total_is_rounded_to_cents_before_splitting() {
        let split = RewardSplit::from_total(dec!(10.004));
        assert_eq!(split.total, dec!(10.00));
        assert_eq!(split.shares_sum(), dec!(10.00));
    }

    #[test]
    fn losses_split_with_the_same_guarantee() {
        let split = RewardSplit::from_total(dec!(-33.33));
        assert_eq!(split.user, dec!(-32.00));
        assert_eq!(split.reviewer, dec!(-1.00));
        assert_eq!(split.platform, dec!(-0.33));
        assert_eq!(split.shares_sum(), split.total);
    }
}
