use crate::report::PortfolioMetrics;
use core_types::arithmetic::{saturating_add, saturating_mul};
use core_types::rounding::round_dp;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;

/// Chart checkpoints as (label, months from now).
pub const CHECKPOINTS: [(&str, u32); 7] = [
    ("Now", 0),
    ("3M", 3),
    ("6M", 6),
    ("9M", 9),
    ("1Y", 12),
    ("18M", 18),
    ("2Y", 24),
];

/// One point on a projected growth chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GrowthPoint {
    pub label: &'static str,
    pub years: Decimal,
    /// Portfolio value indexed to 100 today.
    pub indexed_value: Decimal,
}

/// Projects an indexed value at each checkpoint using simple (non-compounding) growth.
pub fn projected_growth(metrics: &PortfolioMetrics) -> Vec<GrowthPoint> {
    let annual_return = metrics.expected_return_pct / dec!(100);

    CHECKPOINTS
        .iter()
        .map(|&(label, months)| {
            let years = Decimal::from(months) / dec!(12);
            let growth = saturating_add(Decimal::ONE, saturating_mul(annual_return, years));
            let indexed_value = round_dp(saturating_mul(growth, dec!(100)), 2);
            GrowthPoint {
                label,
                years,
                indexed_value,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics_with_return(pct: Decimal) -> PortfolioMetrics {
        PortfolioMetrics {
            expected_return_pct: pct,
            ..PortfolioMetrics::new()
        }
    }

    #[test]
    fn growth_is_linear_in_time() {
        let curve = projected_growth(&metrics_with_return(dec!(10)));
        let values: Vec<Decimal> = curve.iter().map(|p| p.indexed_value).collect();

        assert_eq!(
            values,
            vec![dec!(100), dec!(102.5), dec!(105), dec!(107.5), dec!(110), dec!(115), dec!(120)]
        );
        assert_eq!(curve[0].label, "Now");
        assert_eq!(curve[6].label, "2Y");
        assert_eq!(curve[5].years, dec!(1.5));
    }

    #[test]
    fn saturated_returns_do_not_overflow_the_curve() {
        let up = projected_growth(&metrics_with_return(Decimal::MAX));
        assert_eq!(up[0].indexed_value, dec!(100));
        assert_eq!(up[6].indexed_value, Decimal::MAX);
        assert!(up.windows(2).all(|w| w[0].indexed_value <= w[1].indexed_value));

        let down = projected_growth(&metrics_with_return(Decimal::MIN));
        assert_eq!(down[6].indexed_value, Decimal::MIN);
    }

    #[test]
    fn zero_return_stays_flat() {
        let curve = projected_growth(&PortfolioMetrics::new());
        assert!(curve.iter().all(|p| p.indexed_value == dec!(100)));
    }
}
