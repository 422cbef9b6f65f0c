use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Derived indicators for one allocation.
///
/// This struct is the final output of the `MetricsEngine`. All values are
/// already rounded for display: return and exposures to 2 decimals, risk to
/// 1 decimal, diversification to a whole number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortfolioMetrics {
    /// Weighted expected annual return, in percent.
    pub expected_return_pct: Decimal,
    /// Weighted risk on a 0-10 scale.
    pub risk_score: Decimal,
    /// 0-10 heuristic driven by the number of funded assets.
    pub diversification_score: u8,
    /// Share of weight in crypto-exposed assets, in percent.
    pub crypto_exposure_pct: Decimal,
    /// Share of weight in stable assets, in percent.
    pub stable_exposure_pct: Decimal,
}

impl PortfolioMetrics {
    /// Creates a zeroed-out report, the result for an empty allocation.
    pub fn new() -> Self {
        Self {
            expected_return_pct: Decimal::ZERO,
            risk_score: Decimal::ZERO,
            diversification_score: 0,
            crypto_exposure_pct: Decimal::ZERO,
            stable_exposure_pct: Decimal::ZERO,
        }
    }
}

impl Default for PortfolioMetrics {
    fn default() -> Self {
        Self::new()
    }
}
