use crate::profiles::{self, FALLBACK_PROFILE};
use crate::report::PortfolioMetrics;
use core_types::arithmetic::{saturating_add, saturating_mul};
use core_types::rounding::round_dp;
use core_types::{Allocation, ExposureClass, MarketSnapshot};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal_macros::dec;

/// Diversification points earned per funded asset.
pub const DIVERSIFICATION_STEP: Decimal = dec!(1.5);
/// Upper bound of the diversification and risk scales.
pub const SCORE_CAP: Decimal = dec!(10);

/// A stateless calculator for deriving indicators from an allocation.
#[derive(Debug, Default, Clone, Copy)]
pub struct MetricsEngine {}

impl MetricsEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// The main entry point for calculating portfolio metrics.
    ///
    /// # Arguments
    ///
    /// * `allocation` - Asset label to weight, in percentage points.
    /// * `market` - The latest market snapshot, if one has been fetched yet.
    ///
    /// # Returns
    ///
    /// `None` while no base yield rate is available (the market feed has not
    /// produced a snapshot yet). Otherwise the rounded `PortfolioMetrics`; an
    /// empty allocation yields all zeroes.
    pub fn compute_metrics(
        &self,
        allocation: &Allocation,
        market: Option<&MarketSnapshot>,
    ) -> Option<PortfolioMetrics> {
        let Some(base_yield) = market.and_then(|m| m.base_yield_pct) else {
            tracing::debug!("No base yield rate available; metrics not computable yet.");
            return None;
        };

        if allocation.is_empty() {
            return Some(PortfolioMetrics::new());
        }

        let mut expected_return = Decimal::ZERO;
        let mut risk_score = Decimal::ZERO;
        let mut crypto_exposure = Decimal::ZERO;
        let mut stable_exposure = Decimal::ZERO;

        for (asset, weight) in allocation.iter() {
            // Negative weights are malformed input; they contribute nothing.
            if weight <= Decimal::ZERO {
                continue;
            }

            let profile = profiles::lookup(asset).unwrap_or_else(|| {
                tracing::debug!(asset, "Unknown asset label, using fallback profile.");
                FALLBACK_PROFILE
            });

            let fraction = weight / dec!(100);
            let annual = profile.return_model.annual_return(base_yield);
            expected_return = saturating_add(expected_return, saturating_mul(fraction, annual));
            risk_score = saturating_add(risk_score, saturating_mul(fraction, profile.risk_weight));

            match profile.exposure {
                ExposureClass::Crypto => crypto_exposure = saturating_add(crypto_exposure, weight),
                ExposureClass::Stable => stable_exposure = saturating_add(stable_exposure, weight),
                ExposureClass::Split => {
                    let half = weight / dec!(2);
                    crypto_exposure = saturating_add(crypto_exposure, half);
                    stable_exposure = saturating_add(stable_exposure, half);
                }
            }
        }

        let metrics = PortfolioMetrics {
            expected_return_pct: round_dp(expected_return, 2),
            risk_score: round_dp(risk_score, 1),
            diversification_score: diversification_score(allocation.active_asset_count()),
            crypto_exposure_pct: round_dp(crypto_exposure, 2),
            stable_exposure_pct: round_dp(stable_exposure, 2),
        };

        tracing::debug!(
            assets = allocation.len(),
            %base_yield,
            expected_return = %metrics.expected_return_pct,
            risk = %metrics.risk_score,
            "Computed portfolio metrics."
        );

        Some(metrics)
    }
}

/// Maps the number of funded assets onto the 0-10 diversification scale.
pub fn diversification_score(active_assets: usize) -> u8 {
    let raw = (Decimal::from(active_assets) * DIVERSIFICATION_STEP).min(SCORE_CAP);
    round_dp(raw, 0).to_u8().unwrap_or(10)
}

/// Convenience wrapper around [`MetricsEngine::compute_metrics`].
pub fn compute_metrics(
    allocation: &Allocation,
    market: Option<&MarketSnapshot>,
) -> Option<PortfolioMetrics> {
    MetricsEngine::new().compute_metrics(allocation, market)
}
