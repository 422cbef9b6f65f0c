use crate::split::RewardSplit;
use analytics::PortfolioMetrics;
use core_types::arithmetic::saturating_mul;
use core_types::rounding::round_money;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Length of the year a holding period is pro-rated against.
pub const DAYS_PER_YEAR: u32 = 365;

/// Expected outcome of holding a principal for a period at an annual return.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfitProjection {
    pub initial_investment: Decimal,
    pub expected_return_pct: Decimal,
    pub period_days: u32,
    pub total_profit: Decimal,
    pub final_value: Decimal,
    pub split: RewardSplit,
}

/// A stateless calculator for profit projections and reward splits.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProjectionEngine {}

impl ProjectionEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Projects simple (non-compounding) profit over `period_days`.
    ///
    /// The annual return is pro-rated linearly as `period_days / 365`, also for
    /// periods longer than a year. Zero principal or a zero-day period give a
    /// zero profit. Results that would overflow `Decimal` saturate instead of
    /// panicking.
    pub fn compute_projection(
        &self,
        principal: Decimal,
        expected_return_pct: Decimal,
        period_days: u32,
    ) -> ProfitProjection {
        let principal = round_money(principal);
        let period_rate = saturating_mul(expected_return_pct, Decimal::from(period_days))
            / (dec!(100) * Decimal::from(DAYS_PER_YEAR));

        let total_profit = round_money(saturating_mul(principal, period_rate));
        let final_value = principal.saturating_add(total_profit);
        let split = RewardSplit::from_total(total_profit);

        tracing::debug!(
            %principal,
            %expected_return_pct,
            period_days,
            %total_profit,
            "Computed profit projection."
        );

        ProfitProjection {
            initial_investment: principal,
            expected_return_pct,
            period_days,
            total_profit,
            final_value,
            split,
        }
    }

    /// Projects a holding of `holdings` units priced at `price`.
    pub fn project_holdings(
        &self,
        holdings: Decimal,
        price: Decimal,
        expected_return_pct: Decimal,
        period_days: u32,
    ) -> ProfitProjection {
        self.compute_projection(initial_investment(holdings, price), expected_return_pct, period_days)
    }

    /// Projects using the expected return of an allocation's metrics.
    pub fn project_portfolio(
        &self,
        principal: Decimal,
        metrics: &PortfolioMetrics,
        period_days: u32,
    ) -> ProfitProjection {
        self.compute_projection(principal, metrics.expected_return_pct, period_days)
    }

    /// What the reviewer would earn if the user follows this allocation.
    pub fn reviewer_earnings(
        &self,
        principal: Decimal,
        metrics: &PortfolioMetrics,
        period_days: u32,
    ) -> Decimal {
        self.project_portfolio(principal, metrics, period_days).split.reviewer
    }
}

/// Value of a holding in the reference currency, rounded to cents.
pub fn initial_investment(holdings: Decimal, price: Decimal) -> Decimal {
    round_money(saturating_mul(holdings, price))
}

/// Convenience wrapper around [`ProjectionEngine::compute_projection`].
pub fn compute_projection(
    principal: Decimal,
    expected_return_pct: Decimal,
    period_days: u32,
) -> ProfitProjection {
    ProjectionEngine::new().compute_projection(principal, expected_return_pct, period_days)
}
