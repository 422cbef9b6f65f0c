use crate::error::CoreError;
use crate::arithmetic::saturating_sum;
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::str::FromStr;

/// How far a weight total may stray from 100 and still count as balanced.
pub const BALANCE_TOLERANCE: Decimal = dec!(0.5);

/// A split of a portfolio across assets, as whole percentage points.
///
/// Weights are expected to add up to 100, but nothing here enforces it:
/// generators round, and consumers are required to tolerate the drift.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Allocation {
    weights: BTreeMap<String, Decimal>,
}

impl Allocation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the weight for `asset`, replacing any previous value.
    pub fn insert(&mut self, asset: impl Into<String>, weight: Decimal) {
        self.weights.insert(asset.into(), weight);
    }

    pub fn get(&self, asset: &str) -> Option<Decimal> {
        self.weights.get(asset).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Decimal)> {
        self.weights.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&str, &mut Decimal)> {
        self.weights.iter_mut().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// Raw sum of all weights, negatives included. Saturates on overflow.
    pub fn total_weight(&self) -> Decimal {
        saturating_sum(self.weights.values().copied())
    }

    /// Number of assets holding a strictly positive weight.
    pub fn active_asset_count(&self) -> usize {
        self.weights.values().filter(|w| **w > Decimal::ZERO).count()
    }

    /// `true` when the weights sum to 100 within [`BALANCE_TOLERANCE`].
    pub fn is_balanced(&self) -> bool {
        self.total_weight()
            .checked_sub(dec!(100))
            .is_some_and(|diff| diff.abs() <= BALANCE_TOLERANCE)
    }

    /// Builds an allocation from an untyped JSON object.
    ///
    /// Values that are not numbers (or numeric strings) become a zero weight
    /// instead of failing the whole payload. Only a non-object root is an error.
    pub fn from_json_lenient(value: &Value) -> Result<Self, CoreError> {
        let object = value.as_object().ok_or_else(|| {
            CoreError::InvalidInput(
                "allocation".to_string(),
                "expected a JSON object of asset -> weight".to_string(),
            )
        })?;

        let mut allocation = Self::new();
        for (asset, raw) in object {
            let weight = json_weight(raw).unwrap_or_else(|| {
                tracing::debug!(asset = %asset, value = %raw, "Non-numeric weight treated as zero.");
                Decimal::ZERO
            });
            allocation.insert(asset.clone(), weight);
        }
        Ok(allocation)
    }
}

fn json_weight(raw: &Value) -> Option<Decimal> {
    match raw {
        Value::Number(n) => {
            Decimal::from_str(&n.to_string())
                .ok()
                .or_else(|| n.as_f64().and_then(Decimal::from_f64))
        }
        Value::String(s) => Decimal::from_str(s.trim()).ok(),
        _ => None,
    }
}

impl<S: Into<String>> FromIterator<(S, Decimal)> for Allocation {
    fn from_iter<I: IntoIterator<Item = (S, Decimal)>>(iter: I) -> Self {
        let mut allocation = Self::new();
        for (asset, weight) in iter {
            allocation.insert(asset, weight);
        }
        allocation
    }
}

/// Market parameters supplied by the caller. Never fetched by the engines.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketSnapshot {
    /// Annual percentage yield of the primary yield-bearing instrument, e.g. 4.5.
    pub base_yield_pct: Option<Decimal>,
    /// Price of the held asset in the reference currency.
    pub reference_price: Option<Decimal>,
    /// Total value locked, in billions. Informational only.
    #[serde(default)]
    pub tvl_billions: Option<Decimal>,
}

impl MarketSnapshot {
    pub fn new(base_yield_pct: Decimal, reference_price: Decimal) -> Self {
        Self {
            base_yield_pct: Some(base_yield_pct),
            reference_price: Some(reference_price),
            tvl_billions: None,
        }
    }
}

/// An allocation together with the display name it was generated under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedPortfolio {
    pub name: String,
    pub allocation: Allocation,
}

/// The pair of candidate portfolios offered for one recommendation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortfolioSet {
    pub portfolios: Vec<NamedPortfolio>,
}

impl PortfolioSet {
    pub fn get(&self, name: &str) -> Option<&Allocation> {
        self.portfolios
            .iter()
            .find(|p| p.name == name)
            .map(|p| &p.allocation)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.portfolios.iter().map(|p| p.name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn lenient_json_zeroes_garbage_weights() {
        let value = json!({
            "eETH": 30,
            "US Stocks": "25",
            "BTC/Alts": "lots",
            "Cash/FD": null,
            "eBTC": 12.5
        });
        let allocation = Allocation::from_json_lenient(&value).unwrap();

        assert_eq!(allocation.len(), 5);
        assert_eq!(allocation.get("eETH"), Some(dec!(30)));
        assert_eq!(allocation.get("US Stocks"), Some(dec!(25)));
        assert_eq!(allocation.get("BTC/Alts"), Some(Decimal::ZERO));
        assert_eq!(allocation.get("Cash/FD"), Some(Decimal::ZERO));
        assert_eq!(allocation.get("eBTC"), Some(dec!(12.5)));
    }

    #[test]
    fn lenient_json_rejects_non_object_root() {
        assert!(Allocation::from_json_lenient(&json!([1, 2, 3])).is_err());
    }

    #[test]
    fn counts_only_positive_weights() {
        let allocation: Allocation = [("a", dec!(50)), ("b", dec!(0)), ("c", dec!(-5)), ("d", dec!(55))]
            .into_iter()
            .collect();
        assert_eq!(allocation.active_asset_count(), 2);
        assert_eq!(allocation.total_weight(), dec!(100));
        assert!(allocation.is_balanced());
    }

    #[test]
    fn deserializes_from_plain_map() {
        let allocation: Allocation = serde_json::from_str(r#"{"eETH": 60, "Cash/FD": 40}"#).unwrap();
        assert_eq!(allocation.get("Cash/FD"), Some(dec!(40)));
        assert!(allocation.is_balanced());
    }
}
