use crate::catalog::fallback_portfolios;
use crate::error::PortfolioError;
use crate::normalize::normalize;
use core_types::{Allocation, NamedPortfolio, PortfolioKind, PortfolioSet, RiskTolerance};
use rust_decimal::Decimal;
use serde_json::Value;
use std::str::FromStr;

/// Number of portfolios a generated response must contain.
pub const PORTFOLIOS_PER_RESPONSE: usize = 2;
/// Minimum number of assets in each generated portfolio.
pub const MIN_ASSETS: usize = 3;

/// Returns the JSON body of a response, unwrapping a fenced code block if present.
fn extract_json(text: &str) -> &str {
    let text = text.trim();
    let inner = if let Some((_, rest)) = text.split_once("```json") {
        rest
    } else if let Some((_, rest)) = text.split_once("```") {
        rest
    } else {
        return text;
    };
    inner.split("```").next().unwrap_or(inner).trim()
}

/// Parses and validates a generated two-portfolio response.
///
/// The response is a JSON object mapping portfolio names to allocations,
/// optionally wrapped in a Markdown code fence. Each allocation needs at
/// least [`MIN_ASSETS`] numeric weights and is normalized toward 100.
pub fn parse_generated(text: &str) -> Result<PortfolioSet, PortfolioError> {
    let value: Value = serde_json::from_str(extract_json(text))?;
    let object = value.as_object().ok_or(PortfolioError::NotAnObject)?;

    if object.len() != PORTFOLIOS_PER_RESPONSE {
        return Err(PortfolioError::WrongPortfolioCount(object.len()));
    }

    let mut portfolios = Vec::with_capacity(object.len());
    for (name, raw) in object {
        let entries = raw
            .as_object()
            .ok_or_else(|| PortfolioError::InvalidAllocation(name.clone()))?;

        if entries.len() < MIN_ASSETS {
            return Err(PortfolioError::TooFewAssets {
                name: name.clone(),
                count: entries.len(),
                min: MIN_ASSETS,
            });
        }

        let mut allocation = Allocation::new();
        for (asset, weight) in entries {
            let parsed = match weight {
                Value::Number(n) => {
                    let text = n.to_string();
                    Decimal::from_str(&text)
                        .or_else(|_| Decimal::from_scientific(&text))
                        .ok()
                }
                _ => None,
            };
            let weight = parsed.ok_or_else(|| PortfolioError::InvalidWeight {
                name: name.clone(),
                asset: asset.clone(),
            })?;
            allocation.insert(asset.clone(), weight);
        }

        normalize(&mut allocation)?;
        portfolios.push(NamedPortfolio {
            name: name.clone(),
            allocation,
        });
    }

    Ok(PortfolioSet { portfolios })
}

/// Uses the generated response when it is valid, the fallback pair otherwise.
pub fn generated_or_fallback(
    text: Option<&str>,
    risk: RiskTolerance,
    kind: PortfolioKind,
) -> PortfolioSet {
    match text.map(parse_generated) {
        Some(Ok(set)) => set,
        Some(Err(e)) => {
            tracing::warn!(error = %e, %risk, %kind, "Generated portfolios rejected, using fallback.");
            fallback_portfolios(risk, kind)
        }
        None => {
            tracing::info!(%risk, %kind, "No generated portfolios, using fallback.");
            fallback_portfolios(risk, kind)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    const VALID: &str = r#"{
        "Portfolio A — Yield": {"weETH Staking": 40, "Aave Integration": 30, "eUSD Stablecoins": 30},
        "Portfolio B — Safety": {"eUSD Stablecoins": 50, "ether.fi Cash": 30, "US Stocks": 20}
    }"#;

    #[test]
    fn parses_bare_json() {
        let set = parse_generated(VALID).unwrap();
        assert_eq!(set.portfolios.len(), 2);
        let a = set.get("Portfolio A — Yield").unwrap();
        assert_eq!(a.get("weETH Staking"), Some(dec!(40)));
    }

    #[test]
    fn unwraps_fenced_blocks() {
        let fenced = format!("Here you go:\n```json\n{VALID}\n```\nEnjoy.");
        assert_eq!(parse_generated(&fenced).unwrap(), parse_generated(VALID).unwrap());

        let bare_fence = format!("```\n{VALID}\n```");
        assert!(parse_generated(&bare_fence).is_ok());
    }

    #[test]
    fn normalizes_off_target_totals() {
        let text = r#"{
            "A": {"eETH": 20, "BTC/Alts": 20, "US Stocks": 10},
            "B": {"eETH": 30, "BTC/Alts": 30, "Cash/FD": 40}
        }"#;
        let set = parse_generated(text).unwrap();
        let a = set.get("A").unwrap();
        assert_eq!(a.get("eETH"), Some(dec!(40)));
        assert_eq!(a.get("US Stocks"), Some(dec!(20)));
    }

    #[test]
    fn rejects_structural_problems() {
        assert!(matches!(parse_generated("not json"), Err(PortfolioError::Json(_))));
        assert!(matches!(parse_generated("[1, 2]"), Err(PortfolioError::NotAnObject)));
        assert!(matches!(
            parse_generated(r#"{"A": {"x": 50, "y": 30, "z": 20}}"#),
            Err(PortfolioError::WrongPortfolioCount(1))
        ));
        assert!(matches!(
            parse_generated(r#"{"A": {"x": 50, "y": 50}, "B": {"x": 40, "y": 30, "z": 30}}"#),
            Err(PortfolioError::TooFewAssets { count: 2, .. })
        ));
        assert!(matches!(
            parse_generated(r#"{"A": 5, "B": {"x": 40, "y": 30, "z": 30}}"#),
            Err(PortfolioError::InvalidAllocation(_))
        ));
        assert!(matches!(
            parse_generated(r#"{"A": {"x": "lots", "y": 30, "z": 30}, "B": {"x": 40, "y": 30, "z": 30}}"#),
            Err(PortfolioError::InvalidWeight { .. })
        ));
    }

    #[test]
    fn keeps_the_generator_order() {
        let text = r#"{
            "Zeta": {"eETH": 40, "BTC/Alts": 30, "Cash/FD": 30},
            "Alpha": {"eETH": 30, "US Stocks": 30, "Cash/FD": 40}
        }"#;
        let set = parse_generated(text).unwrap();
        assert_eq!(set.names().collect::<Vec<_>>(), vec!["Zeta", "Alpha"]);
    }

    #[test]
    fn near_zero_weights_fall_back_instead_of_overflowing() {
        let text = r#"{
            "A": {"x": 0.0000000000000000000000000001, "y": 0, "z": 0},
            "B": {"x": 40, "y": 30, "z": 30}
        }"#;
        assert!(matches!(parse_generated(text), Err(PortfolioError::Overflow { .. })));
        assert_eq!(
            generated_or_fallback(Some(text), RiskTolerance::Low, PortfolioKind::Traditional),
            fallback_portfolios(RiskTolerance::Low, PortfolioKind::Traditional)
        );
    }

    #[test]
    fn falls_back_on_missing_or_invalid_text() {
        let fallback = fallback_portfolios(RiskTolerance::Low, PortfolioKind::Traditional);
        assert_eq!(
            generated_or_fallback(None, RiskTolerance::Low, PortfolioKind::Traditional),
            fallback
        );
        assert_eq!(
            generated_or_fallback(Some("garbage"), RiskTolerance::Low, PortfolioKind::Traditional),
            fallback
        );
        let generated = generated_or_fallback(Some(VALID), RiskTolerance::Low, PortfolioKind::Traditional);
        assert_ne!(generated, fallback);
    }
}
