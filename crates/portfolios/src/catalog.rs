use core_types::{Allocation, NamedPortfolio, PortfolioKind, PortfolioSet, RiskTolerance};
use rust_decimal::Decimal;

fn allocation(entries: &[(&str, i64)]) -> Allocation {
    entries
        .iter()
        .map(|&(asset, weight)| (asset, Decimal::from(weight)))
        .collect()
}

fn pair(first: (&str, Allocation), second: (&str, Allocation)) -> PortfolioSet {
    PortfolioSet {
        portfolios: vec![
            NamedPortfolio {
                name: first.0.to_string(),
                allocation: first.1,
            },
            NamedPortfolio {
                name: second.0.to_string(),
                allocation: second.1,
            },
        ],
    }
}

/// Returns the pair of portfolios offered when generation is unavailable.
///
/// The catalog is exhaustive over `RiskTolerance` x `PortfolioKind`, so adding
/// a variant to either enum fails to compile until it is handled here.
pub fn fallback_portfolios(risk: RiskTolerance, kind: PortfolioKind) -> PortfolioSet {
    match kind {
        PortfolioKind::Traditional => {
            let (crypto_tilt, balanced) = match risk {
                RiskTolerance::Low => (
                    [("eETH", 20), ("BTC/Alts", 10), ("US Stocks", 40), ("Cash/FD", 30)],
                    [("eETH", 15), ("BTC/Alts", 5), ("US Stocks", 45), ("Cash/FD", 35)],
                ),
                RiskTolerance::Medium => (
                    [("eETH", 30), ("BTC/Alts", 20), ("US Stocks", 30), ("Cash/FD", 20)],
                    [("eETH", 25), ("BTC/Alts", 15), ("US Stocks", 35), ("Cash/FD", 25)],
                ),
                RiskTolerance::High => (
                    [("eETH", 40), ("BTC/Alts", 30), ("US Stocks", 20), ("Cash/FD", 10)],
                    [("eETH", 35), ("BTC/Alts", 25), ("US Stocks", 30), ("Cash/FD", 10)],
                ),
            };
            pair(
                ("Portfolio A — Crypto Tilt", allocation(&crypto_tilt)),
                ("Portfolio B — Balanced Traditional", allocation(&balanced)),
            )
        }
        PortfolioKind::EtherfiNative => {
            let (native, balanced) = match risk {
                RiskTolerance::Low => (
                    allocation(&[
                        ("weETH Staking", 35),
                        ("Liquid Vaults", 10),
                        ("Aave Integration", 20),
                        ("Pendle Integration", 0),
                        ("Gearbox Integration", 0),
                        ("eBTC", 5),
                        ("eUSD Stablecoins", 30),
                    ]),
                    allocation(&[
                        ("weETH Staking", 25),
                        ("Liquid Vaults", 5),
                        ("Aave Integration", 15),
                        ("eUSD Stablecoins", 35),
                        ("US Stocks", 15),
                        ("ether.fi Cash", 5),
                    ]),
                ),
                RiskTolerance::Medium => (
                    allocation(&[
                        ("weETH Staking", 30),
                        ("Liquid Vaults", 20),
                        ("Aave Integration", 15),
                        ("Pendle Integration", 10),
                        ("Gearbox Integration", 5),
                        ("eBTC", 10),
                        ("eUSD Stablecoins", 10),
                    ]),
                    allocation(&[
                        ("weETH Staking", 25),
                        ("Liquid Vaults", 15),
                        ("Aave Integration", 20),
                        ("eUSD Stablecoins", 20),
                        ("US Stocks", 15),
                        ("ether.fi Cash", 5),
                    ]),
                ),
                RiskTolerance::High => (
                    allocation(&[
                        ("weETH Staking", 25),
                        ("Liquid Vaults", 30),
                        ("Aave Integration", 15),
                        ("Pendle Integration", 10),
                        ("Gearbox Integration", 10),
                        ("eBTC", 10),
                        ("eUSD Stablecoins", 0),
                    ]),
                    allocation(&[
                        ("weETH Staking", 30),
                        ("Liquid Vaults", 25),
                        ("Aave Integration", 15),
                        ("eUSD Stablecoins", 10),
                        ("US Stocks", 15),
                        ("ether.fi Cash", 5),
                    ]),
                ),
            };
            pair(
                ("Portfolio A — ether.fi Native", native),
                ("Portfolio B — Balanced Yield", balanced),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RISKS: [RiskTolerance; 3] = [RiskTolerance::Low, RiskTolerance::Medium, RiskTolerance::High];
    const KINDS: [PortfolioKind; 2] = [PortfolioKind::EtherfiNative, PortfolioKind::Traditional];

    #[test]
    fn every_fallback_pair_is_balanced() {
        for risk in RISKS {
            for kind in KINDS {
                let set = fallback_portfolios(risk, kind);
                assert_eq!(set.portfolios.len(), 2);
                for p in &set.portfolios {
                    assert!(p.allocation.is_balanced(), "{} ({risk}, {kind})", p.name);
                }
            }
        }
    }

    #[test]
    fn low_risk_native_keeps_unfunded_protocols_listed() {
        let set = fallback_portfolios(RiskTolerance::Low, PortfolioKind::EtherfiNative);
        let native = set.get("Portfolio A — ether.fi Native").unwrap();
        assert_eq!(native.get("Pendle Integration"), Some(Decimal::ZERO));
        assert_eq!(native.len(), 7);
        assert_eq!(native.active_asset_count(), 5);
    }

    #[test]
    fn traditional_names_follow_the_kind() {
        let set = fallback_portfolios(RiskTolerance::High, PortfolioKind::Traditional);
        let names: Vec<&str> = set.names().collect();
        assert_eq!(
            names,
            vec!["Portfolio A — Crypto Tilt", "Portfolio B — Balanced Traditional"]
        );
        assert_eq!(set.get(names[0]).unwrap().get("BTC/Alts"), Some(Decimal::from(30)));
    }
}
