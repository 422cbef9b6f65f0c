use core_types::ExposureClass;
use core_types::arithmetic::saturating_mul;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Every asset label the classification table knows about.
pub const KNOWN_ASSETS: [&str; 12] = [
    "weETH Staking",
    "Liquid Vaults",
    "Aave Integration",
    "Pendle Integration",
    "Gearbox Integration",
    "eBTC",
    "eUSD Stablecoins",
    "US Stocks",
    "ether.fi Cash",
    "eETH",
    "BTC/Alts",
    "Cash/FD",
];

/// How an asset earns its annual return.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReturnModel {
    /// Scales the market's base yield rate.
    YieldMultiple(Decimal),
    /// Ignores the base yield rate and earns a fixed annual percentage.
    Fixed(Decimal),
}

impl ReturnModel {
    /// Annual return in percent given the market's base yield rate.
    pub fn annual_return(&self, base_yield_pct: Decimal) -> Decimal {
        match *self {
            ReturnModel::YieldMultiple(multiplier) => saturating_mul(base_yield_pct, multiplier),
            ReturnModel::Fixed(pct) => pct,
        }
    }
}

/// The coefficients the metrics engine applies to one asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssetProfile {
    pub return_model: ReturnModel,
    /// Contribution to the 0-10 risk scale at 100% weight.
    pub risk_weight: Decimal,
    pub exposure: ExposureClass,
}

impl AssetProfile {
    const fn new(return_model: ReturnModel, risk_weight: Decimal, exposure: ExposureClass) -> Self {
        Self {
            return_model,
            risk_weight,
            exposure,
        }
    }
}

/// Profile applied to labels missing from the table.
pub const FALLBACK_PROFILE: AssetProfile =
    AssetProfile::new(ReturnModel::Fixed(dec!(8)), dec!(5), ExposureClass::Split);

/// Looks up `label`, returning `None` for labels the table does not know.
pub fn lookup(label: &str) -> Option<AssetProfile> {
    use ExposureClass::{Crypto, Stable};
    use ReturnModel::{Fixed, YieldMultiple};

    let profile = match label {
        "weETH Staking" => AssetProfile::new(YieldMultiple(dec!(1.2)), dec!(5), Crypto),
        "Liquid Vaults" => AssetProfile::new(YieldMultiple(dec!(1.8)), dec!(7), Crypto),
        "Aave Integration" => AssetProfile::new(YieldMultiple(dec!(1.4)), dec!(5), Crypto),
        "Pendle Integration" => AssetProfile::new(YieldMultiple(dec!(1.5)), dec!(6), Crypto),
        "Gearbox Integration" => AssetProfile::new(YieldMultiple(dec!(2.0)), dec!(8), Crypto),
        "eBTC" => AssetProfile::new(Fixed(dec!(12)), dec!(7), Crypto),
        "eUSD Stablecoins" => AssetProfile::new(YieldMultiple(dec!(0.8)), dec!(2), Stable),
        "US Stocks" => AssetProfile::new(Fixed(dec!(10)), dec!(4), Stable),
        "ether.fi Cash" => AssetProfile::new(Fixed(dec!(3)), dec!(1), Stable),
        "eETH" => AssetProfile::new(YieldMultiple(dec!(1)), dec!(6), Crypto),
        "BTC/Alts" => AssetProfile::new(Fixed(dec!(15)), dec!(8), Crypto),
        "Cash/FD" => AssetProfile::new(Fixed(dec!(4)), dec!(1), Stable),
        _ => return None,
    };
    Some(profile)
}

/// Looks up `label`, falling back to [`FALLBACK_PROFILE`].
pub fn profile_for(label: &str) -> AssetProfile {
    lookup(label).unwrap_or(FALLBACK_PROFILE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_known_asset_has_a_profile() {
        for asset in KNOWN_ASSETS {
            assert!(lookup(asset).is_some(), "{asset} missing from table");
        }
    }

    #[test]
    fn unknown_labels_take_the_fallback() {
        assert_eq!(lookup("Dogecoin"), None);
        assert_eq!(profile_for("Dogecoin"), FALLBACK_PROFILE);
        // Labels are matched exactly.
        assert_eq!(lookup("eeth"), None);
    }

    #[test]
    fn yield_multiples_scale_the_base_rate() {
        let vaults = profile_for("Liquid Vaults");
        assert_eq!(vaults.return_model.annual_return(dec!(4.5)), dec!(8.10));
        assert_eq!(vaults.exposure, ExposureClass::Crypto);
    }

    #[test]
    fn fixed_returns_ignore_the_base_rate() {
        let stocks = profile_for("US Stocks");
        assert_eq!(stocks.return_model.annual_return(dec!(4.5)), dec!(10));
        assert_eq!(stocks.return_model.annual_return(dec!(99)), dec!(10));
        assert_eq!(stocks.exposure, ExposureClass::Stable);
    }
}
