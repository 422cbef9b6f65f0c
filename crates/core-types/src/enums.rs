use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which exposure bucket an asset's weight is credited to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExposureClass {
    /// Volatile, crypto-like assets.
    Crypto,
    /// Stable or low-volatility assets.
    Stable,
    /// Weight is credited half to each bucket. Used for unrecognised labels.
    Split,
}

/// The risk appetite a user declares when asking for portfolios.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskTolerance {
    Low,
    #[default]
    Medium,
    High,
}

impl FromStr for RiskTolerance {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(RiskTolerance::Low),
            "medium" => Ok(RiskTolerance::Medium),
            "high" => Ok(RiskTolerance::High),
            other => Err(CoreError::UnknownRiskTolerance(other.to_string())),
        }
    }
}

impl fmt::Display for RiskTolerance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RiskTolerance::Low => "low",
            RiskTolerance::Medium => "medium",
            RiskTolerance::High => "high",
        };
        f.write_str(s)
    }
}

/// The family of assets a portfolio is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PortfolioKind {
    /// Protocol-native positions (staking, vaults, lending integrations).
    #[default]
    EtherfiNative,
    /// Broad asset classes (ETH, BTC/alts, stocks, cash).
    Traditional,
}

impl FromStr for PortfolioKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "etherfi-native" | "native" => Ok(PortfolioKind::EtherfiNative),
            "traditional" => Ok(PortfolioKind::Traditional),
            other => Err(CoreError::UnknownPortfolioKind(other.to_string())),
        }
    }
}

impl fmt::Display for PortfolioKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PortfolioKind::EtherfiNative => "etherfi-native",
            PortfolioKind::Traditional => "traditional",
        };
        f.write_str(s)
    }
}
