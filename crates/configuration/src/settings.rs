use crate::error::ConfigError;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;
use std::path::PathBuf;

/// The root configuration structure for the entire application.
///
/// Every section is optional in `config.toml`; missing sections fall back to
/// the values the backend uses when its market feeds are unreachable.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub market: MarketDefaults,
    pub projection: ProjectionDefaults,
    pub logging: LoggingConfig,
    pub session: SessionConfig,
}

impl Config {
    /// Rejects values no computation could sensibly use.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.market.base_yield_pct < Decimal::ZERO {
            return Err(ConfigError::ValidationError(
                "market.base_yield_pct must not be negative".to_string(),
            ));
        }
        if self.market.reference_price < Decimal::ZERO {
            return Err(ConfigError::ValidationError(
                "market.reference_price must not be negative".to_string(),
            ));
        }
        if self.projection.holding_period_days == 0 {
            return Err(ConfigError::ValidationError(
                "projection.holding_period_days must be at least 1".to_string(),
            ));
        }
        if self.projection.holdings < Decimal::ZERO {
            return Err(ConfigError::ValidationError(
                "projection.holdings must not be negative".to_string(),
            ));
        }
        Ok(())
    }
}

/// Market values used when the caller does not pass any on the command line.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MarketDefaults {
    /// Base annual yield in percent (e.g. 4.5 for 4.5%).
    pub base_yield_pct: Decimal,
    /// Price of one unit of the held asset in the reference currency.
    pub reference_price: Decimal,
    /// Total value locked in billions; shown alongside metrics only.
    pub tvl_billions: Decimal,
}

impl Default for MarketDefaults {
    fn default() -> Self {
        Self {
            base_yield_pct: dec!(4.5),
            reference_price: dec!(3000),
            tvl_billions: dec!(2.70),
        }
    }
}

/// Defaults for profit projections.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ProjectionDefaults {
    /// Holding period in days.
    pub holding_period_days: u32,
    /// Units of the held asset.
    pub holdings: Decimal,
}

impl Default for ProjectionDefaults {
    fn default() -> Self {
        Self {
            holding_period_days: 30,
            holdings: dec!(5),
        }
    }
}

/// Output layout for log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Full,
    Compact,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter directive; `RUST_LOG` takes precedence when set.
    pub level: String,
    pub format: LogFormat,
    /// When set, logs are also written to a daily-rolling file in this directory.
    pub directory: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
            directory: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Where the current recommendation id and user hash are persisted.
    pub path: PathBuf,
    /// Where recommendations, votes and decisions are persisted.
    pub ledger_path: PathBuf,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(".advisor/session.json"),
            ledger_path: PathBuf::from(".advisor/ledger.json"),
        }
    }
}
