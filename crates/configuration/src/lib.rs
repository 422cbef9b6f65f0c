use crate::error::ConfigError;
use std::path::Path;

// Declare the modules that make up this crate.
pub mod error;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use settings::{
    Config, LogFormat, LoggingConfig, MarketDefaults, ProjectionDefaults, SessionConfig,
};

/// Prefix for environment overrides, e.g. `ADVISOR__MARKET__BASE_YIELD_PCT=5.1`.
pub const ENV_PREFIX: &str = "ADVISOR";

/// Loads the application configuration from a TOML file.
///
/// The file is optional: when it does not exist every section takes its
/// defaults. `ADVISOR__<SECTION>__<KEY>` environment variables are layered on
/// top, and the merged result is validated before it is returned.
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let builder = config::Config::builder()
        .add_source(config::File::from(path).required(false))
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    let config = builder.try_deserialize::<Config>()?;
    config.validate()?;

    tracing::debug!(path = %path.display(), ?config, "Configuration loaded.");
    Ok(config)
}

/// Parses configuration from an in-memory TOML document, without environment overrides.
pub fn load_config_from_str(toml: &str) -> Result<Config, ConfigError> {
    let config = config::Config::builder()
        .add_source(config::File::from_str(toml, config::FileFormat::Toml))
        .build()?
        .try_deserialize::<Config>()?;
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn empty_document_yields_defaults() {
        let config = load_config_from_str("").unwrap();
        assert_eq!(config.market.base_yield_pct, dec!(4.5));
        assert_eq!(config.market.reference_price, dec!(3000));
        assert_eq!(config.projection.holding_period_days, 30);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.format, LogFormat::Full);
        assert!(config.logging.directory.is_none());
        assert_eq!(config.session.ledger_path, Path::new(".advisor/ledger.json"));
    }

    #[test]
    fn partial_sections_keep_remaining_defaults() {
        let config = load_config_from_str(
            r#"
            [market]
            base_yield_pct = 5.25

            [logging]
            level = "debug"
            format = "compact"
            "#,
        )
        .unwrap();
        assert_eq!(config.market.base_yield_pct, dec!(5.25));
        assert_eq!(config.market.reference_price, dec!(3000));
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, LogFormat::Compact);
    }

    #[test]
    fn zero_holding_period_is_rejected() {
        let err = load_config_from_str("[projection]\nholding_period_days = 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn negative_price_is_rejected() {
        let err = load_config_from_str("[market]\nreference_price = -1.0\n").unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn missing_file_is_not_an_error() {
        let config = load_config(Path::new("definitely/not/here/config.toml")).unwrap();
        assert_eq!(config.projection.holding_period_days, 30);
    }
}
