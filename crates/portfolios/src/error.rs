use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PortfolioError {
    #[error("Generated portfolios are not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Expected a JSON object of portfolio name -> allocation")]
    NotAnObject,

    #[error("Expected exactly 2 portfolios, found {0}")]
    WrongPortfolioCount(usize),

    #[error("Portfolio '{0}' is not an object of asset -> weight")]
    InvalidAllocation(String),

    #[error("Portfolio '{name}' has {count} assets; at least {min} are required")]
    TooFewAssets { name: String, count: usize, min: usize },

    #[error("Portfolio '{name}' has a non-numeric weight for '{asset}'")]
    InvalidWeight { name: String, asset: String },

    #[error("Allocation weights sum to zero and cannot be normalized")]
    ZeroTotal,

    #[error("Allocation weights sum to {total}; rescaling them to 100 overflows")]
    Overflow { total: Decimal },
}
