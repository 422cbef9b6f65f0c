use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Invalid input for {0}: {1}")]
    InvalidInput(String, String),

    #[error("Unknown risk tolerance '{0}' (expected low, medium or high)")]
    UnknownRiskTolerance(String),

    #[error("Unknown portfolio kind '{0}' (expected etherfi-native or traditional)")]
    UnknownPortfolioKind(String),
}
