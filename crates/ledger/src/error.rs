use thiserror::Error;

#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("Recommendation not found: {0}")]
    RecommendationNotFound(uuid::Uuid),

    #[error("Recommendation already exists: {0}")]
    DuplicateRecommendation(uuid::Uuid),

    #[error("Vote choice must not be empty")]
    EmptyChoice,
}
