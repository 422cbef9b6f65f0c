//! # Advisor Projection Engine
//!
//! Projects the profit of holding a principal at an expected annual return and
//! splits it between the principal holder, the reviewer and the platform.
//!
//! Growth is simple interest pro-rated by `days / 365`; nothing compounds.

pub mod engine;
pub mod split;

pub use engine::{
    DAYS_PER_YEAR, ProfitProjection, ProjectionEngine, compute_projection, initial_investment,
};
pub use split::{PLATFORM_RATIO, REVIEWER_RATIO, RewardSplit, USER_RATIO};
