//! # Advisor Analytics Engine
//!
//! Turns a portfolio allocation and a market snapshot into the indicators a
//! reviewer looks at: expected annual return, risk, diversification and the
//! crypto/stable exposure split.
//!
//! ## Architectural Principles
//!
//! - **Layer 1 Logic:** This is a pure logic crate. It has no knowledge of external systems.
//!   It depends only on `core-types` (Layer 0).
//! - **Stateless Calculation:** The `MetricsEngine` takes fully materialized inputs and
//!   produces a `PortfolioMetrics` value. It never fails; "not computable yet" is `None`.
//!
//! ## Public API
//!
//! - `MetricsEngine` / `compute_metrics`: the calculation entry points.
//! - `PortfolioMetrics`: the rounded output.
//! - `profiles`: the asset classification table.
//! - `projected_growth`: indexed growth checkpoints for charting.

// Declare the modules that constitute this crate.
pub mod engine;
pub mod growth;
pub mod profiles;
pub mod report;

// Re-export the key components to create a clean, public-facing API.
pub use engine::{MetricsEngine, compute_metrics, diversification_score};
pub use growth::{GrowthPoint, projected_growth};
pub use profiles::{AssetProfile, ReturnModel};
pub use report::PortfolioMetrics;
