//! # Advisor Core Types
//!
//! Layer 0 of the workspace. Every other crate speaks in these types: the
//! `Allocation` a portfolio generator hands out, the `MarketSnapshot` a caller
//! fetched elsewhere, and the small enums describing risk appetite and asset
//! classification.

pub mod arithmetic;
pub mod enums;
pub mod error;
pub mod rounding;
pub mod structs;

// Re-export the core types to provide a clean public API.
pub use enums::{ExposureClass, PortfolioKind, RiskTolerance};
pub use error::CoreError;
pub use structs::{Allocation, MarketSnapshot, NamedPortfolio, PortfolioSet};
