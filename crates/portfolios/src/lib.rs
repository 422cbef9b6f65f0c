//! # Advisor Portfolio Library
//!
//! Where candidate allocations come from: a fixed fallback catalog keyed by
//! risk tolerance and portfolio kind, and a validator for portfolios produced
//! by an external generator.
//!
//! ## Public API
//!
//! - `fallback_portfolios`: the catalog lookup.
//! - `parse_generated` / `generated_or_fallback`: accept a generator response.
//! - `normalize`: pull an allocation's weights back toward 100.

pub mod catalog;
pub mod error;
pub mod normalize;
pub mod parser;

pub use catalog::fallback_portfolios;
pub use error::PortfolioError;
pub use normalize::normalize;
pub use parser::{generated_or_fallback, parse_generated};
