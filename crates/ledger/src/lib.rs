//! # Advisor Ledger
//!
//! Keeps the reviewer side of a recommendation: who voted for which portfolio,
//! what the user finally chose, and the reviewer statistics derived from that.
//!
//! Everything lives in memory; `VoteBook` is serializable so callers decide
//! where (and whether) it is persisted.

pub mod book;
pub mod error;
pub mod stats;

pub use book::{Decision, Recommendation, ReviewerId, VoteBook, VoteRecord, Voter};
pub use error::LedgerError;
pub use stats::{EarningsDetail, EarningsSummary, HistoryEntry, ReviewerProfile};
