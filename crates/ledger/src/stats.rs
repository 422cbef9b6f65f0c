use crate::book::{ReviewerId, VoteBook};
use chrono::{DateTime, Utc};
use core_types::arithmetic::{saturating_add, saturating_sum};
use core_types::rounding::{round_dp, round_money};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use uuid::Uuid;

/// How many vote-history entries a profile carries.
pub const HISTORY_LIMIT: usize = 10;

/// Earnings from one recommendation the reviewer voted on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EarningsDetail {
    pub rec_id: Uuid,
    pub earnings: Decimal,
    pub portfolio_chosen: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EarningsSummary {
    pub total_earnings: Decimal,
    pub recommendations_count: usize,
    pub details: Vec<EarningsDetail>,
}

/// One line of a reviewer's public vote history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryEntry {
    pub rec_id: Uuid,
    pub recommended: String,
    pub user_chose: Option<String>,
    pub was_followed: bool,
    pub earnings: Decimal,
    pub decided_at: Option<DateTime<Utc>>,
}

/// Public track record of a reviewer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReviewerProfile {
    pub reviewer_id: ReviewerId,
    pub total_votes: usize,
    pub total_earnings: Decimal,
    pub successful_recommendations: usize,
    /// Percentage of votes the user followed, 2 decimals.
    pub success_rate: Decimal,
    /// How often the reviewer backed each portfolio.
    pub portfolio_recommendations: BTreeMap<String, u32>,
    /// Most recent first, at most [`HISTORY_LIMIT`] entries.
    pub vote_history: Vec<HistoryEntry>,
}

impl VoteBook {
    /// Sums what a reviewer earned from decided recommendations they voted on.
    ///
    /// Only decisions that paid the reviewer a non-zero share are listed.
    pub fn reviewer_earnings(&self, reviewer: ReviewerId) -> EarningsSummary {
        let details: Vec<EarningsDetail> = self
            .iter()
            .filter(|(_, rec)| rec.vote_of(reviewer).is_some())
            .filter_map(|(rec_id, rec)| {
                let decision = rec.decision.as_ref()?;
                let earnings = decision.reward_split.reviewer;
                (!earnings.is_zero()).then(|| EarningsDetail {
                    rec_id,
                    earnings,
                    portfolio_chosen: decision.portfolio_chosen.clone(),
                })
            })
            .collect();

        EarningsSummary {
            total_earnings: round_money(saturating_sum(details.iter().map(|d| d.earnings))),
            recommendations_count: details.len(),
            details,
        }
    }

    /// Builds the public profile of a reviewer from their votes.
    ///
    /// A vote is successful when the user later chose the portfolio the
    /// reviewer backed. Reviewers without votes get an all-zero profile.
    pub fn reviewer_profile(&self, reviewer: ReviewerId) -> ReviewerProfile {
        let mut total_votes = 0;
        let mut total_earnings = Decimal::ZERO;
        let mut successful = 0;
        let mut portfolio_recommendations = BTreeMap::new();
        let mut history = Vec::new();

        for (rec_id, rec) in self.iter() {
            let Some(vote) = rec.vote_of(reviewer) else {
                continue;
            };
            total_votes += 1;
            *portfolio_recommendations.entry(vote.choice.clone()).or_insert(0) += 1;

            let entry = match &rec.decision {
                Some(decision) => {
                    let earnings = decision.reward_split.reviewer;
                    let followed = decision.portfolio_chosen == vote.choice;
                    total_earnings = saturating_add(total_earnings, earnings);
                    if followed {
                        successful += 1;
                    }
                    HistoryEntry {
                        rec_id,
                        recommended: vote.choice.clone(),
                        user_chose: Some(decision.portfolio_chosen.clone()),
                        was_followed: followed,
                        earnings,
                        decided_at: Some(decision.decided_at),
                    }
                }
                None => HistoryEntry {
                    rec_id,
                    recommended: vote.choice.clone(),
                    user_chose: None,
                    was_followed: false,
                    earnings: Decimal::ZERO,
                    decided_at: None,
                },
            };
            history.push(entry);
        }

        // Newest decisions first; undecided entries sink to the bottom.
        history.sort_by(|a, b| match (a.decided_at, b.decided_at) {
            (Some(x), Some(y)) => y.cmp(&x),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        });
        history.truncate(HISTORY_LIMIT);

        let success_rate = if total_votes > 0 {
            round_dp(Decimal::from(successful) / Decimal::from(total_votes) * dec!(100), 2)
        } else {
            Decimal::ZERO
        };

        ReviewerProfile {
            reviewer_id: reviewer,
            total_votes,
            total_earnings: round_money(total_earnings),
            successful_recommendations: successful,
            success_rate,
            portfolio_recommendations,
            vote_history: history,
        }
    }
}
