use crate::error::LedgerError;
use chrono::{DateTime, Utc};
use core_types::PortfolioSet;
use projection::{ProfitProjection, RewardSplit};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// Identifier of a registered reviewer.
pub type ReviewerId = i64;

/// Who cast a vote. Anonymous votes still count toward the tally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Voter {
    pub id: Option<ReviewerId>,
    pub name: String,
}

impl Voter {
    pub fn reviewer(id: ReviewerId, name: impl Into<String>) -> Self {
        Self {
            id: Some(id),
            name: name.into(),
        }
    }

    pub fn anonymous() -> Self {
        Self {
            id: None,
            name: "Anonymous".to_string(),
        }
    }
}

/// A single voter's latest choice on a recommendation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteRecord {
    pub voter: Voter,
    pub choice: String,
}

/// The user's final choice and the split of its projected profit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decision {
    pub portfolio_chosen: String,
    pub decided_at: DateTime<Utc>,
    pub period_days: u32,
    pub reward_split: RewardSplit,
}

impl Decision {
    pub fn from_projection(
        portfolio_chosen: impl Into<String>,
        projection: &ProfitProjection,
        decided_at: DateTime<Utc>,
    ) -> Self {
        Self {
            portfolio_chosen: portfolio_chosen.into(),
            decided_at,
            period_days: projection.period_days,
            reward_split: projection.split,
        }
    }
}

/// Everything recorded against one recommendation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    /// The candidate pair offered to reviewers. Empty when opened without one.
    #[serde(default)]
    pub portfolios: PortfolioSet,
    /// Aggregate vote count per portfolio name.
    pub tally: BTreeMap<String, u32>,
    /// Latest vote per voter, in the order voters first appeared.
    pub votes: Vec<VoteRecord>,
    pub decision: Option<Decision>,
}

impl Recommendation {
    /// The vote recorded for `reviewer`, if any.
    pub fn vote_of(&self, reviewer: ReviewerId) -> Option<&VoteRecord> {
        self.votes.iter().find(|v| v.voter.id == Some(reviewer))
    }

    /// The choice with the most votes. Ties go to the alphabetically first name.
    pub fn leading_choice(&self) -> Option<(&str, u32)> {
        self.tally
            .iter()
            .fold(None, |best: Option<(&str, u32)>, (choice, &count)| match best {
                Some((_, top)) if top >= count => best,
                _ => Some((choice.as_str(), count)),
            })
    }
}

/// In-memory record of votes and decisions, keyed by recommendation id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteBook {
    recommendations: BTreeMap<Uuid, Recommendation>,
}

impl VoteBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens a recommendation under a fresh id.
    pub fn open(&mut self) -> Uuid {
        let id = Uuid::new_v4();
        self.recommendations.insert(id, Recommendation::default());
        id
    }

    /// Opens a recommendation offering `portfolios` under a fresh id.
    pub fn open_offering(&mut self, portfolios: PortfolioSet) -> Uuid {
        let id = Uuid::new_v4();
        self.recommendations.insert(
            id,
            Recommendation {
                portfolios,
                ..Recommendation::default()
            },
        );
        tracing::info!(rec_id = %id, "Recommendation opened.");
        id
    }

    /// Opens a recommendation under a caller-chosen id.
    pub fn open_with_id(&mut self, id: Uuid) -> Result<(), LedgerError> {
        if self.recommendations.contains_key(&id) {
            return Err(LedgerError::DuplicateRecommendation(id));
        }
        self.recommendations.insert(id, Recommendation::default());
        Ok(())
    }

    pub fn get(&self, id: Uuid) -> Result<&Recommendation, LedgerError> {
        self.recommendations
            .get(&id)
            .ok_or(LedgerError::RecommendationNotFound(id))
    }

    pub fn iter(&self) -> impl Iterator<Item = (Uuid, &Recommendation)> {
        self.recommendations.iter().map(|(id, rec)| (*id, rec))
    }

    /// Records a vote and returns the updated tally.
    ///
    /// Every call increments the aggregate count. A voter who votes again
    /// replaces their individual record, so the tally can exceed the number of
    /// distinct voters.
    pub fn record_vote(
        &mut self,
        id: Uuid,
        voter: Voter,
        choice: &str,
    ) -> Result<&BTreeMap<String, u32>, LedgerError> {
        let choice = choice.trim();
        if choice.is_empty() {
            return Err(LedgerError::EmptyChoice);
        }
        let rec = self
            .recommendations
            .get_mut(&id)
            .ok_or(LedgerError::RecommendationNotFound(id))?;

        *rec.tally.entry(choice.to_string()).or_insert(0) += 1;

        let voter_id = voter.id;
        let record = VoteRecord {
            voter,
            choice: choice.to_string(),
        };
        match rec.votes.iter_mut().find(|v| v.voter.id == voter_id) {
            Some(existing) => *existing = record,
            None => rec.votes.push(record),
        }

        tracing::debug!(rec_id = %id, choice, "Vote recorded.");
        Ok(&rec.tally)
    }

    /// Stores the user's decision, replacing any earlier one.
    pub fn record_decision(&mut self, id: Uuid, decision: Decision) -> Result<(), LedgerError> {
        let rec = self
            .recommendations
            .get_mut(&id)
            .ok_or(LedgerError::RecommendationNotFound(id))?;
        tracing::info!(
            rec_id = %id,
            portfolio = %decision.portfolio_chosen,
            profit = %decision.reward_split.total,
            "Decision recorded."
        );
        rec.decision = Some(decision);
        Ok(())
    }
}
