use super::proportional::{self, Pooling};
use super::{total_balance, TallyMethod, VotingType};
use crate::model::{Proposal, Strategy, Vote};
use serde_json::Value;

/// Each voter's balance is split across choices in proportion to their
/// declared weights, then the per-choice sums are rescaled to the total
/// balance of valid votes.
#[derive(Debug, Clone, Copy, Default)]
pub struct Weighted;

impl TallyMethod for Weighted {
    fn voting_type(&self) -> VotingType {
        VotingType::Weighted
    }

    fn is_valid_choice(&self, choice: &Value, choices: &[String]) -> bool {
        proportional::parse_choice(choice, choices.len()).is_some()
    }

    fn scores(&self, proposal: &Proposal, votes: &[Vote], _strategies: &[Strategy]) -> Vec<f64> {
        proportional::scores(Pooling::Linear, proposal, votes)
    }

    fn scores_by_strategy(
        &self,
        proposal: &Proposal,
        votes: &[Vote],
        strategies: &[Strategy],
    ) -> Vec<Vec<f64>> {
        proportional::scores_by_strategy(Pooling::Linear, proposal, votes, strategies.len())
    }

    /// Counts every vote, valid or not, unlike quadratic.
    fn scores_total(&self, _proposal: &Proposal, votes: &[Vote]) -> f64 {
        total_balance(votes)
    }

    fn choice_string(&self, proposal: &Proposal, selection: &Value) -> String {
        proportional::choice_string(proposal, selection)
    }
}
