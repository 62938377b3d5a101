use super::proportional::{self, Pooling};
use super::{TallyMethod, VotingType};
use crate::model::{Proposal, Strategy, Vote};
use serde_json::Value;

/// Quadratic-funding style pooling of weighted votes.
///
/// Each voter's balance is split across choices in proportion to their
/// declared weights. Per choice, the square roots of those pieces are summed
/// and the sum squared, so broad support outweighs the same power
/// concentrated in few voters. The squared scores are then rescaled to add up
/// to the total balance of valid votes.
#[derive(Debug, Clone, Copy, Default)]
pub struct Quadratic;

impl TallyMethod for Quadratic {
    fn voting_type(&self) -> VotingType {
        VotingType::Quadratic
    }

    fn is_valid_choice(&self, choice: &Value, choices: &[String]) -> bool {
        proportional::parse_choice(choice, choices.len()).is_some()
    }

    fn scores(&self, proposal: &Proposal, votes: &[Vote], _strategies: &[Strategy]) -> Vec<f64> {
        proportional::scores(Pooling::Quadratic, proposal, votes)
    }

    fn scores_by_strategy(
        &self,
        proposal: &Proposal,
        votes: &[Vote],
        strategies: &[Strategy],
    ) -> Vec<Vec<f64>> {
        proportional::scores_by_strategy(Pooling::Quadratic, proposal, votes, strategies.len())
    }

    /// Counts valid votes only.
    fn scores_total(&self, proposal: &Proposal, votes: &[Vote]) -> f64 {
        proportional::valid_total(proposal, votes)
    }

    fn choice_string(&self, proposal: &Proposal, selection: &Value) -> String {
        proportional::choice_string(proposal, selection)
    }
}
