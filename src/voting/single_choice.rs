use super::shape::parse_index;
use super::{total_balance, TallyMethod, VotingType};
use crate::model::{Proposal, Strategy, Vote};
use serde_json::Value;

/// One choice per voter; each valid vote credits its full balance to the
/// chosen option.
#[derive(Debug, Clone, Copy, Default)]
pub struct SingleChoice;

impl SingleChoice {
    fn chosen(&self, proposal: &Proposal, vote: &Vote) -> Option<usize> {
        parse_index(&vote.choice, proposal.num_choices())
    }
}

impl TallyMethod for SingleChoice {
    fn voting_type(&self) -> VotingType {
        VotingType::SingleChoice
    }

    fn is_valid_choice(&self, choice: &Value, choices: &[String]) -> bool {
        parse_index(choice, choices.len()).is_some()
    }

    fn scores(&self, proposal: &Proposal, votes: &[Vote], _strategies: &[Strategy]) -> Vec<f64> {
        let mut scores = vec![0.0; proposal.num_choices()];
        for vote in votes {
            if let Some(index) = self.chosen(proposal, vote) {
                scores[index - 1] += vote.balance;
            }
        }
        scores
    }

    fn scores_by_strategy(
        &self,
        proposal: &Proposal,
        votes: &[Vote],
        strategies: &[Strategy],
    ) -> Vec<Vec<f64>> {
        let mut scores = vec![vec![0.0; strategies.len()]; proposal.num_choices()];
        for vote in votes {
            if let Some(index) = self.chosen(proposal, vote) {
                for (strategy, score) in scores[index - 1].iter_mut().enumerate() {
                    *score += vote.score(strategy);
                }
            }
        }
        scores
    }

    /// Counts every vote, valid or not.
    fn scores_total(&self, _proposal: &Proposal, votes: &[Vote]) -> f64 {
        total_balance(votes)
    }

    fn choice_string(&self, proposal: &Proposal, selection: &Value) -> String {
        parse_index(selection, proposal.num_choices())
            .and_then(|index| proposal.choice(index))
            .unwrap_or_default()
            .to_string()
    }
}
