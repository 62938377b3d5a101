use super::shape::{is_distinct, parse_index, parse_index_list};
use super::{total_balance, Privacy, TallyMethod, VotingType};
use crate::model::{Proposal, Strategy, Vote};
use serde_json::Value;

/// Voters approve any number of choices; each approved choice receives the
/// voter's full balance.
///
/// Under shutter privacy a vote may also carry a sealed (encrypted) choice as
/// a non-empty string. Such votes are valid and count towards the total, but
/// their choices cannot be scored until revealed.
#[derive(Debug, Clone, Copy, Default)]
pub struct Approval {
    shutter: bool,
}

impl Approval {
    pub fn new(privacy: Privacy) -> Self {
        Self {
            shutter: privacy == Privacy::Shutter,
        }
    }

    /// Approved indices of a well-formed, unsealed choice.
    fn approved(&self, choice: &Value, num_choices: usize) -> Option<Vec<usize>> {
        parse_index_list(choice, num_choices)
            .filter(|indices| !indices.is_empty() && is_distinct(indices))
    }

    fn is_sealed(&self, choice: &Value) -> bool {
        self.shutter && choice.as_str().map_or(false, |sealed| !sealed.is_empty())
    }
}

impl TallyMethod for Approval {
    fn voting_type(&self) -> VotingType {
        VotingType::Approval
    }

    fn is_valid_choice(&self, choice: &Value, choices: &[String]) -> bool {
        self.is_sealed(choice) || self.approved(choice, choices.len()).is_some()
    }

    fn scores(&self, proposal: &Proposal, votes: &[Vote], _strategies: &[Strategy]) -> Vec<f64> {
        let mut scores = vec![0.0; proposal.num_choices()];
        for vote in votes {
            for index in self.approved(&vote.choice, proposal.num_choices()).unwrap_or_default() {
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
            for index in self.approved(&vote.choice, proposal.num_choices()).unwrap_or_default() {
                for (strategy, score) in scores[index - 1].iter_mut().enumerate() {
                    *score += vote.score(strategy);
                }
            }
        }
        scores
    }

    /// Counts valid votes only, sealed ones included.
    fn scores_total(&self, proposal: &Proposal, votes: &[Vote]) -> f64 {
        total_balance(self.valid_votes(proposal, votes))
    }

    /// Labels of the selected choices in proposal order.
    fn choice_string(&self, proposal: &Proposal, selection: &Value) -> String {
        let selected: Vec<usize> = selection
            .as_array()
            .map(|items| {
                items
                    .iter()
                    .filter_map(|item| parse_index(item, proposal.num_choices()))
                    .collect()
            })
            .unwrap_or_default();

        proposal
            .choices
            .iter()
            .enumerate()
            .filter(|(i, _)| selected.contains(&(i + 1)))
            .map(|(_, choice)| choice.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}
