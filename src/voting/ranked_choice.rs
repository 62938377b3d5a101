use super::shape::{is_distinct, parse_index, parse_index_list};
use super::{total_balance, TallyMethod, VotingType};
use crate::model::{Proposal, Strategy, Vote};
use crate::util::ordinal;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::cmp::Ordering;
use tracing::debug;

/// Instant-runoff voting over complete rankings.
#[derive(Debug, Clone, Copy, Default)]
pub struct RankedChoice;

/// Power held by one candidate in a round.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundTally {
    pub choice: usize,
    pub balance: f64,
    /// Per-strategy power. Empty when no ballot currently ranks this
    /// candidate first.
    pub scores: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Round {
    pub round: usize,
    /// Candidates still in the race, highest balance first.
    pub tallies: Vec<RoundTally>,
    /// Candidate dropped after this round, if the count went on.
    pub eliminated: Option<usize>,
}

struct Ballot<'a> {
    ranking: Vec<usize>,
    balance: f64,
    scores: &'a [f64],
}

impl RankedChoice {
    fn ranking(&self, choice: &Value, num_choices: usize) -> Option<Vec<usize>> {
        parse_index_list(choice, num_choices)
            .filter(|ranking| {
                !ranking.is_empty() && ranking.len() == num_choices && is_distinct(ranking)
            })
    }

    fn ballots<'a>(&self, proposal: &Proposal, votes: &'a [Vote]) -> Vec<Ballot<'a>> {
        votes
            .iter()
            .filter_map(|vote| {
                self.ranking(&vote.choice, proposal.num_choices())
                    .map(|ranking| Ballot {
                        ranking,
                        balance: vote.balance,
                        scores: &vote.scores,
                    })
            })
            .collect()
    }

    /// Runs the count and returns every round, the last one being final.
    pub fn rounds(&self, proposal: &Proposal, votes: &[Vote]) -> Vec<Round> {
        let mut ballots = self.ballots(proposal, votes);
        let mut rounds = Vec::new();

        loop {
            let (mut round, bottom) = tally_round(&ballots, rounds.len() + 1);
            let total_power: f64 = ballots.iter().map(|ballot| ballot.balance).sum();
            let top_count = round
                .tallies
                .first()
                .map_or(f64::NEG_INFINITY, |tally| tally.balance);

            let finished = top_count > total_power / 2.0 || round.tallies.len() < 3;
            debug!(
                round = round.round,
                candidates = round.tallies.len(),
                top = top_count,
                total = total_power,
                finished,
                "instant-runoff round"
            );

            // Stop on a majority or once fewer than three candidates remain
            if finished {
                rounds.push(round);
                return rounds;
            }

            round.eliminated = bottom;
            rounds.push(round);

            // Eliminate the bottom candidate and drop ballots with no preferences left
            if let Some(bottom) = bottom {
                for ballot in ballots.iter_mut() {
                    ballot.ranking.retain(|choice| *choice != bottom);
                }
                ballots.retain(|ballot| !ballot.ranking.is_empty());
            }
        }
    }

    fn final_round(&self, proposal: &Proposal, votes: &[Vote]) -> Vec<RoundTally> {
        self.rounds(proposal, votes)
            .pop()
            .map(|round| round.tallies)
            .unwrap_or_default()
    }
}

/// Tallies the first remaining preference of every ballot. Candidates are
/// enumerated in the order they are first seen across the ballots; the
/// returned tallies are sorted by balance (stable, so ties keep that order)
/// and the bottom candidate is the first one holding the minimum.
fn tally_round(ballots: &[Ballot<'_>], number: usize) -> (Round, Option<usize>) {
    let candidates: Vec<usize> = ballots
        .iter()
        .flat_map(|ballot| ballot.ranking.iter().copied())
        .unique()
        .collect();

    let mut tallies: Vec<RoundTally> = candidates
        .iter()
        .map(|choice| RoundTally {
            choice: *choice,
            balance: 0.0,
            scores: Vec::new(),
        })
        .collect();

    for ballot in ballots {
        let active = ballot.ranking[0];
        if let Some(tally) = tallies.iter_mut().find(|tally| tally.choice == active) {
            tally.balance += ballot.balance;
            if tally.scores.len() < ballot.scores.len() {
                tally.scores.resize(ballot.scores.len(), 0.0);
            }
            for (total, score) in tally.scores.iter_mut().zip(ballot.scores) {
                *total += score;
            }
        }
    }

    let bottom = tallies
        .iter()
        .fold(None, |bottom: Option<&RoundTally>, tally| match bottom {
            Some(current) if tally.balance >= current.balance => Some(current),
            _ => Some(tally),
        })
        .map(|tally| tally.choice);

    tallies.sort_by(|a, b| b.balance.partial_cmp(&a.balance).unwrap_or(Ordering::Equal));

    (
        Round {
            round: number,
            tallies,
            eliminated: None,
        },
        bottom,
    )
}

impl TallyMethod for RankedChoice {
    fn voting_type(&self) -> VotingType {
        VotingType::RankedChoice
    }

    fn is_valid_choice(&self, choice: &Value, choices: &[String]) -> bool {
        self.ranking(choice, choices.len()).is_some()
    }

    /// Power credited to each choice in the final round; choices eliminated
    /// earlier score zero.
    fn scores(&self, proposal: &Proposal, votes: &[Vote], _strategies: &[Strategy]) -> Vec<f64> {
        let final_round = self.final_round(proposal, votes);
        (1..=proposal.num_choices())
            .map(|index| {
                final_round
                    .iter()
                    .filter(|tally| tally.choice == index)
                    .map(|tally| tally.balance)
                    .sum()
            })
            .collect()
    }

    fn scores_by_strategy(
        &self,
        proposal: &Proposal,
        votes: &[Vote],
        strategies: &[Strategy],
    ) -> Vec<Vec<f64>> {
        let final_round = self.final_round(proposal, votes);
        (1..=proposal.num_choices())
            .map(|index| {
                (0..strategies.len())
                    .map(|strategy| {
                        final_round
                            .iter()
                            .filter(|tally| tally.choice == index)
                            .map(|tally| tally.scores.get(strategy).copied().unwrap_or(0.0))
                            .sum()
                    })
                    .collect()
            })
            .collect()
    }

    /// Counts every vote, valid or not.
    fn scores_total(&self, _proposal: &Proposal, votes: &[Vote]) -> f64 {
        total_balance(votes)
    }

    /// `"(1st) A, (2nd) C"`. Positions follow the selection; entries that do
    /// not name a choice are skipped but still take up their position.
    fn choice_string(&self, proposal: &Proposal, selection: &Value) -> String {
        let items = match selection.as_array() {
            Some(items) => items,
            None => return String::new(),
        };

        items
            .iter()
            .enumerate()
            .filter_map(|(position, item)| {
                parse_index(item, proposal.num_choices())
                    .and_then(|index| proposal.choice(index))
                    .map(|choice| format!("({}) {}", ordinal(position + 1), choice))
            })
            .join(", ")
    }
}
