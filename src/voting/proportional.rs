//! Shared machinery for the weight-map methods (quadratic and weighted).
//!
//! Both split each voter's power across choices in proportion to the weights
//! they declared, pool the pieces per choice, then rescale the pooled scores
//! so they add up to the total balance of valid votes.

use super::shape::{parse_weight_key, parse_weight_map, WeightMap};
use super::total_balance;
use crate::model::{Proposal, Vote};
use crate::util::{format_percent, percentage_of_sum};
use serde_json::Value;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Pooling {
    /// Plain sum of each voter's proportional share.
    Linear,
    /// Square of the summed square roots of each share.
    Quadratic,
}

impl Pooling {
    fn pool<'a>(&self, contributions: impl Iterator<Item = (&'a WeightMap, f64)>, index: usize) -> f64 {
        match self {
            Pooling::Linear => contributions
                .map(|(weights, power)| weights.share(index) * power)
                .sum(),
            Pooling::Quadratic => {
                let root: f64 = contributions
                    .map(|(weights, power)| (weights.share(index) * power).sqrt())
                    .sum();
                root * root
            }
        }
    }
}

/// Weights of a well-formed vote: in-range keys, non-negative values, and
/// at least one strictly positive weight.
pub(crate) fn parse_choice(choice: &Value, num_choices: usize) -> Option<WeightMap> {
    parse_weight_map(choice, num_choices).filter(|weights| weights.iter().any(|(_, w)| w > 0.0))
}

fn ballots<'a>(proposal: &Proposal, votes: &'a [Vote]) -> Vec<(&'a Vote, WeightMap)> {
    votes
        .iter()
        .filter_map(|vote| {
            parse_choice(&vote.choice, proposal.num_choices()).map(|weights| (vote, weights))
        })
        .collect()
}

pub(crate) fn scores(pooling: Pooling, proposal: &Proposal, votes: &[Vote]) -> Vec<f64> {
    let ballots = ballots(proposal, votes);
    let total = total_balance(ballots.iter().map(|(vote, _)| *vote));

    let raw: Vec<f64> = (1..=proposal.num_choices())
        .map(|index| {
            pooling.pool(
                ballots.iter().map(|(vote, weights)| (weights, vote.balance)),
                index,
            )
        })
        .collect();

    raw.iter()
        .map(|score| percentage_of_sum(*score, &raw) * total)
        .collect()
}

/// The rescaling share is taken over every (choice, strategy) cell at once,
/// not per strategy column.
pub(crate) fn scores_by_strategy(
    pooling: Pooling,
    proposal: &Proposal,
    votes: &[Vote],
    num_strategies: usize,
) -> Vec<Vec<f64>> {
    let ballots = ballots(proposal, votes);
    let total = total_balance(ballots.iter().map(|(vote, _)| *vote));

    let raw: Vec<Vec<f64>> = (1..=proposal.num_choices())
        .map(|index| {
            (0..num_strategies)
                .map(|strategy| {
                    pooling.pool(
                        ballots
                            .iter()
                            .map(|(vote, weights)| (weights, vote.score(strategy))),
                        index,
                    )
                })
                .collect()
        })
        .collect();

    // Rescale against the pool of all cells, every strategy together
    let flattened: Vec<f64> = raw.iter().flatten().copied().collect();

    raw.iter()
        .map(|row| {
            row.iter()
                .map(|score| percentage_of_sum(*score, &flattened) * total)
                .collect()
        })
        .collect()
}

pub(crate) fn valid_total(proposal: &Proposal, votes: &[Vote]) -> f64 {
    total_balance(ballots(proposal, votes).into_iter().map(|(vote, _)| vote))
}

/// `"{percent}% for {choice}"` for every choice with a positive weight in
/// the selection, in proposal order. Percentages are shares of every numeric
/// weight in the selection, including keys that name no choice.
pub(crate) fn choice_string(proposal: &Proposal, selection: &Value) -> String {
    let object = match selection.as_object() {
        Some(object) => object,
        None => return String::new(),
    };
    let all: Vec<f64> = object.values().filter_map(Value::as_f64).collect();

    let mut weights = BTreeMap::new();
    for (key, weight) in object {
        if let (Some(index), Some(weight)) =
            (parse_weight_key(key, proposal.num_choices()), weight.as_f64())
        {
            weights.entry(index).or_insert(weight);
        }
    }

    proposal
        .choices
        .iter()
        .enumerate()
        .filter_map(|(i, choice)| {
            let weight = weights.get(&(i + 1)).copied().unwrap_or(0.0);
            if weight > 0.0 {
                Some(format!(
                    "{}% for {}",
                    format_percent(percentage_of_sum(weight, &all)),
                    choice
                ))
            } else {
                None
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
}
