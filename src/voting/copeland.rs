use super::shape::{is_distinct, parse_index, parse_index_list};
use super::{total_balance, TallyMethod, VotingType};
use crate::model::{Proposal, Strategy, Vote};
use itertools::Itertools;
use serde_json::Value;
use tracing::debug;

/// Pairwise (Copeland) ranking over possibly partial rankings.
///
/// Every ordered pair of positions on a ballot moves that ballot's power
/// from the later choice to the earlier one in a signed preference matrix.
/// Each head-to-head win is worth a point and a tie half a point; points are
/// then rescaled to the total power of valid votes.
#[derive(Debug, Clone, Copy, Default)]
pub struct Copeland;

impl Copeland {
    fn ranking(&self, choice: &Value, num_choices: usize) -> Option<Vec<usize>> {
        parse_index_list(choice, num_choices)
            .filter(|ranking| !ranking.is_empty() && is_distinct(ranking))
    }

    fn rankings<'a>(&self, proposal: &Proposal, votes: &'a [Vote]) -> Vec<(Vec<usize>, &'a Vote)> {
        votes
            .iter()
            .filter_map(|vote| {
                self.ranking(&vote.choice, proposal.num_choices())
                    .map(|ranking| (ranking, vote))
            })
            .collect()
    }
}

/// Signed net preference of choice `a` over choice `b` at `matrix[a][b]`,
/// zero-based.
pub fn pairwise_matrix<'a>(
    num_choices: usize,
    ballots: impl IntoIterator<Item = (&'a [usize], f64)>,
) -> Vec<Vec<f64>> {
    let mut matrix = vec![vec![0.0; num_choices]; num_choices];
    for (ranking, power) in ballots {
        for (preferred, other) in ranking.iter().tuple_combinations() {
            matrix[preferred - 1][other - 1] += power;
            matrix[other - 1][preferred - 1] -= power;
        }
    }
    matrix
}

/// One point per pairwise win, half a point each for a tie.
pub fn copeland_points(matrix: &[Vec<f64>]) -> Vec<f64> {
    let mut points = vec![0.0; matrix.len()];
    for (i, j) in (0..matrix.len()).tuple_combinations() {
        let net = matrix[i][j];
        if net > 0.0 {
            points[i] += 1.0;
        } else if net < 0.0 {
            points[j] += 1.0;
        } else {
            points[i] += 0.5;
            points[j] += 0.5;
        }
    }
    points
}

/// Scales points to shares of `total`. With no points at all, `total` is
/// split evenly.
fn rescale(points: &[f64], total: f64) -> Vec<f64> {
    let sum: f64 = points.iter().sum();
    if sum > 0.0 {
        points.iter().map(|p| p / sum * total).collect()
    } else {
        vec![total / points.len() as f64; points.len()]
    }
}

fn column(num_choices: usize, rankings: &[(Vec<usize>, &Vote)], power: impl Fn(&Vote) -> f64) -> Vec<f64> {
    let matrix = pairwise_matrix(
        num_choices,
        rankings
            .iter()
            .map(|(ranking, vote)| (ranking.as_slice(), power(*vote))),
    );
    let points = copeland_points(&matrix);
    let total: f64 = rankings.iter().map(|(_, vote)| power(*vote)).sum();
    debug!(?points, total, "copeland points");
    rescale(&points, total)
}

impl TallyMethod for Copeland {
    fn voting_type(&self) -> VotingType {
        VotingType::Copeland
    }

    fn is_valid_choice(&self, choice: &Value, choices: &[String]) -> bool {
        self.ranking(choice, choices.len()).is_some()
    }

    fn scores(&self, proposal: &Proposal, votes: &[Vote], _strategies: &[Strategy]) -> Vec<f64> {
        let rankings = self.rankings(proposal, votes);
        column(proposal.num_choices(), &rankings, |vote| vote.balance)
    }

    /// Each strategy column is computed and rescaled on its own.
    fn scores_by_strategy(
        &self,
        proposal: &Proposal,
        votes: &[Vote],
        strategies: &[Strategy],
    ) -> Vec<Vec<f64>> {
        let rankings = self.rankings(proposal, votes);
        let columns: Vec<Vec<f64>> = (0..strategies.len())
            .map(|strategy| {
                column(proposal.num_choices(), &rankings, |vote| vote.score(strategy))
            })
            .collect();

        (0..proposal.num_choices())
            .map(|choice| columns.iter().map(|column| column[choice]).collect())
            .collect()
    }

    /// Counts valid votes only.
    fn scores_total(&self, proposal: &Proposal, votes: &[Vote]) -> f64 {
        total_balance(self.valid_votes(proposal, votes))
    }

    /// Labels in selection order.
    fn choice_string(&self, proposal: &Proposal, selection: &Value) -> String {
        selection
            .as_array()
            .map(|items| {
                items
                    .iter()
                    .filter_map(|item| {
                        parse_index(item, proposal.num_choices())
                            .and_then(|index| proposal.choice(index))
                    })
                    .join(", ")
            })
            .unwrap_or_default()
    }
}
