use super::{ChoiceResult, ProposalInfo, ResultSummary, TallyReport};
use crate::model::input::TallyInput;
use crate::voting::{RankedChoice, VotingType};
use tracing::debug;

/// Run the proposal's tally method over every vote and collect the results.
pub fn generate_tally_report(input: &TallyInput) -> TallyReport {
    let proposal = input.proposal();
    let method = input.voting_type.method(&input.options());

    let valid_vote_count = method.valid_votes(&proposal, &input.votes).len();
    let scores = method.scores(&proposal, &input.votes, &input.strategies);
    let scores_by_strategy = method.scores_by_strategy(&proposal, &input.votes, &input.strategies);
    let scores_total = method.scores_total(&proposal, &input.votes);

    debug!(
        voting_type = %input.voting_type,
        votes = input.votes.len(),
        valid = valid_vote_count,
        "tallied proposal"
    );

    let rounds = match input.voting_type {
        VotingType::RankedChoice => Some(RankedChoice.rounds(&proposal, &input.votes)),
        _ => None,
    };

    let results: Vec<ChoiceResult> = proposal
        .choices
        .iter()
        .zip(&scores)
        .enumerate()
        .map(|(i, (choice, score))| ChoiceResult {
            index: i + 1,
            choice: choice.clone(),
            score: *score,
        })
        .collect();

    let summary = ResultSummary {
        winner: winner(&results),
        total_rounds: rounds.as_ref().map(Vec::len),
        invalid_vote_count: input.votes.len() - valid_vote_count,
    };

    TallyReport {
        info: ProposalInfo {
            voting_type: input.voting_type,
            choices: proposal.choices.clone(),
            privacy: input.privacy,
            strategies: input
                .strategies
                .iter()
                .map(|strategy| strategy.name.clone())
                .collect(),
        },
        vote_count: input.votes.len(),
        valid_vote_count,
        results,
        scores,
        scores_by_strategy,
        scores_total,
        rounds,
        summary,
    }
}

/// Highest-scoring choice, first one on ties. No winner when nothing scored.
fn winner(results: &[ChoiceResult]) -> Option<String> {
    results
        .iter()
        .fold(None, |best: Option<&ChoiceResult>, result| match best {
            Some(current) if result.score <= current.score => Some(current),
            _ => Some(result),
        })
        .filter(|result| result.score > 0.0)
        .map(|result| result.choice.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(json: &str) -> TallyInput {
        TallyInput::from_json(json).unwrap()
    }

    #[test]
    fn test_single_choice_report() {
        let report = generate_tally_report(&input(
            r#"{
                "type": "single-choice",
                "choices": ["A", "B"],
                "strategies": [{"name": "ticket", "network": "1"}],
                "votes": [
                    {"choice": 1, "balance": 10, "scores": [10]},
                    {"choice": 2, "balance": 5, "scores": [5]},
                    {"choice": 1, "balance": 3, "scores": [3]},
                    {"choice": 9, "balance": 1, "scores": [1]}
                ]
            }"#,
        ));

        assert_eq!(report.scores, vec![13.0, 5.0]);
        assert_eq!(report.scores_by_strategy, vec![vec![13.0], vec![5.0]]);
        assert_eq!(report.scores_total, 19.0);
        assert_eq!(report.vote_count, 4);
        assert_eq!(report.valid_vote_count, 3);
        assert_eq!(report.summary.invalid_vote_count, 1);
        assert_eq!(report.summary.winner.as_deref(), Some("A"));
        assert!(report.rounds.is_none());
        assert_eq!(report.info.strategies, vec!["ticket".to_string()]);
    }

    #[test]
    fn test_ranked_choice_report_has_rounds() {
        let report = generate_tally_report(&input(
            r#"{
                "type": "ranked-choice",
                "choices": ["A", "B", "C"],
                "strategies": [{"name": "ticket"}],
                "votes": [
                    {"choice": [1, 2, 3], "balance": 4, "scores": [4]},
                    {"choice": [2, 1, 3], "balance": 3, "scores": [3]},
                    {"choice": [3, 2, 1], "balance": 2, "scores": [2]}
                ]
            }"#,
        ));

        assert_eq!(report.summary.total_rounds, Some(2));
        assert_eq!(report.scores, vec![4.0, 5.0, 0.0]);
        assert_eq!(report.summary.winner.as_deref(), Some("B"));

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["rounds"][0]["eliminated"], 3);
    }

    #[test]
    fn test_no_winner_without_votes() {
        let report = generate_tally_report(&input(
            r#"{"type": "copeland", "choices": ["A", "B"]}"#,
        ));

        assert_eq!(report.scores, vec![0.0, 0.0]);
        assert_eq!(report.summary.winner, None);
    }
}
