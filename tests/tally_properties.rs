use proptest::prelude::*;
use serde_json::{json, Map, Value};
use snapshot_tally::Strategy as VotingStrategy;
use snapshot_tally::{Proposal, TallyOptions, Vote, VotingType};

const STRATEGIES: usize = 2;

fn proposal(num_choices: usize) -> Proposal {
    Proposal::new((1..=num_choices).map(|i| format!("Choice {}", i)))
}

fn strategies() -> Vec<VotingStrategy> {
    vec![VotingStrategy::new("a", "1"), VotingStrategy::new("b", "137")]
}

/// Balance split across the two strategies.
fn power() -> impl Strategy<Value = (f64, f64)> {
    (0.0f64..500.0, 0.0f64..500.0)
}

fn make_vote(choice: Value, (a, b): (f64, f64)) -> Vote {
    Vote::new(choice, a + b, vec![a, b])
}

fn weight_votes() -> impl Strategy<Value = (usize, Vec<Vote>)> {
    (2usize..6).prop_flat_map(|n| {
        let vote = (prop::collection::vec(0u8..10, n), power()).prop_map(|(weights, power)| {
            let choice: Map<String, Value> = weights
                .iter()
                .enumerate()
                .map(|(i, w)| ((i + 1).to_string(), json!(w)))
                .collect();
            make_vote(Value::Object(choice), power)
        });
        (Just(n), prop::collection::vec(vote, 0..12))
    })
}

fn ranking_votes(full: bool) -> impl Strategy<Value = (usize, Vec<Vote>)> {
    (2usize..6).prop_flat_map(move |n| {
        let ranking = Just((1..=n).collect::<Vec<usize>>()).prop_shuffle();
        let vote = (ranking, 1..=n, power()).prop_map(move |(ranking, len, power)| {
            let len = if full { ranking.len() } else { len };
            make_vote(json!(ranking[..len].to_vec()), power)
        });
        (Just(n), prop::collection::vec(vote, 0..12))
    })
}

/// Payloads no method accepts for proposals with fewer than ten choices.
fn malformed() -> impl Strategy<Value = Vote> {
    let payload = prop_oneof![
        Just(json!(null)),
        Just(json!("sealed")),
        Just(json!(1.5)),
        Just(json!([0])),
        Just(json!([1, 1])),
        Just(json!([99])),
        Just(json!({})),
        Just(json!({"1": 0})),
        Just(json!({"1": -1, "2": 4})),
        Just(json!({"99": 1})),
    ];
    (payload, power()).prop_map(|(choice, power)| make_vote(choice, power))
}

fn valid_total(voting_type: VotingType, proposal: &Proposal, votes: &[Vote]) -> f64 {
    voting_type
        .method(&TallyOptions::default())
        .valid_votes(proposal, votes)
        .iter()
        .map(|vote| vote.balance)
        .sum()
}

fn assert_conserved(voting_type: VotingType, n: usize, votes: &[Vote]) -> Result<(), TestCaseError> {
    let proposal = proposal(n);
    let method = voting_type.method(&TallyOptions::default());
    let total = valid_total(voting_type, &proposal, votes);
    let sum: f64 = method.scores(&proposal, votes, &strategies()).iter().sum();

    prop_assert!(
        (sum - total).abs() <= 1e-9 * total.max(1.0),
        "{}: scores sum to {} but valid power is {}",
        voting_type,
        sum,
        total
    );
    Ok(())
}

fn assert_unaffected_by(
    voting_type: VotingType,
    n: usize,
    votes: &[Vote],
    junk: &[Vote],
) -> Result<(), TestCaseError> {
    let proposal = proposal(n);
    let method = voting_type.method(&TallyOptions::default());

    let mut noisy: Vec<Vote> = junk.to_vec();
    noisy.extend_from_slice(votes);
    noisy.extend_from_slice(junk);

    prop_assert_eq!(
        method.scores(&proposal, votes, &strategies()),
        method.scores(&proposal, &noisy, &strategies())
    );
    prop_assert_eq!(
        method.scores_by_strategy(&proposal, votes, &strategies()),
        method.scores_by_strategy(&proposal, &noisy, &strategies())
    );
    Ok(())
}

proptest! {
    #[test]
    fn quadratic_conserves_valid_power((n, votes) in weight_votes()) {
        assert_conserved(VotingType::Quadratic, n, &votes)?;
    }

    #[test]
    fn weighted_conserves_valid_power((n, votes) in weight_votes()) {
        assert_conserved(VotingType::Weighted, n, &votes)?;
    }

    #[test]
    fn copeland_conserves_valid_power((n, votes) in ranking_votes(false)) {
        assert_conserved(VotingType::Copeland, n, &votes)?;
    }

    #[test]
    fn weight_methods_ignore_malformed_votes(
        (n, votes) in weight_votes(),
        junk in prop::collection::vec(malformed(), 1..5),
    ) {
        assert_unaffected_by(VotingType::Quadratic, n, &votes, &junk)?;
        assert_unaffected_by(VotingType::Weighted, n, &votes, &junk)?;
    }

    #[test]
    fn ranking_methods_ignore_malformed_votes(
        (n, votes) in ranking_votes(true),
        junk in prop::collection::vec(malformed(), 1..5),
    ) {
        assert_unaffected_by(VotingType::RankedChoice, n, &votes, &junk)?;
        assert_unaffected_by(VotingType::Copeland, n, &votes, &junk)?;
        assert_unaffected_by(VotingType::Approval, n, &votes, &junk)?;
    }

    #[test]
    fn single_choice_ignores_malformed_votes(
        choices in prop::collection::vec((1usize..4, power()), 0..12),
        junk in prop::collection::vec(malformed(), 1..5),
    ) {
        let votes: Vec<Vote> = choices
            .into_iter()
            .map(|(choice, power)| make_vote(json!(choice), power))
            .collect();
        assert_unaffected_by(VotingType::SingleChoice, 3, &votes, &junk)?;
    }

    #[test]
    fn by_strategy_rows_match_choices((n, votes) in ranking_votes(true)) {
        let proposal = proposal(n);
        for voting_type in VotingType::ALL.iter() {
            let method = voting_type.method(&TallyOptions::default());
            let by_strategy = method.scores_by_strategy(&proposal, &votes, &strategies());
            prop_assert_eq!(by_strategy.len(), n);
            for row in by_strategy {
                prop_assert_eq!(row.len(), STRATEGIES);
                prop_assert!(row.iter().all(|score| score.is_finite()));
            }
        }
    }
}
