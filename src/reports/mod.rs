use crate::voting::{Privacy, Round, VotingType};
use serde::{Deserialize, Serialize};

pub mod generator;

pub use generator::generate_tally_report;

/// Full tally of one proposal, as written by `tally --json`.
#[derive(Debug, Serialize, Deserialize)]
pub struct TallyReport {
    pub info: ProposalInfo,
    #[serde(rename = "voteCount")]
    pub vote_count: usize,
    #[serde(rename = "validVoteCount")]
    pub valid_vote_count: usize,
    pub results: Vec<ChoiceResult>,
    pub scores: Vec<f64>,
    #[serde(rename = "scoresByStrategy")]
    pub scores_by_strategy: Vec<Vec<f64>>,
    #[serde(rename = "scoresTotal")]
    pub scores_total: f64,
    /// Instant-runoff rounds; only present for ranked-choice proposals.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub rounds: Option<Vec<Round>>,
    pub summary: ResultSummary,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ProposalInfo {
    #[serde(rename = "type")]
    pub voting_type: VotingType,
    pub choices: Vec<String>,
    pub privacy: Privacy,
    pub strategies: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChoiceResult {
    pub index: usize,
    pub choice: String,
    pub score: f64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ResultSummary {
    pub winner: Option<String>,
    #[serde(rename = "totalRounds")]
    pub total_rounds: Option<usize>,
    #[serde(rename = "invalidVoteCount")]
    pub invalid_vote_count: usize,
}
