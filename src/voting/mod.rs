pub mod approval;
pub mod copeland;
mod proportional;
pub mod quadratic;
pub mod ranked_choice;
pub mod shape;
pub mod single_choice;
pub mod weighted;

pub use approval::Approval;
pub use copeland::Copeland;
pub use quadratic::Quadratic;
pub use ranked_choice::{RankedChoice, Round, RoundTally};
pub use single_choice::SingleChoice;
pub use weighted::Weighted;

use crate::error::TallyError;
use crate::model::{Proposal, Strategy, Vote};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use tracing::trace;

/// The four operations every tally method provides.
///
/// All of them are total: malformed votes are filtered out through
/// [`TallyMethod::is_valid_choice`], and any share whose denominator is zero
/// evaluates to 0.
pub trait TallyMethod: Send + Sync {
    fn voting_type(&self) -> VotingType;

    /// Whether `choice` is a well-formed payload for a proposal with `choices`.
    fn is_valid_choice(&self, choice: &Value, choices: &[String]) -> bool;

    /// Votes that pass [`TallyMethod::is_valid_choice`], in input order.
    fn valid_votes<'a>(&self, proposal: &Proposal, votes: &'a [Vote]) -> Vec<&'a Vote> {
        votes
            .iter()
            .filter(|vote| {
                let valid = self.is_valid_choice(&vote.choice, &proposal.choices);
                if !valid {
                    trace!(
                        voting_type = %self.voting_type(),
                        choice = %vote.choice,
                        "rejecting malformed vote"
                    );
                }
                valid
            })
            .collect()
    }

    /// One score per choice, in proposal order.
    fn scores(&self, proposal: &Proposal, votes: &[Vote], strategies: &[Strategy]) -> Vec<f64>;

    /// Outer index is the choice, inner index is the strategy.
    fn scores_by_strategy(
        &self,
        proposal: &Proposal,
        votes: &[Vote],
        strategies: &[Strategy],
    ) -> Vec<Vec<f64>>;

    /// Total voting power, over valid or all votes depending on the method.
    fn scores_total(&self, proposal: &Proposal, votes: &[Vote]) -> f64;

    /// Human-readable rendering of a voter's selection.
    fn choice_string(&self, proposal: &Proposal, selection: &Value) -> String;
}

/// Voting type declared by a proposal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VotingType {
    #[serde(alias = "basic")]
    SingleChoice,
    Approval,
    Quadratic,
    RankedChoice,
    Weighted,
    Copeland,
}

impl VotingType {
    pub const ALL: [VotingType; 6] = [
        VotingType::SingleChoice,
        VotingType::Approval,
        VotingType::Quadratic,
        VotingType::RankedChoice,
        VotingType::Weighted,
        VotingType::Copeland,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            VotingType::SingleChoice => "single-choice",
            VotingType::Approval => "approval",
            VotingType::Quadratic => "quadratic",
            VotingType::RankedChoice => "ranked-choice",
            VotingType::Weighted => "weighted",
            VotingType::Copeland => "copeland",
        }
    }

    /// The tally method that implements this voting type.
    pub fn method(&self, options: &TallyOptions) -> Box<dyn TallyMethod> {
        match self {
            VotingType::SingleChoice => Box::new(SingleChoice),
            VotingType::Approval => Box::new(Approval::new(options.privacy)),
            VotingType::Quadratic => Box::new(Quadratic),
            VotingType::RankedChoice => Box::new(RankedChoice),
            VotingType::Weighted => Box::new(Weighted),
            VotingType::Copeland => Box::new(Copeland),
        }
    }
}

impl fmt::Display for VotingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for VotingType {
    type Err = TallyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "single-choice" | "basic" => Ok(VotingType::SingleChoice),
            "approval" => Ok(VotingType::Approval),
            "quadratic" => Ok(VotingType::Quadratic),
            "ranked-choice" => Ok(VotingType::RankedChoice),
            "weighted" => Ok(VotingType::Weighted),
            "copeland" => Ok(VotingType::Copeland),
            other => Err(TallyError::UnknownVotingType(other.to_string())),
        }
    }
}

/// Looks up the tally method for a proposal's declared voting type.
pub fn method_for(voting_type: &str, options: &TallyOptions) -> crate::error::Result<Box<dyn TallyMethod>> {
    Ok(voting_type.parse::<VotingType>()?.method(options))
}

/// Privacy setting of a proposal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Privacy {
    #[serde(rename = "", alias = "none")]
    None,
    /// Choices are sealed until the proposal closes.
    Shutter,
}

impl Default for Privacy {
    fn default() -> Self {
        Privacy::None
    }
}

/// Options that change how a method classifies votes.
#[derive(Debug, Clone, Default)]
pub struct TallyOptions {
    pub privacy: Privacy,
}

impl TallyOptions {
    pub fn shutter() -> Self {
        Self {
            privacy: Privacy::Shutter,
        }
    }
}

pub(crate) fn total_balance<'a>(votes: impl IntoIterator<Item = &'a Vote>) -> f64 {
    votes.into_iter().map(|vote| vote.balance).sum()
}
