use super::{Proposal, Strategy, Vote};
use crate::error::{Result, TallyError};
use crate::voting::{Privacy, TallyOptions, VotingType};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A self-contained tally request as read from disk: the proposal's voting
/// type and choices, its privacy setting, the strategy list and every vote.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TallyInput {
    #[serde(rename = "type")]
    pub voting_type: VotingType,
    pub choices: Vec<String>,
    #[serde(default)]
    pub privacy: Privacy,
    #[serde(default)]
    pub strategies: Vec<Strategy>,
    #[serde(default)]
    pub votes: Vec<Vote>,
}

impl TallyInput {
    pub fn from_path(path: &Path) -> Result<Self> {
        let input: TallyInput = crate::util::read_serialized(path)?;
        input.check_scores()?;
        Ok(input)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let input: TallyInput = serde_json::from_str(json)?;
        input.check_scores()?;
        Ok(input)
    }

    pub fn proposal(&self) -> Proposal {
        Proposal {
            choices: self.choices.clone(),
        }
    }

    pub fn options(&self) -> TallyOptions {
        TallyOptions {
            privacy: self.privacy,
        }
    }

    /// Every vote must carry exactly one score per strategy.
    fn check_scores(&self) -> Result<()> {
        let expected = self.strategies.len();
        if let Some((index, vote)) = self
            .votes
            .iter()
            .enumerate()
            .find(|(_, vote)| vote.scores.len() != expected)
        {
            return Err(TallyError::ScoreLengthMismatch {
                index,
                expected,
                found: vote.scores.len(),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_input() {
        let input = TallyInput::from_json(
            r#"{
                "type": "basic",
                "choices": ["For", "Against"],
                "strategies": [{"name": "erc20-balance-of", "network": "1", "params": {"decimals": 18}}],
                "votes": [{"choice": 1, "balance": 4.5, "scores": [4.5]}]
            }"#,
        )
        .unwrap();

        assert_eq!(input.voting_type, VotingType::SingleChoice);
        assert_eq!(input.privacy, Privacy::None);
        assert_eq!(input.proposal().choice(2), Some("Against"));
        assert_eq!(input.votes[0].balance, 4.5);
    }

    #[test]
    fn test_shutter_privacy() {
        let input = TallyInput::from_json(
            r#"{"type": "approval", "choices": ["A"], "privacy": "shutter"}"#,
        )
        .unwrap();

        assert_eq!(input.options().privacy, Privacy::Shutter);
    }

    #[test]
    fn test_score_length_mismatch() {
        let err = TallyInput::from_json(
            r#"{
                "type": "single-choice",
                "choices": ["A"],
                "strategies": [{"name": "ticket"}],
                "votes": [
                    {"choice": 1, "balance": 1, "scores": [1]},
                    {"choice": 1, "balance": 2, "scores": [1, 1]}
                ]
            }"#,
        )
        .unwrap_err();

        assert!(matches!(
            err,
            TallyError::ScoreLengthMismatch {
                index: 1,
                expected: 1,
                found: 2
            }
        ));
    }

    #[test]
    fn test_unknown_type() {
        let err = TallyInput::from_json(r#"{"type": "borda", "choices": []}"#).unwrap_err();
        assert!(matches!(err, TallyError::Serialization(_)));
    }
}
