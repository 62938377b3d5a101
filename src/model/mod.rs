pub mod input;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The object being voted on. Choices are identified only by their 1-based
/// position in `choices`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Proposal {
    pub choices: Vec<String>,
}

impl Proposal {
    pub fn new<S: Into<String>>(choices: impl IntoIterator<Item = S>) -> Self {
        Self {
            choices: choices.into_iter().map(Into::into).collect(),
        }
    }

    /// Label of the choice at 1-based `index`, if there is one.
    pub fn choice(&self, index: usize) -> Option<&str> {
        index
            .checked_sub(1)
            .and_then(|i| self.choices.get(i))
            .map(String::as_str)
    }

    pub fn num_choices(&self) -> usize {
        self.choices.len()
    }
}

/// An external voting-power computation. Its position in the strategy list is
/// the position of its entry in every vote's `scores`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Strategy {
    pub name: String,
    #[serde(default)]
    pub network: String,
    #[serde(default)]
    pub params: Map<String, Value>,
}

impl Strategy {
    pub fn new(name: &str, network: &str) -> Self {
        Self {
            name: name.to_string(),
            network: network.to_string(),
            params: Map::new(),
        }
    }
}

/// One voter's submission. `choice` is kept as raw JSON because its shape
/// depends on the voting type and malformed payloads are expected input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vote {
    pub choice: Value,
    pub balance: f64,
    #[serde(default)]
    pub scores: Vec<f64>,
}

impl Vote {
    pub fn new(choice: Value, balance: f64, scores: Vec<f64>) -> Self {
        Self {
            choice,
            balance,
            scores,
        }
    }

    /// Score contributed by strategy `index`; absent entries count as zero.
    pub fn score(&self, index: usize) -> f64 {
        self.scores.get(index).copied().unwrap_or(0.0)
    }
}
