//! Choice-shape validation.
//!
//! Every voting type expects its `choice` payload in one of a few shapes: a
//! single 1-based index, a list of indices, or a map from index to weight.
//! These parsers turn raw JSON into the typed shape, or `None` when the
//! payload is malformed for a proposal with `num_choices` choices.

use itertools::Itertools;
use serde_json::Value;
use std::collections::BTreeMap;

/// Integer value of a JSON number. `2.0` counts as an integer, `2.5` does not.
fn as_integer(value: &Value) -> Option<i64> {
    if let Some(n) = value.as_i64() {
        return Some(n);
    }
    let float = value.as_f64()?;
    if float.is_finite() && float.fract() == 0.0 && float.abs() < i64::MAX as f64 {
        Some(float as i64)
    } else {
        None
    }
}

fn in_range(index: i64, num_choices: usize) -> Option<usize> {
    if index >= 1 && (index as u64) <= num_choices as u64 {
        Some(index as usize)
    } else {
        None
    }
}

/// A single in-range choice index.
pub fn parse_index(value: &Value, num_choices: usize) -> Option<usize> {
    as_integer(value).and_then(|index| in_range(index, num_choices))
}

/// A list of in-range choice indices, in the order given. Duplicates are
/// kept; use [`is_distinct`] where they are not allowed.
pub fn parse_index_list(value: &Value, num_choices: usize) -> Option<Vec<usize>> {
    value
        .as_array()?
        .iter()
        .map(|item| parse_index(item, num_choices))
        .collect()
}

pub fn is_distinct(indices: &[usize]) -> bool {
    indices.iter().all_unique()
}

/// Per-choice weights declared by a voter.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WeightMap(BTreeMap<usize, f64>);

impl WeightMap {
    pub fn weight(&self, index: usize) -> f64 {
        self.0.get(&index).copied().unwrap_or(0.0)
    }

    pub fn total(&self) -> f64 {
        self.0.values().sum()
    }

    /// Fraction of the voter's declared weight that goes to `index`.
    pub fn share(&self, index: usize) -> f64 {
        let total = self.total();
        if total > 0.0 {
            self.weight(index) / total
        } else {
            0.0
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.0.iter().map(|(index, weight)| (*index, *weight))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

fn parse_key(key: &str) -> Option<i64> {
    let key = key.trim();
    if let Ok(n) = key.parse::<i64>() {
        return Some(n);
    }
    let float = key.parse::<f64>().ok()?;
    if float.is_finite() && float.fract() == 0.0 {
        Some(float as i64)
    } else {
        None
    }
}

/// Choice index named by a weight-map key, if it is in range.
pub fn parse_weight_key(key: &str, num_choices: usize) -> Option<usize> {
    parse_key(key).and_then(|index| in_range(index, num_choices))
}

/// A weight map with in-range keys and non-negative numeric weights. Keys
/// that name the same choice twice (`"1"` and `"01"`) make the map malformed.
/// Positivity is not checked here.
pub fn parse_weight_map(value: &Value, num_choices: usize) -> Option<WeightMap> {
    let object = value.as_object()?;
    let mut weights = BTreeMap::new();

    for (key, weight) in object {
        let index = parse_weight_key(key, num_choices)?;
        let weight = weight.as_f64().filter(|w| *w >= 0.0)?;
        if weights.insert(index, weight).is_some() {
            return None;
        }
    }

    Some(WeightMap(weights))
}
