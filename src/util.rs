use crate::error::Result;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

pub fn read_serialized<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    Ok(serde_json::from_reader(reader)?)
}

pub fn write_serialized<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, value)?;
    writer.flush()?;
    Ok(())
}

/// Share of `part` in the sum of `whole`. An empty or zero-sum pool yields 0
/// instead of NaN.
pub fn percentage_of_sum(part: f64, whole: &[f64]) -> f64 {
    let total: f64 = whole.iter().sum();
    let percent = part / total;
    if percent.is_nan() || percent.is_infinite() {
        0.0
    } else {
        percent
    }
}

/// `1st`, `2nd`, `3rd`, `4th`, ..., `11th`, `12th`, `13th`, `21st`, ...
pub fn ordinal(n: usize) -> String {
    let suffix = match (n % 10, n % 100) {
        (1, k) if k != 11 => "st",
        (2, k) if k != 12 => "nd",
        (3, k) if k != 13 => "rd",
        _ => "th",
    };
    format!("{}{}", n, suffix)
}

/// Percentage with one decimal place, rendered without a trailing `.0`
/// (`50`, `33.3`).
pub fn format_percent(share: f64) -> String {
    let rounded = (share * 1000.0).round() / 10.0;
    format!("{}", rounded)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentage_of_sum() {
        assert_eq!(percentage_of_sum(1.0, &[1.0, 3.0]), 0.25);
        assert_eq!(percentage_of_sum(0.0, &[0.0, 0.0]), 0.0);
        assert_eq!(percentage_of_sum(5.0, &[]), 0.0);
    }

    #[test]
    fn test_ordinal() {
        let rendered: Vec<String> = [1, 2, 3, 4, 11, 12, 13, 21, 22, 23, 101, 111]
            .iter()
            .map(|n| ordinal(*n))
            .collect();
        assert_eq!(
            rendered,
            vec![
                "1st", "2nd", "3rd", "4th", "11th", "12th", "13th", "21st", "22nd", "23rd",
                "101st", "111th"
            ]
        );
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(0.5), "50");
        assert_eq!(format_percent(1.0 / 3.0), "33.3");
        assert_eq!(format_percent(2.0 / 3.0), "66.7");
        assert_eq!(format_percent(1.0), "100");
    }
}
