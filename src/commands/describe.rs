use snapshot_tally::error::Result;
use snapshot_tally::model::input::TallyInput;
use std::path::Path;

/// Print the human-readable label of `selection` for the proposal in
/// `input_path`.
pub fn describe(input_path: &Path, selection: &str) -> Result<()> {
    let input = TallyInput::from_path(input_path)?;
    let selection: serde_json::Value = serde_json::from_str(selection)?;
    let method = input.voting_type.method(&input.options());

    println!("{}", method.choice_string(&input.proposal(), &selection));
    Ok(())
}
