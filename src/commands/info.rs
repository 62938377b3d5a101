use colored::*;
use snapshot_tally::error::Result;
use snapshot_tally::model::input::TallyInput;
use std::path::Path;

/// Validate a tally input file and dump what it contains.
pub fn info(input_path: &Path) -> Result<()> {
    let input = TallyInput::from_path(input_path)?;
    let proposal = input.proposal();
    let method = input.voting_type.method(&input.options());
    let valid = method.valid_votes(&proposal, &input.votes).len();

    println!(
        "🗳️  {} proposal with {} choices",
        input.voting_type.to_string().bright_cyan(),
        proposal.num_choices().to_string().bright_yellow()
    );
    for (i, choice) in proposal.choices.iter().enumerate() {
        println!("  {:>3}. {}", i + 1, choice);
    }

    println!(
        "📐 {} strategies",
        input.strategies.len().to_string().bright_yellow()
    );
    for strategy in &input.strategies {
        println!("  - {} ({})", strategy.name.green(), strategy.network);
    }

    println!(
        "📬 {} votes: {} valid, {} invalid",
        input.votes.len().to_string().bright_yellow(),
        valid.to_string().bright_green(),
        (input.votes.len() - valid).to_string().red()
    );

    Ok(())
}
