use colored::*;
use instant::Instant;
use snapshot_tally::error::Result;
use snapshot_tally::model::input::TallyInput;
use snapshot_tally::reports::{generate_tally_report, TallyReport};
use snapshot_tally::util::write_serialized;
use std::path::Path;

pub fn tally(input_path: &Path, json: bool, output: Option<&Path>) -> Result<()> {
    let start = Instant::now();
    let input = TallyInput::from_path(input_path)?;
    let report = generate_tally_report(&input);
    let elapsed_ms = start.elapsed().as_millis();

    if let Some(output) = output {
        write_serialized(output, &report)?;
        println!(
            "✅ Report written to {} in {} ms",
            output.display().to_string().bright_green(),
            elapsed_ms
        );
    } else if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
        println!("⏱️  Tallied in {} ms", elapsed_ms.to_string().bright_white());
    }

    Ok(())
}

fn print_report(report: &TallyReport) {
    println!(
        "\n{} {}",
        "📊 Tally".bright_cyan().bold(),
        report.info.voting_type.to_string().bright_yellow()
    );
    println!("{}", "=".repeat(50).bright_cyan());

    let winner = report.summary.winner.as_deref();
    for result in &report.results {
        let label = format!("{:>3}. {}", result.index, result.choice);
        let label = if Some(result.choice.as_str()) == winner {
            label.bright_green().bold()
        } else {
            label.normal()
        };
        println!("{}: {}", label, format!("{:.4}", result.score).bright_white());
    }

    if let Some(rounds) = &report.rounds {
        println!("{}", "-".repeat(50).bright_cyan());
        for round in rounds {
            let tallies = round
                .tallies
                .iter()
                .map(|tally| format!("{}={:.2}", tally.choice, tally.balance))
                .collect::<Vec<_>>()
                .join(" ");
            match round.eliminated {
                Some(choice) => println!(
                    "Round {}: {} ({} {})",
                    round.round,
                    tallies,
                    "eliminated".red(),
                    choice
                ),
                None => println!("Round {}: {}", round.round, tallies),
            }
        }
    }

    println!("{}", "-".repeat(50).bright_cyan());
    println!(
        "{}: {}",
        "Total Power".bright_white().bold(),
        format!("{:.4}", report.scores_total).bright_green().bold()
    );
    println!(
        "{}: {} ({} invalid)",
        "Votes".bright_white().bold(),
        report.vote_count.to_string().bright_yellow(),
        report.summary.invalid_vote_count.to_string().red()
    );
    match winner {
        Some(winner) => println!(
            "{}: {}",
            "Winner".bright_white().bold(),
            winner.bright_green().bold()
        ),
        None => println!("{}: {}", "Winner".bright_white().bold(), "none".dimmed()),
    }
    println!();
}
