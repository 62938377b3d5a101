mod commands;

use crate::commands::{describe, info, tally, types};
use clap::{Parser, Subcommand};
use colored::*;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
struct Opts {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Validate and dump info about a tally input.
    Info {
        /// Tally input file (JSON).
        input: PathBuf,
    },
    /// Tally the votes of a proposal.
    Tally {
        /// Tally input file (JSON).
        input: PathBuf,
        /// Print the full report as JSON instead of a summary.
        #[clap(long)]
        json: bool,
        /// Write the JSON report to this file.
        #[clap(long)]
        output: Option<PathBuf>,
    },
    /// Render a selection as a readable label.
    Describe {
        /// Tally input file (JSON).
        input: PathBuf,
        /// Selection as JSON, e.g. `[2, 1, 3]` or `{"1": 2, "3": 1}`.
        selection: String,
    },
    /// List supported voting types.
    Types,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let opts = Opts::parse();

    let result = match opts.command {
        Command::Info { input } => info(&input),
        Command::Tally {
            input,
            json,
            output,
        } => tally(&input, json, output.as_deref()),
        Command::Describe { input, selection } => describe(&input, &selection),
        Command::Types => {
            types();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{} {}", "❌".red(), e);
        std::process::exit(1);
    }
}
