use colored::*;
use snapshot_tally::voting::VotingType;

pub fn types() {
    for voting_type in VotingType::ALL.iter() {
        println!("{}", voting_type.to_string().bright_cyan());
    }
    println!("{} (alias of single-choice)", "basic".cyan());
}
