#[derive(Debug, thiserror::Error)]
pub enum TallyError {
    #[error("Unknown voting type: {0}")]
    UnknownVotingType(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Vote {index} has {found} scores but there are {expected} strategies")]
    ScoreLengthMismatch {
        index: usize,
        expected: usize,
        found: usize,
    },
}

pub type Result<T> = std::result::Result<T, TallyError>;
