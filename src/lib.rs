//! Vote tallying for off-chain governance proposals.
//!
//! Given a proposal's choices, the cast votes and the strategies that
//! weighted them, each [`voting::TallyMethod`] computes per-choice scores,
//! per-strategy scores, the total voting power and a readable label for a
//! selection. [`voting::VotingType`] maps a proposal's declared type to its
//! method.

pub mod error;
pub mod model;
pub mod reports;
pub mod util;
pub mod voting;

pub use error::{Result, TallyError};
pub use model::{Proposal, Strategy, Vote};
pub use voting::{method_for, TallyMethod, TallyOptions, VotingType};
