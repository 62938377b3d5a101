mod describe;
mod info;
mod tally;
mod types;

pub use describe::describe;
pub use info::info;
pub use tally::tally;
pub use types::types;
