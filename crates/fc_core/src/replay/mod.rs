//! Finalized match artifacts and the result hash.

pub mod hash;
pub mod types;

pub use hash::compute_result_hash;
pub use types::{MatchResult, PlayerMatchStats, ReplayDocument, Score, TeamSide};
