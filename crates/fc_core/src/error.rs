//! Construction-time errors.
//!
//! The simulation hot path never returns `Result`; the only fallible moment
//! in the core is building a match from a config, which is where bad
//! numbers must be caught.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("{field} must be finite, got {value}")]
    NonFinite { field: &'static str, value: f32 },

    #[error("{field} must be > 0, got {value}")]
    NonPositive { field: &'static str, value: f32 },

    #[error("{field} must be >= 0, got {value}")]
    Negative { field: &'static str, value: f32 },

    #[error("resolution_passes must be >= 1")]
    NoResolutionPasses,

    #[error("duplicate player id {0} in roster")]
    DuplicatePlayer(u32),
}

pub type Result<T> = std::result::Result<T, ConfigError>;
