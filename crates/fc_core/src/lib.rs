//! # fc_core - Deterministic Match Core
//!
//! The trust-critical core of a football-management game: a deterministic
//! 2D collision engine (player-ball and player-player), a tick-based input
//! admission gate, and the match result/validation contracts that let any
//! third party reproduce and audit a match outcome.
//!
//! ## Determinism contract
//! Identical (seed, engine version, ordered inputs, config) always yield
//! the identical collision event sequence and the identical result hash.
//! Nothing in this crate uses an RNG, ambient time on the simulation path,
//! or incidental container ordering.
//!
//! ## What lives elsewhere
//! Rendering, transport, wallets/chain, economy, and persistence are
//! external collaborators; this crate only produces and consumes the data
//! contracts in [`replay`] and [`validation`]. Replay *verification* (the
//! async, fetching side) lives in the `fc_verifier` crate.

pub mod engine;
pub mod error;
pub mod input;
pub mod replay;
pub mod validation;

pub use engine::{
    BallState, CardSystem, CardType, CollisionConfig, CollisionEvent, CollisionKind,
    CollisionOrchestrator, DisciplineRecord, FoulType, MatchSession, PlayerId, PlayerState,
    SkillAttributes, TickReport, Vec2,
};
pub use error::ConfigError;
pub use input::{Admission, InputValidator, PlayerAction, PlayerInput, RejectReason};
pub use replay::{compute_result_hash, MatchResult, PlayerMatchStats, ReplayDocument, Score, TeamSide};
pub use validation::{validate_match, HistoricalMatch, ValidationResult};

/// Engine version baked into every result hash.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
