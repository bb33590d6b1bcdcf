//! Input wire types and the per-match admission gate.

pub mod types;
pub mod validator;

pub use types::{PlayerAction, PlayerInput, MAX_MATCH_TICKS, TICK_RATE_HZ};
pub use validator::{Admission, InputValidator, RejectReason};
