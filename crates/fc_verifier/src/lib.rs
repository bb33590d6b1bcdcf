//! # fc_verifier - Replay Verification
//!
//! The async, fetching side of match auditing. Given a match id, the
//! verifier pulls the recorded replay and the authoritative result hash,
//! recomputes the hash locally from the ordered input streams, and runs
//! the recorded data through integrity and fraud gates. The deterministic
//! hash itself lives in `fc_core`; this crate only orchestrates fetching
//! and comparison.

pub mod error;
pub mod provider;
pub mod verifier;

pub use error::ProviderError;
pub use provider::{AuthorityProvider, HttpProvider, MemoryProvider, ReplayProvider};
pub use verifier::{MismatchKind, ReplayVerifier, VerificationResult};
