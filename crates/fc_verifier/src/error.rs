//! Provider-side failures.
//!
//! These never escape the verifier as errors: the pipeline folds them into
//! a `VerificationResult` with the `VerificationError` mismatch kind, so a
//! flaky fetch can never look like a fraudulent replay (or crash a caller).

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("resource not found: {0}")]
    NotFound(String),

    #[error("transport failure: {0}")]
    Transport(String),

    #[error("malformed payload: {0}")]
    Malformed(String),
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ProviderError::Malformed(err.to_string())
        } else {
            ProviderError::Transport(err.to_string())
        }
    }
}
