//! The six-gate verification pipeline.
//!
//! Gates run in order and stop at the first failure:
//! 1. replay fetch, 2. local hash computation, 3. authoritative hash fetch,
//! 4. hash equality, 5. input integrity, 6. fraud heuristics. Only a result
//! clearing all six is reported valid. Every failure mode, including a
//! provider falling over, comes back as a typed result - `verify` has no
//! error path.

use serde::{Deserialize, Serialize};

use fc_core::input::MAX_MATCH_TICKS;
use fc_core::ReplayDocument;

use crate::provider::{AuthorityProvider, ReplayProvider};

const MAX_PLAUSIBLE_GOALS: u32 = 20;
const MIN_DURATION_MIN: u32 = 1;
const MAX_DURATION_MIN: u32 = 100;
/// Expected inputs per declared minute (a very low bar: one per second).
const EXPECTED_INPUTS_PER_MIN: f64 = 60.0;
/// Fraction of the expected input count below which the stream is suspect.
const MIN_INPUT_FRACTION: f64 = 0.1;
/// Inter-input gap stddev above this multiple of the mean reads as scripted
/// burst traffic.
const BURSTINESS_LIMIT: f64 = 2.0;

/// Why verification failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MismatchKind {
    MissingReplay,
    HashMismatch,
    InvalidInputs,
    FraudDetected,
    VerificationError,
}

/// Outcome of one verification run. Produced fresh per call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerificationResult {
    pub match_id: String,
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub computed_hash: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authoritative_hash: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mismatch: Option<MismatchKind>,
    pub details: Vec<String>,
}

impl VerificationResult {
    fn failed(match_id: &str, mismatch: MismatchKind, details: Vec<String>) -> Self {
        Self {
            match_id: match_id.to_string(),
            valid: false,
            computed_hash: None,
            authoritative_hash: None,
            mismatch: Some(mismatch),
            details,
        }
    }
}

pub struct ReplayVerifier<R, A> {
    replays: R,
    authority: A,
}

impl<R: ReplayProvider, A: AuthorityProvider> ReplayVerifier<R, A> {
    pub fn new(replays: R, authority: A) -> Self {
        Self { replays, authority }
    }

    pub async fn verify(&self, match_id: &str) -> VerificationResult {
        // Gate 1: replay fetch.
        let doc = match self.replays.fetch_replay(match_id).await {
            Ok(Some(doc)) => doc,
            Ok(None) => {
                tracing::info!(match_id, "no replay recorded");
                return VerificationResult::failed(
                    match_id,
                    MismatchKind::MissingReplay,
                    vec!["no replay recorded for this match".into()],
                );
            }
            Err(err) => {
                tracing::warn!(match_id, error = %err, "replay fetch failed");
                return VerificationResult::failed(
                    match_id,
                    MismatchKind::VerificationError,
                    vec![format!("replay fetch failed: {err}")],
                );
            }
        };

        // Gate 2: local hash over the ordered input stream.
        let computed = doc.compute_hash();

        // Gate 3: authoritative hash from the source of truth.
        let authoritative = match self.authority.fetch_hash(match_id).await {
            Ok(hash) => hash,
            Err(err) => {
                tracing::warn!(match_id, error = %err, "authoritative hash fetch failed");
                let mut result = VerificationResult::failed(
                    match_id,
                    MismatchKind::VerificationError,
                    vec![format!("authoritative hash fetch failed: {err}")],
                );
                result.computed_hash = Some(computed);
                return result;
            }
        };

        // Gate 4: hash equality.
        if computed != authoritative {
            tracing::info!(match_id, "hash mismatch");
            return VerificationResult {
                match_id: match_id.to_string(),
                valid: false,
                computed_hash: Some(computed),
                authoritative_hash: Some(authoritative),
                mismatch: Some(MismatchKind::HashMismatch),
                details: vec!["computed hash does not match authoritative hash".into()],
            };
        }

        // Gate 5: input integrity.
        let integrity = input_integrity(&doc);
        if !integrity.is_empty() {
            let mut result =
                VerificationResult::failed(match_id, MismatchKind::InvalidInputs, integrity);
            result.computed_hash = Some(computed);
            result.authoritative_hash = Some(authoritative);
            return result;
        }

        // Gate 6: fraud heuristics.
        let flags = fraud_heuristics(&doc);
        if !flags.is_empty() {
            let mut result =
                VerificationResult::failed(match_id, MismatchKind::FraudDetected, flags);
            result.computed_hash = Some(computed);
            result.authoritative_hash = Some(authoritative);
            return result;
        }

        VerificationResult {
            match_id: match_id.to_string(),
            valid: true,
            computed_hash: Some(computed),
            authoritative_hash: Some(authoritative),
            mismatch: None,
            details: Vec::new(),
        }
    }
}

/// Structural checks on the recorded streams: strictly increasing
/// timestamps per stream, ticks inside the match ceiling, and the same
/// per-action parameter bounds the admission gate enforces live.
fn input_integrity(doc: &ReplayDocument) -> Vec<String> {
    let mut details = Vec::new();
    for (label, stream) in [("home", &doc.home_inputs), ("away", &doc.away_inputs)] {
        for pair in stream.windows(2) {
            if pair[1].timestamp_ms <= pair[0].timestamp_ms {
                details.push(format!(
                    "{label} stream: timestamp {} not after {}",
                    pair[1].timestamp_ms, pair[0].timestamp_ms
                ));
            }
        }
        for input in stream.iter() {
            if input.tick > MAX_MATCH_TICKS {
                details.push(format!(
                    "{label} stream: tick {} beyond match ceiling",
                    input.tick
                ));
            }
            if !input.action.params_in_range() {
                details.push(format!(
                    "{label} stream: out-of-range parameters on tick {}",
                    input.tick
                ));
            }
        }
    }
    details
}

/// Statistical plausibility of the declared result against its own stream.
/// A trigger is suspicion, not proof.
fn fraud_heuristics(doc: &ReplayDocument) -> Vec<String> {
    let mut flags = Vec::new();

    for (label, goals) in [("home", doc.score.home), ("away", doc.score.away)] {
        if goals > MAX_PLAUSIBLE_GOALS {
            flags.push(format!("{label} goal count {goals} implausible"));
        }
    }

    if doc.duration_minutes < MIN_DURATION_MIN || doc.duration_minutes > MAX_DURATION_MIN {
        flags.push(format!(
            "declared duration {} min outside [{MIN_DURATION_MIN}, {MAX_DURATION_MIN}]",
            doc.duration_minutes
        ));
    }

    let expected = f64::from(doc.duration_minutes) * EXPECTED_INPUTS_PER_MIN;
    let count = doc.input_count();
    if (count as f64) < expected * MIN_INPUT_FRACTION {
        flags.push(format!(
            "only {count} inputs recorded for {} declared minutes",
            doc.duration_minutes
        ));
    }

    let mut timestamps: Vec<u64> = doc.ordered_inputs().map(|i| i.timestamp_ms).collect();
    timestamps.sort_unstable();
    let unique_before = timestamps.len();
    timestamps.dedup();
    if timestamps.len() != unique_before {
        flags.push(format!(
            "{} duplicate input timestamps",
            unique_before - timestamps.len()
        ));
    }

    if timestamps.len() >= 3 {
        let gaps: Vec<f64> = timestamps.windows(2).map(|w| (w[1] - w[0]) as f64).collect();
        let mean = gaps.iter().sum::<f64>() / gaps.len() as f64;
        if mean > 0.0 {
            let variance =
                gaps.iter().map(|g| (g - mean).powi(2)).sum::<f64>() / gaps.len() as f64;
            let std_dev = variance.sqrt();
            if std_dev > BURSTINESS_LIMIT * mean {
                flags.push(format!(
                    "bursty input timing: gap stddev {std_dev:.1}ms vs mean {mean:.1}ms"
                ));
            }
        }
    }

    flags
}
