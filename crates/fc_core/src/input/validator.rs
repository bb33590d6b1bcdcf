//! Tick-based input admission gate.
//!
//! One validator per match. Every input passes the full check ladder before
//! it may touch simulation state or the replay log: timestamp window, tick
//! monotonicity and range, parameter bounds, rate limiting, and a
//! too-regular-to-be-human cadence heuristic.
//!
//! Rejection is silent toward the simulation - the input is dropped, never
//! retried - but each rejection feeds the player's suspicion counter, and
//! crossing the escalation threshold raises a one-shot signal for the
//! caller. What to do with a flagged player (disconnect, review) is not
//! this module's decision.

use std::collections::{BTreeMap, VecDeque};

use crate::engine::state::PlayerId;

use super::types::{PlayerInput, MAX_MATCH_TICKS};

/// Inputs older than this (or newer than `now`) are rejected.
const ADMISSION_WINDOW_MS: u64 = 200;
/// Rolling rate-limit window.
const RATE_WINDOW_MS: u64 = 100;
/// Maximum accepted inputs inside one rate window.
const RATE_LIMIT: usize = 10;
/// Minimum gap count before the cadence heuristic can fire.
const PATTERN_MIN_GAPS: usize = 4;
/// Stored trailing gaps considered by the cadence heuristic.
const PATTERN_GAP_WINDOW: usize = 5;
/// All gaps within this distance of their mean reads as scripted input.
const PATTERN_TOLERANCE_MS: f64 = 3.0;
/// Rejections before the escalation signal fires.
const SUSPICION_ESCALATION: u32 = 5;

/// Why an input was dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// Player was never registered with this match.
    UnknownPlayer,
    /// Timestamp older than the admission window.
    Stale,
    /// Timestamp ahead of the server clock.
    FutureDated,
    /// Tick not strictly greater than the last accepted tick.
    TickNotMonotonic,
    /// Tick beyond the match's maximum.
    TickOutOfRange,
    /// Action parameters outside their allowed ranges.
    ParamsOutOfRange,
    /// More than the allowed inputs in the rolling window.
    RateLimited,
    /// Inter-arrival cadence too regular to be human.
    TooRegular,
}

/// Outcome of one admission attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    Accepted,
    Rejected {
        reason: RejectReason,
        /// True exactly once, on the rejection that crosses the suspicion
        /// threshold for this player.
        escalated: bool,
    },
}

impl Admission {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Admission::Accepted)
    }
}

/// Per-player admission state. Owned by the validator arena, created on
/// join and evicted on match end - never ambient.
#[derive(Debug, Default)]
struct PlayerGate {
    last_tick: Option<u64>,
    last_accepted_ts: Option<u64>,
    /// Acceptance timestamps inside the rate window.
    window: VecDeque<u64>,
    /// Trailing inter-arrival gaps between accepted inputs.
    gaps: VecDeque<u64>,
    suspicion: u32,
}

pub struct InputValidator {
    max_tick: u64,
    gates: BTreeMap<PlayerId, PlayerGate>,
}

impl Default for InputValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl InputValidator {
    pub fn new() -> Self {
        Self::with_max_tick(MAX_MATCH_TICKS)
    }

    /// Gate with a custom tick ceiling (shorter match formats).
    pub fn with_max_tick(max_tick: u64) -> Self {
        Self { max_tick, gates: BTreeMap::new() }
    }

    /// Create the admission record for a joining player.
    pub fn register_player(&mut self, player: PlayerId) {
        self.gates.entry(player).or_default();
    }

    /// Evict a player's record (match end or ejection).
    pub fn remove_player(&mut self, player: PlayerId) {
        self.gates.remove(&player);
    }

    /// Accumulated rejection count for a player.
    pub fn suspicion(&self, player: PlayerId) -> u32 {
        self.gates.get(&player).map(|g| g.suspicion).unwrap_or(0)
    }

    /// Whether the player has crossed the escalation threshold.
    pub fn is_flagged(&self, player: PlayerId) -> bool {
        self.suspicion(player) >= SUSPICION_ESCALATION
    }

    /// Run the full check ladder on one input. `now_ms` is the server
    /// clock, injected so admission stays deterministic under test and
    /// replay.
    pub fn admit(&mut self, input: &PlayerInput, now_ms: u64) -> Admission {
        let max_tick = self.max_tick;
        let Some(gate) = self.gates.get_mut(&input.player) else {
            log::debug!("input from unregistered player {}", input.player);
            return Admission::Rejected { reason: RejectReason::UnknownPlayer, escalated: false };
        };

        if input.timestamp_ms > now_ms {
            return Self::reject(gate, input.player, RejectReason::FutureDated);
        }
        if input.timestamp_ms < now_ms.saturating_sub(ADMISSION_WINDOW_MS) {
            return Self::reject(gate, input.player, RejectReason::Stale);
        }

        if gate.last_tick.is_some_and(|last| input.tick <= last) {
            return Self::reject(gate, input.player, RejectReason::TickNotMonotonic);
        }
        if input.tick > max_tick {
            return Self::reject(gate, input.player, RejectReason::TickOutOfRange);
        }

        if !input.action.params_in_range() {
            return Self::reject(gate, input.player, RejectReason::ParamsOutOfRange);
        }

        // Rolling rate limit over acceptance timestamps.
        let ts = input.timestamp_ms;
        while let Some(&front) = gate.window.front() {
            if ts.saturating_sub(front) >= RATE_WINDOW_MS {
                gate.window.pop_front();
            } else {
                break;
            }
        }
        if gate.window.len() >= RATE_LIMIT {
            return Self::reject(gate, input.player, RejectReason::RateLimited);
        }

        // Cadence heuristic over the trailing accepted gaps plus this
        // candidate's gap. Evaluating the candidate too means one irregular
        // input unsticks the gate instead of rejecting forever.
        let candidate_gap = gate.last_accepted_ts.map(|last| ts.saturating_sub(last));
        if let Some(gap) = candidate_gap {
            if gate.gaps.len() + 1 >= PATTERN_MIN_GAPS && too_regular(&gate.gaps, gap) {
                return Self::reject(gate, input.player, RejectReason::TooRegular);
            }
        }

        // Accepted: update the gate.
        gate.last_tick = Some(input.tick);
        gate.last_accepted_ts = Some(ts);
        gate.window.push_back(ts);
        if let Some(gap) = candidate_gap {
            gate.gaps.push_back(gap);
            while gate.gaps.len() > PATTERN_GAP_WINDOW {
                gate.gaps.pop_front();
            }
        }
        Admission::Accepted
    }

    fn reject(gate: &mut PlayerGate, player: PlayerId, reason: RejectReason) -> Admission {
        gate.suspicion = gate.suspicion.saturating_add(1);
        let escalated = gate.suspicion == SUSPICION_ESCALATION;
        if escalated {
            log::warn!("player {player} crossed suspicion threshold ({reason:?})");
        } else {
            log::debug!("dropped input from player {player}: {reason:?}");
        }
        Admission::Rejected { reason, escalated }
    }
}

/// All gaps (stored plus candidate) within tolerance of their mean.
fn too_regular(stored: &VecDeque<u64>, candidate: u64) -> bool {
    let count = stored.len() + 1;
    let sum: u64 = stored.iter().sum::<u64>() + candidate;
    let mean = sum as f64 / count as f64;
    stored
        .iter()
        .chain(std::iter::once(&candidate))
        .all(|&g| (g as f64 - mean).abs() <= PATTERN_TOLERANCE_MS)
}
