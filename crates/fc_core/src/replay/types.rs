//! Finalized match artifacts.
//!
//! `MatchResult` is the unit submitted for validation and on-chain
//! recording; `ReplayDocument` is the artifact a third party needs to
//! reproduce the result hash bit-for-bit. Both are immutable once built.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::engine::events::CollisionEvent;
use crate::engine::state::PlayerId;
use crate::input::types::PlayerInput;

use super::hash::compute_result_hash;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TeamSide {
    Home,
    Away,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Score {
    pub home: u32,
    pub away: u32,
}

impl Score {
    pub fn total(&self) -> u32 {
        self.home + self.away
    }

    pub fn for_side(&self, side: TeamSide) -> u32 {
        match side {
            TeamSide::Home => self.home,
            TeamSide::Away => self.away,
        }
    }
}

/// Box-score line for one player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerMatchStats {
    pub player: PlayerId,
    pub team: TeamSide,
    pub goals: u32,
    pub assists: u32,
}

/// Finalized match outcome. Built exactly once at match end and immutable
/// afterwards; the hash covers (seed, engine version, ordered inputs).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub match_id: String,
    pub seed: u64,
    pub engine_version: String,
    pub score: Score,
    pub duration_minutes: u32,
    pub player_stats: Vec<PlayerMatchStats>,
    pub home_inputs: Vec<PlayerInput>,
    pub away_inputs: Vec<PlayerInput>,
    pub played_at: DateTime<Utc>,
    pub result_hash: String,
}

impl MatchResult {
    /// Accepted inputs in canonical hash order: home stream, then away.
    pub fn ordered_inputs(&self) -> impl Iterator<Item = &PlayerInput> {
        self.home_inputs.iter().chain(self.away_inputs.iter())
    }

    /// Recompute the result hash from the recorded streams.
    pub fn compute_hash(&self) -> String {
        compute_result_hash(self.seed, &self.engine_version, self.ordered_inputs())
    }

    pub fn stats_for(&self, player: PlayerId) -> Option<&PlayerMatchStats> {
        self.player_stats.iter().find(|s| s.player == player)
    }
}

/// The persisted replay: declared outcome plus everything needed to verify
/// it - the accepted input streams and the per-tick collision log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplayDocument {
    pub match_id: String,
    pub seed: u64,
    pub engine_version: String,
    pub score: Score,
    pub duration_minutes: u32,
    pub home_inputs: Vec<PlayerInput>,
    pub away_inputs: Vec<PlayerInput>,
    pub events: Vec<CollisionEvent>,
}

impl ReplayDocument {
    pub fn ordered_inputs(&self) -> impl Iterator<Item = &PlayerInput> {
        self.home_inputs.iter().chain(self.away_inputs.iter())
    }

    pub fn input_count(&self) -> usize {
        self.home_inputs.len() + self.away_inputs.len()
    }

    pub fn compute_hash(&self) -> String {
        compute_result_hash(self.seed, &self.engine_version, self.ordered_inputs())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::types::PlayerAction;

    fn sample_result() -> MatchResult {
        MatchResult {
            match_id: "m-1".into(),
            seed: 42,
            engine_version: "0.1.0".into(),
            score: Score { home: 2, away: 1 },
            duration_minutes: 90,
            player_stats: vec![PlayerMatchStats {
                player: 1,
                team: TeamSide::Home,
                goals: 2,
                assists: 0,
            }],
            home_inputs: vec![PlayerInput {
                player: 1,
                tick: 1,
                timestamp_ms: 100,
                action: PlayerAction::Sprint,
            }],
            away_inputs: vec![PlayerInput {
                player: 2,
                tick: 1,
                timestamp_ms: 120,
                action: PlayerAction::Move { x: 0.5, y: 0.0 },
            }],
            played_at: DateTime::<Utc>::from_timestamp(1_700_000_000, 0).unwrap(),
            result_hash: String::new(),
        }
    }

    #[test]
    fn test_ordered_inputs_home_then_away() {
        let result = sample_result();
        let players: Vec<_> = result.ordered_inputs().map(|i| i.player).collect();
        assert_eq!(players, vec![1, 2]);
    }

    #[test]
    fn test_result_roundtrips_through_json() {
        let result = sample_result();
        let json = serde_json::to_string(&result).unwrap();
        let back: MatchResult = serde_json::from_str(&json).unwrap();
        assert_eq!(back, result);
        // A third party parsing the JSON reproduces the same hash.
        assert_eq!(back.compute_hash(), result.compute_hash());
    }
}
