//! Player input wire types.
//!
//! `PlayerAction` is a closed tagged union: every action carries exactly the
//! parameters it needs, so parameter validation is exhaustive over the enum
//! and a malformed "parameter bag" cannot be represented at all.

use serde::{Deserialize, Serialize};

use crate::engine::state::PlayerId;

/// Inputs per second a match accepts at most (the tick rate).
pub const TICK_RATE_HZ: u32 = 60;

/// Hard ceiling on a match's tick index: 30 minutes at 60 Hz.
pub const MAX_MATCH_TICKS: u64 = 108_000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum PlayerAction {
    /// Directional movement, both axes in [-1, 1].
    Move { x: f32, y: f32 },
    /// Pass with power in [0, 100].
    Pass { power: f32 },
    /// Shot with power in [0, 100].
    Shoot { power: f32 },
    /// Challenge a specific opponent.
    Tackle { target: PlayerId },
    /// Burst of speed. No parameters.
    Sprint,
    /// Trigger a skill by content id (must be non-empty).
    Skill { skill: String },
}

impl PlayerAction {
    /// Parameter range check shared by the admission gate and the replay
    /// verifier's input-integrity gate. Structure is already guaranteed by
    /// the enum; this covers the numeric and emptiness bounds.
    pub fn params_in_range(&self) -> bool {
        match self {
            PlayerAction::Move { x, y } => {
                x.is_finite() && y.is_finite() && (-1.0..=1.0).contains(x) && (-1.0..=1.0).contains(y)
            }
            PlayerAction::Pass { power } | PlayerAction::Shoot { power } => {
                power.is_finite() && (0.0..=100.0).contains(power)
            }
            PlayerAction::Tackle { .. } => true,
            PlayerAction::Sprint => true,
            PlayerAction::Skill { skill } => !skill.is_empty(),
        }
    }
}

/// One client input. Becomes part of the immutable replay stream only once
/// the admission gate accepts it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerInput {
    pub player: PlayerId,
    /// Simulation tick the input targets. Strictly increasing per player.
    pub tick: u64,
    /// Client wall-clock, milliseconds.
    pub timestamp_ms: u64,
    #[serde(flatten)]
    pub action: PlayerAction,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_params_in_range() {
        assert!(PlayerAction::Move { x: 1.0, y: -1.0 }.params_in_range());
        assert!(!PlayerAction::Move { x: 1.1, y: 0.0 }.params_in_range());
        assert!(!PlayerAction::Move { x: f32::NAN, y: 0.0 }.params_in_range());
        assert!(PlayerAction::Pass { power: 100.0 }.params_in_range());
        assert!(!PlayerAction::Shoot { power: -0.1 }.params_in_range());
        assert!(PlayerAction::Sprint.params_in_range());
        assert!(!PlayerAction::Skill { skill: String::new() }.params_in_range());
    }

    #[test]
    fn test_action_serde_tagging() {
        let input = PlayerInput {
            player: 9,
            tick: 120,
            timestamp_ms: 2_000,
            action: PlayerAction::Shoot { power: 80.0 },
        };
        let json = serde_json::to_string(&input).unwrap();
        assert!(json.contains("\"action\":\"shoot\""));
        let back: PlayerInput = serde_json::from_str(&json).unwrap();
        assert_eq!(back, input);
    }
}
