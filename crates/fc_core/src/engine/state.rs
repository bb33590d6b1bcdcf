//! Mutable per-match entity state.
//!
//! `PlayerState` and `BallState` are owned by the match session and mutated
//! only by the collision orchestrator and by discipline handling; nothing
//! else in the core writes to them.

use serde::{Deserialize, Serialize};

use super::vector::Vec2;

/// Player identifier, unique within a match.
pub type PlayerId = u32;

/// Skill attributes that feed into movement and duels (0-100 scale).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SkillAttributes {
    pub pace: f32,
    pub technique: f32,
    pub strength: f32,
}

impl Default for SkillAttributes {
    fn default() -> Self {
        Self { pace: 50.0, technique: 50.0, strength: 50.0 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerState {
    pub id: PlayerId,
    pub position: Vec2,
    pub velocity: Vec2,
    /// Remaining stamina, 0-100. Drained by sprinting.
    pub stamina: f32,
    pub attributes: SkillAttributes,
    pub yellow_cards: u8,
    pub red_cards: u8,
}

impl PlayerState {
    pub fn new(id: PlayerId, position: Vec2) -> Self {
        Self {
            id,
            position,
            velocity: Vec2::ZERO,
            stamina: 100.0,
            attributes: SkillAttributes::default(),
            yellow_cards: 0,
            red_cards: 0,
        }
    }

    pub fn with_attributes(mut self, attributes: SkillAttributes) -> Self {
        self.attributes = attributes;
        self
    }
}

/// The ball. One per match.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BallState {
    pub position: Vec2,
    pub velocity: Vec2,
}

impl BallState {
    pub fn new(position: Vec2) -> Self {
        Self { position, velocity: Vec2::ZERO }
    }
}
