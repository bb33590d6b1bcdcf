//! Collision tuning parameters.
//!
//! One `CollisionConfig` per match, validated once at construction and
//! immutable afterwards. A config that passes `validate()` can never make
//! the detector or resolver divide by zero or emit non-finite state, so the
//! tick path carries no error handling.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::Vec2;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollisionConfig {
    /// Planar radius of the player capsule, meters.
    pub player_radius: f32,
    /// Half-height of the capsule's vertical segment, meters.
    pub capsule_half_height: f32,
    /// Ball radius, meters.
    pub ball_radius: f32,
    /// Playable area; positions are clamped here after resolution.
    pub field_bounds: Vec2,
    /// Residual overlap allowed after all resolution passes.
    pub penetration_tolerance: f32,
    /// Upper bound on the momentum exchanged in one player-player contact.
    pub momentum_cap: f32,
    /// Impulse magnitude above which contact becomes a foul.
    pub foul_force_threshold: f32,
    /// Half-angle of the forward cone, degrees. Challenges from outside it
    /// classify as tackles at 0.7x the force threshold.
    pub foul_contact_angle_deg: f32,
    /// Restitution coefficient used in the impulse computation.
    pub restitution: f32,
    /// Resolution passes per tick before the tick is declared settled.
    pub resolution_passes: u32,
}

impl Default for CollisionConfig {
    fn default() -> Self {
        Self {
            player_radius: 0.4,
            capsule_half_height: 0.9,
            ball_radius: 0.11,
            field_bounds: Vec2::new(105.0, 68.0),
            penetration_tolerance: 0.01,
            momentum_cap: 10.0,
            foul_force_threshold: 25.0,
            foul_contact_angle_deg: 60.0,
            restitution: 0.9,
            resolution_passes: 3,
        }
    }
}

impl CollisionConfig {
    /// Reject a config the tick path could not survive. Called once when the
    /// orchestrator is built; a config failing here never reaches a match.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("player_radius", self.player_radius),
            ("capsule_half_height", self.capsule_half_height),
            ("ball_radius", self.ball_radius),
            ("field_bounds.x", self.field_bounds.x),
            ("field_bounds.y", self.field_bounds.y),
            ("penetration_tolerance", self.penetration_tolerance),
            ("momentum_cap", self.momentum_cap),
            ("foul_force_threshold", self.foul_force_threshold),
            ("foul_contact_angle_deg", self.foul_contact_angle_deg),
            ("restitution", self.restitution),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite { field, value });
            }
        }
        for (field, value) in [
            ("player_radius", self.player_radius),
            ("ball_radius", self.ball_radius),
            ("field_bounds.x", self.field_bounds.x),
            ("field_bounds.y", self.field_bounds.y),
            ("foul_force_threshold", self.foul_force_threshold),
        ] {
            if value <= 0.0 {
                return Err(ConfigError::NonPositive { field, value });
            }
        }
        for (field, value) in [
            ("capsule_half_height", self.capsule_half_height),
            ("penetration_tolerance", self.penetration_tolerance),
            ("momentum_cap", self.momentum_cap),
            ("restitution", self.restitution),
        ] {
            if value < 0.0 {
                return Err(ConfigError::Negative { field, value });
            }
        }
        if self.resolution_passes == 0 {
            return Err(ConfigError::NoResolutionPasses);
        }
        Ok(())
    }
}
