//! Positional correction and momentum exchange for detected collisions.
//!
//! One separation step per call: each involved body moves half the
//! penetration plus a small epsilon along the contact normal. Converging to
//! near-zero penetration under stacked overlaps is the orchestrator's job,
//! which calls back in over several passes.

use crate::engine::state::{BallState, PlayerState};

use super::detector::{PlayerBallContact, PlayerPlayerContact};

/// Extra separation applied beyond half the penetration, to keep
/// floating-point residue from re-triggering the same contact next pass.
pub const SEPARATION_EPSILON: f32 = 1e-4;

/// Push a player and the ball apart along the contact normal.
pub fn resolve_player_ball(player: &mut PlayerState, ball: &mut BallState, hit: &PlayerBallContact) {
    let shift = hit.contact.penetration * 0.5 + SEPARATION_EPSILON;
    player.position -= hit.contact.normal * shift;
    ball.position += hit.contact.normal * shift;
}

/// Push two players apart symmetrically and, when requested, exchange the
/// capped momentum along the normal (equal-mass model: what one loses the
/// other gains).
///
/// `apply_momentum` is false on re-detections of a pair within the same
/// tick, so repeated resolution passes only separate and never multiply the
/// exchange.
pub fn resolve_player_player(
    first: &mut PlayerState,
    second: &mut PlayerState,
    hit: &PlayerPlayerContact,
    apply_momentum: bool,
) {
    let shift = hit.contact.penetration * 0.5 + SEPARATION_EPSILON;
    first.position -= hit.contact.normal * shift;
    second.position += hit.contact.normal * shift;

    if apply_momentum {
        // Transfer points from first toward second: first absorbs the
        // opposite of what second receives.
        first.velocity -= hit.momentum_transfer;
        second.velocity += hit.momentum_transfer;
    }
}
