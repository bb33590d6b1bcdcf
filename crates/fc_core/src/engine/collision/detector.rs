//! Pure geometry tests: capsule-vs-circle and circle-vs-circle.
//!
//! Both detectors are side-effect free; they read states and a config and
//! return `Option<Contact>`-shaped data. The resolver and orchestrator own
//! all mutation.
//!
//! Two policies live here deliberately:
//! - a player-player overlap only counts as a collision while the pair is
//!   *closing* (relative velocity projected onto the normal is negative);
//!   bodies already separating are left to drift apart, so the resolver
//!   never fights players moving away from each other.
//! - the foul classification compares the *raw* impulse magnitude against
//!   the force threshold, even though the momentum actually exchanged is
//!   capped. The two quantities are independent.

use crate::engine::state::{BallState, PlayerState};
use crate::engine::vector::Vec2;

use super::config::CollisionConfig;
use crate::engine::events::FoulType;

/// Shared contact geometry for both collision kinds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// Overlap depth, strictly positive for a reported collision.
    pub penetration: f32,
    pub point: Vec2,
    /// Unit normal from the first body toward the second.
    pub normal: Vec2,
}

/// Player capsule vs ball circle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerBallContact {
    pub contact: Contact,
}

/// Player circle vs player circle, with impulse and foul annotations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerPlayerContact {
    pub contact: Contact,
    /// Raw impulse magnitude from the closing velocity. Uncapped.
    pub impulse: f32,
    /// Momentum exchanged along the normal, magnitude capped by config.
    pub momentum_transfer: Vec2,
    pub foul: Option<FoulType>,
}

/// Capsule-vs-circle test for a player against the ball.
///
/// The ball's vertical coordinate is clamped to the capsule's vertical
/// extent to find the closest point on the capsule axis; the planar
/// distance from that point decides the overlap. When the centers coincide
/// exactly the normal falls back to straight up - a tie-break to avoid
/// dividing by zero, not a physical direction.
pub fn detect_player_ball(
    player: &PlayerState,
    ball: &BallState,
    config: &CollisionConfig,
) -> Option<PlayerBallContact> {
    let clamped_y = ball.position.y.clamp(
        player.position.y - config.capsule_half_height,
        player.position.y + config.capsule_half_height,
    );
    let axis_point = Vec2::new(player.position.x, clamped_y);
    let offset = ball.position - axis_point;
    let distance = offset.length();
    let combined = config.player_radius + config.ball_radius;
    if distance >= combined {
        return None;
    }
    let normal = offset.normalized_or(Vec2::UP);
    Some(PlayerBallContact {
        contact: Contact {
            penetration: combined - distance,
            point: axis_point + normal * config.player_radius,
            normal,
        },
    })
}

/// Circle-vs-circle test between two players.
///
/// Overlap alone is not enough: the pair must also be closing along the
/// contact normal. `first` is treated as the attacker for the foul cone and
/// `second` as the challenger.
pub fn detect_player_player(
    first: &PlayerState,
    second: &PlayerState,
    config: &CollisionConfig,
) -> Option<PlayerPlayerContact> {
    let offset = second.position - first.position;
    let distance = offset.length();
    let combined = config.player_radius * 2.0;
    if distance >= combined {
        return None;
    }
    let normal = offset.normalized_or(Vec2::UP);

    let relative_velocity = second.velocity - first.velocity;
    let closing = relative_velocity.dot(normal);
    if closing >= 0.0 {
        // Overlapping but separating: not a collision.
        return None;
    }
    let closing_speed = -closing;
    let impulse = closing_speed * (1.0 + config.restitution) * 0.5;
    // Raw impulse is non-negative here because the closing check already
    // passed, so the unsigned min is safe.
    let momentum_transfer = normal * impulse.min(config.momentum_cap);

    Some(PlayerPlayerContact {
        contact: Contact {
            penetration: combined - distance,
            point: first.position + normal * config.player_radius,
            normal,
        },
        impulse,
        momentum_transfer,
        foul: classify_foul(first, normal, impulse, config),
    })
}

/// Foul classification for a reported player-player collision.
///
/// Ordered by severity: dangerous play above 1.5x the threshold, then a
/// tackle when the challenger comes from outside the attacker's forward
/// cone with at least 0.7x the threshold, then plain heavy contact above
/// the full threshold.
fn classify_foul(
    attacker: &PlayerState,
    normal: Vec2,
    impulse: f32,
    config: &CollisionConfig,
) -> Option<FoulType> {
    let threshold = config.foul_force_threshold;
    if impulse > threshold * 1.5 {
        return Some(FoulType::DangerousPlay);
    }
    if outside_forward_cone(attacker, normal, config) && impulse > threshold * 0.7 {
        return Some(FoulType::Tackle);
    }
    if impulse > threshold {
        return Some(FoulType::Collision);
    }
    None
}

/// Whether the contact direction lies outside the attacker's forward cone.
///
/// A stationary attacker has no heading and therefore no cone; contact on a
/// standing player never reads as a from-behind tackle.
fn outside_forward_cone(attacker: &PlayerState, normal: Vec2, config: &CollisionConfig) -> bool {
    let speed = attacker.velocity.length();
    if speed <= f32::EPSILON {
        return false;
    }
    let heading = attacker.velocity * (1.0 / speed);
    let cone_cos = config.foul_contact_angle_deg.to_radians().cos();
    heading.dot(normal) < cone_cos
}
