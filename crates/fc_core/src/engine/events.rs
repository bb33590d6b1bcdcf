//! Collision and discipline events.
//!
//! `CollisionEvent` is the persisted replay artifact: one entry per collided
//! pair per tick, enough to replay and dispute a match without the live
//! state. Foul events feed the card system via `DisciplineRecord`.

use serde::{Deserialize, Serialize};

use super::state::PlayerId;
use super::vector::Vec2;

/// Which shapes met.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollisionKind {
    PlayerBall,
    PlayerPlayer,
}

/// Foul classification from a player-player impact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FoulType {
    /// Challenge from outside the forward cone with meaningful force.
    Tackle,
    /// Heavy body contact above the force threshold.
    Collision,
    /// Impact above 1.5x the force threshold. Straight red.
    DangerousPlay,
}

/// Card color for discipline bookkeeping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardType {
    Yellow,
    Red,
}

impl FoulType {
    /// Card issued for this foul.
    pub fn card(self) -> CardType {
        match self {
            FoulType::Tackle | FoulType::Collision => CardType::Yellow,
            FoulType::DangerousPlay => CardType::Red,
        }
    }
}

/// One collided pair, one tick. Appended to the replay log in detection order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollisionEvent {
    pub tick: u64,
    pub kind: CollisionKind,
    /// First involved player (the capsule owner for player-ball).
    pub player: PlayerId,
    /// Second player for player-player contacts; `None` means the ball.
    pub other: Option<PlayerId>,
    pub contact_point: Vec2,
    /// Unit normal pointing from `player` toward the second body.
    pub normal: Vec2,
    /// Raw impulse magnitude (uncapped). Zero for player-ball contacts.
    pub impulse: f32,
    pub foul: Option<FoulType>,
}

/// Outbound discipline record derived from a foul event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisciplineRecord {
    pub player: PlayerId,
    pub foul: FoulType,
    pub card: CardType,
    /// True when this record ends the player's match.
    pub ejected: bool,
}
