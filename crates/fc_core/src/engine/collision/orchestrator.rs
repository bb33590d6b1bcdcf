//! Per-tick collision driver.
//!
//! The orchestrator owns the append-only collision log and runs the fixed
//! per-tick sweep: player-ball pairs first, then player-player pairs, both
//! in ascending player-id order. Pair order is pinned explicitly - replay
//! reproduction across implementations depends on it, so it is never left
//! to incidental container iteration.
//!
//! Each tick runs `resolution_passes` passes over the full collision set.
//! Later passes only separate; the momentum exchange and the logged event
//! happen the first time a pair is seen in the tick.

use std::collections::BTreeSet;

use crate::engine::events::{CollisionEvent, CollisionKind};
use crate::engine::state::{BallState, PlayerId, PlayerState};
use crate::error::ConfigError;

use super::config::CollisionConfig;
use super::detector::{detect_player_ball, detect_player_player};
use super::resolver::{resolve_player_ball, resolve_player_player};

pub struct CollisionOrchestrator {
    config: CollisionConfig,
    log: Vec<CollisionEvent>,
}

impl CollisionOrchestrator {
    /// Build the orchestrator, rejecting a bad config up front. This is the
    /// only fallible step; `step` itself never fails.
    pub fn new(config: CollisionConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config, log: Vec::new() })
    }

    pub fn config(&self) -> &CollisionConfig {
        &self.config
    }

    /// Collision events accumulated since match start, in emission order.
    pub fn replay_log(&self) -> &[CollisionEvent] {
        &self.log
    }

    /// Consume the orchestrator, yielding the full collision log.
    pub fn into_log(self) -> Vec<CollisionEvent> {
        self.log
    }

    /// Run one simulation tick over `players` (sorted by ascending id) and
    /// the ball. Returns the events emitted this tick; the same events are
    /// appended to the replay log.
    pub fn step(
        &mut self,
        tick: u64,
        players: &mut [PlayerState],
        ball: &mut BallState,
    ) -> Vec<CollisionEvent> {
        debug_assert!(
            players.windows(2).all(|w| w[0].id < w[1].id),
            "players must be sorted by id"
        );

        let mut events: Vec<CollisionEvent> = Vec::new();
        let mut seen: BTreeSet<(PlayerId, Option<PlayerId>)> = BTreeSet::new();

        for _pass in 0..self.config.resolution_passes {
            // Player vs ball, O(n).
            for player in players.iter_mut() {
                if let Some(hit) = detect_player_ball(player, ball, &self.config) {
                    resolve_player_ball(player, ball, &hit);
                    if seen.insert((player.id, None)) {
                        events.push(CollisionEvent {
                            tick,
                            kind: CollisionKind::PlayerBall,
                            player: player.id,
                            other: None,
                            contact_point: hit.contact.point,
                            normal: hit.contact.normal,
                            impulse: 0.0,
                            foul: None,
                        });
                    }
                }
            }

            // Player vs player, O(n^2), first-by-id against later-by-id.
            for i in 0..players.len() {
                for j in (i + 1)..players.len() {
                    let (left, right) = players.split_at_mut(j);
                    let first = &mut left[i];
                    let second = &mut right[0];
                    if let Some(hit) = detect_player_player(first, second, &self.config) {
                        let fresh_pair = seen.insert((first.id, Some(second.id)));
                        resolve_player_player(first, second, &hit, fresh_pair);
                        if fresh_pair {
                            if let Some(foul) = hit.foul {
                                log::info!(
                                    "tick {tick}: foul {foul:?} between {} and {} (impulse {:.2})",
                                    first.id,
                                    second.id,
                                    hit.impulse
                                );
                            }
                            events.push(CollisionEvent {
                                tick,
                                kind: CollisionKind::PlayerPlayer,
                                player: first.id,
                                other: Some(second.id),
                                contact_point: hit.contact.point,
                                normal: hit.contact.normal,
                                impulse: hit.impulse,
                                foul: hit.foul,
                            });
                        }
                    }
                }
            }
        }

        // Keep everything on the pitch after resolution.
        let bounds = self.config.field_bounds;
        for player in players.iter_mut() {
            player.position = player.position.clamp_components(bounds);
        }
        ball.position = ball.position.clamp_components(bounds);

        self.log.extend(events.iter().cloned());
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::events::FoulType;
    use crate::engine::vector::Vec2;

    fn roster(positions: &[(u32, f32, f32)]) -> Vec<PlayerState> {
        positions
            .iter()
            .map(|&(id, x, y)| PlayerState::new(id, Vec2::new(x, y)))
            .collect()
    }

    #[test]
    fn test_one_event_per_pair_per_tick() {
        let mut orchestrator = CollisionOrchestrator::new(CollisionConfig::default()).unwrap();
        let mut players = roster(&[(1, 10.0, 10.0), (2, 10.4, 10.0)]);
        players[0].velocity = Vec2::new(3.0, 0.0);
        players[1].velocity = Vec2::new(-3.0, 0.0);
        let mut ball = BallState::new(Vec2::new(10.2, 10.0));

        let events = orchestrator.step(0, &mut players, &mut ball);
        let pair_events: Vec<_> = events
            .iter()
            .filter(|e| e.kind == CollisionKind::PlayerPlayer)
            .collect();
        assert_eq!(pair_events.len(), 1, "3 passes must still emit one pair event");
        assert_eq!(orchestrator.replay_log().len(), events.len());
    }

    #[test]
    fn test_penetration_within_tolerance_after_step() {
        let config = CollisionConfig::default();
        let mut orchestrator = CollisionOrchestrator::new(config.clone()).unwrap();
        let mut players = roster(&[(1, 10.0, 10.0), (2, 10.1, 10.0)]);
        players[0].velocity = Vec2::new(1.0, 0.0);
        players[1].velocity = Vec2::new(-1.0, 0.0);
        let mut ball = BallState::new(Vec2::new(20.0, 10.0));
        orchestrator.step(0, &mut players, &mut ball);

        let gap = players[0].position.distance(players[1].position);
        let overlap = (config.player_radius * 2.0 - gap).max(0.0);
        assert!(
            overlap <= config.penetration_tolerance,
            "players still overlap by {overlap}"
        );
    }

    #[test]
    fn test_foul_recorded_in_log() {
        let mut orchestrator = CollisionOrchestrator::new(CollisionConfig::default()).unwrap();
        let mut players = roster(&[(1, 10.0, 10.0), (2, 10.5, 10.0)]);
        players[0].velocity = Vec2::new(20.0, 0.0);
        players[1].velocity = Vec2::new(-20.0, 0.0);
        let mut ball = BallState::new(Vec2::new(50.0, 34.0));
        let events = orchestrator.step(7, &mut players, &mut ball);
        let foul = events.iter().find(|e| e.foul.is_some()).expect("foul event");
        assert_eq!(foul.foul, Some(FoulType::DangerousPlay));
        assert_eq!(foul.tick, 7);
    }

    #[test]
    fn test_positions_clamped_to_field() {
        let mut orchestrator = CollisionOrchestrator::new(CollisionConfig::default()).unwrap();
        let mut players = roster(&[(1, 0.1, 0.1)]);
        let mut ball = BallState::new(Vec2::new(-1.0, 200.0));
        orchestrator.step(0, &mut players, &mut ball);
        assert!(ball.position.x >= 0.0 && ball.position.y <= 68.0);
    }

    #[test]
    fn test_identical_inputs_identical_event_sequence() {
        let run = || {
            let mut orchestrator =
                CollisionOrchestrator::new(CollisionConfig::default()).unwrap();
            let mut players = roster(&[(1, 10.0, 10.0), (2, 10.5, 10.0), (3, 10.3, 10.3)]);
            players[0].velocity = Vec2::new(6.0, 0.0);
            players[1].velocity = Vec2::new(-6.0, 0.0);
            players[2].velocity = Vec2::new(0.0, -4.0);
            let mut ball = BallState::new(Vec2::new(10.2, 10.1));
            let mut all = Vec::new();
            for tick in 0..10 {
                all.extend(orchestrator.step(tick, &mut players, &mut ball));
            }
            all
        };
        assert_eq!(run(), run());
    }
}
