//! Match session: the per-match owner of all mutable core state.
//!
//! One session per concurrent match; sessions share nothing. The caller
//! drives the fixed 60 Hz loop: feed inputs through `submit_input` (the
//! admission gate), call `advance_tick` once per tick, and `finalize` at
//! the end. A tick runs to completion synchronously - teardown and abort
//! are only observable at tick boundaries, so a partially resolved state
//! can never leak into the replay log.

use std::collections::BTreeMap;

use chrono::Utc;

use crate::engine::card_system::CardSystem;
use crate::engine::collision::{CollisionConfig, CollisionOrchestrator};
use crate::engine::events::{CardType, CollisionEvent, DisciplineRecord};
use crate::engine::state::{BallState, PlayerId, PlayerState};
use crate::engine::vector::Vec2;
use crate::error::ConfigError;
use crate::input::types::{PlayerAction, PlayerInput};
use crate::input::validator::{Admission, InputValidator};
use crate::replay::types::{MatchResult, PlayerMatchStats, ReplayDocument, Score, TeamSide};

/// Simulation step, seconds.
pub const TICK_DT: f32 = 1.0 / 60.0;

/// Walking-pace movement speed at 50 pace, m/s.
const BASE_MOVE_SPEED: f32 = 4.0;
const SPRINT_MULTIPLIER: f32 = 1.5;
/// Stamina cost per accepted sprint input.
const SPRINT_STAMINA_COST: f32 = 2.0;
/// A player must be this close to the ball to kick it.
const POSSESSION_RADIUS: f32 = 1.0;
/// Ball speed per unit of pass power, m/s.
const PASS_POWER_SCALE: f32 = 0.2;
const SHOOT_POWER_SCALE: f32 = 0.35;

/// What one tick produced.
#[derive(Debug, Clone)]
pub struct TickReport {
    pub tick: u64,
    pub events: Vec<CollisionEvent>,
    pub discipline: Vec<DisciplineRecord>,
}

pub struct MatchSession {
    match_id: String,
    seed: u64,
    tick: u64,
    players: Vec<PlayerState>,
    teams: BTreeMap<PlayerId, TeamSide>,
    ball: BallState,
    validator: InputValidator,
    orchestrator: CollisionOrchestrator,
    cards: CardSystem,
    /// Accepted inputs awaiting the next tick.
    pending: Vec<PlayerInput>,
    home_inputs: Vec<PlayerInput>,
    away_inputs: Vec<PlayerInput>,
}

impl MatchSession {
    pub fn new(
        match_id: impl Into<String>,
        seed: u64,
        config: CollisionConfig,
        home: &[PlayerId],
        away: &[PlayerId],
    ) -> Result<Self, ConfigError> {
        let orchestrator = CollisionOrchestrator::new(config)?;
        let bounds = orchestrator.config().field_bounds;

        let mut teams = BTreeMap::new();
        let mut validator = InputValidator::new();
        let mut players = Vec::with_capacity(home.len() + away.len());
        for (side, roster, base_x) in [
            (TeamSide::Home, home, bounds.x * 0.25),
            (TeamSide::Away, away, bounds.x * 0.75),
        ] {
            for (i, &id) in roster.iter().enumerate() {
                if teams.insert(id, side).is_some() {
                    return Err(ConfigError::DuplicatePlayer(id));
                }
                validator.register_player(id);
                // Deterministic kickoff layout: one column per team.
                let y = bounds.y * (i as f32 + 1.0) / (roster.len() as f32 + 1.0);
                players.push(PlayerState::new(id, Vec2::new(base_x, y)));
            }
        }
        players.sort_by_key(|p| p.id);

        Ok(Self {
            match_id: match_id.into(),
            seed,
            tick: 0,
            players,
            teams,
            ball: BallState::new(Vec2::new(bounds.x * 0.5, bounds.y * 0.5)),
            validator,
            orchestrator,
            cards: CardSystem::new(),
            pending: Vec::new(),
            home_inputs: Vec::new(),
            away_inputs: Vec::new(),
        })
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn players(&self) -> &[PlayerState] {
        &self.players
    }

    pub fn ball(&self) -> &BallState {
        &self.ball
    }

    pub fn validator(&self) -> &InputValidator {
        &self.validator
    }

    pub fn is_ejected(&self, player: PlayerId) -> bool {
        self.cards.is_ejected(player)
    }

    /// Gate one input. Accepted inputs join the replay stream and take
    /// effect on the next tick; rejected inputs vanish without a trace in
    /// the simulation.
    pub fn submit_input(&mut self, input: PlayerInput, now_ms: u64) -> Admission {
        let admission = self.validator.admit(&input, now_ms);
        if admission.is_accepted() {
            match self.teams.get(&input.player) {
                Some(TeamSide::Home) => self.home_inputs.push(input.clone()),
                Some(TeamSide::Away) => self.away_inputs.push(input.clone()),
                None => unreachable!("validator only admits registered players"),
            }
            self.pending.push(input);
        }
        admission
    }

    /// Run one simulation tick: apply pending inputs, integrate motion,
    /// resolve collisions, and translate fouls into discipline.
    pub fn advance_tick(&mut self) -> TickReport {
        let pending = std::mem::take(&mut self.pending);
        for input in &pending {
            self.apply_action(input);
        }

        for player in self.players.iter_mut() {
            player.position += player.velocity * TICK_DT;
        }
        self.ball.position += self.ball.velocity * TICK_DT;

        let events = self.orchestrator.step(self.tick, &mut self.players, &mut self.ball);

        let mut discipline = Vec::new();
        for event in &events {
            let (Some(offender), Some(foul)) = (event.other, event.foul) else {
                continue;
            };
            let record = self.cards.record_foul(offender, foul);
            if let Some(player) = self.players.iter_mut().find(|p| p.id == offender) {
                match record.card {
                    CardType::Yellow => player.yellow_cards = player.yellow_cards.saturating_add(1),
                    CardType::Red => player.red_cards = player.red_cards.saturating_add(1),
                }
            }
            if record.ejected {
                log::info!("player {offender} ejected at tick {}", self.tick);
                self.players.retain(|p| p.id != offender);
                self.validator.remove_player(offender);
            }
            discipline.push(record);
        }

        let report = TickReport { tick: self.tick, events, discipline };
        self.tick += 1;
        report
    }

    /// Seal the match: compute the result hash over the accepted streams
    /// and hand back the immutable result plus the replay artifact.
    pub fn finalize(
        self,
        score: Score,
        player_stats: Vec<PlayerMatchStats>,
        duration_minutes: u32,
    ) -> (MatchResult, ReplayDocument) {
        let engine_version = crate::VERSION.to_string();
        let result_hash = crate::replay::hash::compute_result_hash(
            self.seed,
            &engine_version,
            self.home_inputs.iter().chain(self.away_inputs.iter()),
        );
        let result = MatchResult {
            match_id: self.match_id.clone(),
            seed: self.seed,
            engine_version: engine_version.clone(),
            score,
            duration_minutes,
            player_stats,
            home_inputs: self.home_inputs.clone(),
            away_inputs: self.away_inputs.clone(),
            played_at: Utc::now(),
            result_hash: result_hash.clone(),
        };
        let replay = ReplayDocument {
            match_id: self.match_id,
            seed: self.seed,
            engine_version,
            score,
            duration_minutes,
            home_inputs: self.home_inputs,
            away_inputs: self.away_inputs,
            events: self.orchestrator.into_log(),
        };
        (result, replay)
    }

    fn apply_action(&mut self, input: &PlayerInput) {
        let Some(player) = self.players.iter_mut().find(|p| p.id == input.player) else {
            // Ejected between acceptance and the tick; input lapses.
            return;
        };
        match &input.action {
            PlayerAction::Move { x, y } => {
                let speed = BASE_MOVE_SPEED * (0.5 + player.attributes.pace / 100.0);
                player.velocity = Vec2::new(*x, *y).clamp_length(1.0) * speed;
            }
            PlayerAction::Sprint => {
                if player.stamina > 0.0 {
                    player.velocity = player.velocity * SPRINT_MULTIPLIER;
                    player.stamina = (player.stamina - SPRINT_STAMINA_COST).max(0.0);
                }
            }
            PlayerAction::Pass { power } => {
                Self::kick(player, &mut self.ball, *power * PASS_POWER_SCALE);
            }
            PlayerAction::Shoot { power } => {
                Self::kick(player, &mut self.ball, *power * SHOOT_POWER_SCALE);
            }
            // Tackles resolve through body contact; skills are a meta-layer
            // concern. Both are recorded in the stream but move nothing here.
            PlayerAction::Tackle { .. } | PlayerAction::Skill { .. } => {}
        }
    }

    fn kick(player: &PlayerState, ball: &mut BallState, speed: f32) {
        if player.position.distance(ball.position) > POSSESSION_RADIUS {
            return;
        }
        let direction = (ball.position - player.position).normalized_or(
            player.velocity.normalized_or(Vec2::UP),
        );
        ball.velocity = direction * speed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::types::PlayerAction;

    fn session() -> MatchSession {
        MatchSession::new("m-1", 42, CollisionConfig::default(), &[1, 2], &[10, 11]).unwrap()
    }

    fn move_input(player: PlayerId, tick: u64, ts: u64, x: f32) -> PlayerInput {
        PlayerInput { player, tick, timestamp_ms: ts, action: PlayerAction::Move { x, y: 0.0 } }
    }

    #[test]
    fn test_duplicate_roster_rejected() {
        let err = MatchSession::new("m", 1, CollisionConfig::default(), &[1, 2], &[2]);
        assert_eq!(err.err(), Some(ConfigError::DuplicatePlayer(2)));
    }

    #[test]
    fn test_accepted_input_moves_player() {
        let mut session = session();
        let x_before = session.players()[0].position.x;
        assert!(session.submit_input(move_input(1, 1, 1_000, 1.0), 1_000).is_accepted());
        session.advance_tick();
        assert!(session.players()[0].position.x > x_before);
    }

    #[test]
    fn test_rejected_input_never_reaches_simulation() {
        let mut session = session();
        let positions: Vec<_> = session.players().iter().map(|p| p.position).collect();
        // Stale timestamp: dropped before it can touch state.
        let admission = session.submit_input(move_input(1, 1, 0, 1.0), 10_000);
        assert!(!admission.is_accepted());
        session.advance_tick();
        let after: Vec<_> = session.players().iter().map(|p| p.position).collect();
        assert_eq!(positions, after);
        let (result, _) = session.finalize(Score::default(), Vec::new(), 90);
        assert!(result.home_inputs.is_empty(), "rejected input must not enter the stream");
    }

    #[test]
    fn test_sprint_drains_stamina() {
        let mut session = session();
        session.submit_input(move_input(1, 1, 1_000, 1.0), 1_000);
        session.advance_tick();
        let input = PlayerInput {
            player: 1,
            tick: 2,
            timestamp_ms: 1_030,
            action: PlayerAction::Sprint,
        };
        assert!(session.submit_input(input, 1_030).is_accepted());
        session.advance_tick();
        assert!(session.players()[0].stamina < 100.0);
    }

    #[test]
    fn test_finalize_hash_matches_replay() {
        let mut session = session();
        session.submit_input(move_input(1, 1, 1_000, 0.5), 1_000);
        session.submit_input(move_input(10, 1, 1_005, -0.5), 1_005);
        session.advance_tick();
        let (result, replay) = session.finalize(Score { home: 1, away: 0 }, Vec::new(), 90);
        assert_eq!(result.result_hash, replay.compute_hash());
        assert_eq!(result.result_hash, result.compute_hash());
        assert_eq!(replay.input_count(), 2);
    }

    #[test]
    fn test_identical_sessions_identical_hash_and_log() {
        let run = || {
            let mut session = session();
            session.submit_input(move_input(1, 1, 1_000, 1.0), 1_000);
            session.submit_input(move_input(2, 1, 1_013, 1.0), 1_013);
            session.submit_input(move_input(10, 1, 1_021, -1.0), 1_021);
            for _ in 0..120 {
                session.advance_tick();
            }
            session.finalize(Score::default(), Vec::new(), 90)
        };
        let (result_a, replay_a) = run();
        let (result_b, replay_b) = run();
        assert_eq!(result_a.result_hash, result_b.result_hash);
        assert_eq!(replay_a.events, replay_b.events);
    }
}
