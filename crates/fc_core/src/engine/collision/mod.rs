//! Collision detection, resolution, and per-tick orchestration.

pub mod config;
pub mod detector;
pub mod orchestrator;
pub mod resolver;

pub use config::CollisionConfig;
pub use detector::{
    detect_player_ball, detect_player_player, Contact, PlayerBallContact, PlayerPlayerContact,
};
pub use orchestrator::CollisionOrchestrator;
pub use resolver::{resolve_player_ball, resolve_player_player, SEPARATION_EPSILON};
