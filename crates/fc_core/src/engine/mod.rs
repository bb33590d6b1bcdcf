//! The synchronous simulation engine: vector math, entity state, collision
//! processing, discipline, and the per-match session driver.

pub mod card_system;
pub mod collision;
pub mod events;
pub mod session;
pub mod state;
pub mod vector;

pub use card_system::CardSystem;
pub use collision::{CollisionConfig, CollisionOrchestrator};
pub use events::{CardType, CollisionEvent, CollisionKind, DisciplineRecord, FoulType};
pub use session::{MatchSession, TickReport, TICK_DT};
pub use state::{BallState, PlayerId, PlayerState, SkillAttributes};
pub use vector::Vec2;
