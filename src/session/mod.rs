//! Deterministic game session
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Host-supplied millisecond clock only
//! - Seeded RNG only
//! - Due deadlines processed in (time, source) order
//! - No rendering or platform dependencies

pub mod input;
pub mod placement;
pub mod state;
pub mod tick;
pub mod timer;

pub use placement::{Placement, Screen, SpawnBounds, allocate};
pub use state::{
    Circle, CircleState, CountdownStep, FailingCircle, GameConfig, GameEvent, GamePhase,
    GameSession, next_duration,
};
pub use timer::CircleTimers;
