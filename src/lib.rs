//! Neon Tap - a single-screen tap-the-circle reaction game
//!
//! Core modules:
//! - `session`: Deterministic game session (phases, deadlines, spawning, input)
//! - `feedback`: Haptic/sound cue curves behind the `FeedbackSink` trait
//! - `highscores`: Leaderboard ranking
//! - `persistence`: Score storage behind the `ScoreStore` trait
//! - `controller`: Owns a session plus its collaborators, dispatches events

pub mod controller;
pub mod feedback;
pub mod highscores;
pub mod persistence;
pub mod session;

pub use controller::SessionController;
pub use highscores::Leaderboard;
pub use session::{GameConfig, GameSession};

/// Game tuning constants
pub mod consts {
    /// Tappable disc diameter (logical pixels)
    pub const CIRCLE_DIAMETER: f32 = 96.0;
    /// Glow halo around the disc, per side
    pub const HALO_PADDING: f32 = 50.0;
    /// Tap tolerance beyond the visible edge
    pub const HIT_SLOP: f32 = 6.0;

    /// Gap kept between the playfield edge and any circle footprint
    pub const EDGE_MARGIN: f32 = 24.0;
    /// Band at the top of the screen reserved for the score readout
    pub const SCORE_BAND_HEIGHT: f32 = 160.0;
    /// Extra spacing between circle footprints when placing
    pub const SPAWN_CLEARANCE: f32 = 20.0;
    /// Placement attempts before the spacing rule is dropped
    pub const MAX_PLACE_ATTEMPTS: u32 = 50;

    /// Reaction window for the first circle
    pub const INITIAL_DURATION_MS: u32 = 1200;
    /// Floor the reaction window never shrinks below
    pub const MIN_DURATION_MS: u32 = 400;
    /// Window shrink per hit (multiplicative)
    pub const ACCELERATION_FACTOR: f64 = 0.98;

    /// Beat between pressing start and the countdown appearing
    pub const START_DELAY_MS: u64 = 450;
    /// Cadence of the 3-2-1-GO script
    pub const COUNTDOWN_STEP_MS: u64 = 1000;
    /// Delay before the first circle of a run
    pub const FIRST_SPAWN_DELAY_MS: u64 = 100;
    /// Delay between a hit and the replacement circle
    pub const RESPAWN_DELAY_MS: u64 = 50;

    /// Score that triggers the one-off double spawn
    pub const MILESTONE_SCORE: u32 = 10;
    /// Stagger between the two milestone circles
    pub const MILESTONE_STAGGER_MS: u64 = 50;

    /// Red flash on the failed circle before it bursts
    pub const FAIL_FLASH_MS: u64 = 80;
    /// Fail animation length before the game-over screen settles
    pub const FAIL_SETTLE_MS: u64 = 500;

    /// Misses are ignored this long after a successful tap
    pub const MISS_SUPPRESS_MS: u64 = 100;
}
