//! Session state and core types
//!
//! Everything the renderer polls between frames lives here. A session is
//! never persisted: only the highscore survives it.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::placement::{Screen, SpawnBounds};
use super::timer::CircleTimers;
use crate::consts::*;

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Title screen, waiting for the start command
    Home,
    /// Brief beat between pressing start and the countdown
    Starting,
    /// 3-2-1-GO script running
    Countdown,
    /// Active gameplay
    Playing,
    /// Run ended, final score on display
    GameOver,
}

/// Visual state of a circle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CircleState {
    Normal,
    /// Red flash on the circle the run ended on
    Fail,
    /// Burst animation after the flash
    Exploding,
}

/// A live, tappable circle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub id: u64,
    pub pos: Vec2,
    pub state: CircleState,
}

/// The circle a run ended on, kept outside the live set for the
/// game-over animation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FailingCircle {
    pub id: u64,
    pub pos: Vec2,
    pub state: CircleState,
    pub(super) explode_at: u64,
    pub(super) settle_at: u64,
}

/// Countdown display steps, in script order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownStep {
    Three,
    Two,
    One,
    Go,
}

impl CountdownStep {
    pub fn label(self) -> &'static str {
        match self {
            CountdownStep::Three => "3",
            CountdownStep::Two => "2",
            CountdownStep::One => "1",
            CountdownStep::Go => "GO",
        }
    }

    pub(super) fn nth(index: usize) -> Option<Self> {
        [
            CountdownStep::Three,
            CountdownStep::Two,
            CountdownStep::One,
            CountdownStep::Go,
        ]
        .get(index)
        .copied()
    }
}

/// Events emitted by the session, drained by the host after each call
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    CircleSpawned { id: u64, pos: Vec2, duration_ms: u32 },
    /// Successful tap; `score` is the value before the increment
    TapSuccess { score: u32, pos: Vec2 },
    /// The run just ended (expiry or missed tap)
    TapFail,
    CountdownTick { step: CountdownStep },
    /// Countdown finished, play begins
    GameStarted,
    GameOver { score: u32, new_highscore: bool },
}

/// Tuning knobs, defaulting to the shipped balance
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub circle_diameter: f32,
    pub halo_padding: f32,
    pub hit_slop: f32,
    pub edge_margin: f32,
    pub score_band_height: f32,
    pub spawn_clearance: f32,
    pub max_place_attempts: u32,
    pub initial_duration_ms: u32,
    pub min_duration_ms: u32,
    pub acceleration_factor: f64,
    pub start_delay_ms: u64,
    pub countdown_step_ms: u64,
    pub first_spawn_delay_ms: u64,
    pub respawn_delay_ms: u64,
    pub milestone_score: u32,
    pub milestone_stagger_ms: u64,
    pub fail_flash_ms: u64,
    pub fail_settle_ms: u64,
    pub miss_suppress_ms: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            circle_diameter: CIRCLE_DIAMETER,
            halo_padding: HALO_PADDING,
            hit_slop: HIT_SLOP,
            edge_margin: EDGE_MARGIN,
            score_band_height: SCORE_BAND_HEIGHT,
            spawn_clearance: SPAWN_CLEARANCE,
            max_place_attempts: MAX_PLACE_ATTEMPTS,
            initial_duration_ms: INITIAL_DURATION_MS,
            min_duration_ms: MIN_DURATION_MS,
            acceleration_factor: ACCELERATION_FACTOR,
            start_delay_ms: START_DELAY_MS,
            countdown_step_ms: COUNTDOWN_STEP_MS,
            first_spawn_delay_ms: FIRST_SPAWN_DELAY_MS,
            respawn_delay_ms: RESPAWN_DELAY_MS,
            milestone_score: MILESTONE_SCORE,
            milestone_stagger_ms: MILESTONE_STAGGER_MS,
            fail_flash_ms: FAIL_FLASH_MS,
            fail_settle_ms: FAIL_SETTLE_MS,
            miss_suppress_ms: MISS_SUPPRESS_MS,
        }
    }
}

impl GameConfig {
    /// Full on-screen footprint of a circle including its glow halo
    pub fn footprint(&self) -> f32 {
        self.circle_diameter + 2.0 * self.halo_padding
    }

    /// Minimum center-to-center distance between placed circles
    pub fn exclusion_radius(&self) -> f32 {
        self.footprint() + self.spawn_clearance
    }

    /// Tap acceptance radius around a circle center
    pub fn hit_radius(&self) -> f32 {
        self.circle_diameter / 2.0 + self.hit_slop
    }
}

/// Next reaction window after a hit
pub fn next_duration(current_ms: u32, factor: f64, min_ms: u32) -> u32 {
    let decayed = (f64::from(current_ms) * factor).round() as u32;
    decayed.max(min_ms)
}

/// A scheduled spawn, fired by `advance`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct PendingSpawn {
    pub at: u64,
    /// Reaction window override; `None` resolves at fire time
    pub duration_ms: Option<u32>,
}

/// Countdown script progress
#[derive(Debug, Clone, Copy)]
pub(super) struct Countdown {
    /// Step currently on display
    pub shown: CountdownStep,
    /// Next script index to fire; one past `Go` flips to `Playing`
    pub next_index: usize,
    pub next_at: u64,
}

/// One full game session, advanced by the host clock
#[derive(Debug)]
pub struct GameSession {
    pub(super) config: GameConfig,
    pub(super) bounds: SpawnBounds,
    pub(super) rng: Pcg32,
    pub(super) phase: GamePhase,
    pub(super) score: u32,
    pub(super) highscore: u32,
    /// Reaction window for the next normal spawn
    pub(super) duration_ms: u32,
    /// Live circles, oldest first
    pub(super) circles: Vec<Circle>,
    pub(super) failing: Option<FailingCircle>,
    pub(super) timers: CircleTimers,
    pub(super) pending_spawns: Vec<PendingSpawn>,
    pub(super) countdown: Option<Countdown>,
    /// `Starting` ends and the countdown begins at this instant
    pub(super) starting_until: Option<u64>,
    /// Background taps are ignored strictly before this instant
    pub(super) suppress_miss_until: u64,
    /// Set the moment a fail is accepted; gates every later fail path
    pub(super) game_over_in_flight: bool,
    next_id: u64,
    pub(super) events: Vec<GameEvent>,
}

impl GameSession {
    /// Create a session on the home screen for the given screen geometry
    pub fn new(config: GameConfig, screen: Screen, seed: u64) -> Self {
        let bounds = SpawnBounds::new(&config, &screen);
        let duration_ms = config.initial_duration_ms;
        Self {
            config,
            bounds,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Home,
            score: 0,
            highscore: 0,
            duration_ms,
            circles: Vec::new(),
            failing: None,
            timers: CircleTimers::default(),
            pending_spawns: Vec::new(),
            countdown: None,
            starting_until: None,
            suppress_miss_until: 0,
            game_over_in_flight: false,
            next_id: 1,
            events: Vec::new(),
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn highscore(&self) -> u32 {
        self.highscore
    }

    /// Seed the best score to beat, typically loaded from a store
    pub fn set_highscore(&mut self, value: u32) {
        self.highscore = value;
    }

    /// Reaction window the next normal spawn will get
    pub fn duration_ms(&self) -> u32 {
        self.duration_ms
    }

    /// Live circles, oldest first
    pub fn circles(&self) -> &[Circle] {
        &self.circles
    }

    /// Circle currently playing the fail animation, if any
    pub fn failing_circle(&self) -> Option<&FailingCircle> {
        self.failing.as_ref()
    }

    /// Step the countdown overlay is showing, if any
    pub fn countdown_step(&self) -> Option<CountdownStep> {
        self.countdown.map(|cd| cd.shown)
    }

    /// A fail has been accepted and the game-over screen is staging
    pub fn game_over_in_flight(&self) -> bool {
        self.game_over_in_flight
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Drain events queued since the last call
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub(super) fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Allocate a circle ID, unique for the life of the session object
    pub(super) fn next_circle_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duration_decays_toward_floor() {
        assert_eq!(next_duration(1200, 0.98, 400), 1176);
        assert_eq!(next_duration(1176, 0.98, 400), 1152);
        assert_eq!(next_duration(401, 0.98, 400), 400);
        assert_eq!(next_duration(400, 0.98, 400), 400);
    }

    #[test]
    fn duration_never_increases() {
        let mut d = 1200;
        for _ in 0..200 {
            let next = next_duration(d, 0.98, 400);
            assert!(next <= d);
            assert!(next >= 400);
            d = next;
        }
        assert_eq!(d, 400);
    }

    #[test]
    fn circle_ids_are_unique_and_monotonic() {
        let mut session = GameSession::new(GameConfig::default(), Screen::default(), 7);
        let a = session.next_circle_id();
        let b = session.next_circle_id();
        let c = session.next_circle_id();
        assert!(a < b && b < c);
    }

    #[test]
    fn config_derived_geometry() {
        let config = GameConfig::default();
        assert_eq!(config.footprint(), 196.0);
        assert_eq!(config.exclusion_radius(), 216.0);
        assert_eq!(config.hit_radius(), 54.0);
    }

    #[test]
    fn countdown_script_order() {
        assert_eq!(CountdownStep::nth(0), Some(CountdownStep::Three));
        assert_eq!(CountdownStep::nth(3), Some(CountdownStep::Go));
        assert_eq!(CountdownStep::nth(4), None);
        assert_eq!(CountdownStep::Go.label(), "GO");
    }
}
