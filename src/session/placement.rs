//! Circle placement
//!
//! Uniform rejection sampling inside the spawn bounds, keeping each new
//! circle clear of the live ones. The spacing rule is dropped after a
//! bounded number of attempts so a crowded field can never wedge the
//! spawner.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::state::GameConfig;

/// Host-reported screen geometry, in logical pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Screen {
    pub width: f32,
    pub height: f32,
    /// Status-bar / notch inset at the top
    pub inset_top: f32,
    /// Home-indicator inset at the bottom
    pub inset_bottom: f32,
}

impl Default for Screen {
    /// A current mid-size phone
    fn default() -> Self {
        Self {
            width: 393.0,
            height: 852.0,
            inset_top: 59.0,
            inset_bottom: 34.0,
        }
    }
}

/// Area circle centers may occupy
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnBounds {
    pub min: Vec2,
    pub max: Vec2,
}

impl SpawnBounds {
    /// Shrink the screen by the score band, the edge margin, and half the
    /// circle footprint so every spawned circle sits fully inside the
    /// playfield.
    pub fn new(config: &GameConfig, screen: &Screen) -> Self {
        let margin = config.edge_margin + config.footprint() / 2.0;
        let min = Vec2::new(
            margin,
            screen.inset_top + config.score_band_height + margin,
        );
        let max = Vec2::new(
            screen.width - margin,
            screen.height - screen.inset_bottom - margin,
        );
        Self { min, max }.normalized()
    }

    /// Collapse inverted axes to their midpoint so sampling stays valid on
    /// degenerate screens
    fn normalized(mut self) -> Self {
        if self.max.x < self.min.x {
            let mid = (self.min.x + self.max.x) / 2.0;
            self.min.x = mid;
            self.max.x = mid;
        }
        if self.max.y < self.min.y {
            let mid = (self.min.y + self.max.y) / 2.0;
            self.min.y = mid;
            self.max.y = mid;
        }
        self
    }

    /// Uniform sample of a circle center
    pub fn sample(&self, rng: &mut Pcg32) -> Vec2 {
        Vec2::new(
            rng.random_range(self.min.x..=self.max.x),
            rng.random_range(self.min.y..=self.max.y),
        )
    }

    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }
}

/// A chosen spawn point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub pos: Vec2,
    /// Every attempt was rejected and the spacing rule was dropped
    pub relaxed: bool,
}

/// Pick a spawn point at least `exclusion` away from every occupied center.
/// After `max_attempts` rejected samples the final draw skips the distance
/// check entirely.
pub fn allocate(
    rng: &mut Pcg32,
    bounds: &SpawnBounds,
    occupied: &[Vec2],
    exclusion: f32,
    max_attempts: u32,
) -> Placement {
    for _ in 0..max_attempts {
        let pos = bounds.sample(rng);
        if occupied.iter().all(|&center| center.distance(pos) >= exclusion) {
            return Placement { pos, relaxed: false };
        }
    }
    Placement {
        pos: bounds.sample(rng),
        relaxed: true,
    }
}
