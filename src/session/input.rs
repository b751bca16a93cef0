//! Tap routing
//!
//! Classifies raw taps against the live circles and enforces the
//! miss-suppression window, so the background press that accompanies every
//! circle tap can never end the run on its own.

use glam::Vec2;

use super::state::{GamePhase, GameSession};

/// What a raw tap landed on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TapTarget {
    Circle(u64),
    Background,
}

impl GameSession {
    /// Route a raw tap by position: a hit on the oldest circle whose tap
    /// radius contains the point, a miss otherwise
    pub fn tap_at(&mut self, now_ms: u64, point: Vec2) {
        match self.resolve_tap(point) {
            TapTarget::Circle(id) => self.tap_circle(now_ms, id),
            TapTarget::Background => self.tap_background(now_ms),
        }
    }

    /// A tap attributed to a specific circle, e.g. from a per-circle
    /// pressable. No-op unless the session is playing and the circle is
    /// still live.
    pub fn tap_circle(&mut self, now_ms: u64, id: u64) {
        if self.phase != GamePhase::Playing || self.game_over_in_flight {
            return;
        }
        // The window opens even when the circle turns out to be stale: the
        // background press paired with this tap must not fail the run
        self.suppress_miss_until = now_ms + self.config.miss_suppress_ms;
        let Some(index) = self.circles.iter().position(|c| c.id == id) else {
            log::debug!("tap on stale circle {id}");
            return;
        };
        self.hit(now_ms, index);
    }

    /// A tap that hit no circle. Fails the run on the oldest live circle
    /// unless a recent hit suppresses it.
    pub fn tap_background(&mut self, now_ms: u64) {
        if self.phase != GamePhase::Playing || self.game_over_in_flight {
            return;
        }
        if now_ms < self.suppress_miss_until {
            return;
        }
        let Some(circle) = self.circles.first().copied() else {
            return;
        };
        log::debug!("missed tap, failing circle {}", circle.id);
        self.fail(now_ms, circle.id, circle.pos);
    }

    fn resolve_tap(&self, point: Vec2) -> TapTarget {
        let radius = self.config.hit_radius();
        self.circles
            .iter()
            .find(|c| c.pos.distance(point) <= radius)
            .map_or(TapTarget::Background, |c| TapTarget::Circle(c.id))
    }
}
