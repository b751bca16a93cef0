//! Session clock
//!
//! `advance` drains every deadline that has come due — the start delay,
//! countdown steps, scheduled spawns, circle expiries, game-over staging —
//! in deadline order. A session behaves the same whether the host steps the
//! clock in 16 ms frames or one big jump, because each piece of due work
//! runs with the time it was scheduled for, not the time it was noticed.

use glam::Vec2;

use super::placement;
use super::state::{
    Circle, CircleState, Countdown, CountdownStep, FailingCircle, GameEvent, GamePhase,
    GameSession, PendingSpawn, next_duration,
};

/// A deadline that has come due, tagged with its source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Due {
    StartDelay,
    CountdownStep,
    FailExplode,
    FailSettle,
    Expiry { id: u64 },
    Spawn,
}

impl GameSession {
    /// Begin a session from the home screen
    pub fn start(&mut self, now_ms: u64) {
        if self.phase != GamePhase::Home {
            log::debug!("start ignored in phase {:?}", self.phase);
            return;
        }
        self.phase = GamePhase::Starting;
        self.starting_until = Some(now_ms + self.config.start_delay_ms);
        log::info!("session starting");
    }

    /// Play again from the game-over screen. Goes straight to the
    /// countdown, skipping the pre-countdown beat.
    pub fn restart(&mut self, now_ms: u64) {
        if self.phase != GamePhase::GameOver {
            log::debug!("restart ignored in phase {:?}", self.phase);
            return;
        }
        self.game_over_in_flight = false;
        self.enter_countdown(now_ms);
    }

    /// Process everything due at `now_ms`. Call once per host frame, before
    /// routing input captured at the same instant.
    pub fn advance(&mut self, now_ms: u64) {
        while let Some((fire_at, due)) = self.next_due(now_ms) {
            match due {
                Due::StartDelay => {
                    self.starting_until = None;
                    self.enter_countdown(fire_at);
                }
                Due::CountdownStep => self.countdown_step_due(fire_at),
                Due::FailExplode => self.explode_due(),
                Due::FailSettle => self.settle_game_over(),
                Due::Expiry { id } => self.expire_circle(fire_at, id),
                Due::Spawn => self.spawn_due(fire_at),
            }
        }
    }

    /// Earliest deadline at or before `now_ms`, with its scheduled time.
    /// Sources only ever tie across expiry and spawn; the expiry is taken
    /// first.
    fn next_due(&self, now_ms: u64) -> Option<(u64, Due)> {
        let mut best: Option<(u64, Due)> = None;
        let mut consider = |at: u64, due: Due| {
            let earlier = match best {
                Some((best_at, _)) => at < best_at,
                None => true,
            };
            if at <= now_ms && earlier {
                best = Some((at, due));
            }
        };
        if let Some(at) = self.starting_until {
            consider(at, Due::StartDelay);
        }
        if let Some(cd) = self.countdown {
            consider(cd.next_at, Due::CountdownStep);
        }
        if let Some(failing) = &self.failing {
            match failing.state {
                CircleState::Fail => consider(failing.explode_at, Due::FailExplode),
                CircleState::Exploding => consider(failing.settle_at, Due::FailSettle),
                CircleState::Normal => {}
            }
        }
        if let Some((deadline, id)) = self.timers.peek_due(now_ms) {
            consider(deadline, Due::Expiry { id });
        }
        if let Some(at) = self.pending_spawns.iter().map(|s| s.at).min() {
            consider(at, Due::Spawn);
        }
        best
    }

    fn enter_countdown(&mut self, now_ms: u64) {
        self.phase = GamePhase::Countdown;
        self.countdown = Some(Countdown {
            shown: CountdownStep::Three,
            next_index: 1,
            next_at: now_ms + self.config.countdown_step_ms,
        });
        self.push_event(GameEvent::CountdownTick {
            step: CountdownStep::Three,
        });
    }

    fn countdown_step_due(&mut self, fire_at: u64) {
        let Some(mut cd) = self.countdown else { return };
        match CountdownStep::nth(cd.next_index) {
            Some(step) => {
                cd.shown = step;
                cd.next_index += 1;
                cd.next_at = fire_at + self.config.countdown_step_ms;
                self.countdown = Some(cd);
                self.push_event(GameEvent::CountdownTick { step });
            }
            None => {
                self.countdown = None;
                self.enter_playing(fire_at);
            }
        }
    }

    fn enter_playing(&mut self, now_ms: u64) {
        self.phase = GamePhase::Playing;
        self.score = 0;
        self.duration_ms = self.config.initial_duration_ms;
        self.circles.clear();
        self.failing = None;
        self.timers.cancel_all();
        self.suppress_miss_until = 0;
        self.pending_spawns.clear();
        self.pending_spawns.push(PendingSpawn {
            at: now_ms + self.config.first_spawn_delay_ms,
            duration_ms: None,
        });
        self.push_event(GameEvent::GameStarted);
        log::info!("play begins");
    }

    fn spawn_due(&mut self, fire_at: u64) {
        let Some(index) = self.pending_spawns.iter().position(|s| s.at == fire_at) else {
            return;
        };
        let spawn = self.pending_spawns.remove(index);
        self.spawn_circle(fire_at, spawn.duration_ms);
    }

    pub(super) fn spawn_circle(&mut self, fire_at: u64, duration_override: Option<u32>) {
        if self.phase != GamePhase::Playing || self.game_over_in_flight {
            return;
        }
        let occupied: Vec<Vec2> = self.circles.iter().map(|c| c.pos).collect();
        let placement = placement::allocate(
            &mut self.rng,
            &self.bounds,
            &occupied,
            self.config.exclusion_radius(),
            self.config.max_place_attempts,
        );
        if placement.relaxed {
            log::debug!(
                "spawn spacing relaxed after {} attempts",
                self.config.max_place_attempts
            );
        }
        let id = self.next_circle_id();
        let duration_ms = duration_override.unwrap_or(self.duration_ms);
        self.circles.push(Circle {
            id,
            pos: placement.pos,
            state: CircleState::Normal,
        });
        self.timers.schedule(id, fire_at + u64::from(duration_ms));
        self.push_event(GameEvent::CircleSpawned {
            id,
            pos: placement.pos,
            duration_ms,
        });
    }

    fn expire_circle(&mut self, deadline: u64, id: u64) {
        // Claim the deadline first so it can never fire twice
        if !self.timers.cancel(id) {
            return;
        }
        if self.game_over_in_flight {
            return;
        }
        let Some(circle) = self.circles.iter().find(|c| c.id == id).copied() else {
            return;
        };
        log::debug!("circle {id} expired");
        self.fail(deadline, circle.id, circle.pos);
    }

    /// A confirmed tap on the live circle at `index`. The tap-vs-expiry
    /// race is settled by the cancel: if the deadline is already gone the
    /// tap loses silently.
    pub(super) fn hit(&mut self, now_ms: u64, index: usize) {
        let circle = self.circles[index];
        if !self.timers.cancel(circle.id) {
            return;
        }
        let feedback_score = self.score;
        self.score += 1;
        self.duration_ms = next_duration(
            self.duration_ms,
            self.config.acceleration_factor,
            self.config.min_duration_ms,
        );
        self.circles.remove(index);

        let respawn_at = now_ms + self.config.respawn_delay_ms;
        if self.score == self.config.milestone_score {
            // One-off celebration: a staggered pair with a doubled window
            let duration_ms = Some(self.duration_ms * 2);
            self.pending_spawns.push(PendingSpawn {
                at: respawn_at,
                duration_ms,
            });
            self.pending_spawns.push(PendingSpawn {
                at: respawn_at + self.config.milestone_stagger_ms,
                duration_ms,
            });
            log::info!("milestone at score {}, double spawn", self.score);
        } else {
            self.pending_spawns.push(PendingSpawn {
                at: respawn_at,
                duration_ms: None,
            });
        }
        self.push_event(GameEvent::TapSuccess {
            score: feedback_score,
            pos: circle.pos,
        });
    }

    /// End the run on the given circle. The guard flips first; every later
    /// fail path is a no-op until restart.
    pub(super) fn fail(&mut self, now_ms: u64, id: u64, pos: Vec2) {
        if self.game_over_in_flight {
            return;
        }
        self.game_over_in_flight = true;
        self.timers.cancel_all();
        self.pending_spawns.clear();
        self.circles.clear();
        self.failing = Some(FailingCircle {
            id,
            pos,
            state: CircleState::Fail,
            explode_at: now_ms + self.config.fail_flash_ms,
            settle_at: now_ms + self.config.fail_settle_ms,
        });
        self.push_event(GameEvent::TapFail);
        log::info!("run failed at score {}", self.score);
    }

    fn explode_due(&mut self) {
        if let Some(failing) = &mut self.failing {
            failing.state = CircleState::Exploding;
        }
    }

    fn settle_game_over(&mut self) {
        self.failing = None;
        let new_highscore = self.score > self.highscore;
        if new_highscore {
            self.highscore = self.score;
        }
        self.phase = GamePhase::GameOver;
        self.push_event(GameEvent::GameOver {
            score: self.score,
            new_highscore,
        });
        log::info!("game over, score {}, best {}", self.score, self.highscore);
    }
}
