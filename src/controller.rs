//! Session controller
//!
//! Owns one `GameSession` plus the host-provided collaborators and keeps
//! them in step: every command and clock advance drains the session's
//! events into the feedback sink, and a new best score goes to the store.
//! Store failures are logged and swallowed; the run is already over when
//! they can happen.

use glam::Vec2;

use crate::feedback::FeedbackSink;
use crate::highscores::LeaderboardEntry;
use crate::persistence::{ScoreScope, ScoreStore};
use crate::session::{GameConfig, GameEvent, GameSession, Screen};

/// Top-level game object a host embeds
pub struct SessionController {
    session: GameSession,
    feedback: Box<dyn FeedbackSink>,
    store: Box<dyn ScoreStore>,
    scope: ScoreScope,
}

impl SessionController {
    /// Build a controller and seed the session with the stored best score
    pub fn new(
        config: GameConfig,
        screen: Screen,
        seed: u64,
        feedback: Box<dyn FeedbackSink>,
        store: Box<dyn ScoreStore>,
        scope: ScoreScope,
    ) -> Self {
        let mut session = GameSession::new(config, screen, seed);
        session.set_highscore(store.load_highscore(scope));
        log::info!(
            "controller ready, {:?} best {}",
            scope,
            session.highscore()
        );
        Self {
            session,
            feedback,
            store,
            scope,
        }
    }

    /// Read-only view for renderers
    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn start(&mut self, now_ms: u64) {
        self.session.start(now_ms);
        self.dispatch();
    }

    pub fn restart(&mut self, now_ms: u64) {
        self.session.restart(now_ms);
        self.dispatch();
    }

    pub fn advance(&mut self, now_ms: u64) {
        self.session.advance(now_ms);
        self.dispatch();
    }

    pub fn tap_at(&mut self, now_ms: u64, point: Vec2) {
        self.session.tap_at(now_ms, point);
        self.dispatch();
    }

    pub fn tap_circle(&mut self, now_ms: u64, id: u64) {
        self.session.tap_circle(now_ms, id);
        self.dispatch();
    }

    pub fn tap_background(&mut self, now_ms: u64) {
        self.session.tap_background(now_ms);
        self.dispatch();
    }

    /// Top `n` leaderboard entries from the store
    pub fn leaderboard(&self, n: usize) -> Vec<LeaderboardEntry> {
        self.store.top_scores(n)
    }

    fn dispatch(&mut self) {
        for event in self.session.take_events() {
            match event {
                GameEvent::TapSuccess { score, .. } => self.feedback.tap_success(score),
                GameEvent::TapFail => self.feedback.tap_fail(),
                GameEvent::CountdownTick { step } => self.feedback.countdown_tick(step),
                GameEvent::GameStarted => self.feedback.game_start(),
                GameEvent::GameOver {
                    score,
                    new_highscore,
                } => {
                    self.feedback.game_over(score);
                    if new_highscore {
                        if let Err(err) = self.store.save_highscore(self.scope, score) {
                            log::warn!("highscore save failed: {err}");
                        }
                    }
                }
                GameEvent::CircleSpawned { .. } => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::{MemoryStore, StoreError};
    use crate::session::{CountdownStep, GamePhase};
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Records every sink call in order
    #[derive(Default)]
    struct RecordingSink {
        calls: Rc<RefCell<Vec<String>>>,
    }

    impl FeedbackSink for RecordingSink {
        fn tap_success(&mut self, score: u32) {
            self.calls.borrow_mut().push(format!("tap:{score}"));
        }
        fn tap_fail(&mut self) {
            self.calls.borrow_mut().push("fail".into());
        }
        fn countdown_tick(&mut self, step: CountdownStep) {
            self.calls.borrow_mut().push(format!("tick:{}", step.label()));
        }
        fn game_start(&mut self) {
            self.calls.borrow_mut().push("start".into());
        }
        fn game_over(&mut self, score: u32) {
            self.calls.borrow_mut().push(format!("over:{score}"));
        }
    }

    /// Store whose saves always fail
    struct BrokenStore;

    impl ScoreStore for BrokenStore {
        fn load_highscore(&self, _scope: ScoreScope) -> u32 {
            3
        }
        fn save_highscore(&mut self, _scope: ScoreScope, _value: u32) -> Result<(), StoreError> {
            Err(StoreError::Io(std::io::Error::other("disk gone")))
        }
        fn top_scores(&self, _n: usize) -> Vec<LeaderboardEntry> {
            Vec::new()
        }
    }

    fn controller_with(store: Box<dyn ScoreStore>) -> (SessionController, Rc<RefCell<Vec<String>>>) {
        let sink = RecordingSink::default();
        let calls = Rc::clone(&sink.calls);
        let controller = SessionController::new(
            GameConfig::default(),
            Screen::default(),
            99,
            Box::new(sink),
            store,
            ScoreScope::Local,
        );
        (controller, calls)
    }

    #[test]
    fn events_reach_the_sink_in_order() {
        let (mut c, calls) = controller_with(Box::new(MemoryStore::new("tester")));
        c.start(0);
        c.advance(4550);
        let id = c.session().circles()[0].id;
        c.tap_circle(4600, id);
        c.advance(10_000);

        let calls = calls.borrow();
        assert_eq!(
            &calls[..6],
            &["tick:3", "tick:2", "tick:1", "tick:GO", "start", "tap:0"]
        );
        assert_eq!(calls.last().map(String::as_str), Some("over:1"));
        assert!(calls.contains(&"fail".to_string()));
    }

    #[test]
    fn new_best_is_persisted() {
        let (mut c, _) = controller_with(Box::new(MemoryStore::new("tester")));
        c.start(0);
        c.advance(4550);
        let id = c.session().circles()[0].id;
        c.tap_circle(4600, id);
        c.advance(20_000);
        assert_eq!(c.session().phase(), GamePhase::GameOver);
        assert_eq!(c.session().highscore(), 1);
        assert_eq!(c.store.load_highscore(ScoreScope::Local), 1);
    }

    #[test]
    fn lower_score_is_not_persisted() {
        let mut store = MemoryStore::new("tester");
        store.save_highscore(ScoreScope::Local, 10).unwrap();
        let (mut c, _) = controller_with(Box::new(store));
        assert_eq!(c.session().highscore(), 10);

        c.start(0);
        c.advance(20_000);
        assert_eq!(c.session().phase(), GamePhase::GameOver);
        assert_eq!(c.session().score(), 0);
        assert_eq!(c.store.load_highscore(ScoreScope::Local), 10);
    }

    #[test]
    fn save_failure_does_not_break_the_session() {
        let (mut c, calls) = controller_with(Box::new(BrokenStore));
        assert_eq!(c.session().highscore(), 3);

        c.start(0);
        c.advance(4550);
        let mut now = 4550;
        for _ in 0..4 {
            let id = c.session().circles()[0].id;
            c.tap_circle(now, id);
            now += 50;
            c.advance(now);
        }
        assert_eq!(c.session().score(), 4);

        c.advance(now + 10_000);
        assert_eq!(c.session().phase(), GamePhase::GameOver);
        // The new best stuck in the session even though the save failed
        assert_eq!(c.session().highscore(), 4);
        assert!(calls.borrow().contains(&"over:4".to_string()));
    }
}
