//! Headless demo run
//!
//! Drives a scripted session on a synthetic clock: countdown, a dozen hits
//! across the double-spawn milestone, then an expired circle and the
//! game-over screen. Run with `RUST_LOG=debug` to see the feedback cues.

use neon_tap::SessionController;
use neon_tap::consts;
use neon_tap::feedback::LogFeedback;
use neon_tap::persistence::{JsonFileStore, ScoreScope};
use neon_tap::session::{GameConfig, Screen};

fn main() {
    env_logger::init();
    log::info!("Neon Tap (headless) starting...");

    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);
    let store = JsonFileStore::open(std::env::temp_dir().join("neon_tap_scores.json"), "demo");
    let mut game = SessionController::new(
        GameConfig::default(),
        Screen::default(),
        seed,
        Box::new(LogFeedback::default()),
        Box::new(store),
        ScoreScope::Account,
    );

    let mut now: u64 = 0;
    game.start(now);

    // Starting beat, four countdown steps, then the first circle
    now += consts::START_DELAY_MS + 4 * consts::COUNTDOWN_STEP_MS + consts::FIRST_SPAWN_DELAY_MS;
    game.advance(now);

    // Hit twelve circles as they appear, crossing the milestone at ten
    for _ in 0..12 {
        game.advance(now);
        let Some(circle) = game.session().circles().first().copied() else {
            break;
        };
        game.tap_at(now, circle.pos);
        println!(
            "hit {:>2}  window {:>4} ms  live circles {}",
            game.session().score(),
            game.session().duration_ms(),
            game.session().circles().len(),
        );
        now += 2 * consts::RESPAWN_DELAY_MS;
    }

    // Stop tapping and let the oldest circle run out
    now += 5_000;
    game.advance(now);
    println!(
        "\nrun over: score {}, best {}",
        game.session().score(),
        game.session().highscore()
    );

    // Straight back in through the countdown, and fumble the first tap
    game.restart(now);
    now += 4 * consts::COUNTDOWN_STEP_MS + consts::FIRST_SPAWN_DELAY_MS;
    game.advance(now);
    game.tap_background(now);
    now += 1_000;
    game.advance(now);
    println!(
        "second run over: score {}, best {}",
        game.session().score(),
        game.session().highscore()
    );

    println!("\nTop scores:");
    for (rank, entry) in game.leaderboard(10).iter().enumerate() {
        println!("{:>2}. {:<12} {:>4}", rank + 1, entry.name, entry.score);
    }
}
