//! Tap feedback cues
//!
//! Maps session events to haptic strength and tap-sound parameters. The
//! session itself never talks to a device: hosts hand a `FeedbackSink` to
//! the controller and realize these cues with whatever engine they have.

use crate::session::CountdownStep;

/// Scores below this get a light success pulse
pub const MEDIUM_HAPTIC_SCORE: u32 = 20;
/// Scores below this get a medium pulse; everything above gets heavy
pub const HEAVY_HAPTIC_SCORE: u32 = 40;

/// Number of tap samples the pitch ramp cycles through
pub const TAP_SAMPLE_COUNT: usize = 3;
/// Score at which the pitch ramp tops out
pub const PITCH_RAMP_TOP_SCORE: u32 = 60;
/// Playback-rate ramp endpoints
pub const TAP_RATE_MIN: f32 = 0.8;
pub const TAP_RATE_MAX: f32 = 1.5;
/// Tap cue gain before the master volume
pub const TAP_VOLUME: f32 = 0.4;

/// Haptic pulse strength
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HapticStrength {
    Light,
    Medium,
    Heavy,
}

/// Haptic tier for a successful tap at the given pre-increment score
pub fn haptic_for_score(score: u32) -> HapticStrength {
    if score < MEDIUM_HAPTIC_SCORE {
        HapticStrength::Light
    } else if score < HEAVY_HAPTIC_SCORE {
        HapticStrength::Medium
    } else {
        HapticStrength::Heavy
    }
}

/// Sample choice and playback parameters for one tap sound
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TapCue {
    /// Index into the tap sample bank
    pub sample: usize,
    /// Playback rate, rising with score
    pub rate: f32,
    pub volume: f32,
}

/// Tap cue for the given pre-increment score. Pitch and sample climb
/// together until the ramp tops out.
pub fn tap_cue(score: u32) -> TapCue {
    let progress = (score as f32 / PITCH_RAMP_TOP_SCORE as f32).min(1.0);
    let sample = ((progress * (TAP_SAMPLE_COUNT - 1) as f32) as usize).min(TAP_SAMPLE_COUNT - 1);
    TapCue {
        sample,
        rate: TAP_RATE_MIN + progress * (TAP_RATE_MAX - TAP_RATE_MIN),
        volume: TAP_VOLUME,
    }
}

/// Host-side feedback device. Calls are fire-and-forget: the session never
/// waits on or reads back from the sink.
pub trait FeedbackSink {
    /// Successful tap; `score` is the pre-increment value driving the curves
    fn tap_success(&mut self, score: u32);
    /// The run just ended
    fn tap_fail(&mut self);
    /// Countdown step shown
    fn countdown_tick(&mut self, step: CountdownStep);
    /// Countdown finished, play begins
    fn game_start(&mut self);
    /// Final score settled on the game-over screen
    fn game_over(&mut self, score: u32);
}

/// Log-only sink for headless runs
#[derive(Debug, Clone)]
pub struct LogFeedback {
    master_volume: f32,
    muted: bool,
}

impl Default for LogFeedback {
    fn default() -> Self {
        Self {
            master_volume: 1.0,
            muted: false,
        }
    }
}

impl LogFeedback {
    pub fn set_master_volume(&mut self, volume: f32) {
        self.master_volume = volume.clamp(0.0, 1.0);
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn gain(&self, volume: f32) -> f32 {
        if self.muted {
            0.0
        } else {
            volume * self.master_volume
        }
    }
}

impl FeedbackSink for LogFeedback {
    fn tap_success(&mut self, score: u32) {
        let cue = tap_cue(score);
        log::debug!(
            "tap: haptic {:?}, sample {} rate {:.2} gain {:.2}",
            haptic_for_score(score),
            cue.sample,
            cue.rate,
            self.gain(cue.volume)
        );
    }

    fn tap_fail(&mut self) {
        log::debug!("fail: haptic {:?}", HapticStrength::Heavy);
    }

    fn countdown_tick(&mut self, step: CountdownStep) {
        log::debug!(
            "countdown {}: haptic {:?}",
            step.label(),
            HapticStrength::Light
        );
    }

    fn game_start(&mut self) {
        log::debug!("go: haptic {:?}", HapticStrength::Heavy);
    }

    fn game_over(&mut self, score: u32) {
        log::debug!("game over at {score}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn haptic_tiers_switch_at_the_bounds() {
        assert_eq!(haptic_for_score(0), HapticStrength::Light);
        assert_eq!(haptic_for_score(19), HapticStrength::Light);
        assert_eq!(haptic_for_score(20), HapticStrength::Medium);
        assert_eq!(haptic_for_score(39), HapticStrength::Medium);
        assert_eq!(haptic_for_score(40), HapticStrength::Heavy);
        assert_eq!(haptic_for_score(500), HapticStrength::Heavy);
    }

    #[test]
    fn tap_cue_ramps_with_score() {
        let first = tap_cue(0);
        assert_eq!(first.sample, 0);
        assert_eq!(first.rate, 0.8);
        assert_eq!(first.volume, TAP_VOLUME);

        let mid = tap_cue(30);
        assert_eq!(mid.sample, 1);
        assert!((mid.rate - 1.15).abs() < 1e-6);

        let top = tap_cue(60);
        assert_eq!(top.sample, 2);
        assert_eq!(top.rate, 1.5);
    }

    #[test]
    fn tap_cue_clamps_past_the_ramp() {
        assert_eq!(tap_cue(60), tap_cue(10_000));
    }

    #[test]
    fn muted_sink_gains_nothing() {
        let mut sink = LogFeedback::default();
        sink.set_muted(true);
        assert_eq!(sink.gain(0.4), 0.0);
        sink.set_muted(false);
        sink.set_master_volume(0.5);
        assert!((sink.gain(0.4) - 0.2).abs() < 1e-6);
    }
}
