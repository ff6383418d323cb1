//! Collaborators the game core calls into
//!
//! The driver only sees these traits. Browser implementations live in
//! [`web`]; tests use recording fakes.

#[cfg(target_arch = "wasm32")]
pub mod web;

/// Sound cues the game can trigger
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    /// Player left the ground
    Jump,
    /// Player hit an obstacle
    Crash,
    /// End-of-round fanfare, played shortly after the crash
    RoundOver,
}

/// Plays sound cues from the beginning. Failures are the sink's problem.
pub trait SoundSink {
    fn play(&mut self, cue: SoundCue);
}

/// Text sink for the score outside the canvas
pub trait ScoreDisplay {
    /// Periodic update while a round runs
    fn show_score(&mut self, score: u64);

    /// Called once per round when it ends
    fn show_final_score(&mut self, score: u64);

    /// A new round started; hide whatever the last one left behind
    fn clear_final_score(&mut self) {}
}

/// Sound sink that drops every cue
#[derive(Debug, Default, Clone, Copy)]
pub struct Silent;

impl SoundSink for Silent {
    fn play(&mut self, _cue: SoundCue) {}
}

/// Score display that keeps the latest values, used by the headless run
#[derive(Debug, Default, Clone)]
pub struct ScoreLog {
    pub score: u64,
    pub final_scores: Vec<u64>,
}

impl ScoreDisplay for ScoreLog {
    fn show_score(&mut self, score: u64) {
        self.score = score;
    }

    fn show_final_score(&mut self, score: u64) {
        log::info!("Final score: {score}");
        self.final_scores.push(score);
    }
}
