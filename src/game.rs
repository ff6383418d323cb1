//! Game driver
//!
//! Owns the session state and its collaborators, turns frame time into fixed
//! ticks and forwards the events each tick produces.

use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS, SCORE_DISPLAY_EVERY, SIM_DT};
use crate::platform::{ScoreDisplay, SoundCue, SoundSink};
use crate::renderer::{RenderOptions, RenderTarget, SpriteSheet, render};
use crate::settings::Settings;
use crate::sim::{GameEvent, GameState, TickInput, tick};
use crate::tuning::Tuning;

/// Frames averaged for the FPS readout
const FPS_WINDOW: usize = 60;

/// One play session plus the collaborators it reports to
pub struct Game<S: SoundSink, D: ScoreDisplay> {
    state: GameState,
    input: TickInput,
    accumulator: f32,
    sprites: SpriteSheet,
    settings: Settings,
    sound: S,
    display: D,
    // FPS tracking
    frame_times: [f64; FPS_WINDOW],
    frame_index: usize,
    fps: u32,
}

impl<S: SoundSink, D: ScoreDisplay> Game<S, D> {
    /// Build a session. Sprites are loaded here, before any frame is drawn.
    pub fn new(seed: u64, tuning: Tuning, settings: Settings, sound: S, display: D) -> Self {
        let input = TickInput {
            autopilot: settings.autopilot,
            ..Default::default()
        };
        Self {
            state: GameState::with_tuning(seed, tuning),
            input,
            accumulator: 0.0,
            sprites: SpriteSheet::load(),
            settings,
            sound,
            display,
            frame_times: [0.0; FPS_WINDOW],
            frame_index: 0,
            fps: 0,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn sprites(&self) -> &SpriteSheet {
        &self.sprites
    }

    pub fn sound(&self) -> &S {
        &self.sound
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }

    /// A discrete jump/restart command from any input device.
    ///
    /// While Running it jumps right away; otherwise the restart is applied
    /// on the next tick.
    pub fn press(&mut self) {
        if self.state.is_running() {
            if self.state.try_jump() {
                self.dispatch_events();
            }
        } else {
            self.input.restart = true;
        }
    }

    pub fn toggle_autopilot(&mut self) -> bool {
        self.input.autopilot = !self.input.autopilot;
        log::info!("Autopilot: {}", self.input.autopilot);
        self.input.autopilot
    }

    /// Run as many fixed ticks as `dt` seconds of frame time cover.
    /// Returns the number of ticks run.
    pub fn advance(&mut self, dt: f32) -> u32 {
        self.accumulator += dt.clamp(0.0, MAX_FRAME_DT);

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            self.step();
            self.accumulator -= SIM_DT;
            substeps += 1;
        }
        substeps
    }

    /// Run exactly one tick and dispatch what it produced
    pub fn step(&mut self) {
        tick(&mut self.state, &self.input);
        // Clear one-shot inputs after processing
        self.input.jump = false;
        self.input.restart = false;

        self.dispatch_events();

        if self.state.is_running() && self.state.score % SCORE_DISPLAY_EVERY == 0 {
            self.display.show_score(self.state.score);
        }
    }

    fn dispatch_events(&mut self) {
        for event in self.state.drain_events() {
            match event {
                GameEvent::Started => self.display.clear_final_score(),
                GameEvent::Jumped => self.sound.play(SoundCue::Jump),
                GameEvent::SpeedUp { speed } => log::debug!("Scroll speed now {speed:.1}"),
                GameEvent::Crashed { score } => {
                    self.sound.play(SoundCue::Crash);
                    self.display.show_final_score(score);
                }
                GameEvent::RoundOver { .. } => self.sound.play(SoundCue::RoundOver),
            }
        }
    }

    /// Record a frame timestamp in milliseconds for the FPS readout
    pub fn record_frame(&mut self, time_ms: f64) {
        self.frame_times[self.frame_index] = time_ms;
        self.frame_index = (self.frame_index + 1) % FPS_WINDOW;

        // Oldest sample sits at the next write position
        let oldest = self.frame_times[self.frame_index];
        if oldest > 0.0 {
            let elapsed = time_ms - oldest;
            if elapsed > 0.0 {
                self.fps = ((FPS_WINDOW - 1) as f64 * 1000.0 / elapsed).round() as u32;
            }
        }
    }

    /// Draw the current frame
    pub fn render(&self, target: &mut impl RenderTarget) {
        let options = RenderOptions {
            tilt: self.settings.effective_tilt(),
            fps: self.settings.show_fps.then_some(self.fps),
        };
        render(&self.state, &options, target);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::{DrawList, SpriteId};
    use crate::sim::{GamePhase, Obstacle};

    #[derive(Default)]
    struct RecordingSound {
        cues: Vec<SoundCue>,
    }

    impl SoundSink for RecordingSound {
        fn play(&mut self, cue: SoundCue) {
            self.cues.push(cue);
        }
    }

    #[derive(Default)]
    struct RecordingDisplay {
        scores: Vec<u64>,
        finals: Vec<u64>,
        clears: u32,
    }

    impl ScoreDisplay for RecordingDisplay {
        fn show_score(&mut self, score: u64) {
            self.scores.push(score);
        }

        fn show_final_score(&mut self, score: u64) {
            self.finals.push(score);
        }

        fn clear_final_score(&mut self) {
            self.clears += 1;
        }
    }

    fn new_game() -> Game<RecordingSound, RecordingDisplay> {
        Game::new(
            3,
            Tuning::default(),
            Settings::default(),
            RecordingSound::default(),
            RecordingDisplay::default(),
        )
    }

    fn running_game() -> Game<RecordingSound, RecordingDisplay> {
        let mut game = new_game();
        game.press();
        game.step();
        assert_eq!(game.state.phase, GamePhase::Running);
        game
    }

    fn crash(game: &mut Game<RecordingSound, RecordingDisplay>) {
        let tuning = &game.state.tuning;
        let obstacle = Obstacle::new(game.state.player.x, tuning.obstacle_y(), tuning);
        game.state.obstacles.push(obstacle);
        game.step();
        assert_eq!(game.state.phase, GamePhase::Over);
    }

    #[test]
    fn test_sprites_ready_before_first_frame() {
        assert!(new_game().sprites().is_complete());
    }

    #[test]
    fn test_press_starts_on_next_tick() {
        let mut game = new_game();
        game.press();
        assert_eq!(game.state.phase, GamePhase::Idle);
        game.step();
        assert_eq!(game.state.phase, GamePhase::Running);
        assert_eq!(game.state.score, 0);
        assert_eq!(game.display.clears, 1);
    }

    #[test]
    fn test_press_while_running_jumps_immediately() {
        let mut game = running_game();
        game.press();
        assert!(game.state.player.airborne);
        assert_eq!(game.sound.cues, vec![SoundCue::Jump]);

        // Airborne presses are ignored
        game.press();
        assert_eq!(game.sound.cues, vec![SoundCue::Jump]);
    }

    #[test]
    fn test_exactly_one_crash_cue() {
        let mut game = running_game();
        for _ in 0..5 {
            game.step();
        }
        crash(&mut game);
        assert_eq!(game.state.score, 5);
        assert_eq!(game.sound.cues, vec![SoundCue::Crash]);
        assert_eq!(game.display.finals, vec![5]);

        for _ in 0..100 {
            game.step();
        }
        assert_eq!(game.sound.cues, vec![SoundCue::Crash, SoundCue::RoundOver]);
        assert_eq!(game.display.finals, vec![5]);
    }

    #[test]
    fn test_round_over_cue_waits() {
        let mut game = running_game();
        crash(&mut game);
        let delay = game.state.tuning.round_over_delay;
        for _ in 0..delay - 1 {
            game.step();
        }
        assert!(!game.sound.cues.contains(&SoundCue::RoundOver));
        game.step();
        assert_eq!(game.sound.cues.last(), Some(&SoundCue::RoundOver));
    }

    #[test]
    fn test_restart_from_over() {
        let mut game = running_game();
        crash(&mut game);
        game.press();
        game.step();
        assert_eq!(game.state.phase, GamePhase::Running);
        assert_eq!(game.state.score, 0);
        assert!(game.state.obstacles.is_empty());
        assert_eq!(game.display.clears, 2);
    }

    #[test]
    fn test_score_display_every_ten_ticks() {
        let mut game = running_game();
        for _ in 0..25 {
            game.step();
        }
        // Round start shows 0, then every tenth tick
        assert_eq!(game.display.scores, vec![0, 10, 20]);
    }

    #[test]
    fn test_advance_accumulates_fixed_ticks() {
        let mut game = running_game();
        assert_eq!(game.advance(0.04), 2);
        assert_eq!(game.advance(0.02), 1);
        assert_eq!(game.state.score, 3);
    }

    #[test]
    fn test_advance_caps_substeps() {
        let mut game = running_game();
        assert_eq!(game.advance(10.0), MAX_SUBSTEPS);
        assert_eq!(game.state.score, MAX_SUBSTEPS as u64);
    }

    #[test]
    fn test_autopilot_setting_starts_demo() {
        let settings = Settings {
            autopilot: true,
            ..Default::default()
        };
        let mut game = Game::new(
            11,
            Tuning::default(),
            settings,
            RecordingSound::default(),
            RecordingDisplay::default(),
        );
        game.step();
        assert_eq!(game.state.phase, GamePhase::Running);
        assert!(!game.toggle_autopilot());
    }

    #[test]
    fn test_fps_from_frame_times() {
        let mut game = new_game();
        for i in 0..=FPS_WINDOW {
            game.record_frame(1000.0 + i as f64 * 1000.0 / 60.0);
        }
        assert_eq!(game.fps(), 60);
    }

    #[test]
    fn test_render_uses_settings() {
        let mut game = running_game();
        game.press();
        game.step();

        let mut list = DrawList::new();
        game.render(&mut list);
        let (_, rotation) = list.sprites(SpriteId::Player).next().unwrap();
        assert!(rotation < 0.0);
        assert!(!list.texts().any(|t| t.ends_with("FPS")));
    }
}
