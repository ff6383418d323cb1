//! Game state and core simulation types
//!
//! Everything a round needs lives in [`GameState`]; there are no globals.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::collision::Rect;
use super::spawner::Spawner;
use crate::tuning::Tuning;

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Title screen, waiting for the start command
    Idle,
    /// Active gameplay
    Running,
    /// Round ended on a collision, waiting for restart
    Over,
}

/// Notifications for collaborators outside the simulation
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    /// A round started (from Idle or Over)
    Started,
    /// The player left the ground
    Jumped,
    /// Scroll speed stepped up
    SpeedUp { speed: f32 },
    /// Collision: the round is over
    Crashed { score: u64 },
    /// Delayed end-of-round cue after a crash
    RoundOver { score: u64 },
}

/// An event to be emitted once `time_ticks` reaches `at_tick`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScheduledEvent {
    pub at_tick: u64,
    pub event: GameEvent,
}

/// The player sprite
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    /// Left edge (never changes)
    pub x: f32,
    /// Top edge
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Vertical velocity, negative is upward
    pub vy: f32,
    pub airborne: bool,
    /// Resting top edge
    pub ground_y: f32,
}

impl Player {
    pub fn new(tuning: &Tuning) -> Self {
        let ground_y = tuning.player_ground_y();
        Self {
            x: tuning.player_x(),
            y: ground_y,
            width: tuning.player_width,
            height: tuning.player_height,
            vy: 0.0,
            airborne: false,
            ground_y,
        }
    }

    /// Put the player back at rest
    pub fn reset(&mut self) {
        self.y = self.ground_y;
        self.vy = 0.0;
        self.airborne = false;
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

/// An obstacle scrolling toward the player
#[derive(Debug, Clone, PartialEq)]
pub struct Obstacle {
    /// Left edge
    pub x: f32,
    /// Top edge (fixed relative to the ground)
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Obstacle {
    pub fn new(x: f32, y: f32, tuning: &Tuning) -> Self {
        Self {
            x,
            y,
            width: tuning.obstacle_width,
            height: tuning.obstacle_height,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    /// True once the right edge has left the screen
    pub fn is_offscreen(&self) -> bool {
        self.x + self.width < 0.0
    }
}

/// Complete state of one session
#[derive(Debug, Clone)]
pub struct GameState {
    /// Session seed; rounds share one rng stream
    pub seed: u64,
    /// Balance constants
    pub tuning: Tuning,
    pub phase: GamePhase,
    /// Ticks survived in the current round
    pub score: u64,
    /// Current horizontal scroll speed
    pub speed: f32,
    pub player: Player,
    /// Live obstacles in spawn order (also left-to-right order)
    pub obstacles: Vec<Obstacle>,
    pub spawner: Spawner,
    /// Background scroll offset, wraps at world width
    pub background_offset: f32,
    /// Lane marking scroll offset, wraps at the marking period
    pub ground_offset: f32,
    /// Ticks since the session was created, advances in every phase
    pub time_ticks: u64,
    /// Number of rounds started
    pub rounds: u32,
    pub(crate) rng: Pcg32,
    pub(crate) events: Vec<GameEvent>,
    pub(crate) scheduled: Vec<ScheduledEvent>,
}

/// Distance between lane markings
pub const LANE_MARK_PERIOD: f32 = 100.0;

impl GameState {
    /// Create an idle session with the default balance
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    /// Create an idle session with custom balance
    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        Self {
            seed,
            player: Player::new(&tuning),
            speed: tuning.initial_speed,
            spawner: Spawner::new(&tuning),
            tuning,
            phase: GamePhase::Idle,
            score: 0,
            obstacles: Vec::new(),
            background_offset: 0.0,
            ground_offset: 0.0,
            time_ticks: 0,
            rounds: 0,
            rng: Pcg32::seed_from_u64(seed),
            events: Vec::new(),
            scheduled: Vec::new(),
        }
    }

    /// Begin a fresh round. Honored from Idle and Over, ignored while Running.
    pub fn start(&mut self) -> bool {
        if self.phase == GamePhase::Running {
            return false;
        }

        self.score = 0;
        self.speed = self.tuning.initial_speed;
        self.spawner = Spawner::new(&self.tuning);
        self.obstacles.clear();
        self.player.reset();
        self.background_offset = 0.0;
        self.ground_offset = 0.0;
        // A pending end-of-round cue belongs to the previous round
        self.scheduled.clear();
        self.rounds += 1;
        self.phase = GamePhase::Running;
        self.events.push(GameEvent::Started);
        log::info!("Round {} started", self.rounds);
        true
    }

    /// Attempt a jump; a no-op unless Running and grounded
    pub fn try_jump(&mut self) -> bool {
        if self.phase != GamePhase::Running {
            return false;
        }
        if self.player.jump(self.tuning.jump_velocity) {
            self.events.push(GameEvent::Jumped);
            true
        } else {
            false
        }
    }

    /// Running -> Over. Fires once per round.
    pub(crate) fn end_round(&mut self) {
        if self.phase != GamePhase::Running {
            return;
        }
        self.phase = GamePhase::Over;
        self.events.push(GameEvent::Crashed { score: self.score });
        self.scheduled.push(ScheduledEvent {
            at_tick: self.time_ticks.saturating_add(self.tuning.round_over_delay),
            event: GameEvent::RoundOver { score: self.score },
        });
        log::info!("Round {} over with score {}", self.rounds, self.score);
    }

    /// Move due scheduled events into the event queue
    pub(crate) fn fire_scheduled(&mut self) {
        let now = self.time_ticks;
        let mut i = 0;
        while i < self.scheduled.len() {
            if self.scheduled[i].at_tick <= now {
                let due = self.scheduled.remove(i);
                self.events.push(due.event);
            } else {
                i += 1;
            }
        }
    }

    /// Take all events produced since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Events produced since the last drain
    pub fn pending_events(&self) -> &[GameEvent] {
        &self.events
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_is_idle() {
        let state = GameState::new(7);
        assert_eq!(state.phase, GamePhase::Idle);
        assert!(state.obstacles.is_empty());
        assert_eq!(state.score, 0);
        assert_eq!(state.player.y, state.player.ground_y);
        assert!(!state.player.airborne);
    }

    #[test]
    fn test_start_ignored_while_running() {
        let mut state = GameState::new(7);
        assert!(state.start());
        state.score = 42;
        assert!(!state.start());
        assert_eq!(state.score, 42);
        assert_eq!(state.rounds, 1);
    }

    #[test]
    fn test_jump_requires_running() {
        let mut state = GameState::new(7);
        assert!(!state.try_jump());
        assert!(!state.player.airborne);

        state.start();
        assert!(state.try_jump());
        assert!(state.player.airborne);
        assert_eq!(state.player.vy, state.tuning.jump_velocity);

        // Double jump is ignored
        state.player.vy = -3.0;
        assert!(!state.try_jump());
        assert_eq!(state.player.vy, -3.0);
    }

    #[test]
    fn test_end_round_fires_once() {
        let mut state = GameState::new(7);
        state.start();
        state.drain_events();

        state.end_round();
        state.end_round();
        let crashes = state
            .drain_events()
            .into_iter()
            .filter(|e| matches!(e, GameEvent::Crashed { .. }))
            .count();
        assert_eq!(crashes, 1);
        assert_eq!(state.scheduled.len(), 1);
    }

    #[test]
    fn test_scheduled_event_fires_when_due() {
        let mut state = GameState::new(7);
        state.start();
        state.end_round();
        state.drain_events();

        let due = state.time_ticks + state.tuning.round_over_delay;
        state.time_ticks = due - 1;
        state.fire_scheduled();
        assert!(state.pending_events().is_empty());

        state.time_ticks = due;
        state.fire_scheduled();
        assert_eq!(
            state.drain_events(),
            vec![GameEvent::RoundOver { score: 0 }]
        );
        assert!(state.scheduled.is_empty());
    }

    #[test]
    fn test_end_round_with_unbounded_delay() {
        let tuning = Tuning {
            round_over_delay: u64::MAX,
            ..Default::default()
        };
        let mut state = GameState::with_tuning(7, tuning);
        state.start();
        state.time_ticks = 10;
        state.end_round();
        assert_eq!(state.scheduled[0].at_tick, u64::MAX);
    }

    #[test]
    fn test_obstacle_offscreen_edge() {
        let tuning = Tuning::default();
        let mut obstacle = Obstacle::new(0.0, tuning.obstacle_y(), &tuning);
        obstacle.x = -tuning.obstacle_width;
        // Right edge exactly at 0 is still on screen
        assert!(!obstacle.is_offscreen());
        obstacle.x -= 0.5;
        assert!(obstacle.is_offscreen());
    }
}
