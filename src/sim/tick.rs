//! Fixed timestep simulation tick
//!
//! Order within a tick: inputs, kinematics, spawner, collision, then the
//! state machine (score, speed ramp).

use super::collision::first_collision;
use super::kinematics::{advance_obstacles, scroll_offsets};
use super::state::{GameEvent, GamePhase, GameState};

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Jump (ignored unless Running and grounded)
    pub jump: bool,
    /// Start from Idle or restart from Over (ignored while Running)
    pub restart: bool,
    /// Demo mode - jump automatically when an obstacle is in reach
    pub autopilot: bool,
}

/// Ticks of lead the autopilot gives itself before an obstacle reaches the
/// player's hitbox
pub const AUTOPILOT_LEAD_TICKS: f32 = 10.0;

/// Advance the game state by one tick
pub fn tick(state: &mut GameState, input: &TickInput) {
    state.time_ticks += 1;

    match state.phase {
        GamePhase::Idle | GamePhase::Over => {
            if input.restart || (input.autopilot && state.phase == GamePhase::Idle) {
                // The restart tick only resets; simulation resumes next tick.
                // Starting first drops cues of the previous round due this tick.
                state.start();
            }
            state.fire_scheduled();
            return;
        }
        GamePhase::Running => state.fire_scheduled(),
    }

    if input.jump || (input.autopilot && autopilot_wants_jump(state)) {
        state.try_jump();
    }

    // Kinematics
    let tuning = &state.tuning;
    state.player.integrate(tuning.gravity);
    advance_obstacles(&mut state.obstacles, state.speed);
    (state.background_offset, state.ground_offset) = scroll_offsets(
        state.background_offset,
        state.ground_offset,
        state.speed,
        tuning.world_width,
    );

    // Spawner
    if let Some(obstacle) = state.spawner.tick(state.score, tuning, &mut state.rng) {
        state.obstacles.push(obstacle);
    }

    // Collision
    if first_collision(&state.player, &state.obstacles, tuning.hitbox_tolerance).is_some() {
        state.end_round();
        return;
    }

    // Score and difficulty ramp
    state.score += 1;
    if state.score % state.tuning.speed_up_every == 0 {
        state.speed += state.tuning.speed_increment;
        state.events.push(GameEvent::SpeedUp { speed: state.speed });
        log::debug!("Speed up to {:.2} at score {}", state.speed, state.score);
    }
}

/// Jump when the nearest obstacle ahead is about to reach the player
fn autopilot_wants_jump(state: &GameState) -> bool {
    if state.player.airborne {
        return false;
    }

    let tolerance = state.tuning.hitbox_tolerance;
    let player_box = state.player.rect().scaled(tolerance);
    let player_center = player_box.center().x;

    state
        .obstacles
        .iter()
        .map(|o| o.rect().scaled(tolerance))
        .filter(|o| o.center().x > player_center)
        .any(|o| {
            let reach = (player_box.w + o.w) * 0.5;
            let gap = o.center().x - player_center;
            gap <= reach + state.speed * AUTOPILOT_LEAD_TICKS
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::Obstacle;

    fn running(seed: u64) -> GameState {
        let mut state = GameState::new(seed);
        tick(
            &mut state,
            &TickInput {
                restart: true,
                ..Default::default()
            },
        );
        state.drain_events();
        state
    }

    #[test]
    fn test_tick_idle_to_running() {
        let mut state = GameState::new(12345);
        tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::Idle);

        // Jump alone does not start a round
        tick(
            &mut state,
            &TickInput {
                jump: true,
                ..Default::default()
            },
        );
        assert_eq!(state.phase, GamePhase::Idle);

        tick(
            &mut state,
            &TickInput {
                restart: true,
                ..Default::default()
            },
        );
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.score, 0);
        assert_eq!(state.drain_events(), vec![GameEvent::Started]);
    }

    #[test]
    fn test_score_counts_ticks() {
        let mut state = running(1);
        for i in 1..=50 {
            tick(&mut state, &TickInput::default());
            assert_eq!(state.score, i);
        }
    }

    #[test]
    fn test_restart_ignored_while_running() {
        let mut state = running(1);
        for _ in 0..10 {
            tick(&mut state, &TickInput::default());
        }
        tick(
            &mut state,
            &TickInput {
                restart: true,
                ..Default::default()
            },
        );
        assert_eq!(state.score, 11);
        assert_eq!(state.rounds, 1);
    }

    #[test]
    fn test_spawned_obstacle_waits_one_tick() {
        let mut state = running(1);
        for _ in 0..59 {
            tick(&mut state, &TickInput::default());
        }
        assert!(state.obstacles.is_empty());

        tick(&mut state, &TickInput::default());
        assert_eq!(state.obstacles.len(), 1);
        assert_eq!(state.obstacles[0].x, state.tuning.world_width);

        tick(&mut state, &TickInput::default());
        assert_eq!(
            state.obstacles[0].x,
            state.tuning.world_width - state.speed
        );
    }

    #[test]
    fn test_collision_ends_round() {
        let mut state = running(1);
        tick(&mut state, &TickInput::default());
        let score_before = state.score;

        let x = state.player.x + state.speed;
        let y = state.tuning.obstacle_y();
        let obstacle = Obstacle::new(x, y, &state.tuning);
        state.obstacles.push(obstacle);

        tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::Over);
        assert_eq!(state.score, score_before);
        assert_eq!(
            state.drain_events(),
            vec![GameEvent::Crashed {
                score: score_before
            }]
        );
    }

    #[test]
    fn test_jump_input_applies_before_motion() {
        let mut state = running(1);
        tick(
            &mut state,
            &TickInput {
                jump: true,
                ..Default::default()
            },
        );
        assert!(state.player.airborne);
        let expected = state.player.ground_y + state.tuning.jump_velocity + state.tuning.gravity;
        assert!((state.player.y - expected).abs() < 1e-4);
        assert_eq!(state.drain_events(), vec![GameEvent::Jumped]);
    }

    #[test]
    fn test_over_freezes_world() {
        let mut state = running(1);
        state.end_round();
        let snapshot_score = state.score;
        let snapshot_speed = state.speed;
        let obstacles = state.obstacles.clone();

        for _ in 0..100 {
            tick(
                &mut state,
                &TickInput {
                    jump: true,
                    ..Default::default()
                },
            );
        }

        assert_eq!(state.phase, GamePhase::Over);
        assert_eq!(state.score, snapshot_score);
        assert_eq!(state.speed, snapshot_speed);
        assert_eq!(state.obstacles, obstacles);
        assert!(!state.player.airborne);
    }

    #[test]
    fn test_round_over_cue_after_delay() {
        let mut state = running(1);
        state.end_round();
        state.drain_events();

        let delay = state.tuning.round_over_delay;
        for _ in 0..delay - 1 {
            tick(&mut state, &TickInput::default());
        }
        assert!(state.pending_events().is_empty());

        tick(&mut state, &TickInput::default());
        assert_eq!(state.drain_events(), vec![GameEvent::RoundOver { score: 0 }]);

        for _ in 0..100 {
            tick(&mut state, &TickInput::default());
        }
        assert!(state.pending_events().is_empty());
    }

    #[test]
    fn test_restart_cancels_pending_cue() {
        let mut state = running(1);
        state.end_round();
        tick(
            &mut state,
            &TickInput {
                restart: true,
                ..Default::default()
            },
        );
        state.drain_events();

        for _ in 0..state.tuning.round_over_delay * 2 {
            tick(&mut state, &TickInput::default());
            state.obstacles.clear();
        }
        assert!(
            !state
                .drain_events()
                .iter()
                .any(|e| matches!(e, GameEvent::RoundOver { .. }))
        );
    }

    #[test]
    fn test_restart_on_cue_tick_drops_cue() {
        let mut state = running(1);
        state.end_round();
        state.drain_events();

        for _ in 0..state.tuning.round_over_delay - 1 {
            tick(&mut state, &TickInput::default());
        }
        // The cue would fire on this very tick
        tick(
            &mut state,
            &TickInput {
                restart: true,
                ..Default::default()
            },
        );
        assert_eq!(state.drain_events(), vec![GameEvent::Started]);
        assert!(state.is_running());
    }

    #[test]
    fn test_autopilot_survives() {
        for seed in [1, 42, 9001] {
            let mut state = GameState::new(seed);
            let input = TickInput {
                autopilot: true,
                ..Default::default()
            };
            for _ in 0..3000 {
                tick(&mut state, &input);
            }
            assert_eq!(state.phase, GamePhase::Running, "seed {seed} crashed");
            assert!(state.score >= 2999);
        }
    }

    #[test]
    fn test_determinism() {
        let mut a = GameState::new(99999);
        let mut b = GameState::new(99999);
        let input = TickInput {
            autopilot: true,
            ..Default::default()
        };

        for _ in 0..1500 {
            tick(&mut a, &input);
            tick(&mut b, &input);
        }

        assert_eq!(a.score, b.score);
        assert_eq!(a.obstacles, b.obstacles);
        assert_eq!(a.spawner, b.spawner);
    }
}
