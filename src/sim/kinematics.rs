//! Fixed-step motion for the player and the obstacles
//!
//! One call is one tick; there is no variable timestep.

use super::state::{LANE_MARK_PERIOD, Obstacle, Player};

impl Player {
    /// Leave the ground with `velocity`. No-op while airborne.
    pub fn jump(&mut self, velocity: f32) -> bool {
        if self.airborne {
            return false;
        }
        self.vy = velocity;
        self.airborne = true;
        true
    }

    /// Apply gravity, move, and land on the ground line
    pub fn integrate(&mut self, gravity: f32) {
        self.vy += gravity;
        self.y += self.vy;
        if self.y >= self.ground_y {
            self.y = self.ground_y;
            self.vy = 0.0;
            self.airborne = false;
        }
    }

    /// Visual tilt in radians, proportional to vertical velocity while airborne
    pub fn tilt(&self) -> f32 {
        if self.airborne { self.vy * TILT_PER_VELOCITY } else { 0.0 }
    }
}

/// Radians of tilt per unit of vertical velocity
pub const TILT_PER_VELOCITY: f32 = 0.02;

impl Obstacle {
    pub fn advance(&mut self, speed: f32) {
        self.x -= speed;
    }
}

/// Move every obstacle left by `speed` and drop the ones that left the
/// screen. Returns how many were removed.
pub fn advance_obstacles(obstacles: &mut Vec<Obstacle>, speed: f32) -> usize {
    for obstacle in obstacles.iter_mut() {
        obstacle.advance(speed);
    }
    let before = obstacles.len();
    obstacles.retain(|o| !o.is_offscreen());
    before - obstacles.len()
}

/// Background and lane-marking scroll offsets for the next tick
pub fn scroll_offsets(background: f32, ground: f32, speed: f32, width: f32) -> (f32, f32) {
    (
        (background + speed * 0.5) % width,
        (ground + speed) % LANE_MARK_PERIOD,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::Tuning;

    #[test]
    fn test_grounded_player_stays_put() {
        let tuning = Tuning::default();
        let mut player = Player::new(&tuning);
        for _ in 0..100 {
            player.integrate(tuning.gravity);
            assert_eq!(player.y, player.ground_y);
            assert_eq!(player.vy, 0.0);
            assert!(!player.airborne);
        }
    }

    #[test]
    fn test_jump_arc_lands() {
        let tuning = Tuning::default();
        let mut player = Player::new(&tuning);
        assert!(player.jump(tuning.jump_velocity));

        let mut ticks = 0;
        let mut peak = player.y;
        while player.airborne {
            player.integrate(tuning.gravity);
            assert!(player.y <= player.ground_y);
            peak = peak.min(player.y);
            ticks += 1;
            assert!(ticks < 1000, "player never landed");
        }

        assert_eq!(player.y, player.ground_y);
        assert_eq!(player.vy, 0.0);
        // v = -12, g = 0.6: about 40 ticks in the air, ~110 px high
        assert!((38..=42).contains(&ticks), "airtime {ticks}");
        assert!(player.ground_y - peak > 100.0);
    }

    #[test]
    fn test_jump_ignored_while_airborne() {
        let tuning = Tuning::default();
        let mut player = Player::new(&tuning);
        assert!(player.jump(-12.0));
        player.integrate(tuning.gravity);
        let vy = player.vy;
        assert!(!player.jump(-12.0));
        assert_eq!(player.vy, vy);
    }

    #[test]
    fn test_tilt_only_when_airborne() {
        let tuning = Tuning::default();
        let mut player = Player::new(&tuning);
        assert_eq!(player.tilt(), 0.0);
        player.jump(-10.0);
        assert!((player.tilt() - (-0.2)).abs() < 1e-6);
    }

    #[test]
    fn test_obstacles_move_and_cull() {
        let tuning = Tuning::default();
        let mut obstacles = vec![
            Obstacle::new(-45.0, 0.0, &tuning),
            Obstacle::new(100.0, 0.0, &tuning),
        ];

        // First one: right edge 5 -> -1, removed this tick
        let removed = advance_obstacles(&mut obstacles, 6.0);
        assert_eq!(removed, 1);
        assert_eq!(obstacles.len(), 1);
        assert_eq!(obstacles[0].x, 94.0);
    }

    #[test]
    fn test_scroll_offsets_wrap() {
        let (bg, ground) = scroll_offsets(958.0, 98.0, 6.0, 960.0);
        assert!((bg - 1.0).abs() < 1e-4);
        assert!((ground - 4.0).abs() < 1e-4);
    }
}
