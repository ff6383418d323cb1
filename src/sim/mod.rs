//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Obstacles kept in spawn order
//! - No rendering or platform dependencies

pub mod collision;
pub mod kinematics;
pub mod spawner;
pub mod state;
pub mod tick;

pub use collision::{Rect, first_collision, player_hits_obstacle};
pub use kinematics::advance_obstacles;
pub use spawner::Spawner;
pub use state::{GameEvent, GamePhase, GameState, LANE_MARK_PERIOD, Obstacle, Player};
pub use tick::{TickInput, tick};
