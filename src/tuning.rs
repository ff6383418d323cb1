//! Data-driven game balance
//!
//! Every gameplay constant lives in [`Tuning`]. The defaults are the shipped
//! balance; a page may override them with a JSON document.

use serde::Deserialize;
use thiserror::Error;

/// Errors produced while loading a tuning document
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("invalid tuning json: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("invalid tuning value `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Longest end-of-round cue delay accepted (10 s at 60 Hz)
pub const MAX_ROUND_OVER_DELAY: u64 = 600;

/// Gameplay constants (all distances in world pixels, all times in ticks)
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// World width
    pub world_width: f32,
    /// World height
    pub world_height: f32,
    /// Ground line as a fraction of world height
    pub ground_ratio: f32,

    pub player_width: f32,
    pub player_height: f32,
    /// Player x as a fraction of world width
    pub player_x_ratio: f32,

    pub obstacle_width: f32,
    pub obstacle_height: f32,

    /// Downward acceleration per tick
    pub gravity: f32,
    /// Initial vertical velocity of a jump (negative is up)
    pub jump_velocity: f32,

    /// Scroll speed at the start of a round
    pub initial_speed: f32,
    /// Scroll speed added at every speed-up milestone
    pub speed_increment: f32,
    /// Score points between speed-ups
    pub speed_up_every: u64,

    /// Initial lower spawn interval bound
    pub min_interval: f32,
    /// Initial upper spawn interval bound
    pub max_interval: f32,
    /// Amount both bounds shrink per spawn once past the milestone
    pub interval_decay: f32,
    /// Lowest value the lower bound may reach
    pub interval_floor: f32,
    /// Score after which the interval bounds start shrinking
    pub decay_after_score: u64,

    /// Hitbox scale applied to both rectangles before overlap tests
    pub hitbox_tolerance: f32,
    /// Ticks between the crash and the end-of-round cue
    pub round_over_delay: u64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            world_width: 960.0,
            world_height: 540.0,
            ground_ratio: 0.8,

            player_width: 80.0,
            player_height: 50.0,
            player_x_ratio: 0.2,

            obstacle_width: 50.0,
            obstacle_height: 40.0,

            gravity: 0.6,
            jump_velocity: -12.0,

            initial_speed: 6.0,
            speed_increment: 0.1,
            speed_up_every: 500,

            min_interval: 60.0,
            max_interval: 150.0,
            interval_decay: 0.05,
            interval_floor: 30.0,
            decay_after_score: 1000,

            hitbox_tolerance: 0.7,
            // 500 ms at 60 Hz
            round_over_delay: 30,
        }
    }
}

impl Tuning {
    /// Parse and validate a JSON tuning document. Missing fields keep their
    /// default values.
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Reject values that would make the simulation degenerate
    pub fn validate(&self) -> Result<(), TuningError> {
        fn invalid(field: &'static str, reason: &'static str) -> Result<(), TuningError> {
            Err(TuningError::Invalid { field, reason })
        }

        let floats = [
            ("world_width", self.world_width),
            ("world_height", self.world_height),
            ("ground_ratio", self.ground_ratio),
            ("player_width", self.player_width),
            ("player_height", self.player_height),
            ("player_x_ratio", self.player_x_ratio),
            ("obstacle_width", self.obstacle_width),
            ("obstacle_height", self.obstacle_height),
            ("gravity", self.gravity),
            ("jump_velocity", self.jump_velocity),
            ("initial_speed", self.initial_speed),
            ("speed_increment", self.speed_increment),
            ("min_interval", self.min_interval),
            ("max_interval", self.max_interval),
            ("interval_decay", self.interval_decay),
            ("interval_floor", self.interval_floor),
            ("hitbox_tolerance", self.hitbox_tolerance),
        ];
        if let Some(&(field, _)) = floats.iter().find(|(_, v)| !v.is_finite()) {
            return invalid(field, "must be finite");
        }
        if !(self.world_width > 0.0 && self.world_height > 0.0) {
            return invalid("world_width", "world must have a positive size");
        }
        if !(self.ground_ratio > 0.0 && self.ground_ratio <= 1.0) {
            return invalid("ground_ratio", "must be in (0, 1]");
        }
        if !(self.player_width > 0.0 && self.player_height > 0.0) {
            return invalid("player_width", "player must have a positive size");
        }
        if !(self.obstacle_width > 0.0 && self.obstacle_height > 0.0) {
            return invalid("obstacle_width", "obstacle must have a positive size");
        }
        if self.gravity <= 0.0 {
            return invalid("gravity", "must be positive");
        }
        if self.jump_velocity >= 0.0 {
            return invalid("jump_velocity", "must be negative (upward)");
        }
        if self.initial_speed <= 0.0 {
            return invalid("initial_speed", "must be positive");
        }
        if self.speed_increment < 0.0 {
            return invalid("speed_increment", "must not be negative");
        }
        if self.speed_up_every == 0 {
            return invalid("speed_up_every", "must be at least 1");
        }
        if self.interval_floor < 1.0 {
            return invalid("interval_floor", "must be at least one tick");
        }
        if self.min_interval < self.interval_floor {
            return invalid("min_interval", "must not be below interval_floor");
        }
        if self.max_interval < self.min_interval {
            return invalid("max_interval", "must not be below min_interval");
        }
        if self.interval_decay < 0.0 {
            return invalid("interval_decay", "must not be negative");
        }
        if !(self.hitbox_tolerance > 0.0 && self.hitbox_tolerance <= 1.0) {
            return invalid("hitbox_tolerance", "must be in (0, 1]");
        }
        if self.round_over_delay > MAX_ROUND_OVER_DELAY {
            return invalid("round_over_delay", "must be at most 600 ticks");
        }
        Ok(())
    }

    /// Ground line y coordinate
    pub fn ground_level(&self) -> f32 {
        self.world_height * self.ground_ratio
    }

    /// Resting top edge of the player
    pub fn player_ground_y(&self) -> f32 {
        self.ground_level() - self.player_height
    }

    /// Fixed left edge of the player
    pub fn player_x(&self) -> f32 {
        self.world_width * self.player_x_ratio
    }

    /// Top edge of every obstacle
    pub fn obstacle_y(&self) -> f32 {
        self.ground_level() - self.obstacle_height
    }
}
