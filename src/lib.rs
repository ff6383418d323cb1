//! Kangoo Jump - a side-scrolling jump-the-obstacle arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (kinematics, spawner, collisions, state machine)
//! - `renderer`: Render pass and WebGPU backend
//! - `platform`: Sound and score collaborators, browser implementations
//! - `game`: Fixed-timestep driver tying the above together
//! - `tuning`: Data-driven game balance

#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod game;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use game::Game;
pub use settings::Settings;
pub use tuning::{Tuning, TuningError};

/// Game configuration constants
pub mod consts {
    /// Simulation rate; one tick per frame on a 60 Hz display
    pub const TICK_HZ: u32 = 60;
    /// Fixed simulation timestep
    pub const SIM_DT: f32 = 1.0 / TICK_HZ as f32;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 5;
    /// Longest frame time accounted for (seconds); longer stalls are dropped
    pub const MAX_FRAME_DT: f32 = 0.1;
    /// Ticks between score display updates
    pub const SCORE_DISPLAY_EVERY: u64 = 10;
}
