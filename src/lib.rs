//! Dino Dodge - a head-steered lane dodging arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (steering, spawning, collisions, game state)
//! - `input`: Head-offset adapter and latest-sample mailbox
//! - `highscores`: Top-5 leaderboard fed by game-over events
//! - `settings`: Persisted difficulty and player name
//! - `clock`: Frame time to fixed simulation ticks
//! - `web`: wasm-bindgen facade for the browser renderer

pub mod clock;
pub mod error;
pub mod highscores;
pub mod input;
pub mod settings;
pub mod sim;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use error::{ConfigError, SimError};
pub use highscores::Leaderboard;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Nominal tick rate of the fixed-step loop
    pub const TICKS_PER_SECOND: u32 = 60;
    /// Fixed simulation timestep in seconds
    pub const SIM_DT: f32 = 1.0 / TICKS_PER_SECOND as f32;
    /// Maximum ticks run per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;

    /// Default lane dimensions
    pub const LANE_WIDTH: f32 = 480.0;
    pub const LANE_HEIGHT: f32 = 600.0;

    /// Player vehicle defaults
    pub const PLAYER_WIDTH: f32 = 80.0;
    pub const PLAYER_HEIGHT: f32 = 100.0;
    /// Distance from the lane bottom to the player's center
    pub const PLAYER_BOTTOM_OFFSET: f32 = 50.0;
    /// Lateral pixels per tick at full steering deflection
    pub const STEER_SPEED: f32 = 5.0;

    /// Obstacle fall speed at score zero (pixels per tick)
    pub const BASE_SPEED: f32 = 2.0;
    /// Speed added per point of score
    pub const SPEED_PER_POINT: f32 = 0.0005;
    /// Score awarded for each obstacle that leaves the lane
    pub const AVOID_SCORE: u32 = 10;
}

/// Obstacle fall speed for a given score
#[inline]
pub fn speed_for_score(score: u32) -> f32 {
    consts::BASE_SPEED + score as f32 * consts::SPEED_PER_POINT
}
