//! Error types for configuration and simulation

use thiserror::Error;

/// Rejected configuration. The operation is refused and prior state is kept.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("unknown difficulty level `{0}` (expected easy, medium or hard)")]
    UnknownDifficulty(String),
    #[error("lane dimensions must be positive, got {width}x{height}")]
    InvalidLane { width: f32, height: f32 },
    #[error("player {width}x{height} does not fit a lane {lane_width} wide")]
    InvalidPlayer {
        width: f32,
        height: f32,
        lane_width: f32,
    },
}

/// Failure while advancing the simulation
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// A programming error such as a zero-sized obstacle from a bad table
    #[error("invariant violated: {0}")]
    InvariantViolation(String),
}
