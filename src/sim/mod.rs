//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Injected random source only
//! - Obstacles kept in spawn order
//! - No rendering or platform dependencies

pub mod collision;
pub mod difficulty;
pub mod engine;
pub mod spawn;
pub mod state;
pub mod steering;
pub mod tick;

pub use collision::{Aabb, check_all, is_colliding};
pub use difficulty::Difficulty;
pub use engine::Engine;
pub use spawn::{ObstacleFactory, RandomSource, SequenceSource, Spawner, scaled_dimensions};
pub use state::{
    CreatureKind, GameEvent, GamePhase, LaneConfig, Obstacle, Player, SizeClass, WorldState,
};
pub use steering::{SteerDirection, SteeringFilter, direction_of, sensitivity_curve};
pub use tick::{TickInput, tick, tick_into};
