//! World state and core simulation types
//!
//! Everything a renderer needs to draw a frame lives in `WorldState`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use super::difficulty::Difficulty;
use crate::consts::*;
use crate::error::ConfigError;
use crate::speed_for_score;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Not yet started (or just reset)
    #[default]
    Idle,
    /// Active gameplay
    Running,
    /// Game is paused
    Paused,
    /// Run ended by a collision; only `reset`/`start` leave this state
    GameOver,
    /// Run stopped by an internal error; left the same way as `GameOver`
    Halted,
}

/// Notifications raised by the engine for subscribed collaborators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    Started,
    Paused,
    Reset,
    /// An obstacle scrolled past the bottom edge; carries the new score
    ObstacleAvoided { score: u32 },
    /// Running -> GameOver, carries the final score
    GameOver { score: u32 },
}

/// Creature kinds that fall down the lane
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CreatureKind {
    TRex,
    Ankylosaurus,
    Stegosaurus,
}

impl CreatureKind {
    pub const ALL: [CreatureKind; 3] = [
        CreatureKind::TRex,
        CreatureKind::Ankylosaurus,
        CreatureKind::Stegosaurus,
    ];

    /// Base (width, height) before size scaling
    pub fn base_size(&self) -> (f32, f32) {
        match self {
            CreatureKind::TRex => (50.0, 70.0),
            CreatureKind::Ankylosaurus => (60.0, 45.0),
            CreatureKind::Stegosaurus => (65.0, 55.0),
        }
    }

    /// Body colors as 0xRRGGBB
    pub fn palette(&self) -> &'static [u32] {
        match self {
            // Browns
            CreatureKind::TRex => &[0x8B4513, 0xA0522D, 0x654321],
            // Olives
            CreatureKind::Ankylosaurus => &[0x556B2F, 0x6B8E23, 0x808000],
            // Greens
            CreatureKind::Stegosaurus => &[0x6B8E23, 0x9ACD32, 0x228B22],
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CreatureKind::TRex => "trex",
            CreatureKind::Ankylosaurus => "ankylosaurus",
            CreatureKind::Stegosaurus => "stegosaurus",
        }
    }
}

/// Obstacle size variation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SizeClass {
    Small,
    Medium,
    Large,
}

impl SizeClass {
    pub const ALL: [SizeClass; 3] = [SizeClass::Small, SizeClass::Medium, SizeClass::Large];

    pub fn scale(&self) -> f32 {
        match self {
            SizeClass::Small => 0.7,
            SizeClass::Medium => 1.0,
            SizeClass::Large => 1.4,
        }
    }
}

/// Lane and player dimensions, fixed for the lifetime of an engine
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LaneConfig {
    pub width: f32,
    pub height: f32,
    pub player_width: f32,
    pub player_height: f32,
}

impl Default for LaneConfig {
    fn default() -> Self {
        Self {
            width: LANE_WIDTH,
            height: LANE_HEIGHT,
            player_width: PLAYER_WIDTH,
            player_height: PLAYER_HEIGHT,
        }
    }
}

impl LaneConfig {
    /// Lane of the given size with the default vehicle
    pub fn new(width: f32, height: f32) -> Result<Self, ConfigError> {
        let lane = Self {
            width,
            height,
            ..Self::default()
        };
        lane.validate()?;
        Ok(lane)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = |v: f32| v.is_finite() && v > 0.0;
        if !positive(self.width) || !positive(self.height) {
            return Err(ConfigError::InvalidLane {
                width: self.width,
                height: self.height,
            });
        }
        if !positive(self.player_width)
            || !positive(self.player_height)
            || self.player_width > self.width
        {
            return Err(ConfigError::InvalidPlayer {
                width: self.player_width,
                height: self.player_height,
                lane_width: self.width,
            });
        }
        Ok(())
    }

    /// Horizontal center of the lane
    pub fn center_x(&self) -> f32 {
        self.width / 2.0
    }
}

/// The player's vehicle. `pos` is the box center.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
}

impl Player {
    /// Centered horizontally, near the bottom of the lane
    pub fn new(lane: &LaneConfig) -> Self {
        Self {
            pos: Vec2::new(lane.center_x(), lane.height - PLAYER_BOTTOM_OFFSET),
            width: lane.player_width,
            height: lane.player_height,
        }
    }

    /// Allowed x range keeping the vehicle fully on the lane
    pub fn x_bounds(&self, lane_width: f32) -> (f32, f32) {
        (self.width / 2.0, lane_width - self.width / 2.0)
    }

    /// Shift laterally and clamp to the lane
    pub fn steer(&mut self, dx: f32, lane_width: f32) {
        let (min_x, max_x) = self.x_bounds(lane_width);
        self.pos.x = (self.pos.x + dx).clamp(min_x, max_x);
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.pos, self.width, self.height)
    }
}

/// A falling creature
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    pub kind: CreatureKind,
    pub size: SizeClass,
    /// Display color as 0xRRGGBB
    pub color: u32,
}

impl Obstacle {
    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.pos, self.width, self.height)
    }

    /// CSS-style `#RRGGBB` string for the renderer
    pub fn color_hex(&self) -> String {
        format!("#{:06X}", self.color & 0xFF_FFFF)
    }
}

/// Complete world state for one play session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldState {
    pub lane: LaneConfig,
    pub player: Player,
    /// Obstacles in spawn order
    pub obstacles: Vec<Obstacle>,
    pub score: u32,
    /// Obstacle fall speed (pixels per tick)
    pub speed: f32,
    pub running: bool,
    pub over: bool,
    pub difficulty: Difficulty,
    /// Smoothed steering scalar in [-1, 1]
    pub steering: f32,
    pub phase: GamePhase,
    /// Ticks advanced while running
    pub time_ticks: u64,
}

impl WorldState {
    /// Create a fresh idle world
    pub fn new(lane: LaneConfig, difficulty: Difficulty) -> Self {
        Self {
            lane,
            player: Player::new(&lane),
            obstacles: Vec::new(),
            score: 0,
            speed: speed_for_score(0),
            running: false,
            over: false,
            difficulty,
            steering: 0.0,
            phase: GamePhase::Idle,
            time_ticks: 0,
        }
    }

    /// Restore initial values, keeping lane and difficulty
    pub fn reset(&mut self) {
        *self = Self::new(self.lane, self.difficulty);
    }

    /// Status line shown under the canvas
    pub fn status_line(&self) -> String {
        format!(
            "Score: {} | Speed: {:.1} | Difficulty: {}",
            self.score,
            self.speed,
            self.difficulty.display_name()
        )
    }
}
