//! Axis-aligned bounding box collision
//!
//! Positions are box centers everywhere in the simulation; edges are derived
//! from center and size.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::{Obstacle, Player};

/// Axis-aligned box given by its center and full size
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub center: Vec2,
    pub size: Vec2,
}

impl Aabb {
    pub fn new(center: Vec2, width: f32, height: f32) -> Self {
        Self {
            center,
            size: Vec2::new(width, height),
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.center.x - self.size.x / 2.0
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.center.x + self.size.x / 2.0
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.center.y - self.size.y / 2.0
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.center.y + self.size.y / 2.0
    }
}

/// Strict overlap test. Boxes that only share an edge do not collide.
pub fn is_colliding(a: &Aabb, b: &Aabb) -> bool {
    a.left() < b.right() && a.right() > b.left() && a.top() < b.bottom() && a.bottom() > b.top()
}

/// Index of the first obstacle (in storage order) touching the player
pub fn check_all(player: &Player, obstacles: &[Obstacle]) -> Option<usize> {
    let player_box = player.aabb();
    obstacles
        .iter()
        .position(|o| is_colliding(&player_box, &o.aabb()))
}
