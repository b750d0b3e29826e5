//! Axis-aligned collision detection
//!
//! The body is tested against each obstacle's reduced hitbox, which sits
//! centered inside the sprite footprint so grazing a sprite edge is forgiven.

use glam::Vec2;

use super::state::{Body, Obstacle};

/// Axis-aligned rectangle (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(min: Vec2, size: Vec2) -> Self {
        Self { min, size }
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    /// Overlap with positive area; rectangles that only share an edge do not intersect
    pub fn intersects(&self, other: &Rect) -> bool {
        let a_max = self.max();
        let b_max = other.max();
        self.min.x < b_max.x && other.min.x < a_max.x && self.min.y < b_max.y && other.min.y < a_max.y
    }
}

/// Collision box for the body
pub fn body_rect(body: &Body) -> Rect {
    Rect::new(body.pos, body.size)
}

/// Reduced collision box for an obstacle, centered in its visual footprint
pub fn obstacle_hitbox(obstacle: &Obstacle) -> Rect {
    let visual = obstacle.kind.visual_size();
    let hitbox = obstacle.kind.hitbox_size();
    Rect::new(obstacle.pos + (visual - hitbox) / 2.0, hitbox)
}

/// Index of the first obstacle (in pool order) whose hitbox the body overlaps
pub fn first_hit<'a>(body: &Body, obstacles: impl IntoIterator<Item = &'a Obstacle>) -> Option<usize> {
    let body_box = body_rect(body);
    obstacles
        .into_iter()
        .position(|o| body_box.intersects(&obstacle_hitbox(o)))
}
