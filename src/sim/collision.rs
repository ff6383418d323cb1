//! Axis-aligned bounding-box collision
//!
//! Screen coordinates: x grows to the right, y grows downward, so `top` is
//! the smaller y value.

use glam::Vec2;

use super::state::{Obstacle, Player};

/// An axis-aligned rectangle given by its top-left corner and size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w * 0.5, self.y + self.h * 0.5)
    }

    /// Scale the rectangle about its center
    pub fn scaled(&self, factor: f32) -> Self {
        let w = self.w * factor;
        let h = self.h * factor;
        let c = self.center();
        Self::new(c.x - w * 0.5, c.y - h * 0.5, w, h)
    }

    /// Strict overlap on both axes; touching edges do not overlap
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }
}

/// Player vs single obstacle, both hitboxes shrunk by `tolerance`
pub fn player_hits_obstacle(player: &Player, obstacle: &Obstacle, tolerance: f32) -> bool {
    player
        .rect()
        .scaled(tolerance)
        .overlaps(&obstacle.rect().scaled(tolerance))
}

/// Index of the first obstacle overlapping the player, if any
pub fn first_collision(player: &Player, obstacles: &[Obstacle], tolerance: f32) -> Option<usize> {
    obstacles
        .iter()
        .position(|obstacle| player_hits_obstacle(player, obstacle, tolerance))
}
