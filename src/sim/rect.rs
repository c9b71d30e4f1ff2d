//! Axis-aligned rectangle primitive
//!
//! All entities collide as axis-aligned boxes. Overlap is strict on both
//! axes: rectangles that merely touch at an edge or corner do not collide.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle, stored as top-left corner plus size
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        Self {
            pos: center - size / 2.0,
            size,
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }

    /// Strict open-interval overlap test: touching edges do not count
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }

    pub fn contains_point(&self, p: Vec2) -> bool {
        p.x >= self.left() && p.x <= self.right() && p.y >= self.top() && p.y <= self.bottom()
    }

    /// Grow the rectangle by `margin` on every side
    pub fn expand(&self, margin: f32) -> Rect {
        Rect {
            pos: self.pos - Vec2::splat(margin),
            size: self.size + Vec2::splat(margin * 2.0),
        }
    }

    /// Euclidean distance between rectangle centers
    pub fn center_distance(&self, other: &Rect) -> f32 {
        self.center().distance(other.center())
    }
}
