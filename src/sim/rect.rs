//! Axis-aligned bounding boxes

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle, origin at its top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
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

    pub fn from_pos_size(pos: Vec2, size: Vec2) -> Self {
        Self::new(pos.x, pos.y, size.x, size.y)
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

    /// Open-interval overlap on the x axis
    #[inline]
    pub fn overlaps_x(&self, other: &Rect) -> bool {
        self.x < other.right() && self.right() > other.x
    }

    /// Open-interval overlap on the y axis
    #[inline]
    pub fn overlaps_y(&self, other: &Rect) -> bool {
        self.y < other.bottom() && self.bottom() > other.y
    }

    #[inline]
    pub fn intersects(&self, other: &Rect) -> bool {
        intersects(self, other)
    }
}

/// Strict AABB overlap; rectangles that only share an edge do not intersect
#[inline]
pub fn intersects(a: &Rect, b: &Rect) -> bool {
    a.x < b.x + b.w && a.x + a.w > b.x && a.y < b.y + b.h && a.y + a.h > b.y
}
