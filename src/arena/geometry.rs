//! Axis-aligned rectangles in arena-local coordinates (top-left origin, y down).
use bevy::math::Vec2;
use serde::Serialize;

use crate::core::errors::ArenaError;

/// Positioned box used by every entity for collision and proximity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Result<Self, ArenaError> {
        if !(width > 0.0 && height > 0.0) {
            return Err(ArenaError::DegenerateRect { width, height });
        }
        Ok(Self {
            x,
            y,
            width,
            height,
        })
    }

    pub fn position(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width * 0.5, self.y + self.height * 0.5)
    }

    /// Same size, moved to `position`.
    pub fn at(&self, position: Vec2) -> Self {
        Self {
            x: position.x,
            y: position.y,
            ..*self
        }
    }

    /// Strict AABB overlap: touching edges do not count.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.x + other.width
            && self.x + self.width > other.x
            && self.y < other.y + other.height
            && self.y + self.height > other.y
    }

    /// Euclidean distance between the two centres.
    pub fn center_distance(&self, other: &Rect) -> f32 {
        self.center().distance(other.center())
    }

    /// Distance from `point` to the closest point of this rectangle (zero inside).
    pub fn distance_to_point(&self, point: Vec2) -> f32 {
        let closest = Vec2::new(
            point.x.clamp(self.x, self.x + self.width),
            point.y.clamp(self.y, self.y + self.height),
        );
        closest.distance(point)
    }
}
