//! Pixel-space points

use serde::{Deserialize, Serialize};

/// 2D point in pixel space, used for localization corners
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    /// X coordinate
    pub x: f32,
    /// Y coordinate
    pub y: f32,
}

impl Point {
    /// Create a new point
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Translate point by (dx, dy)
    pub fn translate(&self, dx: f32, dy: f32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// Axis-aligned bounds of a point set as `(min, max)`, or `None` when empty
pub fn bounds(points: &[Point]) -> Option<(Point, Point)> {
    let first = points.first()?;
    let (min, max) = points.iter().skip(1).fold((*first, *first), |(min, max), p| {
        (
            Point::new(min.x.min(p.x), min.y.min(p.y)),
            Point::new(max.x.max(p.x), max.y.max(p.y)),
        )
    });
    Some((min, max))
}
