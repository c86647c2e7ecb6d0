//! # Screen-Space Mathematics
//!
//! Geometry helpers for pointer hit testing and layout calculations.
//!
//! All points live in projected screen space with the y axis pointing up,
//! so an upward drag increases `y`.

use serde::{Deserialize, Serialize};

/// A point in 2D screen space, in pixels.
///
/// # Examples
///
/// ```
/// use spire::ScreenPoint;
///
/// let a = ScreenPoint::new(0.0, 0.0);
/// let b = ScreenPoint::new(3.0, 4.0);
/// assert_eq!(a.distance(b), 5.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScreenPoint {
    pub x: f32,
    pub y: f32,
}

impl ScreenPoint {
    /// Creates a new point with the given coordinates.
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Returns the origin point (0, 0).
    pub fn origin() -> Self {
        Self::new(0.0, 0.0)
    }

    /// Euclidean distance to another point.
    pub fn distance(self, other: ScreenPoint) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Vertical travel from `start` to `self`; positive when moving up.
    pub fn rise_from(self, start: ScreenPoint) -> f32 {
        self.y - start.y
    }

    /// Returns this point shifted by the given offsets.
    pub fn offset(self, dx: f32, dy: f32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

impl std::ops::Add for ScreenPoint {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y)
    }
}

impl std::ops::Sub for ScreenPoint {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y)
    }
}

/// Clamps a value into `[0, 1]`.
pub fn clamp01(value: f32) -> f32 {
    value.clamp(0.0, 1.0)
}
