//! Points, rectangles, and the rotation math used to place handles.
//!
//! All coordinates are in surface-local space with `y` growing downward, so a
//! positive angle turns clockwise on screen. Angles are in degrees throughout.

#[cfg(test)]
#[path = "geom_test.rs"]
mod geom_test;

use serde::{Deserialize, Deserializer, Serialize};

use crate::consts::FULL_TURN_DEG;

/// A point in surface-local or screen space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    #[must_use]
    pub fn distance_to(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Component-wise `self + (dx, dy)`.
    #[must_use]
    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self { x: self.x + dx, y: self.y + dy }
    }

    /// Component-wise `self - other`, returned as `(dx, dy)`.
    #[must_use]
    pub fn delta_from(self, other: Point) -> (f64, f64) {
        (self.x - other.x, self.y - other.y)
    }
}

/// An un-rotated bounding box plus a clockwise rotation about its own center.
///
/// `rotation` accumulates without wrapping so a continuous rotate gesture
/// never jumps; use [`Rect::display_rotation`] for a value in `[0, 360)`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    #[serde(deserialize_with = "non_negative")]
    pub width: f64,
    #[serde(deserialize_with = "non_negative")]
    pub height: f64,
    #[serde(default)]
    pub rotation: f64,
}

fn non_negative<'de, D>(de: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    f64::deserialize(de).map(|v| v.max(0.0))
}

impl Rect {
    /// Axis-aligned rect with no rotation. Negative sizes are clamped to zero.
    #[must_use]
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width: width.max(0.0), height: height.max(0.0), rotation: 0.0 }
    }

    /// The same rect with negative sizes clamped to zero.
    #[must_use]
    pub fn normalized(self) -> Self {
        Self { width: self.width.max(0.0), height: self.height.max(0.0), ..self }
    }

    #[must_use]
    pub fn with_rotation(self, rotation: f64) -> Self {
        Self { rotation, ..self }
    }

    #[must_use]
    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    #[must_use]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Geometric center; the pivot for this rect's rotation.
    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Same size and rotation, moved by `(dx, dy)`.
    #[must_use]
    pub fn translated(&self, dx: f64, dy: f64) -> Self {
        Self { x: self.x + dx, y: self.y + dy, ..*self }
    }

    /// Grow (positive) or shrink (negative) every edge by `amount`.
    #[must_use]
    pub fn inflated(&self, amount: f64) -> Self {
        Self {
            x: self.x - amount,
            y: self.y - amount,
            width: (self.width + amount * 2.0).max(0.0),
            height: (self.height + amount * 2.0).max(0.0),
            rotation: self.rotation,
        }
    }

    /// Rotation normalized to `[0, 360)` for display.
    #[must_use]
    pub fn display_rotation(&self) -> f64 {
        normalize_degrees_360(self.rotation)
    }

    /// Whether `pt` lies inside this rect once its rotation is taken into account.
    #[must_use]
    pub fn contains(&self, pt: Point) -> bool {
        let local = rotate_around(self.center(), pt, -self.rotation);
        local.x >= self.x && local.x <= self.right() && local.y >= self.y && local.y <= self.bottom()
    }
}

/// Fold any angle into `[0, 360)`.
#[must_use]
pub fn normalize_degrees_360(deg: f64) -> f64 {
    deg.rem_euclid(FULL_TURN_DEG)
}

/// Signed angle, in degrees, that turns the ray `pivot -> ray_start` onto
/// `pivot -> ray_end`.
///
/// The magnitude comes from the law of cosines on the triangle
/// `(pivot, ray_start, ray_end)`; the sign from the cross product of the two
/// rays, positive meaning clockwise on screen. Degenerate triangles (a
/// zero-length ray or non-finite input) yield `0.0`.
#[must_use]
pub fn angle_between(pivot: Point, ray_start: Point, ray_end: Point) -> f64 {
    let ab = pivot.distance_to(ray_start);
    let ac = pivot.distance_to(ray_end);
    let bc = ray_start.distance_to(ray_end);
    if ab <= f64::EPSILON || ac <= f64::EPSILON {
        return 0.0;
    }

    let cos_a = ((ab * ab + ac * ac - bc * bc) / (2.0 * ab * ac)).clamp(-1.0, 1.0);
    if !cos_a.is_finite() {
        return 0.0;
    }
    let magnitude = cos_a.acos().to_degrees();

    let cross = (ray_start.x - pivot.x) * (ray_end.y - ray_start.y) - (ray_start.y - pivot.y) * (ray_end.x - ray_start.x);
    if cross >= 0.0 { magnitude } else { -magnitude }
}

/// Rotate `point` about `pivot` by `degrees` (clockwise on screen).
///
/// A zero angle returns `point` untouched, and `point == pivot` returns the
/// pivot even for a non-finite angle.
#[must_use]
pub fn rotate_around(pivot: Point, point: Point, degrees: f64) -> Point {
    if point == pivot || degrees.abs() < f64::EPSILON {
        return point;
    }
    let (sin, cos) = degrees.to_radians().sin_cos();
    let (dx, dy) = point.delta_from(pivot);
    Point::new(pivot.x + dx * cos - dy * sin, pivot.y + dx * sin + dy * cos)
}
