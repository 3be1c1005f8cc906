//! The container surface: where it sits on screen and how tall it is.

#[cfg(test)]
#[path = "surface_test.rs"]
mod surface_test;

use crate::geom::Point;

/// Container placement and height.
///
/// `offset` is the container's top-left in screen coordinates; every
/// pointer event is converted to surface-local coordinates through it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Surface {
    pub offset: Point,
    pub height: f64,
    pub min_height: f64,
}

impl Default for Surface {
    fn default() -> Self {
        Self { offset: Point::default(), height: 0.0, min_height: 0.0 }
    }
}

impl Surface {
    #[must_use]
    pub fn new(offset: Point, height: f64, min_height: f64) -> Self {
        Self { offset, height: height.max(min_height), min_height }
    }

    /// Convert a screen-space point to surface-local coordinates.
    #[must_use]
    pub fn screen_to_local(&self, screen: Point) -> Point {
        Point::new(screen.x - self.offset.x, screen.y - self.offset.y)
    }

    /// Convert a surface-local point to screen coordinates.
    #[must_use]
    pub fn local_to_screen(&self, local: Point) -> Point {
        Point::new(local.x + self.offset.x, local.y + self.offset.y)
    }

    /// Grow by `step`, or with `None` shrink back to the minimum height.
    /// Returns the new height.
    pub fn extend(&mut self, step: Option<f64>) -> f64 {
        self.height = match step {
            Some(h) => (self.height + h).max(self.min_height),
            None => self.min_height,
        };
        self.height
    }
}
