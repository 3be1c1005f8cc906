//! Pointer-tracking state machine for one draggable entity.
//!
//! A [`DragEngine`] is either idle or holding a [`DragSession`]. The session
//! is owned by the engine instance, never shared: two engines (an object and
//! one of its handles, or two independent surfaces) cannot observe each
//! other's gestures.
//!
//! Moves are incremental. Each pointer-move contributes the delta since the
//! previous one, after axis restriction and bounds clamping, and the emitted
//! `move_w` / `move_h` are that clamped increment. Resize handles consume the
//! increment directly instead of recomputing from the drag start.

#[cfg(test)]
#[path = "drag_test.rs"]
mod drag_test;

use serde::{Deserialize, Serialize};

use crate::geom::Point;

/// Which axes a drag may move along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    X,
    Y,
    #[default]
    Xy,
}

impl Axis {
    #[must_use]
    pub fn allows_x(self) -> bool {
        self != Self::Y
    }

    #[must_use]
    pub fn allows_y(self) -> bool {
        self != Self::X
    }
}

/// Optional position limits. Each bound is independent; `Some(0.0)` is a
/// real bound.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Bounds {
    pub min_x: Option<f64>,
    pub max_x: Option<f64>,
    pub min_y: Option<f64>,
    pub max_y: Option<f64>,
}

impl Bounds {
    #[must_use]
    pub fn clamp(&self, pt: Point) -> Point {
        let mut out = pt;
        if let Some(min) = self.min_x {
            out.x = out.x.max(min);
        }
        if let Some(max) = self.max_x {
            out.x = out.x.min(max);
        }
        if let Some(min) = self.min_y {
            out.y = out.y.max(min);
        }
        if let Some(max) = self.max_y {
            out.y = out.y.min(max);
        }
        out
    }
}

/// Static behaviour of one draggable entity.
#[derive(Debug, Clone, Copy, Default)]
pub struct DragOptions {
    pub axis: Axis,
    pub bounds: Bounds,
    /// Forbidden entities still report pointer-down but never move.
    pub forbidden: bool,
}

/// Tracking state between pointer-down and pointer-up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSession {
    /// Pointer at pointer-down.
    pub start_pointer: Point,
    /// Entity position at pointer-down.
    pub start_position: Point,
    /// Pointer at the previous move; the next delta is measured from here.
    pub last_pointer: Point,
    /// Last committed (clamped) entity position.
    pub position: Point,
}

/// Reported on every pointer-down, armed or not.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragStart {
    pub position: Point,
    /// Whether move tracking was armed (false for forbidden entities).
    pub armed: bool,
    /// The host should drop any document text selection so the drag doesn't
    /// carry highlighted text along.
    pub clear_text_selection: bool,
}

/// Reported for each applied pointer-move.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragMove {
    pub position: Point,
    /// Clamped horizontal increment since the previous move.
    pub move_w: f64,
    /// Clamped vertical increment since the previous move.
    pub move_h: f64,
}

/// Reported on pointer-up of an armed drag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragEnd {
    /// Last committed position, not the raw pointer.
    pub position: Point,
    /// Total displacement over the gesture.
    pub total_dx: f64,
    pub total_dy: f64,
}

/// Per-entity drag state machine: `Idle -> Dragging -> Idle`.
#[derive(Debug, Clone, Default)]
pub struct DragEngine {
    options: DragOptions,
    /// Position used when pointer-down supplies none.
    default_position: Point,
    session: Option<DragSession>,
}

impl DragEngine {
    #[must_use]
    pub fn new(options: DragOptions) -> Self {
        Self { options, default_position: Point::default(), session: None }
    }

    #[must_use]
    pub fn with_default_position(mut self, position: Point) -> Self {
        self.default_position = position;
        self
    }

    #[must_use]
    pub fn options(&self) -> &DragOptions {
        &self.options
    }

    /// Change options between gestures (e.g. when an object gets locked).
    pub fn set_options(&mut self, options: DragOptions) {
        self.options = options;
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    #[must_use]
    pub fn session(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }

    /// Idle -> Dragging. `position` is the entity's current position as the
    /// host knows it; `None` falls back to the engine's default position.
    pub fn pointer_down(&mut self, pointer: Point, position: Option<Point>) -> DragStart {
        let position = position.unwrap_or(self.default_position);
        if self.options.forbidden {
            tracing::trace!("pointer-down on forbidden entity; not arming");
            self.session = None;
            return DragStart { position, armed: false, clear_text_selection: true };
        }
        self.session =
            Some(DragSession { start_pointer: pointer, start_position: position, last_pointer: pointer, position });
        DragStart { position, armed: true, clear_text_selection: true }
    }

    /// Apply one pointer-move. Returns `None` when no drag is armed or when
    /// `suppressed` (the entity belongs to a group whose frame owns the drag).
    pub fn pointer_move(&mut self, pointer: Point, suppressed: bool) -> Option<DragMove> {
        if suppressed {
            return None;
        }
        let axis = self.options.axis;
        let bounds = self.options.bounds;
        let session = self.session.as_mut()?;

        let (dx, dy) = pointer.delta_from(session.last_pointer);
        let proposed = Point::new(
            if axis.allows_x() { session.position.x + dx } else { session.position.x },
            if axis.allows_y() { session.position.y + dy } else { session.position.y },
        );
        let next = bounds.clamp(proposed);
        let (move_w, move_h) = next.delta_from(session.position);

        session.position = next;
        session.last_pointer = pointer;
        Some(DragMove { position: next, move_w, move_h })
    }

    /// Dragging -> Idle, reporting the last committed position.
    pub fn pointer_up(&mut self) -> Option<DragEnd> {
        let session = self.session.take()?;
        let (total_dx, total_dy) = session.position.delta_from(session.start_position);
        self.default_position = session.position;
        Some(DragEnd { position: session.position, total_dx, total_dy })
    }

    /// Abort the gesture (pointer capture lost, window blur). Nothing is
    /// reported; the session is simply dropped.
    pub fn cancel(&mut self) {
        if self.session.take().is_some() {
            tracing::debug!("drag cancelled");
        }
    }

    /// Double-click asks the host to start editing unless the entity is
    /// forbidden.
    #[must_use]
    pub fn double_click(&self) -> bool {
        !self.options.forbidden
    }
}
