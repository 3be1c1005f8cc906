//! Resize and rotate gestures driven through a handle's [`DragEngine`].
//!
//! Every handle is an ordinary draggable; what differs is how its incremental
//! delta is read:
//!
//! | Handle | Effect of `(move_w, move_h)` |
//! |--------|------------------------------|
//! | left-center | `x += move_w`, `width -= move_w` (right edge fixed) |
//! | right-center | `width += move_w` |
//! | bottom-center | `height += move_h` |
//! | bottom-right | `width += move_w`, `height += move_h` |
//! | rotate | turns the object by the angle swept around its center |
//!
//! Shrinking stops at the configured minimum size. A rect that already starts
//! below the minimum is never forced to grow.

#[cfg(test)]
#[path = "resize_test.rs"]
mod resize_test;

use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::drag::{Axis, Bounds, DragEngine, DragOptions, DragStart};
use crate::geom::{Point, Rect, angle_between, normalize_degrees_360, rotate_around};
use crate::handles::{HandleKind, anchor};

/// Sparse geometry update for one object. Only present fields changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ResizeUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f64>,
}

impl ResizeUpdate {
    /// Write the present fields into `rect`. Sizes never go below zero.
    pub fn apply_to(&self, rect: &mut Rect) {
        if let Some(w) = self.width {
            rect.width = w.max(0.0);
        }
        if let Some(h) = self.height {
            rect.height = h.max(0.0);
        }
        if let Some(x) = self.x {
            rect.x = x;
        }
        if let Some(y) = self.y {
            rect.y = y;
        }
        if let Some(r) = self.rotation {
            rect.rotation = r;
        }
    }
}

/// Rotation bookkeeping: the pivot, the rotate handle's un-rotated anchor,
/// and where the dragged handle currently is.
#[derive(Debug, Clone, Copy)]
struct RotateTrack {
    pivot: Point,
    base_anchor: Point,
    handle: Point,
}

/// One in-progress handle gesture on one object.
#[derive(Debug, Clone)]
pub struct HandleDrag {
    kind: HandleKind,
    engine: DragEngine,
    rect: Rect,
    min_width: f64,
    min_height: f64,
    rotate: Option<RotateTrack>,
}

impl HandleDrag {
    /// Start a gesture on handle `kind` of an object whose current rect is
    /// `rect`, with the pointer at `pointer`.
    #[must_use]
    pub fn begin(kind: HandleKind, rect: Rect, pointer: Point, config: &EngineConfig) -> (Self, DragStart) {
        let center = rect.center();
        let base_anchor = anchor(kind, &rect, config);
        let handle = rotate_around(center, base_anchor, rect.rotation);
        let slack_w = (rect.width - config.min_width).max(0.0);
        let slack_h = (rect.height - config.min_height).max(0.0);

        let options = match kind {
            HandleKind::Rotate => DragOptions::default(),
            HandleKind::LeftCenter => DragOptions {
                axis: Axis::X,
                bounds: Bounds { max_x: Some(handle.x + slack_w), ..Bounds::default() },
                forbidden: false,
            },
            HandleKind::RightCenter => DragOptions {
                axis: Axis::X,
                bounds: Bounds { min_x: Some(handle.x - slack_w), ..Bounds::default() },
                forbidden: false,
            },
            HandleKind::BottomCenter => DragOptions {
                axis: Axis::Y,
                bounds: Bounds { min_y: Some(handle.y - slack_h), ..Bounds::default() },
                forbidden: false,
            },
            HandleKind::BottomRight => DragOptions {
                axis: Axis::Xy,
                bounds: Bounds {
                    min_x: Some(handle.x - slack_w),
                    min_y: Some(handle.y - slack_h),
                    ..Bounds::default()
                },
                forbidden: false,
            },
        };

        let mut engine = DragEngine::new(options);
        let start = engine.pointer_down(pointer, Some(handle));
        let rotate = (kind == HandleKind::Rotate).then_some(RotateTrack { pivot: center, base_anchor, handle });
        tracing::debug!(?kind, rotation = rect.rotation, "handle drag started");

        let drag = Self {
            kind,
            engine,
            rect,
            min_width: config.min_width,
            min_height: config.min_height,
            rotate,
        };
        (drag, start)
    }

    #[must_use]
    pub fn kind(&self) -> HandleKind {
        self.kind
    }

    /// The object's rect as the gesture has shaped it so far.
    #[must_use]
    pub fn rect(&self) -> Rect {
        self.rect
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.engine.is_dragging()
    }

    /// Live angle label for the rotate handle.
    #[must_use]
    pub fn readout(&self) -> Option<f64> {
        (self.kind == HandleKind::Rotate && self.is_dragging()).then(|| normalize_degrees_360(self.rect.rotation))
    }

    /// Feed one pointer-move; returns the geometry that changed.
    pub fn pointer_move(&mut self, pointer: Point) -> Option<ResizeUpdate> {
        let step = self.engine.pointer_move(pointer, false)?;
        let (dw, dh) = (step.move_w, step.move_h);

        let update = match self.kind {
            HandleKind::Rotate => {
                let track = self.rotate.as_mut()?;
                track.handle = track.handle.offset(dw, dh);
                let reference = rotate_around(track.pivot, track.base_anchor, self.rect.rotation);
                self.rect.rotation += angle_between(track.pivot, reference, track.handle);
                ResizeUpdate { rotation: Some(self.rect.rotation), ..ResizeUpdate::default() }
            }
            HandleKind::LeftCenter => {
                let right = self.rect.right();
                let width = shrink_limited(self.rect.width, -dw, self.min_width);
                self.rect.x = right - width;
                self.rect.width = width;
                self.size_and_position()
            }
            HandleKind::RightCenter | HandleKind::BottomCenter | HandleKind::BottomRight => {
                self.rect.width = shrink_limited(self.rect.width, dw, self.min_width);
                self.rect.height = shrink_limited(self.rect.height, dh, self.min_height);
                ResizeUpdate { width: Some(self.rect.width), height: Some(self.rect.height), ..ResizeUpdate::default() }
            }
        };
        Some(update)
    }

    /// Finish the gesture, returning the final geometry for the handle kind.
    pub fn pointer_up(&mut self) -> Option<ResizeUpdate> {
        self.engine.pointer_up()?;
        tracing::debug!(kind = ?self.kind, rect = ?self.rect, "handle drag finished");
        Some(self.final_update())
    }

    /// Abort without reporting anything.
    pub fn cancel(&mut self) {
        self.engine.cancel();
    }

    fn size_and_position(&self) -> ResizeUpdate {
        ResizeUpdate {
            width: Some(self.rect.width),
            height: Some(self.rect.height),
            x: Some(self.rect.x),
            y: Some(self.rect.y),
            rotation: None,
        }
    }

    fn final_update(&self) -> ResizeUpdate {
        match self.kind {
            HandleKind::Rotate => ResizeUpdate { rotation: Some(self.rect.rotation), ..ResizeUpdate::default() },
            HandleKind::LeftCenter => self.size_and_position(),
            HandleKind::RightCenter | HandleKind::BottomCenter | HandleKind::BottomRight => ResizeUpdate {
                width: Some(self.rect.width),
                height: Some(self.rect.height),
                ..ResizeUpdate::default()
            },
        }
    }
}

/// `dim + delta`, never shrinking below `min` (or below `dim` itself when
/// `dim` is already under `min`).
fn shrink_limited(dim: f64, delta: f64, min: f64) -> f64 {
    (dim + delta).max(min.min(dim))
}
