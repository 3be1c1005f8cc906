//! Handle layout: where the resize and rotate handles sit around an object.
//!
//! Anchors are computed against the object's un-rotated rect, each inset or
//! outset by half a handle so the handle straddles the edge it controls, then
//! carried through [`rotate_around`] about the rect center so they follow the
//! object when it is rotated.

#[cfg(test)]
#[path = "handles_test.rs"]
mod handles_test;

use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::geom::{Point, Rect, normalize_degrees_360, rotate_around};

/// The five interaction handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HandleKind {
    /// Above the top edge; drags turn the object about its center.
    Rotate,
    /// Middle of the left edge; moves the left edge, right edge stays put.
    LeftCenter,
    /// Middle of the right edge; grows/shrinks width.
    RightCenter,
    /// Middle of the bottom edge; grows/shrinks height.
    BottomCenter,
    /// Bottom-right corner; grows/shrinks both.
    BottomRight,
}

impl HandleKind {
    pub const ALL: [HandleKind; 5] =
        [Self::Rotate, Self::LeftCenter, Self::RightCenter, Self::BottomCenter, Self::BottomRight];

    /// Whether this handle only resizes along one axis and can be switched
    /// off by config.
    #[must_use]
    pub fn is_axis_only(self) -> bool {
        matches!(self, Self::LeftCenter | Self::RightCenter | Self::BottomCenter)
    }
}

/// A handle's un-rotated anchor and its displayed position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Handle {
    pub kind: HandleKind,
    pub anchor: Point,
    pub position: Point,
}

/// What the host knows about the object when deciding which handles to show.
#[derive(Debug, Clone, Copy, Default)]
pub struct HandleContext {
    /// The object is the only selected item.
    pub sole_selected: bool,
    pub locked: bool,
}

impl HandleContext {
    /// Handles only ever appear on a sole-selected, unlocked object.
    #[must_use]
    pub fn shows_handles(&self) -> bool {
        self.sole_selected && !self.locked
    }
}

/// Un-rotated anchor for one handle kind.
#[must_use]
pub fn anchor(kind: HandleKind, rect: &Rect, config: &EngineConfig) -> Point {
    let half = config.handle_size / 2.0;
    let inset = config.padding / 2.0;
    let Rect { x, y, width: w, height: h, .. } = *rect;
    match kind {
        HandleKind::Rotate => Point::new(x + w / 2.0 - half, y - inset - config.rotate_offset),
        HandleKind::LeftCenter => Point::new(x - half, y + h / 2.0 - half),
        HandleKind::RightCenter => Point::new(x + w - half - inset, y + h / 2.0 - half),
        HandleKind::BottomCenter => Point::new(x + w / 2.0 - half, y + h - half - inset),
        HandleKind::BottomRight => Point::new(x + w - half - inset, y + h - half - inset),
    }
}

/// Positions of all five handles for one object.
#[derive(Debug, Clone, PartialEq)]
pub struct HandleLayout {
    /// Pivot the anchors were rotated about.
    pub center: Point,
    pub rotation: f64,
    pub handles: Vec<Handle>,
}

impl HandleLayout {
    /// Lay out every handle for `rect`, rotated by `rect.rotation`.
    #[must_use]
    pub fn compute(rect: &Rect, config: &EngineConfig) -> Self {
        let center = rect.center();
        let handles = HandleKind::ALL
            .into_iter()
            .map(|kind| {
                let anchor = anchor(kind, rect, config);
                Handle { kind, anchor, position: rotate_around(center, anchor, rect.rotation) }
            })
            .collect();
        Self { center, rotation: rect.rotation, handles }
    }

    /// Lay out only the handles that should be visible in `ctx`.
    #[must_use]
    pub fn visible(rect: &Rect, config: &EngineConfig, ctx: HandleContext) -> Self {
        let mut layout = Self::compute(rect, config);
        if !ctx.shows_handles() {
            layout.handles.clear();
            return layout;
        }
        layout.handles.retain(|h| match h.kind {
            HandleKind::LeftCenter | HandleKind::RightCenter => config.resize_x,
            HandleKind::BottomCenter => config.resize_y,
            HandleKind::Rotate | HandleKind::BottomRight => true,
        });
        layout
    }

    #[must_use]
    pub fn get(&self, kind: HandleKind) -> Option<&Handle> {
        self.handles.iter().find(|h| h.kind == kind)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }
}

/// Angle label shown next to the rotate handle: the rotation folded into
/// `[0, 360)` while a rotate drag is in progress, nothing otherwise.
#[must_use]
pub fn rotation_readout(rotation: f64, rotating: bool) -> Option<f64> {
    rotating.then(|| normalize_degrees_360(rotation))
}
