//! Input model: modifier keys, mouse buttons, and the gesture state machine.
//!
//! `Modifiers` is the ambient keyboard state read at pointer-down to decide
//! between single and multi-select. `InputState` is the one active gesture
//! between pointer-down and pointer-up. Each active variant owns the drag
//! engine tracking it, so nothing about a gesture lives outside this value.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::doc::Key;
use crate::drag::DragEngine;
use crate::resize::HandleDrag;

/// Keyboard modifier keys held during an event. Only the keys that switch
/// selection behavior are tracked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    /// Ctrl key is held.
    pub ctrl: bool,
    /// Meta / Command key is held.
    pub meta: bool,
}

impl Modifiers {
    /// Ctrl (or Command) switches pointer-down to additive selection.
    #[must_use]
    pub fn multi_select(self) -> bool {
        self.ctrl || self.meta
    }
}

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Button {
    /// Left mouse button (or single-finger tap).
    #[default]
    Primary,
    /// Middle mouse button (scroll wheel click).
    Middle,
    /// Right mouse button (or two-finger tap).
    Secondary,
}

/// The gesture in progress, if any.
#[derive(Debug, Clone, Default)]
pub enum InputState {
    /// No gesture in progress; waiting for the next pointer-down.
    #[default]
    Idle,
    /// One object is being moved.
    DraggingObject {
        key: Key,
        drag: DragEngine,
    },
    /// One of a sole-selected object's handles is being dragged.
    DraggingHandle {
        key: Key,
        drag: HandleDrag,
    },
    /// The aggregate frame of a multi-selection is being dragged. The drag
    /// engine lives in the selection coordinator.
    DraggingGroup,
}

impl InputState {
    #[must_use]
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }
}
