use serde::Serialize;

use crate::config::EngineConfig;
use crate::doc::{DocStore, Key, ObjectRef};
use crate::drag::{DragEngine, DragOptions};
use crate::geom::{Point, Rect};
use crate::handles::{HandleContext, HandleKind, HandleLayout};
use crate::hit::{Hit, hit_object, hit_test};
use crate::input::{Button, InputState, Modifiers};
use crate::resize::{HandleDrag, ResizeUpdate};
use crate::selection::{Command, DragMultKind, MergeRequest, SelectionCoordinator};
use crate::surface::Surface;

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action {
    /// Whole-selection change: moved, copied, deleted, or lock toggled.
    DragMult { kind: DragMultKind, items: Vec<ObjectRef> },
    /// Group the listed members under a new key.
    MergeMult(MergeRequest),
    /// A handle drag reshaped one object.
    Resize { key: Key, update: ResizeUpdate },
    /// A single-object drag moved one object.
    Moved { key: Key, x: f64, y: f64 },
    SelectionChanged { keys: Vec<Key> },
    /// Nested selections (inside groups) should reset.
    ClearBroadcast { token: u64 },
    /// Drop any document text selection so the drag doesn't highlight text.
    ClearTextSelection,
    EditRequested { key: Key },
    HeightChanged { height: f64 },
    /// Angle label next to the rotate handle; `None` hides it.
    RotationReadout { degrees: Option<f64> },
}

/// Core engine state: the live objects, the selection, and the one gesture
/// in progress.
///
/// Every handler takes screen-space points, converts them through the
/// surface offset, and returns the actions the host should apply.
#[derive(Debug)]
pub struct EngineCore {
    pub config: EngineConfig,
    pub doc: DocStore,
    pub selection: SelectionCoordinator,
    pub surface: Surface,
    pub gesture: InputState,
    modifiers: Modifiers,
}

impl Default for EngineCore {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl EngineCore {
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        Self::with_selection(config, SelectionCoordinator::new(config))
    }

    /// Build around a pre-configured coordinator (e.g. one with a fixed key
    /// clock).
    #[must_use]
    pub fn with_selection(config: EngineConfig, selection: SelectionCoordinator) -> Self {
        Self {
            config,
            doc: DocStore::new(),
            selection,
            surface: Surface::default(),
            gesture: InputState::Idle,
            modifiers: Modifiers::default(),
        }
    }

    // --- Data inputs ---

    /// Replace every object with a host snapshot. Any gesture in progress is
    /// abandoned and the selection drops objects that are gone.
    pub fn load_snapshot(&mut self, objects: Vec<ObjectRef>) -> Vec<Action> {
        let mut actions = self.cancel_gesture();
        self.doc.load_snapshot(objects);
        tracing::info!(count = self.doc.len(), "snapshot loaded");
        actions.extend(self.selection.sync_from(&self.doc));
        actions
    }

    /// Host created an object, or replaced one under an existing key.
    pub fn apply_create(&mut self, object: ObjectRef) -> Vec<Action> {
        self.doc.insert(object);
        self.selection.sync_from(&self.doc)
    }

    /// Host changed an object's geometry.
    pub fn apply_update(&mut self, key: &str, update: &ResizeUpdate) -> Vec<Action> {
        let Some(obj) = self.doc.get_mut(key) else {
            tracing::debug!(key, "update for unknown object ignored");
            return Vec::new();
        };
        update.apply_to(&mut obj.rect);
        self.selection.sync_from(&self.doc)
    }

    /// Host deleted an object. A gesture on it is cancelled.
    pub fn apply_delete(&mut self, key: &str) -> Vec<Action> {
        let mut actions = Vec::new();
        if self.gesture_key() == Some(key) {
            actions.extend(self.cancel_gesture());
        }
        self.doc.remove(key);
        actions.extend(self.selection.sync_from(&self.doc));
        actions
    }

    /// Update the held modifier keys. Entering multi-select broadcasts a
    /// clear so nested selections let go.
    pub fn set_modifiers(&mut self, modifiers: Modifiers) -> Vec<Action> {
        let was_multi = self.modifiers.multi_select();
        self.modifiers = modifiers;
        self.selection.set_multi(modifiers.multi_select());
        if modifiers.multi_select() && !was_multi {
            tracing::debug!("multi-select entered");
            return vec![self.selection.broadcast_clear()];
        }
        Vec::new()
    }

    pub fn set_pinned(&mut self, pinned: bool) {
        self.selection.set_pinned(pinned);
    }

    pub fn set_surface(&mut self, surface: Surface) {
        self.surface = surface;
    }

    // --- Commands ---

    /// Queue a whole-selection command and run the queue.
    pub fn submit(&mut self, command: Command) -> Vec<Action> {
        self.selection.submit(command);
        self.selection.drain_commands(&mut self.doc)
    }

    /// Ask the host to group the current multi-selection.
    pub fn merge(&mut self) -> Vec<Action> {
        self.selection.merge(&self.doc)
    }

    /// Grow the surface by the configured step, or shrink it back to its
    /// minimum height.
    pub fn extend_surface(&mut self, grow: bool) -> Action {
        let step = grow.then_some(self.config.extend_step);
        let height = self.surface.extend(step);
        tracing::debug!(height, "surface height changed");
        Action::HeightChanged { height }
    }

    // --- Pointer input ---

    /// Pointer pressed. Handles of the sole selection take priority, then
    /// the group frame, then objects; anything else is the background.
    pub fn on_pointer_down(&mut self, screen_pt: Point, button: Button, modifiers: Modifiers) -> Vec<Action> {
        let mut actions = self.set_modifiers(modifiers);
        if button != Button::Primary {
            return actions;
        }
        if !self.gesture.is_idle() {
            tracing::debug!("pointer-down while a gesture is active; dropping it");
            actions.extend(self.cancel_gesture());
        }

        let local = self.surface.screen_to_local(screen_pt);
        match hit_test(local, &self.doc, &self.selection, &self.config) {
            Some(Hit::Handle { key, kind }) => actions.extend(self.begin_handle(key, kind, local)),
            Some(Hit::GroupFrame) => actions.extend(self.begin_group(local)),
            Some(Hit::Object { key }) => actions.extend(self.begin_object(key, local)),
            None => actions.extend(self.selection.background_pointer_down(local, &mut self.doc)),
        }
        actions
    }

    /// Pointer moved. Routed to whichever drag owns the active gesture.
    pub fn on_pointer_move(&mut self, screen_pt: Point) -> Vec<Action> {
        let local = self.surface.screen_to_local(screen_pt);
        match &mut self.gesture {
            InputState::Idle => Vec::new(),
            InputState::DraggingObject { key, drag } => {
                let Some(step) = drag.pointer_move(local, self.selection.is_group()) else {
                    return Vec::new();
                };
                if let Some(obj) = self.doc.get_mut(key) {
                    obj.rect.x = step.position.x;
                    obj.rect.y = step.position.y;
                }
                vec![Action::Moved { key: key.clone(), x: step.position.x, y: step.position.y }]
            }
            InputState::DraggingHandle { key, drag } => {
                let Some(update) = drag.pointer_move(local) else {
                    return Vec::new();
                };
                if let Some(obj) = self.doc.get_mut(key) {
                    update.apply_to(&mut obj.rect);
                }
                let mut actions = vec![Action::Resize { key: key.clone(), update }];
                if drag.kind() == HandleKind::Rotate {
                    actions.push(Action::RotationReadout { degrees: drag.readout() });
                }
                actions
            }
            InputState::DraggingGroup => self.selection.group_pointer_move(local, &mut self.doc),
        }
    }

    /// Pointer released. Reports the last committed geometry, not the
    /// release point.
    pub fn on_pointer_up(&mut self, button: Button) -> Vec<Action> {
        if button != Button::Primary {
            return Vec::new();
        }
        match std::mem::take(&mut self.gesture) {
            InputState::Idle => Vec::new(),
            InputState::DraggingObject { key, mut drag } => {
                let Some(end) = drag.pointer_up() else {
                    return Vec::new();
                };
                if let Some(obj) = self.doc.get(&key) {
                    self.selection.register_end(obj);
                }
                tracing::debug!(key = %key, dx = end.total_dx, dy = end.total_dy, "object drag finished");
                vec![Action::Moved { key, x: end.position.x, y: end.position.y }]
            }
            InputState::DraggingHandle { key, mut drag } => {
                let Some(update) = drag.pointer_up() else {
                    return Vec::new();
                };
                if let Some(obj) = self.doc.get_mut(&key) {
                    update.apply_to(&mut obj.rect);
                }
                if let Some(obj) = self.doc.get(&key) {
                    self.selection.register_end(obj);
                }
                let mut actions = vec![Action::Resize { key, update }];
                if drag.kind() == HandleKind::Rotate {
                    actions.push(Action::RotationReadout { degrees: None });
                }
                actions
            }
            InputState::DraggingGroup => {
                self.selection.group_pointer_up();
                Vec::new()
            }
        }
    }

    /// Double-click on an unlocked object asks the host to edit it.
    pub fn on_double_click(&mut self, screen_pt: Point) -> Vec<Action> {
        let local = self.surface.screen_to_local(screen_pt);
        let Some(key) = hit_object(local, &self.doc) else {
            return Vec::new();
        };
        if self.doc.get(&key).is_some_and(|o| o.locked) {
            return Vec::new();
        }
        tracing::debug!(key = %key, "edit requested");
        vec![Action::EditRequested { key }]
    }

    /// Abandon the gesture in progress (pointer capture lost, window blur).
    /// No position is reported; geometry already applied stays.
    pub fn cancel_gesture(&mut self) -> Vec<Action> {
        match std::mem::take(&mut self.gesture) {
            InputState::Idle => Vec::new(),
            InputState::DraggingObject { key, mut drag } => {
                drag.cancel();
                if let Some(obj) = self.doc.get(&key) {
                    self.selection.register_end(obj);
                }
                Vec::new()
            }
            InputState::DraggingHandle { key, mut drag } => {
                drag.cancel();
                if let Some(obj) = self.doc.get(&key) {
                    self.selection.register_end(obj);
                }
                if drag.kind() == HandleKind::Rotate {
                    return vec![Action::RotationReadout { degrees: None }];
                }
                Vec::new()
            }
            InputState::DraggingGroup => {
                self.selection.group_cancel();
                Vec::new()
            }
        }
    }

    // --- Queries ---

    #[must_use]
    pub fn selected_keys(&self) -> Vec<Key> {
        self.selection.selected_keys()
    }

    #[must_use]
    pub fn object(&self, key: &str) -> Option<&ObjectRef> {
        self.doc.get(key)
    }

    /// Handles to draw for `key`; empty unless it is the sole unlocked
    /// selection.
    #[must_use]
    pub fn handle_layout(&self, key: &str) -> Option<HandleLayout> {
        let obj = self.doc.get(key)?;
        let ctx = HandleContext {
            sole_selected: self.selection.sole().is_some_and(|s| s.key == key),
            locked: obj.locked,
        };
        Some(HandleLayout::visible(&obj.rect, &self.config, ctx))
    }

    /// The aggregate frame to draw while several objects are selected.
    #[must_use]
    pub fn group_frame(&self) -> Option<Rect> {
        self.selection.group_frame()
    }

    #[must_use]
    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    fn gesture_key(&self) -> Option<&str> {
        match &self.gesture {
            InputState::DraggingObject { key, .. } | InputState::DraggingHandle { key, .. } => Some(key.as_str()),
            InputState::Idle | InputState::DraggingGroup => None,
        }
    }

    fn begin_handle(&mut self, key: Key, kind: HandleKind, local: Point) -> Vec<Action> {
        let Some(obj) = self.doc.get(&key) else {
            return Vec::new();
        };
        let (drag, start) = HandleDrag::begin(kind, obj.rect, local, &self.config);
        let mut actions = Vec::new();
        if start.clear_text_selection {
            actions.push(Action::ClearTextSelection);
        }
        if kind == HandleKind::Rotate {
            actions.push(Action::RotationReadout { degrees: drag.readout() });
        }
        self.gesture = InputState::DraggingHandle { key, drag };
        actions
    }

    fn begin_group(&mut self, local: Point) -> Vec<Action> {
        let Some(start) = self.selection.group_pointer_down(local) else {
            return Vec::new();
        };
        tracing::debug!(count = self.selection.len(), "group drag started");
        if start.armed {
            self.gesture = InputState::DraggingGroup;
        }
        if start.clear_text_selection { vec![Action::ClearTextSelection] } else { Vec::new() }
    }

    fn begin_object(&mut self, key: Key, local: Point) -> Vec<Action> {
        let Some(obj) = self.doc.get(&key).cloned() else {
            return Vec::new();
        };
        let mut actions = self.selection.register_start(&obj);
        let mut drag = DragEngine::new(DragOptions { forbidden: obj.locked, ..DragOptions::default() });
        let start = drag.pointer_down(local, Some(obj.position()));
        if start.clear_text_selection {
            actions.push(Action::ClearTextSelection);
        }
        if start.armed {
            self.gesture = InputState::DraggingObject { key, drag };
        }
        actions
    }
}
