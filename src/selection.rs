//! Selection coordinator: the single source of truth for what is selected.
//!
//! The coordinator keeps an ordered snapshot of the selected objects and
//! derives the padded aggregate box from it on demand. It owns the synthetic
//! drag engine behind the group frame, and runs the whole-selection commands
//! (cut, copy, delete, lock, merge) against the live [`DocStore`].
//!
//! Commands are queued with [`SelectionCoordinator::submit`] and consumed
//! exactly once by [`SelectionCoordinator::drain_commands`]. Cut is two-phase:
//! draining it arms the coordinator, and the next background pointer-down
//! decides where the selection lands.

#[cfg(test)]
#[path = "selection_test.rs"]
mod selection_test;

use std::collections::VecDeque;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::doc::{DocStore, Key, Manipulable, ObjectRef};
use crate::drag::{DragEngine, DragEnd, DragOptions, DragStart};
use crate::engine::Action;
use crate::geom::{Point, Rect};

/// One-shot whole-selection command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Command {
    Cut,
    Copy,
    Delete,
    Lock,
}

/// What a `DragMult` notification means for its items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DragMultKind {
    /// Items moved.
    Change,
    /// Items were created (copies).
    Push,
    /// Items were deleted.
    Remove,
    /// Item's lock flag toggled.
    Lock,
}

/// Request to create a grouping object around the selected members.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MergeRequest {
    pub key: Key,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub children: Vec<Key>,
}

/// Generates `"{millis}-{index}"` keys with a stamp that never repeats.
#[derive(Debug, Clone)]
pub struct KeyGen {
    last_stamp: u64,
    clock: fn() -> u64,
}

impl Default for KeyGen {
    fn default() -> Self {
        Self::with_clock(unix_millis)
    }
}

impl KeyGen {
    #[must_use]
    pub fn with_clock(clock: fn() -> u64) -> Self {
        Self { last_stamp: 0, clock }
    }

    /// `count` fresh keys sharing one stamp. The stamp is strictly greater
    /// than any previous batch's and is bumped until no key is `taken`.
    pub fn batch<F>(&mut self, count: usize, taken: F) -> Vec<Key>
    where
        F: Fn(&str) -> bool,
    {
        let mut stamp = (self.clock)().max(self.last_stamp.saturating_add(1));
        loop {
            let keys: Vec<Key> = (0..count).map(|i| format!("{stamp}-{i}")).collect();
            if !keys.iter().any(|k| taken(k)) {
                self.last_stamp = stamp;
                return keys;
            }
            stamp = stamp.saturating_add(1);
        }
    }
}

fn unix_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
}

/// Tracks the selection and applies whole-selection operations.
#[derive(Debug)]
pub struct SelectionCoordinator {
    config: EngineConfig,
    /// Modifier held: pointer-down appends instead of replacing.
    multi: bool,
    /// Pin mode: background clicks keep the selection.
    pinned: bool,
    items: Vec<ObjectRef>,
    group_drag: DragEngine,
    commands: VecDeque<Command>,
    cut_armed: bool,
    clear_token: u64,
    keys: KeyGen,
}

impl SelectionCoordinator {
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        Self::with_key_gen(config, KeyGen::default())
    }

    #[must_use]
    pub fn with_key_gen(config: EngineConfig, keys: KeyGen) -> Self {
        Self {
            config,
            multi: false,
            pinned: false,
            items: Vec::new(),
            group_drag: DragEngine::new(DragOptions::default()),
            commands: VecDeque::new(),
            cut_armed: false,
            clear_token: 0,
            keys,
        }
    }

    // --- Modes ---

    pub fn set_multi(&mut self, multi: bool) {
        self.multi = multi;
    }

    #[must_use]
    pub fn is_multi(&self) -> bool {
        self.multi
    }

    pub fn set_pinned(&mut self, pinned: bool) {
        self.pinned = pinned;
    }

    #[must_use]
    pub fn is_pinned(&self) -> bool {
        self.pinned
    }

    #[must_use]
    pub fn is_cut_armed(&self) -> bool {
        self.cut_armed
    }

    // --- Queries ---

    /// Selected objects in selection order.
    #[must_use]
    pub fn selection(&self) -> &[ObjectRef] {
        &self.items
    }

    #[must_use]
    pub fn selected_keys(&self) -> Vec<Key> {
        self.items.iter().map(|o| o.key.clone()).collect()
    }

    #[must_use]
    pub fn is_selected(&self, key: &str) -> bool {
        self.items.iter().any(|o| o.key == key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// More than one object selected: the group frame owns dragging and
    /// individual moves are suppressed.
    #[must_use]
    pub fn is_group(&self) -> bool {
        self.items.len() > 1
    }

    /// The only selected object, if exactly one is selected.
    #[must_use]
    pub fn sole(&self) -> Option<&ObjectRef> {
        match self.items.as_slice() {
            [only] => Some(only),
            _ => None,
        }
    }

    /// Padded box around every selected object, derived from the snapshot.
    #[must_use]
    pub fn aggregate_box(&self) -> Option<Rect> {
        let first = self.items.first()?;
        let (mut min_x, mut min_y) = (first.rect.x, first.rect.y);
        let (mut max_x, mut max_y) = (first.rect.right(), first.rect.bottom());
        for o in &self.items[1..] {
            min_x = min_x.min(o.rect.x);
            min_y = min_y.min(o.rect.y);
            max_x = max_x.max(o.rect.right());
            max_y = max_y.max(o.rect.bottom());
        }
        Some(Rect::new(min_x, min_y, max_x - min_x, max_y - min_y).inflated(self.config.padding))
    }

    /// The aggregate box, but only when a group frame is shown.
    #[must_use]
    pub fn group_frame(&self) -> Option<Rect> {
        if self.is_group() { self.aggregate_box() } else { None }
    }

    // --- Registration ---

    /// Pointer-down on an entity. Single mode replaces the selection; multi
    /// mode appends the entity unless already present. Entities without a
    /// key are ignored.
    pub fn register_start<M: Manipulable + ?Sized>(&mut self, entity: &M) -> Vec<Action> {
        let Some(obj) = ObjectRef::capture(entity) else {
            tracing::debug!("pointer-down on entity without key ignored");
            return Vec::new();
        };
        if self.multi {
            if self.is_selected(&obj.key) {
                return Vec::new();
            }
            tracing::debug!(key = %obj.key, count = self.items.len() + 1, "added to multi-selection");
            self.items.push(obj);
        } else {
            if self.items.len() == 1 && self.items[0].key == obj.key {
                self.items[0] = obj;
                return Vec::new();
            }
            tracing::debug!(key = %obj.key, "selected");
            self.items = vec![obj];
        }
        vec![self.selection_changed()]
    }

    /// Pointer-up on an entity: refresh its snapshot with its final rect.
    pub fn register_end<M: Manipulable + ?Sized>(&mut self, entity: &M) {
        let Some(key) = entity.key() else {
            return;
        };
        if let Some(item) = self.items.iter_mut().find(|o| o.key == key) {
            item.rect = entity.rect();
            item.locked = entity.is_locked();
        }
    }

    /// Re-read every snapshot from the store, dropping objects that no longer
    /// exist.
    pub fn sync_from(&mut self, store: &DocStore) -> Vec<Action> {
        let before = self.items.len();
        self.items.retain_mut(|item| match store.get(&item.key) {
            Some(live) => {
                item.rect = live.rect;
                item.locked = live.locked;
                true
            }
            None => false,
        });
        if self.items.len() == before { Vec::new() } else { vec![self.selection_changed()] }
    }

    // --- Group drag ---

    /// Pointer-down on the group frame.
    pub fn group_pointer_down(&mut self, pointer: Point) -> Option<DragStart> {
        let frame = self.group_frame()?;
        Some(self.group_drag.pointer_down(pointer, Some(frame.origin())))
    }

    /// Pointer-move during a group drag: the frame's delta is added to every
    /// unlocked selected object.
    pub fn group_pointer_move(&mut self, pointer: Point, store: &mut DocStore) -> Vec<Action> {
        let Some(step) = self.group_drag.pointer_move(pointer, false) else {
            return Vec::new();
        };
        self.translate_selection(step.move_w, step.move_h, store)
    }

    pub fn group_pointer_up(&mut self) -> Option<DragEnd> {
        let end = self.group_drag.pointer_up()?;
        tracing::debug!(dx = end.total_dx, dy = end.total_dy, count = self.items.len(), "group drag finished");
        Some(end)
    }

    pub fn group_cancel(&mut self) {
        self.group_drag.cancel();
    }

    #[must_use]
    pub fn is_group_dragging(&self) -> bool {
        self.group_drag.is_dragging()
    }

    fn translate_selection(&mut self, dx: f64, dy: f64, store: &mut DocStore) -> Vec<Action> {
        if self.items.is_empty() {
            return Vec::new();
        }
        for item in &mut self.items {
            let Some(live) = store.get_mut(&item.key) else {
                continue;
            };
            if !live.locked {
                live.rect = live.rect.translated(dx, dy);
            }
            item.rect = live.rect;
            item.locked = live.locked;
        }
        vec![Action::DragMult { kind: DragMultKind::Change, items: self.items.clone() }]
    }

    // --- Commands ---

    /// Queue a one-shot command.
    pub fn submit(&mut self, command: Command) {
        self.commands.push_back(command);
    }

    /// Consume every queued command once, in submission order.
    pub fn drain_commands(&mut self, store: &mut DocStore) -> Vec<Action> {
        let mut actions = Vec::new();
        while let Some(command) = self.commands.pop_front() {
            tracing::debug!(?command, selected = self.items.len(), "command");
            match command {
                Command::Cut => self.cut_armed = !self.items.is_empty(),
                Command::Copy => actions.extend(self.copy(store)),
                Command::Delete => actions.extend(self.delete(store)),
                Command::Lock => actions.extend(self.lock(store)),
            }
        }
        actions
    }

    /// Complete an armed cut at `local` (surface-local pointer position).
    /// A single object lands with its top-left at `local`; a multi-selection
    /// moves so the aggregate frame's top-left lands there.
    pub fn cut_at(&mut self, local: Point, store: &mut DocStore) -> Vec<Action> {
        if !self.cut_armed {
            return Vec::new();
        }
        self.cut_armed = false;
        let mut actions = self.sync_from(store);
        let anchor = match self.items.as_slice() {
            [] => return actions,
            [only] => only.rect.origin(),
            _ => match self.aggregate_box() {
                Some(frame) => frame.origin(),
                None => return actions,
            },
        };
        let (dx, dy) = local.delta_from(anchor);
        tracing::info!(dx, dy, count = self.items.len(), "cut placed");
        actions.extend(self.translate_selection(dx, dy, store));
        actions
    }

    /// Clone the selection with fresh keys, offset by the copy distance; the
    /// clones become the selection.
    pub fn copy(&mut self, store: &mut DocStore) -> Vec<Action> {
        if self.items.is_empty() {
            return Vec::new();
        }
        let keys = self.keys.batch(self.items.len(), |k| store.contains(k));
        let offset = self.config.copy_offset;
        let clones: Vec<ObjectRef> = self
            .items
            .iter()
            .zip(keys)
            .map(|(source, key)| ObjectRef {
                key,
                rect: source.rect.translated(offset, offset),
                locked: source.locked,
                from_key: Some(source.key.clone()),
                props: store.get(&source.key).map_or_else(|| source.props.clone(), |live| live.props.clone()),
            })
            .collect();
        for clone in &clones {
            store.insert(clone.clone());
        }
        tracing::info!(count = clones.len(), "selection copied");
        self.items.clone_from(&clones);
        vec![Action::DragMult { kind: DragMultKind::Push, items: clones }, self.selection_changed()]
    }

    /// Remove every selected object from the store and clear the selection.
    pub fn delete(&mut self, store: &mut DocStore) -> Vec<Action> {
        if self.items.is_empty() {
            return Vec::new();
        }
        let removed = std::mem::take(&mut self.items);
        for item in &removed {
            store.remove(&item.key);
        }
        self.group_drag.cancel();
        tracing::info!(count = removed.len(), "selection deleted");
        vec![Action::DragMult { kind: DragMultKind::Remove, items: removed }, self.selection_changed()]
    }

    /// Toggle the lock flag of a sole selected object. The notification
    /// reports the object at `(0, 0)`; the store keeps the real position.
    pub fn lock(&mut self, store: &mut DocStore) -> Vec<Action> {
        let [item] = self.items.as_mut_slice() else {
            tracing::debug!(selected = self.items.len(), "lock ignored; needs exactly one object");
            return Vec::new();
        };
        item.locked = !item.locked;
        if let Some(live) = store.get_mut(&item.key) {
            live.set_locked(item.locked);
        }
        tracing::info!(key = %item.key, locked = item.locked, "lock toggled");

        let mut reported = item.clone();
        reported.rect.x = 0.0;
        reported.rect.y = 0.0;
        vec![Action::DragMult { kind: DragMultKind::Lock, items: vec![reported] }]
    }

    /// Ask the host to group the selection. Needs at least two objects; the
    /// members stay in the store.
    pub fn merge(&mut self, store: &DocStore) -> Vec<Action> {
        let Some(frame) = self.group_frame() else {
            tracing::debug!(selected = self.items.len(), "merge ignored; needs a group");
            return Vec::new();
        };
        let inner = frame.inflated(-self.config.padding);
        let key = self.keys.batch(1, |k| store.contains(k)).into_iter().next().unwrap_or_default();
        let request = MergeRequest {
            key,
            x: inner.x,
            y: inner.y,
            width: inner.width,
            height: inner.height,
            children: self.selected_keys(),
        };
        tracing::info!(key = %request.key, children = request.children.len(), "merge requested");
        self.items.clear();
        self.group_drag.cancel();
        vec![Action::MergeMult(request), self.selection_changed()]
    }

    // --- Clearing ---

    /// Pointer-down on empty surface. Completes an armed cut, keeps the
    /// selection in pin mode, and otherwise clears everything.
    pub fn background_pointer_down(&mut self, local: Point, store: &mut DocStore) -> Vec<Action> {
        if self.cut_armed {
            return self.cut_at(local, store);
        }
        if self.pinned {
            return Vec::new();
        }
        self.clear_all()
    }

    /// Drop the selection and broadcast a clear token to nested selections.
    pub fn clear_all(&mut self) -> Vec<Action> {
        self.items.clear();
        self.group_drag.cancel();
        vec![self.selection_changed(), self.broadcast_clear()]
    }

    /// Issue a fresh clear token without touching the selection.
    pub fn broadcast_clear(&mut self) -> Action {
        self.clear_token += 1;
        Action::ClearBroadcast { token: self.clear_token }
    }

    fn selection_changed(&self) -> Action {
        Action::SelectionChanged { keys: self.selected_keys() }
    }
}
