//! Document model: manipulable objects and the in-memory store that owns them.
//!
//! The engine never reflects over what an object *is*. Anything that can
//! report a key, a rect, and a lock flag implements [`Manipulable`] and can
//! take part in selection. [`ObjectRef`] is the engine's own snapshot of such
//! an entity, and also the item type carried by outgoing `DragMult` actions.
//!
//! [`DocStore`] is the live object set. Objects keep their insertion order,
//! which doubles as stacking order: later objects sit on top.

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::geom::{Point, Rect};

/// Stable, externally assigned object identifier.
pub type Key = String;

/// Capability contract every manipulable entity fulfils.
pub trait Manipulable {
    /// The entity's key, or `None` when it has none (such entities are
    /// ignored by selection).
    fn key(&self) -> Option<&str>;

    fn rect(&self) -> Rect;

    fn set_rect(&mut self, rect: Rect);

    fn is_locked(&self) -> bool;

    fn set_locked(&mut self, locked: bool);
}

/// Snapshot of one object: identity, geometry, lock state, and provenance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectRef {
    pub key: Key,
    #[serde(flatten)]
    pub rect: Rect,
    #[serde(default)]
    pub locked: bool,
    /// Key of the object this one was copied from. Set only on copies.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from_key: Option<Key>,
    /// Opaque host payload (content, styling). Carried along by copies.
    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    pub props: serde_json::Value,
}

impl ObjectRef {
    #[must_use]
    pub fn new(key: impl Into<Key>, rect: Rect) -> Self {
        Self { key: key.into(), rect, locked: false, from_key: None, props: serde_json::Value::Null }
    }

    #[must_use]
    pub fn with_locked(mut self, locked: bool) -> Self {
        self.locked = locked;
        self
    }

    #[must_use]
    pub fn with_props(mut self, props: serde_json::Value) -> Self {
        self.props = props;
        self
    }

    /// Capture any manipulable entity. Returns `None` for entities without a key.
    #[must_use]
    pub fn capture<M: Manipulable + ?Sized>(entity: &M) -> Option<Self> {
        let key = entity.key().filter(|k| !k.is_empty())?;
        Some(Self::new(key, entity.rect()).with_locked(entity.is_locked()))
    }

    #[must_use]
    pub fn position(&self) -> Point {
        self.rect.origin()
    }
}

impl Manipulable for ObjectRef {
    fn key(&self) -> Option<&str> {
        if self.key.is_empty() { None } else { Some(self.key.as_str()) }
    }

    fn rect(&self) -> Rect {
        self.rect
    }

    fn set_rect(&mut self, rect: Rect) {
        self.rect = rect;
    }

    fn is_locked(&self) -> bool {
        self.locked
    }

    fn set_locked(&mut self, locked: bool) {
        self.locked = locked;
    }
}

#[derive(Debug, Clone)]
struct Slot {
    seq: u64,
    object: ObjectRef,
}

/// In-memory store of live objects, keyed by [`Key`].
#[derive(Debug, Default)]
pub struct DocStore {
    objects: HashMap<Key, Slot>,
    next_seq: u64,
}

impl DocStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace an object. A replaced object keeps its stacking slot.
    /// Objects with an empty key are ignored; negative sizes are clamped.
    pub fn insert(&mut self, mut obj: ObjectRef) {
        if obj.key.is_empty() {
            tracing::debug!("ignoring object without key");
            return;
        }
        obj.rect = obj.rect.normalized();
        if let Some(slot) = self.objects.get_mut(&obj.key) {
            slot.object = obj;
            return;
        }
        let seq = self.next_seq;
        self.next_seq += 1;
        self.objects.insert(obj.key.clone(), Slot { seq, object: obj });
    }

    /// Remove an object by key, returning it if it was present.
    pub fn remove(&mut self, key: &str) -> Option<ObjectRef> {
        self.objects.remove(key).map(|slot| slot.object)
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&ObjectRef> {
        self.objects.get(key).map(|slot| &slot.object)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut ObjectRef> {
        self.objects.get_mut(key).map(|slot| &mut slot.object)
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.objects.contains_key(key)
    }

    /// Replace an object's rect. Returns false if the object doesn't exist.
    pub fn set_rect(&mut self, key: &str, rect: Rect) -> bool {
        let Some(obj) = self.get_mut(key) else {
            return false;
        };
        obj.set_rect(rect.normalized());
        true
    }

    /// Replace all objects with a full snapshot.
    pub fn load_snapshot(&mut self, objects: Vec<ObjectRef>) {
        self.objects.clear();
        self.next_seq = 0;
        for obj in objects {
            self.insert(obj);
        }
    }

    /// All objects in stacking order, bottom first.
    #[must_use]
    pub fn sorted_objects(&self) -> Vec<&ObjectRef> {
        let mut slots: Vec<&Slot> = self.objects.values().collect();
        slots.sort_by_key(|slot| slot.seq);
        slots.into_iter().map(|slot| &slot.object).collect()
    }

    /// Number of objects currently in the store.
    #[must_use]
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Returns `true` if the store contains no objects.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}
