#![allow(clippy::float_cmp)]

use serde_json::json;

use super::*;

fn obj(key: &str, x: f64, y: f64) -> ObjectRef {
    ObjectRef::new(key, Rect::new(x, y, 50.0, 50.0))
}

/// Host-side entity that only exposes the capability contract.
struct Widget {
    id: Option<String>,
    frame: Rect,
    pinned: bool,
}

impl Manipulable for Widget {
    fn key(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn rect(&self) -> Rect {
        self.frame
    }

    fn set_rect(&mut self, rect: Rect) {
        self.frame = rect;
    }

    fn is_locked(&self) -> bool {
        self.pinned
    }

    fn set_locked(&mut self, locked: bool) {
        self.pinned = locked;
    }
}

// =============================================================
// ObjectRef
// =============================================================

#[test]
fn capture_copies_contract_fields() {
    let w = Widget { id: Some("w1".into()), frame: Rect::new(1.0, 2.0, 3.0, 4.0), pinned: true };
    let captured = ObjectRef::capture(&w).unwrap();
    assert_eq!(captured.key, "w1");
    assert_eq!(captured.rect, Rect::new(1.0, 2.0, 3.0, 4.0));
    assert!(captured.locked);
    assert!(captured.from_key.is_none());
}

#[test]
fn capture_without_key_is_none() {
    let w = Widget { id: None, frame: Rect::default(), pinned: false };
    assert!(ObjectRef::capture(&w).is_none());
    let blank = Widget { id: Some(String::new()), frame: Rect::default(), pinned: false };
    assert!(ObjectRef::capture(&blank).is_none());
}

#[test]
fn manipulable_set_rect_and_lock_on_widget() {
    let mut w = Widget { id: Some("w".into()), frame: Rect::default(), pinned: false };
    w.set_rect(Rect::new(5.0, 5.0, 10.0, 10.0));
    w.set_locked(true);
    assert_eq!(w.rect().x, 5.0);
    assert!(w.is_locked());
}

#[test]
fn object_serializes_flat_with_camel_case() {
    let mut o = obj("a", 10.0, 20.0);
    o.from_key = Some("src".into());
    let v = serde_json::to_value(&o).unwrap();
    assert_eq!(
        v,
        json!({
            "key": "a",
            "x": 10.0,
            "y": 20.0,
            "width": 50.0,
            "height": 50.0,
            "rotation": 0.0,
            "locked": false,
            "fromKey": "src",
        })
    );
}

#[test]
fn object_serialization_omits_empty_provenance_and_props() {
    let v = serde_json::to_value(obj("a", 0.0, 0.0)).unwrap();
    assert!(v.get("fromKey").is_none());
    assert!(v.get("props").is_none());
}

#[test]
fn object_deserializes_with_defaults() {
    let o: ObjectRef = serde_json::from_value(json!({
        "key": "k", "x": 1.0, "y": 2.0, "width": 3.0, "height": 4.0,
    }))
    .unwrap();
    assert_eq!(o.rect.rotation, 0.0);
    assert!(!o.locked);
    assert!(o.props.is_null());
}

#[test]
fn deserialize_clamps_negative_size() {
    let o: ObjectRef = serde_json::from_value(json!({
        "key": "a", "x": 1.0, "y": 2.0, "width": -5, "height": -0.5
    }))
    .unwrap();
    assert_eq!((o.rect.width, o.rect.height), (0.0, 0.0));
    assert_eq!(o.rect.origin(), Point::new(1.0, 2.0));
}

// =============================================================
// DocStore
// =============================================================

#[test]
fn store_insert_and_get() {
    let mut store = DocStore::new();
    store.insert(obj("a", 0.0, 0.0));
    assert_eq!(store.len(), 1);
    assert!(store.contains("a"));
    assert_eq!(store.get("a").unwrap().rect.x, 0.0);
}

#[test]
fn store_ignores_keyless_objects() {
    let mut store = DocStore::new();
    store.insert(obj("", 0.0, 0.0));
    assert!(store.is_empty());
}

#[test]
fn store_replace_keeps_stacking_slot() {
    let mut store = DocStore::new();
    store.insert(obj("a", 0.0, 0.0));
    store.insert(obj("b", 0.0, 0.0));
    store.insert(obj("a", 99.0, 0.0));
    let keys: Vec<&str> = store.sorted_objects().iter().map(|o| o.key.as_str()).collect();
    assert_eq!(keys, vec!["a", "b"]);
    assert_eq!(store.get("a").unwrap().rect.x, 99.0);
}

#[test]
fn store_remove_returns_object() {
    let mut store = DocStore::new();
    store.insert(obj("a", 0.0, 0.0));
    assert_eq!(store.remove("a").unwrap().key, "a");
    assert!(store.remove("a").is_none());
    assert!(store.is_empty());
}

#[test]
fn store_set_rect_missing_is_false() {
    let mut store = DocStore::new();
    assert!(!store.set_rect("nope", Rect::default()));
    store.insert(obj("a", 0.0, 0.0));
    assert!(store.set_rect("a", Rect::new(7.0, 8.0, 1.0, 1.0)));
    assert_eq!(store.get("a").unwrap().position(), Point::new(7.0, 8.0));
}

#[test]
fn store_load_snapshot_replaces_everything() {
    let mut store = DocStore::new();
    store.insert(obj("old", 0.0, 0.0));
    store.load_snapshot(vec![obj("x", 0.0, 0.0), obj("y", 0.0, 0.0), obj("z", 0.0, 0.0)]);
    let keys: Vec<&str> = store.sorted_objects().iter().map(|o| o.key.as_str()).collect();
    assert_eq!(keys, vec!["x", "y", "z"]);
}

#[test]
fn insert_and_set_rect_clamp_negative_size() {
    let mut store = DocStore::new();
    let mut o = obj("a", 0.0, 0.0);
    o.rect.width = -20.0;
    store.insert(o);
    assert_eq!(store.get("a").map(|o| o.rect.width), Some(0.0));

    let mut r = Rect::new(5.0, 5.0, 10.0, 10.0);
    r.height = -3.0;
    assert!(store.set_rect("a", r));
    assert_eq!(store.get("a").map(|o| (o.rect.width, o.rect.height)), Some((10.0, 0.0)));
}
