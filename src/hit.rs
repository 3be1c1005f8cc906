#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::config::EngineConfig;
use crate::doc::{DocStore, Key};
use crate::geom::{Point, rotate_around};
use crate::handles::{HandleContext, HandleKind, HandleLayout};
use crate::selection::SelectionCoordinator;

/// What a surface-local point landed on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Hit {
    /// A handle of the sole selected object.
    Handle { key: Key, kind: HandleKind },
    /// Inside the aggregate frame of a multi-selection.
    GroupFrame,
    /// The body of an object.
    Object { key: Key },
}

/// Test what is under `local`, checking the sole selection's handles first,
/// then the group frame, then objects from top-most down. `None` means the
/// background.
///
/// While multi-select is held, objects win over the group frame so further
/// members can be added from inside it.
#[must_use]
pub fn hit_test(local: Point, doc: &DocStore, selection: &SelectionCoordinator, config: &EngineConfig) -> Option<Hit> {
    if let Some(hit) = hit_handle(local, doc, selection, config) {
        return Some(hit);
    }
    let in_frame = selection.group_frame().is_some_and(|frame| frame.contains(local));
    if in_frame && !selection.is_multi() {
        return Some(Hit::GroupFrame);
    }
    if let Some(key) = hit_object(local, doc) {
        return Some(Hit::Object { key });
    }
    in_frame.then_some(Hit::GroupFrame)
}

/// Top-most object whose (rotated) rect contains `local`.
#[must_use]
pub fn hit_object(local: Point, doc: &DocStore) -> Option<Key> {
    doc.sorted_objects().into_iter().rev().find(|o| o.rect.contains(local)).map(|o| o.key.clone())
}

fn hit_handle(local: Point, doc: &DocStore, selection: &SelectionCoordinator, config: &EngineConfig) -> Option<Hit> {
    let sole = selection.sole()?;
    let live = doc.get(&sole.key).unwrap_or(sole);
    let ctx = HandleContext { sole_selected: true, locked: live.locked };
    let layout = HandleLayout::visible(&live.rect, config, ctx);
    let half = config.handle_size / 2.0;

    layout
        .handles
        .iter()
        .map(|h| {
            let center = rotate_around(layout.center, h.anchor.offset(half, half), layout.rotation);
            (h.kind, center.distance_to(local))
        })
        .filter(|&(_, dist)| dist <= config.handle_hit_radius)
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(kind, _)| Hit::Handle { key: live.key.clone(), kind })
}
