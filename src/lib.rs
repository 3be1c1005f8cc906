//! Geometry and interaction-state engine for direct manipulation of
//! positioned objects on a 2D surface.
//!
//! The crate owns everything between raw pointer events and the changes a
//! host should persist: hit-testing, per-gesture drag tracking, resize and
//! rotate handles, multi-selection with group drag, and the whole-selection
//! commands (cut, copy, delete, lock, merge). It renders nothing. The host
//! feeds pointer events into [`engine::EngineCore`] and applies the returned
//! [`engine::Action`]s.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Host-facing [`engine::EngineCore`] and the [`engine::Action`] wire type |
//! | [`selection`] | Selection coordinator, group drag, and whole-selection commands |
//! | [`drag`] | Per-entity pointer tracking (`Idle -> Dragging -> Idle`) |
//! | [`resize`] | Resize and rotate interpretations of handle drags |
//! | [`handles`] | Handle anchors around a (rotated) rect |
//! | [`geom`] | Points, rects, `angle_between`, `rotate_around` |
//! | [`doc`] | Live object store and the `Manipulable` capability |
//! | [`hit`] | Hit-testing handles, the group frame, and objects |
//! | [`input`] | Modifier keys, buttons, and the gesture state machine |
//! | [`group`] | Inner selection inside a merged group |
//! | [`surface`] | Container offset and extendable height |
//! | [`config`] | Tunables with environment overrides |
//! | [`consts`] | Default sizes and offsets |

pub mod config;
pub mod consts;
pub mod doc;
pub mod drag;
pub mod engine;
pub mod geom;
pub mod group;
pub mod handles;
pub mod hit;
pub mod input;
pub mod resize;
pub mod selection;
pub mod surface;
