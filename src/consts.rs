//! Shared numeric constants for the engine.

// ── Selection frame ─────────────────────────────────────────────

/// Gap between the aggregate selection frame and the objects it encloses.
pub const FRAME_PADDING: f64 = 3.0;

/// Offset applied along both axes to every clone produced by a copy.
pub const COPY_OFFSET: f64 = 10.0;

// ── Handles ─────────────────────────────────────────────────────

/// Edge length of a square resize handle.
pub const HANDLE_SIZE: f64 = 6.0;

/// Distance from the top edge to the rotate handle.
pub const ROTATE_HANDLE_OFFSET: f64 = 30.0;

/// Hit slop around a handle's displayed position.
pub const HANDLE_HIT_RADIUS: f64 = 8.0;

/// Smallest width a resize gesture may produce.
pub const MIN_WIDTH: f64 = 10.0;

/// Smallest height a resize gesture may produce.
pub const MIN_HEIGHT: f64 = 10.0;

// ── Surface ─────────────────────────────────────────────────────

/// Height added to the surface by one extend step.
pub const EXTEND_STEP: f64 = 300.0;

/// Degrees in a full turn.
pub const FULL_TURN_DEG: f64 = 360.0;
