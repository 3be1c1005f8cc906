use super::*;

// =============================================================
// Modifiers
// =============================================================

#[test]
fn modifiers_default_all_false() {
    let m = Modifiers::default();
    assert!(!m.ctrl && !m.meta);
    assert!(!m.multi_select());
}

#[test]
fn ctrl_or_meta_enables_multi_select() {
    assert!(Modifiers { ctrl: true, ..Modifiers::default() }.multi_select());
    assert!(Modifiers { meta: true, ..Modifiers::default() }.multi_select());
    assert!(Modifiers { ctrl: true, meta: true }.multi_select());
}

// =============================================================
// Button
// =============================================================

#[test]
fn button_default_is_primary() {
    assert_eq!(Button::default(), Button::Primary);
    assert_ne!(Button::Primary, Button::Secondary);
}

// =============================================================
// InputState
// =============================================================

#[test]
fn input_state_default_is_idle() {
    assert!(InputState::default().is_idle());
}

#[test]
fn input_state_active_variants_not_idle() {
    let s = InputState::DraggingObject { key: "a".into(), drag: DragEngine::default() };
    assert!(!s.is_idle());
    assert!(!InputState::DraggingGroup.is_idle());
}
