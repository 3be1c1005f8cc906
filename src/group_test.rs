use super::*;

// =============================================================
// Toggle
// =============================================================

#[test]
fn new_group_has_no_inner_selection() {
    let g = GroupSelection::new("g1");
    assert_eq!(g.group_key(), "g1");
    assert_eq!(g.selected(), None);
}

#[test]
fn toggle_selects_then_deselects() {
    let mut g = GroupSelection::new("g1");
    assert_eq!(g.toggle(Some("c1")), Some("c1"));
    assert!(g.is_selected("c1"));
    assert_eq!(g.toggle(Some("c1")), None);
}

#[test]
fn toggle_switches_between_children() {
    let mut g = GroupSelection::new("g1");
    g.toggle(Some("c1"));
    assert_eq!(g.toggle(Some("c2")), Some("c2"));
    assert!(!g.is_selected("c1"));
}

#[test]
fn keyless_child_is_ignored() {
    let mut g = GroupSelection::new("g1");
    g.toggle(Some("c1"));
    assert_eq!(g.toggle(None), Some("c1"));
    assert_eq!(g.toggle(Some("")), Some("c1"));
}

// =============================================================
// Observe
// =============================================================

#[test]
fn clear_broadcast_resets_inner_selection() {
    let mut g = GroupSelection::new("g1");
    g.toggle(Some("c1"));
    assert!(g.observe(&Action::ClearBroadcast { token: 1 }));
    assert_eq!(g.selected(), None);
}

#[test]
fn repeated_token_is_not_a_new_clear() {
    let mut g = GroupSelection::new("g1");
    g.observe(&Action::ClearBroadcast { token: 1 });
    g.toggle(Some("c1"));
    assert!(!g.observe(&Action::ClearBroadcast { token: 1 }));
    assert_eq!(g.selected(), Some("c1"));
}

#[test]
fn outer_selection_elsewhere_resets() {
    let mut g = GroupSelection::new("g1");
    g.toggle(Some("c1"));
    assert!(g.observe(&Action::SelectionChanged { keys: vec!["other".into()] }));
    assert_eq!(g.selected(), None);
}

#[test]
fn outer_selection_on_group_keeps_inner() {
    let mut g = GroupSelection::new("g1");
    g.toggle(Some("c1"));
    assert!(!g.observe(&Action::SelectionChanged { keys: vec!["g1".into()] }));
    assert_eq!(g.selected(), Some("c1"));
}

#[test]
fn unrelated_actions_are_ignored() {
    let mut g = GroupSelection::new("g1");
    g.toggle(Some("c1"));
    assert!(!g.observe(&Action::ClearTextSelection));
    assert_eq!(g.selected(), Some("c1"));
}
