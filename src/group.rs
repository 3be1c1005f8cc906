//! Inner selection inside a grouping object.
//!
//! A merged group renders its children itself, and the user can pick one
//! child at a time inside it. That inner choice is local to the group and is
//! dropped whenever the outer coordinator broadcasts a clear, or when the
//! outer selection moves to some other object.

#[cfg(test)]
#[path = "group_test.rs"]
mod group_test;

use crate::doc::Key;
use crate::engine::Action;

#[derive(Debug, Clone)]
pub struct GroupSelection {
    group_key: Key,
    selected: Option<Key>,
    last_token: u64,
}

impl GroupSelection {
    #[must_use]
    pub fn new(group_key: impl Into<Key>) -> Self {
        Self { group_key: group_key.into(), selected: None, last_token: 0 }
    }

    #[must_use]
    pub fn group_key(&self) -> &str {
        &self.group_key
    }

    #[must_use]
    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    #[must_use]
    pub fn is_selected(&self, child: &str) -> bool {
        self.selected.as_deref() == Some(child)
    }

    /// Pointer-down on a child: selects it, or deselects it when it was
    /// already the inner selection. Children without a key are ignored.
    pub fn toggle(&mut self, child: Option<&str>) -> Option<&str> {
        let Some(child) = child.filter(|k| !k.is_empty()) else {
            return self.selected();
        };
        if self.is_selected(child) {
            self.selected = None;
        } else {
            tracing::debug!(group = %self.group_key, child, "inner selection");
            self.selected = Some(child.to_owned());
        }
        self.selected()
    }

    /// React to a coordinator notification. Returns true when the inner
    /// selection was reset.
    pub fn observe(&mut self, action: &Action) -> bool {
        match action {
            Action::ClearBroadcast { token } if *token != self.last_token => {
                self.last_token = *token;
                self.reset()
            }
            Action::SelectionChanged { keys } => {
                if keys.first().is_some_and(|k| *k == self.group_key) {
                    false
                } else {
                    self.reset()
                }
            }
            _ => false,
        }
    }

    fn reset(&mut self) -> bool {
        self.selected.take().is_some()
    }
}
