//! Layer tree data structures.
//!
//! A [`Keymap`] maps trigger-key spellings to [`LayerNode`]s: either a leaf
//! [`Action`] or a nested sublayer. Entries keep author insertion order and
//! are deliberately *not* deduplicated here — a duplicate trigger must reach
//! the compiler so it can be rejected with the offending path instead of
//! silently overwritten.

use crate::models::action::Action;

/// One node of the layer tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayerNode {
    /// A chord that performs an action.
    Leaf(Action),
    /// A nested sublayer of further triggers.
    Layer(Keymap),
}

impl From<Action> for LayerNode {
    fn from(action: Action) -> Self {
        Self::Leaf(action)
    }
}

impl From<Keymap> for LayerNode {
    fn from(keymap: Keymap) -> Self {
        Self::Layer(keymap)
    }
}

/// An ordered mapping of trigger-key spellings to layer nodes.
///
/// Used both for the top level under the Hyper key and for every nested
/// sublayer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Keymap {
    entries: Vec<(String, LayerNode)>,
}

impl Keymap {
    /// Creates an empty keymap.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Binds a trigger spelling to an action or a sublayer.
    #[must_use]
    pub fn bind(mut self, key: impl Into<String>, node: impl Into<LayerNode>) -> Self {
        self.entries.push((key.into(), node.into()));
        self
    }

    /// The entries in author order.
    #[must_use]
    pub fn entries(&self) -> &[(String, LayerNode)] {
        &self.entries
    }

    /// Whether the keymap has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The number of entries, duplicates included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bind_preserves_insertion_order() {
        let keymap = Keymap::new()
            .bind("h", Action::key("left_arrow"))
            .bind("j", Action::key("down_arrow"))
            .bind("k", Action::key("up_arrow"));

        let keys: Vec<&str> = keymap.entries().iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["h", "j", "k"]);
    }

    #[test]
    fn test_bind_keeps_duplicates() {
        let keymap = Keymap::new()
            .bind("h", Action::key("left_arrow"))
            .bind("h", Action::key("right_arrow"));

        assert_eq!(keymap.len(), 2);
    }

    #[test]
    fn test_nested_layers() {
        let keymap = Keymap::new().bind(
            "w",
            Keymap::new().bind("H", Action::shell("yabai -m window --resize left:50:0")),
        );

        match &keymap.entries()[0].1 {
            LayerNode::Layer(inner) => assert_eq!(inner.len(), 1),
            LayerNode::Leaf(_) => panic!("expected a sublayer"),
        }
    }
}
