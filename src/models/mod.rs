//! Data models for the layer tree and its actions.
//!
//! This module contains the input-side data structures: trigger keys,
//! actions, and the recursive keymap. Models are plain data, independent of
//! the compiler and the wire format.

pub mod action;
pub mod key;
pub mod layer;

// Re-export all model types
pub use action::{Action, ActionKind, KeyPress};
pub use key::{KeySpellingError, Modifier, TriggerKey, TriggerVariant};
pub use layer::{Keymap, LayerNode};
