//! Shared test fixtures for compiler and E2E CLI tests.
#![allow(dead_code)] // Not every suite uses every fixture

use hyperlayer::models::{Action, Keymap};

/// A single direct chord: Hyper + h → left arrow.
pub fn keymap_single_leaf() -> Keymap {
    Keymap::new().bind("h", Action::key("left_arrow"))
}

/// One sublayer with a shifted chord inside.
pub fn keymap_nested() -> Keymap {
    Keymap::new().bind(
        "w",
        Keymap::new().bind(
            "H",
            Action::shell("yabai -m window --resize left:50:0").with_description("Shrink Width"),
        ),
    )
}

/// Two sibling sublayers that both bind `h` to different actions.
pub fn keymap_sibling_layers() -> Keymap {
    Keymap::new()
        .bind(
            "w",
            Keymap::new().bind("h", Action::shell("yabai -m window --resize left:50:0")),
        )
        .bind("v", Keymap::new().bind("h", Action::key("left_arrow")))
}

/// A depth-three tree: w → x → h.
pub fn keymap_deeply_nested() -> Keymap {
    Keymap::new().bind(
        "w",
        Keymap::new().bind("x", Keymap::new().bind("h", Action::key("left_arrow"))),
    )
}

/// A malformed tree: `h` bound twice in the same layer.
pub fn keymap_duplicate_trigger() -> Keymap {
    Keymap::new()
        .bind("h", Action::key("left_arrow"))
        .bind("h", Action::key("right_arrow"))
}
