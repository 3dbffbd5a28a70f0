//! The reference Hyper-key keymap.
//!
//! This is configuration data, not engineering: the bindings an author
//! chose, expressed through the model's builder API. Window management
//! goes through yabai, everything else through `open`, key macros, or
//! osascript.

use crate::models::{Action, Keymap, KeyPress, Modifier};

/// A yabai invocation.
fn yabai(command: &str, description: &str) -> Action {
    Action::shell(format!("yabai -m {command}")).with_description(description)
}

/// An application or URL handed to the OS `open` primitive.
fn app(name: &str) -> Action {
    Action::open(name).with_description(format!("Open {name}"))
}

/// An osascript invocation that runs one statement against an application
/// and then brings it to the front.
fn new_window(application: &str, statement: &str, description: &str) -> Action {
    Action::shell(format!(
        "osascript -e 'tell application \"{application}\" to {statement}' \
         -e 'tell application \"{application}\" to activate'"
    ))
    .with_description(description)
}

/// The default keymap.
#[must_use]
pub fn default_keymap() -> Keymap {
    let mut keymap = Keymap::new()
        // Hyper + hjkl → focus windows
        .bind("h", yabai("window --focus west", "Window: Focus Left"))
        .bind("j", yabai("window --focus south", "Window: Focus Down"))
        .bind("k", yabai("window --focus north", "Window: Focus Up"))
        .bind("l", yabai("window --focus east", "Window: Focus Right"));

    // Hyper + 1-9 → focus space
    for n in 1..=9 {
        keymap = keymap.bind(
            n.to_string(),
            yabai(&format!("space --focus {n}"), &format!("Space → {n}")),
        );
    }

    keymap
        // b = "B"rowse
        .bind(
            "b",
            Keymap::new()
                .bind("t", Action::open("https://twitter.com"))
                .bind("y", Action::open("https://news.ycombinator.com"))
                .bind("f", Action::open("https://facebook.com"))
                .bind("r", Action::open("https://reddit.com")),
        )
        // o = "Open" applications
        .bind(
            "o",
            Keymap::new()
                .bind("b", app("Bitwarden"))
                .bind("s", app("Safari"))
                .bind("c", app("Calendar"))
                .bind("d", app("Discord"))
                .bind("k", app("Slack"))
                .bind("t", app("Terminal"))
                .bind("f", app("Finder"))
                .bind("p", app("Spotify"))
                .bind("w", app("WhatsApp")),
        )
        // n = "N"ew windows
        .bind(
            "n",
            Keymap::new()
                .bind("g", new_window("Safari", "make new document", "New Safari Window"))
                .bind(
                    "t",
                    new_window("Terminal", "do script \"\"", "New Terminal Window"),
                )
                .bind(
                    "f",
                    new_window("Finder", "make new Finder window", "New Finder Window"),
                ),
        )
        // w = "W"indow: resize while shifted, send to space while ⌘-held
        .bind("w", window_sublayer())
        // v = "moVe", on the left hand so hjkl work like they do in vim
        .bind(
            "v",
            Keymap::new()
                .bind("h", Action::key("left_arrow"))
                .bind("j", Action::key("down_arrow"))
                .bind("k", Action::key("up_arrow"))
                .bind("l", Action::key("right_arrow"))
                // Magicmove via homerow.app
                .bind(
                    "m",
                    Action::send_keys([KeyPress::new("f").with_modifier(Modifier::RightControl)]),
                )
                // Scroll mode via homerow.app
                .bind(
                    "s",
                    Action::send_keys([KeyPress::new("j").with_modifier(Modifier::RightControl)]),
                )
                .bind(
                    "d",
                    Action::send_keys([KeyPress::new("d")
                        .with_modifier(Modifier::RightShift)
                        .with_modifier(Modifier::RightCommand)]),
                )
                .bind("u", Action::key("page_down"))
                .bind("i", Action::key("page_up")),
        )
        // c = Musi"c", on the left hand for the same reason
        .bind(
            "c",
            Keymap::new()
                .bind("p", Action::key("play_or_pause"))
                .bind("n", Action::key("fastforward"))
                .bind("b", Action::key("rewind")),
        )
}

/// The `w` sublayer: resize the focused window on shifted hjkl, send the
/// window to a space (and follow it) on ⌘-held digits.
fn window_sublayer() -> Keymap {
    let mut layer = Keymap::new()
        .bind("H", yabai("window --resize left:50:0", "Window: Shrink Width"))
        .bind("J", yabai("window --resize bottom:0:50", "Window: Grow Height"))
        .bind("K", yabai("window --resize top:0:50", "Window: Shrink Height"))
        .bind("L", yabai("window --resize right:50:0", "Window: Grow Width"));

    for n in 1..=9 {
        layer = layer.bind(
            format!("!{n}"),
            Action::shell(format!(
                "yabai -m window --space {n}; yabai -m space --focus {n}"
            ))
            .with_description(format!("Send → Space {n}")),
        );
    }

    layer
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compiler;

    #[test]
    fn test_default_keymap_compiles() {
        let compiled = compiler::compile(&default_keymap()).unwrap();
        // Hyper rule + one rule per top-level trigger.
        assert_eq!(compiled.rules.len(), 1 + default_keymap().len());
    }

    #[test]
    fn test_default_keymap_has_no_warnings() {
        let report = compiler::validate(&default_keymap());
        assert!(report.is_valid());
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn test_default_keymap_sublayers() {
        let compiled = compiler::compile(&default_keymap()).unwrap();
        let variables: Vec<&str> = compiled.variables.keys().map(String::as_str).collect();
        assert_eq!(
            variables,
            vec![
                "hyper",
                "hyper_sublayer_b",
                "hyper_sublayer_o",
                "hyper_sublayer_n",
                "hyper_sublayer_w",
                "hyper_sublayer_v",
                "hyper_sublayer_c",
            ]
        );
    }

    #[test]
    fn test_window_sublayer_covers_all_spaces() {
        // Four resize chords plus nine send-to-space chords.
        assert_eq!(window_sublayer().len(), 13);
    }
}
