//! Pure renderers from [`Action`] values to engine output events.
//!
//! Renderers are total: every well-typed action renders to a non-empty
//! event list without inspecting or validating the strings it carries.
//! Whether a shell command succeeds, or whether an `open` target is a URL
//! or an application, is decided by the OS at use time.

use crate::karabiner::ToEvent;
use crate::models::{Action, ActionKind};

/// Renders an action into the `to` events of a manipulator.
#[must_use]
pub fn render_action(action: &Action) -> Vec<ToEvent> {
    match action.kind() {
        ActionKind::SendKeys(keys) => keys
            .iter()
            .map(|press| ToEvent::key(press.key_code.clone(), press.modifiers.clone()))
            .collect(),
        ActionKind::ShellCommand(command) => vec![ToEvent::shell(command.clone())],
        ActionKind::OpenTarget(target) => vec![ToEvent::shell(open_command(target))],
    }
}

/// The shell invocation delegating a target to the OS `open` primitive.
///
/// The target is passed as the sole argument, single-quoted so spaces in
/// application names survive the shell.
#[must_use]
pub fn open_command(target: &str) -> String {
    format!("open '{}'", target.replace('\'', "'\\''"))
}
