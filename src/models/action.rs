//! High-level actions bound to chords.
//!
//! An [`Action`] is what a leaf chord does: send a key sequence, run a
//! shell command, or hand a target to the OS `open` primitive. Actions are
//! immutable data; turning them into engine events is the renderer's job.

use crate::models::key::Modifier;

/// A single key press in a [`Action::send_keys`] sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPress {
    /// Karabiner key code to emit (e.g. "`left_arrow`").
    pub key_code: String,
    /// Modifiers held for this press.
    pub modifiers: Vec<Modifier>,
}

impl KeyPress {
    /// Creates a bare key press.
    pub fn new(key_code: impl Into<String>) -> Self {
        Self {
            key_code: key_code.into(),
            modifiers: Vec::new(),
        }
    }

    /// Adds a held modifier to this press.
    #[must_use]
    pub fn with_modifier(mut self, modifier: Modifier) -> Self {
        self.modifiers.push(modifier);
        self
    }
}

/// What an action does, without its description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionKind {
    /// Emit a sequence of key presses in order.
    SendKeys(Vec<KeyPress>),
    /// Run an opaque shell command. Never parsed or validated here.
    ShellCommand(String),
    /// Hand a target (URL or application name, the OS decides) to `open`.
    OpenTarget(String),
}

/// A leaf chord's effect, with an optional human-readable description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Action {
    kind: ActionKind,
    description: Option<String>,
}

impl Action {
    /// An action emitting the given key presses in order.
    pub fn send_keys(keys: impl IntoIterator<Item = KeyPress>) -> Self {
        Self {
            kind: ActionKind::SendKeys(keys.into_iter().collect()),
            description: None,
        }
    }

    /// An action emitting a single bare key press.
    pub fn key(key_code: impl Into<String>) -> Self {
        Self::send_keys([KeyPress::new(key_code)])
    }

    /// An action running a shell command.
    pub fn shell(command: impl Into<String>) -> Self {
        Self {
            kind: ActionKind::ShellCommand(command.into()),
            description: None,
        }
    }

    /// An action opening a URL or application via the OS `open` primitive.
    pub fn open(target: impl Into<String>) -> Self {
        Self {
            kind: ActionKind::OpenTarget(target.into()),
            description: None,
        }
    }

    /// Sets the description shown in the generated manipulator.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// What this action does.
    #[must_use]
    pub const fn kind(&self) -> &ActionKind {
        &self.kind
    }

    /// The description, if one was set.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}
