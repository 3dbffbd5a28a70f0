//! Serde mirror of the Karabiner-Elements configuration document.
//!
//! These types are the entire wire contract with the remapping engine.
//! Field names and nesting follow `karabiner.json` exactly; struct field
//! order is fixed so serialization is deterministic.

use serde::{Deserialize, Serialize};

use crate::models::Modifier;

/// Top-level `karabiner.json` document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KarabinerDocument {
    /// Global engine settings, passed through untouched by the compiler.
    pub global: GlobalSettings,
    /// Profiles; this tool always writes exactly one.
    pub profiles: Vec<Profile>,
}

/// Global engine settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalSettings {
    /// Whether Karabiner shows its menu-bar icon.
    pub show_in_menu_bar: bool,
}

/// A named profile holding the generated rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    /// Profile name as shown in the Karabiner UI.
    pub name: String,
    /// The complex-modification rules.
    pub complex_modifications: ComplexModifications,
}

/// Container for the ordered rule list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplexModifications {
    /// Rules in match order. First match wins, so order is load-bearing.
    pub rules: Vec<Rule>,
}

/// One rule: a description plus its manipulators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    /// Human-readable rule description.
    pub description: String,
    /// Manipulators in match order.
    pub manipulators: Vec<Manipulator>,
}

/// A single input-remapping record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Manipulator {
    /// Always `"basic"` for the rules this tool emits.
    #[serde(rename = "type")]
    pub kind: ManipulatorKind,
    /// Optional per-manipulator description.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub description: Option<String>,
    /// The matcher.
    pub from: FromEvent,
    /// Events emitted on press.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub to: Vec<ToEvent>,
    /// Events emitted when the key is tapped with nothing in between.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub to_if_alone: Vec<ToEvent>,
    /// Events emitted on release.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub to_after_key_up: Vec<ToEvent>,
    /// Conditions that must all hold for the matcher to apply.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub conditions: Vec<Condition>,
}

impl Manipulator {
    /// Creates a basic manipulator matching `from` with no outputs yet.
    #[must_use]
    pub const fn basic(from: FromEvent) -> Self {
        Self {
            kind: ManipulatorKind::Basic,
            description: None,
            from,
            to: Vec::new(),
            to_if_alone: Vec::new(),
            to_after_key_up: Vec::new(),
            conditions: Vec::new(),
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the press events.
    #[must_use]
    pub fn with_to(mut self, to: Vec<ToEvent>) -> Self {
        self.to = to;
        self
    }

    /// Sets the tap-alone events.
    #[must_use]
    pub fn with_to_if_alone(mut self, to: Vec<ToEvent>) -> Self {
        self.to_if_alone = to;
        self
    }

    /// Sets the release events.
    #[must_use]
    pub fn with_to_after_key_up(mut self, to: Vec<ToEvent>) -> Self {
        self.to_after_key_up = to;
        self
    }

    /// Sets the conditions.
    #[must_use]
    pub fn with_conditions(mut self, conditions: Vec<Condition>) -> Self {
        self.conditions = conditions;
        self
    }
}

/// Manipulator type tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ManipulatorKind {
    /// The only kind this tool generates.
    Basic,
}

/// The `from` matcher of a manipulator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FromEvent {
    /// Key code to match.
    pub key_code: String,
    /// Modifier requirements, if any.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub modifiers: Option<FromModifiers>,
}

impl FromEvent {
    /// Matches a key with any modifiers held.
    pub fn key_with_any_modifiers(key_code: impl Into<String>) -> Self {
        Self {
            key_code: key_code.into(),
            modifiers: Some(FromModifiers {
                mandatory: Vec::new(),
                optional: vec!["any".to_string()],
            }),
        }
    }

    /// Matches a key with a mandatory modifier, others free.
    pub fn key_with_mandatory(key_code: impl Into<String>, modifier: Modifier) -> Self {
        Self {
            key_code: key_code.into(),
            modifiers: Some(FromModifiers {
                mandatory: vec![modifier.as_str().to_string()],
                optional: vec!["any".to_string()],
            }),
        }
    }
}

/// Modifier requirements on a `from` matcher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FromModifiers {
    /// Modifiers that must be held.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub mandatory: Vec<String>,
    /// Modifiers that may be held (the engine's `"any"` wildcard included).
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub optional: Vec<String>,
}

/// One output event of a manipulator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ToEvent {
    /// Write an engine state variable.
    SetVariable {
        /// The assignment.
        set_variable: VariableAssignment,
    },
    /// Run a shell command.
    Shell {
        /// The opaque command string.
        shell_command: String,
    },
    /// Emit a key press.
    Key {
        /// Key code to emit.
        key_code: String,
        /// Modifiers held for the press.
        #[serde(skip_serializing_if = "Vec::is_empty", default)]
        modifiers: Vec<Modifier>,
    },
}

impl ToEvent {
    /// A state-variable assignment event.
    pub fn set_variable(name: impl Into<String>, value: i64) -> Self {
        Self::SetVariable {
            set_variable: VariableAssignment {
                name: name.into(),
                value,
            },
        }
    }

    /// A shell-command event.
    pub fn shell(command: impl Into<String>) -> Self {
        Self::Shell {
            shell_command: command.into(),
        }
    }

    /// A key-press event.
    pub fn key(key_code: impl Into<String>, modifiers: Vec<Modifier>) -> Self {
        Self::Key {
            key_code: key_code.into(),
            modifiers,
        }
    }
}

/// A `set_variable` payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariableAssignment {
    /// Variable name.
    pub name: String,
    /// Value to store.
    pub value: i64,
}

/// A manipulator condition. Only `variable_if` is generated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Condition {
    /// Condition type tag.
    #[serde(rename = "type")]
    pub kind: String,
    /// Variable name to test.
    pub name: String,
    /// Value the variable must hold.
    pub value: i64,
}

impl Condition {
    /// A `variable_if` condition.
    pub fn variable_if(name: impl Into<String>, value: i64) -> Self {
        Self {
            kind: "variable_if".to_string(),
            name: name.into(),
            value,
        }
    }
}
