//! Trigger-key spellings, key-code aliases, and modifiers.
//!
//! Authors write triggers in a compact spelling: `"h"` for a plain key,
//! `"H"` for the same physical key held with Shift, `"!1"` for the same
//! physical key held with Command. Punctuation has aliases (`"-"` resolves
//! to `hyphen`). Everything resolves against a fixed table of Karabiner
//! key codes; unresolvable spellings are structural errors.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::HYPER_KEY;

/// Karabiner modifier names used in `from` and `to` events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Modifier {
    /// Left Control (⌃)
    LeftControl,
    /// Left Shift (⇧)
    LeftShift,
    /// Left Option (⌥)
    LeftOption,
    /// Left Command (⌘)
    LeftCommand,
    /// Right Control (⌃)
    RightControl,
    /// Right Shift (⇧)
    RightShift,
    /// Right Option (⌥)
    RightOption,
    /// Right Command (⌘)
    RightCommand,
}

impl Modifier {
    /// The wire name of this modifier.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::LeftControl => "left_control",
            Self::LeftShift => "left_shift",
            Self::LeftOption => "left_option",
            Self::LeftCommand => "left_command",
            Self::RightControl => "right_control",
            Self::RightShift => "right_shift",
            Self::RightOption => "right_option",
            Self::RightCommand => "right_command",
        }
    }
}

impl std::fmt::Display for Modifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How a trigger key is physically held.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TriggerVariant {
    /// The bare key.
    #[default]
    Plain,
    /// The key held with Shift (spelled as an uppercase letter).
    Shifted,
    /// The key held with Command (spelled with a `!` prefix).
    Command,
}

/// A parsed trigger key: a Karabiner key code plus its held variant.
///
/// Two triggers are equal when they resolve to the same key code and
/// variant, regardless of spelling — `"-"` and `"hyphen"` collide.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TriggerKey {
    key_code: String,
    variant: TriggerVariant,
}

/// Why a trigger spelling failed to resolve.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeySpellingError {
    /// The spelling was empty.
    #[error("empty trigger key")]
    Empty,
    /// The spelling does not resolve to a known key code.
    #[error("unknown trigger key \"{0}\"")]
    Unknown(String),
    /// The spelling resolves to a key reserved by the compiler.
    #[error("trigger key \"{0}\" is reserved for the Hyper key")]
    Reserved(String),
    /// A variant marker was applied to something that is not a plain key.
    #[error("malformed variant spelling \"{0}\"")]
    MalformedVariant(String),
}

impl TriggerKey {
    /// Parses an author spelling into a trigger key.
    pub fn parse(spelling: &str) -> Result<Self, KeySpellingError> {
        if spelling.is_empty() {
            return Err(KeySpellingError::Empty);
        }

        // `!` marks the Command-held variant of the remainder.
        if let Some(rest) = spelling.strip_prefix('!') {
            let inner = Self::parse(rest)?;
            if inner.variant != TriggerVariant::Plain {
                return Err(KeySpellingError::MalformedVariant(spelling.to_string()));
            }
            return Ok(Self {
                key_code: inner.key_code,
                variant: TriggerVariant::Command,
            });
        }

        // A single uppercase letter is the Shift-held variant of the letter.
        let mut chars = spelling.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            if c.is_ascii_uppercase() {
                return Ok(Self {
                    key_code: c.to_ascii_lowercase().to_string(),
                    variant: TriggerVariant::Shifted,
                });
            }
        }

        let key_code = resolve_key_code(spelling)
            .ok_or_else(|| KeySpellingError::Unknown(spelling.to_string()))?;

        if key_code == HYPER_KEY {
            return Err(KeySpellingError::Reserved(spelling.to_string()));
        }

        Ok(Self {
            key_code: key_code.to_string(),
            variant: TriggerVariant::Plain,
        })
    }

    /// The resolved Karabiner key code.
    #[must_use]
    pub fn key_code(&self) -> &str {
        &self.key_code
    }

    /// The held variant.
    #[must_use]
    pub const fn variant(&self) -> TriggerVariant {
        self.variant
    }

    /// The modifier the variant requires to be held, if any.
    #[must_use]
    pub const fn mandatory_modifier(&self) -> Option<Modifier> {
        match self.variant {
            TriggerVariant::Plain => None,
            TriggerVariant::Shifted => Some(Modifier::LeftShift),
            TriggerVariant::Command => Some(Modifier::LeftCommand),
        }
    }

    /// The component this trigger contributes to a state-variable name.
    #[must_use]
    pub fn variable_component(&self) -> String {
        match self.variant {
            TriggerVariant::Plain => self.key_code.clone(),
            TriggerVariant::Shifted => format!("shift_{}", self.key_code),
            TriggerVariant::Command => format!("command_{}", self.key_code),
        }
    }
}

impl std::fmt::Display for TriggerKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.variant {
            TriggerVariant::Plain => write!(f, "{}", self.key_code),
            TriggerVariant::Shifted => write!(f, "shift+{}", self.key_code),
            TriggerVariant::Command => write!(f, "cmd+{}", self.key_code),
        }
    }
}

/// Punctuation spellings and their Karabiner key codes.
const PUNCTUATION_ALIASES: &[(&str, &str)] = &[
    ("-", "hyphen"),
    ("=", "equal_sign"),
    ("[", "open_bracket"),
    ("]", "close_bracket"),
    (";", "semicolon"),
    ("'", "quote"),
    (",", "comma"),
    (".", "period"),
    ("/", "slash"),
    ("\\", "backslash"),
    ("`", "grave_accent_and_tilde"),
];

/// Named key codes accepted verbatim as trigger spellings.
const NAMED_KEY_CODES: &[&str] = &[
    "spacebar",
    "tab",
    "return_or_enter",
    "escape",
    "delete_or_backspace",
    "caps_lock",
    "up_arrow",
    "down_arrow",
    "left_arrow",
    "right_arrow",
    "page_up",
    "page_down",
    "home",
    "end",
    "hyphen",
    "equal_sign",
    "open_bracket",
    "close_bracket",
    "semicolon",
    "quote",
    "comma",
    "period",
    "slash",
    "backslash",
    "grave_accent_and_tilde",
];

/// Resolves a plain spelling to a Karabiner key code.
fn resolve_key_code(spelling: &str) -> Option<&str> {
    let mut chars = spelling.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            return Some(spelling);
        }
        return PUNCTUATION_ALIASES
            .iter()
            .find(|(alias, _)| *alias == spelling)
            .map(|(_, code)| *code);
    }

    NAMED_KEY_CODES.contains(&spelling).then_some(spelling)
}
