//! Structural validation of the layer tree before compilation.
//!
//! The whole tree is checked up front and every problem collected, so a
//! malformed keymap is rejected with the full list of offending paths and
//! no partial document is ever emitted.

use indexmap::IndexMap;
use thiserror::Error;

use crate::constants::SUBLAYER_VARIABLE_PREFIX;
use crate::models::{Keymap, KeySpellingError, LayerNode, TriggerKey};

/// A structural defect in the layer tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StructuralError {
    /// Two entries in one layer resolve to the same trigger.
    ///
    /// Never silently dropped: the engine's first-match-wins ordering would
    /// hide one of the two chords.
    #[error("duplicate trigger key \"{spelling}\" in layer \"{path}\"")]
    DuplicateTrigger {
        /// Path of the layer containing the duplicate.
        path: String,
        /// The offending spelling.
        spelling: String,
    },

    /// An entry's spelling does not resolve to a usable trigger.
    #[error("invalid trigger key \"{spelling}\" in layer \"{path}\": {source}")]
    InvalidTrigger {
        /// Path of the layer containing the entry.
        path: String,
        /// The offending spelling.
        spelling: String,
        /// Why it failed to resolve.
        source: KeySpellingError,
    },

    /// Two distinct sublayers derived the same state-variable name.
    ///
    /// Unreachable for well-formed trees; checked anyway because a silent
    /// collision would let one sublayer's chords fire inside another.
    #[error("state variable \"{name}\" allocated for both \"{first}\" and \"{second}\"")]
    VariableCollision {
        /// The colliding variable name.
        name: String,
        /// Path of the first owner.
        first: String,
        /// Path of the second owner.
        second: String,
    },
}

/// A non-blocking observation about the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationWarning {
    /// Warning message.
    pub message: String,
}

impl std::fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// Validation result with every error and warning found.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    /// Structural errors that prevent compilation.
    pub errors: Vec<StructuralError>,
    /// Non-blocking warnings.
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationReport {
    /// Creates an empty report.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Returns true if there are no errors (warnings are allowed).
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Adds an error to the report.
    pub fn add_error(&mut self, error: StructuralError) {
        self.errors.push(error);
    }

    /// Adds a warning to the report.
    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }
}

impl std::fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if !self.errors.is_empty() {
            writeln!(f, "{} structural errors:", self.errors.len())?;
            for (idx, error) in self.errors.iter().enumerate() {
                writeln!(f, "  {}. {}", idx + 1, error)?;
            }
        }
        if !self.warnings.is_empty() {
            writeln!(f, "{} warnings:", self.warnings.len())?;
            for (idx, warning) in self.warnings.iter().enumerate() {
                writeln!(f, "  {}. {}", idx + 1, warning)?;
            }
        }
        Ok(())
    }
}

/// Validates the whole layer tree rooted under the Hyper key.
#[must_use]
pub fn validate(keymap: &Keymap) -> ValidationReport {
    let mut report = ValidationReport::new();
    let mut variables: IndexMap<String, String> = IndexMap::new();
    walk(keymap, "hyper", &[], &mut report, &mut variables);
    report
}

fn walk(
    layer: &Keymap,
    path: &str,
    ancestor_components: &[String],
    report: &mut ValidationReport,
    variables: &mut IndexMap<String, String>,
) {
    let mut seen: Vec<TriggerKey> = Vec::new();

    for (spelling, node) in layer.entries() {
        let trigger = match TriggerKey::parse(spelling) {
            Ok(trigger) => trigger,
            Err(source) => {
                report.add_error(StructuralError::InvalidTrigger {
                    path: path.to_string(),
                    spelling: spelling.clone(),
                    source,
                });
                continue;
            }
        };

        if seen.contains(&trigger) {
            report.add_error(StructuralError::DuplicateTrigger {
                path: path.to_string(),
                spelling: spelling.clone(),
            });
            continue;
        }
        seen.push(trigger.clone());

        if let LayerNode::Layer(children) = node {
            let child_path = format!("{path}/{trigger}");
            let mut components = ancestor_components.to_vec();
            components.push(trigger.variable_component());
            let variable = format!("{SUBLAYER_VARIABLE_PREFIX}{}", components.join("_"));

            if let Some(first) = variables.insert(variable.clone(), child_path.clone()) {
                report.add_error(StructuralError::VariableCollision {
                    name: variable,
                    first,
                    second: child_path.clone(),
                });
                continue;
            }

            if children.is_empty() {
                report.add_warning(ValidationWarning {
                    message: format!("sublayer \"{child_path}\" has no chords"),
                });
            }

            walk(children, &child_path, &components, report, variables);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Action;

    #[test]
    fn test_valid_tree_produces_empty_report() {
        let keymap = Keymap::new()
            .bind("h", Action::key("left_arrow"))
            .bind("b", Keymap::new().bind("t", Action::open("https://twitter.com")));

        let report = validate(&keymap);
        assert!(report.is_valid());
        assert!(report.errors.is_empty());
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn test_duplicate_trigger_in_one_layer_is_rejected() {
        let keymap = Keymap::new()
            .bind("h", Action::key("left_arrow"))
            .bind("h", Action::key("right_arrow"));

        let report = validate(&keymap);
        assert!(!report.is_valid());
        assert_eq!(
            report.errors,
            vec![StructuralError::DuplicateTrigger {
                path: "hyper".to_string(),
                spelling: "h".to_string(),
            }]
        );
    }

    #[test]
    fn test_duplicate_by_alias_is_rejected() {
        // "-" and "hyphen" resolve to the same trigger.
        let keymap = Keymap::new()
            .bind("-", Action::key("page_up"))
            .bind("hyphen", Action::key("page_down"));

        let report = validate(&keymap);
        assert!(!report.is_valid());
        assert!(matches!(
            report.errors[0],
            StructuralError::DuplicateTrigger { .. }
        ));
    }

    #[test]
    fn test_duplicate_inside_sublayer_names_the_path() {
        let keymap = Keymap::new().bind(
            "w",
            Keymap::new()
                .bind("H", Action::shell("a"))
                .bind("H", Action::shell("b")),
        );

        let report = validate(&keymap);
        assert_eq!(
            report.errors,
            vec![StructuralError::DuplicateTrigger {
                path: "hyper/w".to_string(),
                spelling: "H".to_string(),
            }]
        );
    }

    #[test]
    fn test_same_key_in_sibling_sublayers_is_allowed() {
        let keymap = Keymap::new()
            .bind("w", Keymap::new().bind("h", Action::shell("a")))
            .bind("v", Keymap::new().bind("h", Action::key("left_arrow")));

        assert!(validate(&keymap).is_valid());
    }

    #[test]
    fn test_shifted_and_plain_are_distinct_triggers() {
        let keymap = Keymap::new()
            .bind("h", Action::key("left_arrow"))
            .bind("H", Action::key("right_arrow"));

        assert!(validate(&keymap).is_valid());
    }

    #[test]
    fn test_invalid_spelling_reports_path_and_cause() {
        let keymap = Keymap::new().bind("w", Keymap::new().bind("nope", Action::shell("a")));

        let report = validate(&keymap);
        assert_eq!(report.errors.len(), 1);
        match &report.errors[0] {
            StructuralError::InvalidTrigger { path, spelling, .. } => {
                assert_eq!(path, "hyper/w");
                assert_eq!(spelling, "nope");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_reserved_hyper_key_as_trigger_is_rejected() {
        let keymap = Keymap::new().bind("caps_lock", Action::key("escape"));

        let report = validate(&keymap);
        assert!(!report.is_valid());
        assert!(matches!(
            &report.errors[0],
            StructuralError::InvalidTrigger {
                source: KeySpellingError::Reserved(_),
                ..
            }
        ));
    }

    #[test]
    fn test_empty_sublayer_warns_but_compiles() {
        let keymap = Keymap::new().bind("w", Keymap::new());

        let report = validate(&keymap);
        assert!(report.is_valid());
        assert_eq!(report.warnings.len(), 1);
        assert!(report.warnings[0].message.contains("hyper/w"));
    }

    #[test]
    fn test_multiple_errors_are_all_collected() {
        let keymap = Keymap::new()
            .bind("h", Action::key("left_arrow"))
            .bind("h", Action::key("right_arrow"))
            .bind("??", Action::key("up_arrow"));

        let report = validate(&keymap);
        assert_eq!(report.errors.len(), 2);
    }
}
