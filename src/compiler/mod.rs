//! The layer compiler.
//!
//! Walks a [`Keymap`] tree rooted under the Hyper key and emits the flat,
//! ordered rule list the remapping engine consumes. The multi-level chord
//! state machine is encoded with the engine's primitive vocabulary only:
//! key matchers, boolean state variables, timed alone/held disambiguation,
//! and first-match-wins rule ordering.
//!
//! Per sublayer the compiler allocates one state variable, named
//! deterministically from the full trigger-key path. A sublayer is active
//! only while its trigger is physically held — not a sticky toggle — so
//! releasing the chord is the exit gesture.

pub mod render;
pub mod validator;

use indexmap::IndexMap;
use thiserror::Error;
use tracing::debug;

use crate::constants::{
    HYPER_ALONE_KEY, HYPER_KEY, HYPER_VARIABLE, SUBLAYER_VARIABLE_PREFIX,
};
use crate::karabiner::{
    ComplexModifications, Condition, FromEvent, GlobalSettings, KarabinerDocument, Manipulator,
    Profile, Rule, ToEvent,
};
use crate::models::{Action, Keymap, LayerNode, TriggerKey};

pub use render::{open_command, render_action};
pub use validator::{validate, StructuralError, ValidationReport, ValidationWarning};

/// Why compilation failed.
#[derive(Debug, Error)]
pub enum CompileError {
    /// The tree is structurally malformed. No partial document is emitted.
    #[error("keymap validation failed:\n{report}")]
    Invalid {
        /// Every structural error found.
        report: ValidationReport,
    },

    /// An invariant the validator guarantees was violated during emission.
    #[error("compiler defect: {0}")]
    Defect(String),
}

/// The compiled rule list plus the state-variable ownership table.
#[derive(Debug, Clone)]
pub struct CompiledRules {
    /// Rules in engine match order; the Hyper rule is always first.
    pub rules: Vec<Rule>,
    /// Variable name → owning trigger path, in allocation order.
    ///
    /// The explicit, enumerable replacement for ambient engine globals:
    /// every variable the generated document touches is listed here, and
    /// each is written only by its owner's press/release manipulators.
    pub variables: IndexMap<String, String>,
}

impl CompiledRules {
    /// Wraps the rules into a complete engine document.
    #[must_use]
    pub fn to_document(&self, profile_name: &str, show_in_menu_bar: bool) -> KarabinerDocument {
        KarabinerDocument {
            global: GlobalSettings { show_in_menu_bar },
            profiles: vec![Profile {
                name: profile_name.to_string(),
                complex_modifications: ComplexModifications {
                    rules: self.rules.clone(),
                },
            }],
        }
    }

    /// Total number of manipulators across all rules.
    #[must_use]
    pub fn manipulator_count(&self) -> usize {
        self.rules.iter().map(|rule| rule.manipulators.len()).sum()
    }
}

/// Compiles a keymap into the ordered rule list.
///
/// The whole tree is validated first; a malformed tree is rejected with
/// every offending path and nothing is emitted.
pub fn compile(keymap: &Keymap) -> Result<CompiledRules, CompileError> {
    let report = validator::validate(keymap);
    if !report.is_valid() {
        return Err(CompileError::Invalid { report });
    }

    let mut variables: IndexMap<String, String> = IndexMap::new();
    variables.insert(HYPER_VARIABLE.to_string(), "hyper".to_string());

    let entries = parse_layer(keymap)?;
    let layer_variables = sublayer_variables(&entries, &[]);

    let mut rules = vec![hyper_rule()];
    for (trigger, node) in &entries {
        let rule = match node {
            LayerNode::Leaf(action) => leaf_rule(trigger, action, &layer_variables),
            LayerNode::Layer(children) => {
                let manipulators = sublayer_manipulators(
                    trigger,
                    children,
                    &[],
                    &layer_variables,
                    &[],
                    "hyper",
                    "",
                    &mut variables,
                )?;
                Rule {
                    description: format!("Hyper Key sublayer \"{trigger}\""),
                    manipulators,
                }
            }
        };
        rules.push(rule);
    }

    let compiled = CompiledRules { rules, variables };
    debug!(
        rules = compiled.rules.len(),
        manipulators = compiled.manipulator_count(),
        variables = compiled.variables.len(),
        "compiled keymap"
    );
    Ok(compiled)
}

/// The fixed root-modifier rule: Caps Lock becomes the Hyper condition,
/// with its tap-alone fallback preserved.
fn hyper_rule() -> Rule {
    Rule {
        description: "Hyper Key (⌃⌥⇧⌘)".to_string(),
        manipulators: vec![Manipulator::basic(FromEvent::key_with_any_modifiers(
            HYPER_KEY,
        ))
        .with_description("Caps Lock -> Hyper Key")
        .with_to(vec![ToEvent::set_variable(HYPER_VARIABLE, 1)])
        .with_to_if_alone(vec![ToEvent::key(HYPER_ALONE_KEY, Vec::new())])
        .with_to_after_key_up(vec![ToEvent::set_variable(HYPER_VARIABLE, 0)])],
    }
}

/// Parses a layer's entries, failing on spellings the validator should
/// have rejected.
fn parse_layer(layer: &Keymap) -> Result<Vec<(TriggerKey, &LayerNode)>, CompileError> {
    layer
        .entries()
        .iter()
        .map(|(spelling, node)| {
            TriggerKey::parse(spelling).map(|trigger| (trigger, node)).map_err(|source| {
                CompileError::Defect(format!(
                    "trigger \"{spelling}\" failed to parse after validation: {source}"
                ))
            })
        })
        .collect()
}

/// State-variable names for the sublayer entries of one layer.
fn sublayer_variables(
    entries: &[(TriggerKey, &LayerNode)],
    ancestor_components: &[String],
) -> Vec<(TriggerKey, String)> {
    entries
        .iter()
        .filter(|(_, node)| matches!(node, LayerNode::Layer(_)))
        .map(|(trigger, _)| {
            let mut components = ancestor_components.to_vec();
            components.push(trigger.variable_component());
            (
                trigger.clone(),
                format!("{SUBLAYER_VARIABLE_PREFIX}{}", components.join("_")),
            )
        })
        .collect()
}

/// The matcher for a trigger key: variant modifier mandatory, everything
/// else optional so Hyper chords work regardless of held modifiers.
fn from_event(trigger: &TriggerKey) -> FromEvent {
    match trigger.mandatory_modifier() {
        Some(modifier) => FromEvent::key_with_mandatory(trigger.key_code(), modifier),
        None => FromEvent::key_with_any_modifiers(trigger.key_code()),
    }
}

/// A rule for a direct `Hyper + key` chord.
///
/// Guarded against every open sublayer so a held sublayer never leaks into
/// direct chords.
fn leaf_rule(
    trigger: &TriggerKey,
    action: &Action,
    layer_variables: &[(TriggerKey, String)],
) -> Rule {
    let mut conditions = vec![Condition::variable_if(HYPER_VARIABLE, 1)];
    conditions.extend(
        layer_variables
            .iter()
            .map(|(_, variable)| Condition::variable_if(variable, 0)),
    );

    Rule {
        description: format!("Hyper Key + \"{trigger}\""),
        manipulators: vec![leaf_manipulator(trigger, action, conditions)],
    }
}

/// A leaf manipulator with the given condition set.
fn leaf_manipulator(trigger: &TriggerKey, action: &Action, conditions: Vec<Condition>) -> Manipulator {
    let mut manipulator = Manipulator::basic(from_event(trigger))
        .with_to(render::render_action(action))
        .with_conditions(conditions);
    if let Some(description) = action.description() {
        manipulator = manipulator.with_description(description);
    }
    manipulator
}

/// Conditions required to operate inside a layer: `hyper == 1` at the top
/// level, the full ancestor variable chain below it.
fn entry_conditions(ancestor_variables: &[String]) -> Vec<Condition> {
    if ancestor_variables.is_empty() {
        vec![Condition::variable_if(HYPER_VARIABLE, 1)]
    } else {
        ancestor_variables
            .iter()
            .map(|variable| Condition::variable_if(variable, 1))
            .collect()
    }
}

/// All manipulators for one sublayer branch: the toggle first, then its
/// children in author order, nested sublayers expanded in place.
#[allow(clippy::too_many_arguments)]
fn sublayer_manipulators(
    trigger: &TriggerKey,
    children: &Keymap,
    ancestor_variables: &[String],
    sibling_variables: &[(TriggerKey, String)],
    ancestor_components: &[String],
    parent_path: &str,
    parent_label: &str,
    variables: &mut IndexMap<String, String>,
) -> Result<Vec<Manipulator>, CompileError> {
    let path = format!("{parent_path}/{trigger}");
    let label = if parent_label.is_empty() {
        trigger.to_string()
    } else {
        format!("{parent_label} {trigger}")
    };

    let mut components = ancestor_components.to_vec();
    components.push(trigger.variable_component());
    let variable = format!("{SUBLAYER_VARIABLE_PREFIX}{}", components.join("_"));

    // Fresh allocation per non-leaf trigger is the sole concurrency-safety
    // invariant of the generated document; a collision here is a defect.
    if let Some(first) = variables.insert(variable.clone(), path.clone()) {
        return Err(CompileError::Defect(format!(
            "state variable \"{variable}\" already allocated for \"{first}\""
        )));
    }

    let mut toggle_conditions = entry_conditions(ancestor_variables);
    toggle_conditions.extend(
        sibling_variables
            .iter()
            .filter(|(sibling, _)| sibling != trigger)
            .map(|(_, sibling_variable)| Condition::variable_if(sibling_variable, 0)),
    );

    // Active only while the trigger is held concurrently with its ancestors;
    // release is the exit gesture.
    let toggle = Manipulator::basic(from_event(trigger))
        .with_description(format!("Toggle Hyper sublayer \"{label}\""))
        .with_to(vec![ToEvent::set_variable(&variable, 1)])
        .with_to_after_key_up(vec![ToEvent::set_variable(&variable, 0)])
        .with_conditions(toggle_conditions);

    let mut manipulators = vec![toggle];

    let entries = parse_layer(children)?;
    let mut child_chain = ancestor_variables.to_vec();
    child_chain.push(variable);
    let child_layer_variables = sublayer_variables(&entries, &components);

    for (child_trigger, node) in &entries {
        match node {
            LayerNode::Leaf(action) => {
                let mut conditions: Vec<Condition> = child_chain
                    .iter()
                    .map(|chain_variable| Condition::variable_if(chain_variable, 1))
                    .collect();
                conditions.extend(
                    child_layer_variables
                        .iter()
                        .map(|(_, child_variable)| Condition::variable_if(child_variable, 0)),
                );
                manipulators.push(leaf_manipulator(child_trigger, action, conditions));
            }
            LayerNode::Layer(grandchildren) => {
                manipulators.extend(sublayer_manipulators(
                    child_trigger,
                    grandchildren,
                    &child_chain,
                    &child_layer_variables,
                    &components,
                    &path,
                    &label,
                    variables,
                )?);
            }
        }
    }

    Ok(manipulators)
}
