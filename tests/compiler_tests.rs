//! End-to-end properties of the layer compiler, checked against the
//! serialized document a real Karabiner install would load.

use hyperlayer::compiler::{self, CompileError, StructuralError};
use hyperlayer::karabiner::{Manipulator, ToEvent};
use hyperlayer::keymap::default_keymap;
use serde_json::json;

mod fixtures;
use fixtures::*;

/// All manipulators of a compiled keymap, flattened in match order.
fn all_manipulators(keymap: &hyperlayer::models::Keymap) -> Vec<Manipulator> {
    compiler::compile(keymap)
        .unwrap()
        .rules
        .into_iter()
        .flat_map(|rule| rule.manipulators)
        .collect()
}

/// Variable names a manipulator writes via `set_variable`.
fn written_variables(manipulator: &Manipulator) -> Vec<String> {
    manipulator
        .to
        .iter()
        .chain(&manipulator.to_after_key_up)
        .filter_map(|event| match event {
            ToEvent::SetVariable { set_variable } => Some(set_variable.name.clone()),
            _ => None,
        })
        .collect()
}

#[test]
fn test_compilation_is_deterministic() {
    let first = compiler::compile(&default_keymap()).unwrap();
    let second = compiler::compile(&default_keymap()).unwrap();

    let first_text =
        serde_json::to_string_pretty(&first.to_document("Default", false)).unwrap();
    let second_text =
        serde_json::to_string_pretty(&second.to_document("Default", false)).unwrap();
    assert_eq!(first_text, second_text);
}

#[test]
fn test_single_leaf_scenario() {
    // { h: SendKeys([left_arrow]) } → one manipulator gated on hyper.
    let manipulators = all_manipulators(&keymap_single_leaf());
    assert_eq!(manipulators.len(), 2); // hyper rule + the chord

    let value = serde_json::to_value(&manipulators[1]).unwrap();
    assert_eq!(
        value,
        json!({
            "type": "basic",
            "from": { "key_code": "h", "modifiers": { "optional": ["any"] } },
            "to": [{ "key_code": "left_arrow" }],
            "conditions": [{ "type": "variable_if", "name": "hyper", "value": 1 }],
        })
    );
}

#[test]
fn test_nested_sublayer_scenario() {
    // { w: { H: ShellCommand } } → toggle + shifted leaf.
    let manipulators = all_manipulators(&keymap_nested());
    assert_eq!(manipulators.len(), 3);

    let toggle = serde_json::to_value(&manipulators[1]).unwrap();
    assert_eq!(
        toggle,
        json!({
            "type": "basic",
            "description": "Toggle Hyper sublayer \"w\"",
            "from": { "key_code": "w", "modifiers": { "optional": ["any"] } },
            "to": [{ "set_variable": { "name": "hyper_sublayer_w", "value": 1 } }],
            "to_after_key_up": [{ "set_variable": { "name": "hyper_sublayer_w", "value": 0 } }],
            "conditions": [{ "type": "variable_if", "name": "hyper", "value": 1 }],
        })
    );

    let leaf = serde_json::to_value(&manipulators[2]).unwrap();
    assert_eq!(
        leaf,
        json!({
            "type": "basic",
            "description": "Shrink Width",
            "from": {
                "key_code": "h",
                "modifiers": { "mandatory": ["left_shift"], "optional": ["any"] }
            },
            "to": [{ "shell_command": "yabai -m window --resize left:50:0" }],
            "conditions": [{ "type": "variable_if", "name": "hyper_sublayer_w", "value": 1 }],
        })
    );
}

#[test]
fn test_empty_keymap_scenario() {
    // No sublayers supplied: the document still carries the Hyper rule.
    let compiled = compiler::compile(&hyperlayer::models::Keymap::new()).unwrap();
    assert_eq!(compiled.rules.len(), 1);

    let value = serde_json::to_value(&compiled.rules[0]).unwrap();
    assert_eq!(
        value,
        json!({
            "description": "Hyper Key (⌃⌥⇧⌘)",
            "manipulators": [{
                "type": "basic",
                "description": "Caps Lock -> Hyper Key",
                "from": { "key_code": "caps_lock", "modifiers": { "optional": ["any"] } },
                "to": [{ "set_variable": { "name": "hyper", "value": 1 } }],
                "to_if_alone": [{ "key_code": "escape" }],
                "to_after_key_up": [{ "set_variable": { "name": "hyper", "value": 0 } }],
            }],
        })
    );
}

#[test]
fn test_sibling_layers_sharing_a_leaf_key() {
    // w and v both bind `h`; their conditions are mutually exclusive.
    let manipulators = all_manipulators(&keymap_sibling_layers());
    let h_leaves: Vec<&Manipulator> = manipulators
        .iter()
        .filter(|m| m.from.key_code == "h")
        .collect();
    assert_eq!(h_leaves.len(), 2);

    let conditions: Vec<Vec<(String, i64)>> = h_leaves
        .iter()
        .map(|m| {
            m.conditions
                .iter()
                .map(|c| (c.name.clone(), c.value))
                .collect()
        })
        .collect();
    assert_eq!(
        conditions[0],
        vec![("hyper_sublayer_w".to_string(), 1)]
    );
    assert_eq!(
        conditions[1],
        vec![("hyper_sublayer_v".to_string(), 1)]
    );
}

#[test]
fn test_reachability_through_full_ancestor_chain() {
    // Exactly one manipulator matches the leaf, conditioned on every
    // ancestor variable in tree order.
    let manipulators = all_manipulators(&keymap_deeply_nested());

    let matching: Vec<&Manipulator> = manipulators
        .iter()
        .filter(|m| {
            m.from.key_code == "h"
                && m.conditions
                    .iter()
                    .map(|c| (c.name.as_str(), c.value))
                    .collect::<Vec<_>>()
                    == vec![("hyper_sublayer_w", 1), ("hyper_sublayer_w_x", 1)]
        })
        .collect();
    assert_eq!(matching.len(), 1);
}

#[test]
fn test_duplicate_trigger_is_rejected_not_shadowed() {
    let err = compiler::compile(&keymap_duplicate_trigger()).unwrap_err();
    let CompileError::Invalid { report } = err else {
        panic!("expected a validation failure");
    };
    assert_eq!(
        report.errors,
        vec![StructuralError::DuplicateTrigger {
            path: "hyper".to_string(),
            spelling: "h".to_string(),
        }]
    );
}

#[test]
fn test_state_hygiene_in_default_keymap() {
    let compiled = compiler::compile(&default_keymap()).unwrap();
    let manipulators: Vec<Manipulator> = compiled
        .rules
        .iter()
        .flat_map(|rule| rule.manipulators.clone())
        .collect();

    // Every variable is written by exactly one manipulator, which sets it
    // to 1 on press and 0 on release.
    for variable in compiled.variables.keys() {
        let writers: Vec<&Manipulator> = manipulators
            .iter()
            .filter(|m| written_variables(m).contains(variable))
            .collect();
        assert_eq!(writers.len(), 1, "variable {variable} has multiple writers");

        let writer = writers[0];
        assert_eq!(
            writer.to,
            vec![ToEvent::set_variable(variable.clone(), 1)],
            "press handler of {variable}"
        );
        assert_eq!(
            writer.to_after_key_up,
            vec![ToEvent::set_variable(variable.clone(), 0)],
            "release handler of {variable}"
        );
    }
}

#[test]
fn test_every_condition_references_an_owned_variable() {
    let compiled = compiler::compile(&default_keymap()).unwrap();
    for rule in &compiled.rules {
        for manipulator in &rule.manipulators {
            for condition in &manipulator.conditions {
                assert!(
                    compiled.variables.contains_key(&condition.name),
                    "condition on unowned variable {}",
                    condition.name
                );
            }
        }
    }
}

#[test]
fn test_default_keymap_shape() {
    let compiled = compiler::compile(&default_keymap()).unwrap();

    // Hyper rule + 13 direct chords + 6 sublayers.
    assert_eq!(compiled.rules.len(), 20);
    // 1 hyper + 13 direct + (5 + 10 + 4 + 14 + 10 + 4) sublayer manipulators.
    assert_eq!(compiled.manipulator_count(), 61);

    assert_eq!(compiled.rules[0].description, "Hyper Key (⌃⌥⇧⌘)");
    let descriptions: Vec<&str> = compiled
        .rules
        .iter()
        .map(|rule| rule.description.as_str())
        .collect();
    assert!(descriptions.contains(&"Hyper Key sublayer \"w\""));
    assert!(descriptions.contains(&"Hyper Key + \"h\""));
}

#[test]
fn test_direct_chords_are_guarded_against_open_sublayers() {
    let compiled = compiler::compile(&default_keymap()).unwrap();

    // Hyper + 1 must not fire while any sublayer is open.
    let rule = compiled
        .rules
        .iter()
        .find(|rule| rule.description == "Hyper Key + \"1\"")
        .unwrap();
    let conditions: Vec<(&str, i64)> = rule.manipulators[0]
        .conditions
        .iter()
        .map(|c| (c.name.as_str(), c.value))
        .collect();

    assert_eq!(conditions[0], ("hyper", 1));
    let guards: Vec<(&str, i64)> = conditions[1..].to_vec();
    assert_eq!(
        guards,
        vec![
            ("hyper_sublayer_b", 0),
            ("hyper_sublayer_o", 0),
            ("hyper_sublayer_n", 0),
            ("hyper_sublayer_w", 0),
            ("hyper_sublayer_v", 0),
            ("hyper_sublayer_c", 0),
        ]
    );
}
