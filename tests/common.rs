//! Common test utilities for building diagram exports and publishing them.
use kaiwa::prelude::*;
use std::sync::Arc;

/// Installs the env-filtered subscriber once per test binary, so
/// `RUST_LOG` surfaces pipeline and turn traces during test runs.
#[allow(dead_code)]
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Publishes a diagram export, panicking on any import error.
#[allow(dead_code)]
pub fn publish(json: &str) -> (ScenarioGraph, ResolveReport) {
    init_tracing();
    ScenarioCompiler::from_json(json)
        .expect("Failed to parse diagram")
        .compile()
        .expect("Failed to publish scenario")
}

/// Publishes and wraps the graph in a runtime.
#[allow(dead_code)]
pub fn runtime_for(json: &str) -> ConversationRuntime {
    let (graph, _) = publish(json);
    ConversationRuntime::new(Arc::new(graph))
}

/// The basic scenario: root response A offering two joint choices, the
/// first jumping by name to response B.
///
/// ```text
/// start -> A [ J1 "More info" (go_to B), J2 "Something else" ] ; B
/// ```
#[allow(dead_code)]
pub fn basic_diagram() -> String {
    serde_json::json!({
        "elements": [
            { "type": "step", "id": "s0", "kind": "start", "next": "a1" },
            {
                "type": "step", "id": "a1", "kind": "response",
                "contains": ["j1", "j2"],
                "state": {
                    "displayName": "A",
                    "responses": [
                        { "text": "<p>Welcome!<br>How can I help?</p>" }
                    ]
                }
            },
            {
                "type": "step", "id": "j1", "kind": "joint", "order": 1,
                "state": {
                    "condition": { "conditionType": "go_to", "value": "More info", "linkTarget": "B" }
                }
            },
            {
                "type": "step", "id": "j2", "kind": "joint", "order": 2,
                "state": {
                    "condition": { "conditionType": "button", "value": "Something else" }
                }
            },
            {
                "type": "step", "id": "b1", "kind": "response",
                "state": {
                    "displayName": "B",
                    "responses": [ { "text": "Here is more info" } ]
                }
            }
        ]
    })
    .to_string()
}

/// A root whose contained children include a fully configured mail node.
#[allow(dead_code)]
pub fn mail_diagram() -> String {
    serde_json::json!({
        "elements": [
            { "type": "step", "id": "s0", "kind": "start", "next": "a1" },
            {
                "type": "step", "id": "a1", "kind": "response",
                "contains": ["m1"],
                "state": {
                    "displayName": "Contact",
                    "responses": [ { "text": "Want to send us a message?" } ]
                }
            },
            {
                "type": "step", "id": "m1", "kind": "mailSystem",
                "state": {
                    "to": ["support@example.com"],
                    "subject": "New inquiry",
                    "body": "A visitor asked for contact."
                }
            }
        ]
    })
    .to_string()
}

/// A root offering an operator-handover button.
#[allow(dead_code)]
pub fn handover_diagram() -> String {
    serde_json::json!({
        "elements": [
            { "type": "step", "id": "s0", "kind": "start", "next": "a1" },
            {
                "type": "step", "id": "a1", "kind": "response",
                "contains": ["j1"],
                "state": {
                    "displayName": "Menu",
                    "responses": [ { "text": "Anything else?" } ]
                }
            },
            {
                "type": "step", "id": "j1", "kind": "joint",
                "state": {
                    "condition": { "conditionType": "button", "value": "Talk to an operator" }
                }
            }
        ]
    })
    .to_string()
}

/// Two responses that jump to each other by name, plus a self-jumping
/// joint on the root. Exercises the history loop guards.
#[allow(dead_code)]
pub fn cycle_diagram() -> String {
    serde_json::json!({
        "elements": [
            { "type": "step", "id": "s0", "kind": "start", "next": "a1" },
            {
                "type": "step", "id": "a1", "kind": "response",
                "contains": ["ja", "jself"],
                "state": {
                    "displayName": "A",
                    "responses": [ { "text": "At A" } ]
                }
            },
            {
                "type": "step", "id": "ja", "kind": "joint", "order": 1,
                "state": {
                    "condition": { "conditionType": "go_to", "value": "To B", "linkTarget": "B" }
                }
            },
            {
                "type": "step", "id": "jself", "kind": "joint", "order": 2,
                "state": {
                    "condition": { "conditionType": "go_to", "value": "Stay", "linkTarget": "A" }
                }
            },
            {
                "type": "step", "id": "b1", "kind": "response",
                "contains": ["jb"],
                "state": {
                    "displayName": "B",
                    "responses": [ { "text": "At B" } ]
                }
            },
            {
                "type": "step", "id": "jb", "kind": "joint",
                "state": {
                    "condition": { "conditionType": "go_to", "value": "To A", "linkTarget": "A" }
                }
            }
        ]
    })
    .to_string()
}

/// Finds the option whose label matches, panicking when absent.
#[allow(dead_code)]
pub fn option_labelled(turn: &TurnResult, label: &str) -> TurnOption {
    turn.options
        .iter()
        .find(|o| o.label == label)
        .unwrap_or_else(|| panic!("No option labelled '{}' in {:?}", label, turn.options))
        .clone()
}
