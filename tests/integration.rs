//! End-to-end tests covering publish, conversation, effects, and the
//! persistence/publish plumbing around them.
mod common;
use common::*;
use kaiwa::prelude::*;
use std::sync::Arc;

#[test]
fn test_e2e_selection_resolves_jump_to_named_response() {
    // Root response A (two reply options) -> joint with Jump("B") ->
    // response named "B".
    let (graph, report) = publish(&basic_diagram());
    assert!(report.warnings.is_empty());

    let runtime = ConversationRuntime::new(Arc::new(graph));
    let (mut session, turn) = runtime.open("e2e-a");

    let choice = option_labelled(&turn, "More info");
    let next = runtime
        .handle(&mut session, SessionEvent::Select { option: choice.id })
        .expect("selection failed");

    let b = runtime.graph().node_by_name("B").expect("B missing");
    assert_eq!(session.current, b.id);
    assert_eq!(next.messages, vec!["Here is more info".to_string()]);
    assert!(next.effect.is_none());
}

#[test]
fn test_e2e_mail_effect_exactly_once_and_not_on_back() {
    let runtime = runtime_for(&mail_diagram());
    let (mut session, turn) = runtime.open("e2e-b");

    let mail_option = &turn.options[0];
    let mail_turn = runtime
        .handle(
            &mut session,
            SessionEvent::Select {
                option: mail_option.id,
            },
        )
        .expect("selection failed");

    match mail_turn.effect {
        Some(Effect::SendMail(config)) => {
            assert_eq!(config.to, vec!["support@example.com".to_string()]);
            assert_eq!(config.subject.as_deref(), Some("New inquiry"));
        }
        other => panic!("Expected exactly one SendMail effect, got {:?}", other),
    }

    // The mail node offers no options, so the root frame is still the top
    // of the stack and Back is unavailable; re-presenting the root via
    // free text must not re-emit the effect either.
    let represented = runtime
        .handle(
            &mut session,
            SessionEvent::Text {
                content: "hello?".to_string(),
            },
        )
        .expect("text failed");
    assert!(represented.effect.is_none());
}

#[test]
fn test_e2e_mail_back_emits_no_effect() {
    // Variant of the mail scenario with an intermediate hop so Back is
    // available after the mail node was reached.
    let json = serde_json::json!({
        "elements": [
            { "type": "step", "id": "s0", "kind": "start", "next": "a1" },
            {
                "type": "step", "id": "a1", "kind": "response",
                "contains": ["j1", "m1"],
                "state": { "displayName": "A", "responses": [ { "text": "Top" } ] }
            },
            {
                "type": "step", "id": "j1", "kind": "joint", "order": 1,
                "state": { "condition": { "conditionType": "go_to", "value": "Contact", "linkTarget": "B" } }
            },
            {
                "type": "step", "id": "m1", "kind": "mailSystem", "order": 2,
                "state": { "to": ["support@example.com"], "subject": "Hi" }
            },
            {
                "type": "step", "id": "b1", "kind": "response",
                "contains": ["jb"],
                "state": { "displayName": "B", "responses": [ { "text": "Contact page" } ] }
            },
            {
                "type": "step", "id": "jb", "kind": "joint",
                "state": { "condition": { "conditionType": "go_to", "value": "Main menu", "linkTarget": "A" } }
            }
        ]
    })
    .to_string();

    let runtime = runtime_for(&json);
    let (mut session, first) = runtime.open("e2e-b2");

    // Walk A -> B -> A so the stack holds more than one frame.
    let contact = option_labelled(&first, "Contact");
    let contact_turn = runtime
        .handle(&mut session, SessionEvent::Select { option: contact.id })
        .expect("selection failed");
    let menu = option_labelled(&contact_turn, "Main menu");
    runtime
        .handle(&mut session, SessionEvent::Select { option: menu.id })
        .expect("return selection failed");

    let mail_option = session
        .current_options()
        .iter()
        .find(|o| o.label == "Mail")
        .expect("no mail option on the root turn")
        .clone();
    let mail_turn = runtime
        .handle(
            &mut session,
            SessionEvent::Select {
                option: mail_option.id,
            },
        )
        .expect("mail selection failed");
    assert!(matches!(mail_turn.effect, Some(Effect::SendMail(_))));

    // Back replays the stored payload verbatim, with zero effects.
    let back_turn = runtime
        .handle(&mut session, SessionEvent::Back)
        .expect("back failed");
    assert!(back_turn.effect.is_none());
    assert_eq!(back_turn.messages, contact_turn.messages);
}

#[test]
fn test_e2e_operator_button_requests_handover() {
    let runtime = runtime_for(&handover_diagram());
    let (mut session, turn) = runtime.open("e2e-c");

    let operator = option_labelled(&turn, "Talk to an operator");
    assert_eq!(operator.kind, OptionKind::Handover);

    let handover_turn = runtime
        .handle(&mut session, SessionEvent::Select { option: operator.id })
        .expect("selection failed");

    assert_eq!(session.status, SessionStatus::Waiting);
    assert!(matches!(
        handover_turn.effect,
        Some(Effect::RequestHandover(_))
    ));
}

#[test]
fn test_artifact_roundtrip_preserves_accessors() {
    let (graph, _) = publish(&basic_diagram());
    let root_id = graph.root_id();
    let b_id = graph.node_by_name("B").expect("B missing").id;
    let child_ids: Vec<NodeId> = graph.children(root_id).iter().map(|n| n.id).collect();

    let dir = std::env::temp_dir().join("kaiwa-artifact-test");
    std::fs::create_dir_all(&dir).expect("tempdir");
    let path = dir.join("scenario.bin");
    let path = path.to_str().expect("utf8 path");

    ScenarioArtifact::new(graph).save(path).expect("save failed");
    let loaded = ScenarioArtifact::from_file(path).expect("load failed");

    assert_eq!(loaded.graph.root_id(), root_id);
    assert_eq!(loaded.graph.node_by_name("B").map(|n| n.id), Some(b_id));
    let loaded_children: Vec<NodeId> = loaded
        .graph
        .children(root_id)
        .iter()
        .map(|n| n.id)
        .collect();
    assert_eq!(loaded_children, child_ids);
}

#[test]
fn test_artifact_with_missing_root_is_rejected() {
    use bincode::serde::encode_to_vec;
    use serde::Serialize;
    use std::collections::HashMap;

    // Mirrors the persisted layout with an empty node map, so the root id
    // resolves to nothing once decoded.
    #[derive(Serialize)]
    struct BareGraph {
        root: u64,
        nodes: HashMap<u64, u8>,
        names: HashMap<String, u64>,
    }
    #[derive(Serialize)]
    struct BareArtifact {
        version: u32,
        graph: BareGraph,
    }

    let bytes = encode_to_vec(
        &BareArtifact {
            version: 1,
            graph: BareGraph {
                root: 1,
                nodes: HashMap::new(),
                names: HashMap::new(),
            },
        },
        bincode::config::standard(),
    )
    .expect("encode failed");

    let dir = std::env::temp_dir().join("kaiwa-artifact-test");
    std::fs::create_dir_all(&dir).expect("tempdir");
    let path = dir.join("missing-root.bin");
    std::fs::write(&path, bytes).expect("write failed");

    let result = ScenarioArtifact::from_file(path.to_str().expect("utf8 path"));
    assert!(result.is_err(), "artifact without its root node must not load");
}

#[test]
fn test_active_scenario_swaps_atomically() {
    let active = ActiveScenario::new();
    assert!(active.load().is_none());

    let (first, _) = publish(&basic_diagram());
    active.publish(first);
    let held = active.load().expect("no active graph");

    // A session keeps conversing on the graph it started with, even after
    // a new publish replaces the active pointer.
    let runtime = ConversationRuntime::new(held.clone());
    let (mut session, turn) = runtime.open("swap");

    let (second, _) = publish(&handover_diagram());
    let displaced = active.publish(second);
    assert!(displaced.is_some());

    let now_active = active.load().expect("no active graph");
    assert_eq!(now_active.root().trigger_text, "Menu");

    let choice = option_labelled(&turn, "More info");
    let next = runtime
        .handle(&mut session, SessionEvent::Select { option: choice.id })
        .expect("selection failed on displaced graph");
    assert_eq!(next.messages, vec!["Here is more info".to_string()]);
}
