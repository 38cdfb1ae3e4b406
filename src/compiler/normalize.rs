use super::text::strip_markup;
use crate::diagram::{
    ConditionState, CsvState, HandoverState, JointState, MailState, RawEdge, RawStepElement,
    ResponseState,
};
use crate::error::ImportError;
use crate::scenario::{
    CanonicalNode, CsvConfig, FormConfig, HandoverConfig, MailConfig, NodeAction, NodeKind,
    ReplyOption, ResponseVariant, VariantKind,
};
use ahash::AHashMap;
use itertools::Itertools;

/// Fallback trigger labels, used when a step declares no usable text.
pub const GENERIC_RESPONSE_LABEL: &str = "Response";
pub const GENERIC_CHOICE_LABEL: &str = "Choice";

/// The `go_to` sentinel meaning "the scenario root", and the authored
/// labels treated the same way.
const START_SENTINEL: &str = "start";
const RETURN_TO_START_PHRASES: &[&str] = &["start over", "back to start", "return to start"];

/// Keywords in a button value that request a human operator.
const OPERATOR_KEYWORDS: &[&str] = &["operator", "agent", "human"];

/// The diagram after normalization: canonical nodes plus the consumed
/// start pointer. Still addressed by diagram-local ids.
#[derive(Debug)]
pub struct NormalizedDiagram {
    pub nodes: Vec<CanonicalNode>,
    pub root_target: Option<String>,
}

/// Converts every step element into a canonical node.
///
/// One exhaustive mapping per declared kind lives here; nothing downstream
/// ever inspects the free-form state payload again.
pub fn normalize(
    steps: Vec<RawStepElement>,
    edges: &[RawEdge],
) -> Result<NormalizedDiagram, ImportError> {
    let mut edge_targets: AHashMap<&str, Vec<&str>> = AHashMap::new();
    for edge in edges {
        edge_targets
            .entry(edge.source.id.as_str())
            .or_default()
            .push(edge.target.id.as_str());
    }

    // Containment is declared on the parent; invert it so each node knows
    // its container. First declaration wins.
    let mut container_of: AHashMap<&str, &str> = AHashMap::new();
    for step in &steps {
        for child in &step.contains {
            container_of.entry(child.as_str()).or_insert(&step.id);
        }
    }

    let mut nodes = Vec::with_capacity(steps.len());
    let mut root_target: Option<String> = None;

    for (position, step) in steps.iter().enumerate() {
        let kind = NodeKind::parse(&step.kind).ok_or_else(|| ImportError::UnknownKind {
            diagram_id: step.id.clone(),
            kind: step.kind.clone(),
        })?;

        let outgoing = outgoing_ids(step, &edge_targets);

        if kind == NodeKind::Start {
            // The start element is consumed, not stored: only its
            // continuation pointer matters. First one wins.
            if root_target.is_none() {
                root_target = outgoing.first().cloned();
            }
            continue;
        }

        let mut node = CanonicalNode {
            diagram_id: step.id.clone(),
            kind,
            trigger_text: String::new(),
            variants: Vec::new(),
            action: None,
            name: None,
            memory_slot: None,
            sibling_order: step.order,
            position,
            contained_ids: step.contains.clone(),
            outgoing_ids: outgoing,
            container_id: container_of.get(step.id.as_str()).map(|c| c.to_string()),
        };

        match kind {
            NodeKind::Start => unreachable!("start elements are consumed above"),
            NodeKind::Response => normalize_response(step, &mut node)?,
            NodeKind::Joint => normalize_joint(step, &mut node)?,
            NodeKind::HandoverSystem => {
                let state: HandoverState = decode_state(step)?;
                node.trigger_text = "Handover".to_string();
                node.action = Some(NodeAction::Handover(HandoverConfig {
                    inbound: state.inbound,
                    outbound: state.outbound,
                }));
            }
            NodeKind::MailSystem => {
                let state: MailState = decode_state(step)?;
                node.trigger_text = "Mail".to_string();
                node.action = Some(NodeAction::Mail(MailConfig {
                    to: state.to,
                    cc: state.cc,
                    bcc: state.bcc,
                    subject: state.subject,
                    body: state.body,
                    continuation: state.continuation,
                }));
            }
            NodeKind::CsvSystem => {
                let state: CsvState = decode_state(step)?;
                node.trigger_text = "CSV export".to_string();
                node.action = Some(NodeAction::Csv(CsvConfig {
                    file_name: state.file_name,
                    items: state.items,
                    continuation: state.continuation,
                }));
            }
        }

        nodes.push(node);
    }

    Ok(NormalizedDiagram { nodes, root_target })
}

fn normalize_response(step: &RawStepElement, node: &mut CanonicalNode) -> Result<(), ImportError> {
    let state: ResponseState = decode_state(step)?;

    node.trigger_text = state
        .display_name
        .clone()
        .or_else(|| state.memory_slot.clone())
        .unwrap_or_else(|| GENERIC_RESPONSE_LABEL.to_string());
    node.name = state.display_name;
    node.memory_slot = state.memory_slot;

    let mut has_form_variant = false;
    for variant in state.responses {
        let kind = match variant.kind.as_deref() {
            Some("form") => {
                has_form_variant = true;
                VariantKind::Form
            }
            _ => VariantKind::Text,
        };
        node.variants.push(ResponseVariant {
            text: strip_markup(variant.text.as_deref().unwrap_or_default()),
            kind,
            replies: variant
                .replies
                .into_iter()
                .map(|r| ReplyOption {
                    label: r.label.unwrap_or_default(),
                    value: r.value.unwrap_or_default(),
                    kind: r.kind.unwrap_or_default(),
                    link_target: r.link_target,
                })
                .collect(),
        });
    }

    if has_form_variant {
        node.action = Some(NodeAction::Form(FormConfig {
            fields: state.memory_slots,
            submit: false,
        }));
    }
    Ok(())
}

fn normalize_joint(step: &RawStepElement, node: &mut CanonicalNode) -> Result<(), ImportError> {
    let state: JointState = decode_state(step)?;
    let condition = state.condition.unwrap_or_default();

    node.trigger_text = condition
        .value
        .clone()
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| GENERIC_CHOICE_LABEL.to_string());
    node.action = joint_action(&condition);
    Ok(())
}

/// Maps a joint's condition onto its action. `None` means the joint is a
/// plain menu choice with no side behavior.
fn joint_action(condition: &ConditionState) -> Option<NodeAction> {
    match condition.kind.as_deref() {
        Some("go_to") => {
            let target = condition.link_target.as_deref();
            if target == Some(START_SENTINEL) || is_return_to_start(condition.value.as_deref()) {
                Some(NodeAction::Restart)
            } else {
                target.map(|t| NodeAction::Jump(t.to_string()))
            }
        }
        Some("button") => {
            let value = condition.value.as_deref().unwrap_or_default().to_lowercase();
            OPERATOR_KEYWORDS
                .iter()
                .any(|k| value.contains(k))
                .then(|| NodeAction::Handover(HandoverConfig::default()))
        }
        Some("link") => condition
            .link_target
            .clone()
            .or_else(|| condition.fallback.clone())
            .map(NodeAction::Link),
        Some("submit_form") => Some(NodeAction::Form(FormConfig {
            fields: Vec::new(),
            submit: true,
        })),
        _ => None,
    }
}

fn is_return_to_start(value: Option<&str>) -> bool {
    let Some(value) = value else {
        return false;
    };
    let label = value.trim().to_lowercase();
    RETURN_TO_START_PHRASES.contains(&label.as_str())
}

/// The normalized outgoing targets: the explicit `next` pointer first,
/// then edge targets, de-duplicated while keeping that precedence order.
fn outgoing_ids(step: &RawStepElement, edge_targets: &AHashMap<&str, Vec<&str>>) -> Vec<String> {
    step.next
        .iter()
        .map(String::as_str)
        .chain(
            edge_targets
                .get(step.id.as_str())
                .into_iter()
                .flatten()
                .copied(),
        )
        .unique()
        .map(str::to_string)
        .collect()
}

fn decode_state<T: serde::de::DeserializeOwned + Default>(
    step: &RawStepElement,
) -> Result<T, ImportError> {
    match &step.state {
        Some(state) => serde_json::from_value(state.clone()).map_err(|e| ImportError::JsonParse(
            format!("Step '{}' has a malformed state payload: {}", step.id, e),
        )),
        None => Ok(T::default()),
    }
}
