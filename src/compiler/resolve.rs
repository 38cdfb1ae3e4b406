use super::normalize::NormalizedDiagram;
use crate::error::ImportError;
use crate::scenario::{
    NodeAction, NodeId, NodeKind, ResolvedAction, ResolvedNode, ScenarioGraph,
};
use ahash::AHashMap;
use tracing::{debug, warn};

/// A non-fatal finding recorded while resolving cross-references.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolveWarning {
    /// A `Jump` named a target that no node declares. The action was
    /// dropped; the node behaves as a terminal response.
    UnresolvedJump { diagram_id: String, target: String },
}

/// The warnings accumulated by a successful resolution.
#[derive(Debug, Default)]
pub struct ResolveReport {
    pub warnings: Vec<ResolveWarning>,
}

/// Resolves a normalized diagram into a published graph.
///
/// Resolution runs in ordered phases over an arena of all nodes, so
/// forward and cyclic name references never require a target to exist
/// before it is referenced:
///
/// 1. response nodes get durable ids and populate the name index;
/// 2. joint nodes get durable ids, parented when their container is
///    already resolved;
/// 3. system nodes get durable ids, always top-level;
/// 4. `Jump` targets are rewritten from names to durable ids;
/// 5. the root's contained children are re-parented under the root.
///
/// Durable ids are handed out sequentially in phase-then-position order,
/// which makes resolution deterministic and idempotent.
pub fn resolve(diagram: NormalizedDiagram) -> Result<(ScenarioGraph, ResolveReport), ImportError> {
    let root_target = diagram.root_target.ok_or(ImportError::MissingStart)?;

    let mut report = ResolveReport::default();
    let mut resolved: Vec<ResolvedNode> = Vec::with_capacity(diagram.nodes.len());
    let mut durable_of: AHashMap<String, NodeId> = AHashMap::new();
    let mut name_index: AHashMap<String, NodeId> = AHashMap::new();
    // Jumps still carry names after phases 1-3; phase 4 rewrites them.
    let mut pending_jumps: Vec<(usize, String)> = Vec::new();
    let mut next_id: u64 = 1;

    const PHASES: [&[NodeKind]; 3] = [
        &[NodeKind::Response],
        &[NodeKind::Joint],
        &[
            NodeKind::HandoverSystem,
            NodeKind::MailSystem,
            NodeKind::CsvSystem,
        ],
    ];

    for (phase, kinds) in PHASES.iter().enumerate() {
        for node in diagram.nodes.iter().filter(|n| kinds.contains(&n.kind)) {
            let id = NodeId(next_id);
            next_id += 1;
            durable_of.insert(node.diagram_id.clone(), id);

            let (parent, depth) = match node.kind {
                NodeKind::Joint => match node
                    .container_id
                    .as_deref()
                    .and_then(|c| durable_of.get(c))
                {
                    Some(container) => (Some(*container), 2),
                    None => (None, 1),
                },
                // Responses and system nodes start top-level; the root
                // re-parenting pass claims the ones the root contains.
                _ => (None, 1),
            };

            if node.kind == NodeKind::Response {
                if let Some(name) = &node.name {
                    // Collisions are last-write-wins, matching the source
                    // tool's observed behavior.
                    name_index.insert(name.clone(), id);
                }
                if let Some(slot) = &node.memory_slot {
                    name_index.insert(slot.clone(), id);
                }
            }

            let action = match node.action.clone() {
                Some(NodeAction::Jump(target)) => {
                    pending_jumps.push((resolved.len(), target));
                    None
                }
                other => other.map(lift_action),
            };

            resolved.push(ResolvedNode {
                id,
                parent,
                depth,
                diagram_id: node.diagram_id.clone(),
                kind: node.kind,
                trigger_text: node.trigger_text.clone(),
                variants: node.variants.clone(),
                action,
                name: node.name.clone(),
                sibling_order: node.sibling_order,
                position: node.position,
                next: Vec::new(),
                outgoing_diagram_ids: node.outgoing_ids.clone(),
            });
        }
        debug!(phase = phase + 1, resolved = resolved.len(), "resolution phase complete");
    }

    // Phase 4: rewrite jump targets through the name index.
    for (index, target) in pending_jumps {
        match name_index.get(&target) {
            Some(id) => resolved[index].action = Some(ResolvedAction::Jump(*id)),
            None => {
                warn!(
                    diagram_id = %resolved[index].diagram_id,
                    target = %target,
                    "dropping jump to unresolved name"
                );
                report.warnings.push(ResolveWarning::UnresolvedJump {
                    diagram_id: resolved[index].diagram_id.clone(),
                    target,
                });
            }
        }
    }

    // Map the diagram-id flow targets onto durable successors. Targets
    // that never became nodes (the start element, foreign ids) are simply
    // absent from the durable list; the diagram ids stay for diagnostics.
    for node in &mut resolved {
        node.next = node
            .outgoing_diagram_ids
            .iter()
            .filter_map(|d| durable_of.get(d))
            .copied()
            .collect();
    }

    let root_id = *durable_of
        .get(&root_target)
        .ok_or(ImportError::MissingRootTarget {
            target: root_target.clone(),
        })?;

    // Phase 5: containment under the root could not be expressed before
    // the root existed as a durable record; repair it now.
    let root_children: Vec<String> = diagram
        .nodes
        .iter()
        .find(|n| n.diagram_id == root_target)
        .map(|n| n.contained_ids.clone())
        .unwrap_or_default();
    for child in root_children {
        if let Some(child_id) = durable_of.get(&child).copied() {
            if child_id == root_id {
                continue;
            }
            if let Some(node) = resolved.iter_mut().find(|n| n.id == child_id) {
                node.parent = Some(root_id);
                node.depth = 2;
            }
        }
    }

    let nodes: AHashMap<NodeId, ResolvedNode> =
        resolved.into_iter().map(|n| (n.id, n)).collect();
    debug!(nodes = nodes.len(), warnings = report.warnings.len(), root = %root_id, "scenario resolved");

    Ok((ScenarioGraph::new(root_id, nodes, name_index), report))
}

/// Carries every action except `Jump` across the id boundary unchanged.
fn lift_action(action: NodeAction) -> ResolvedAction {
    match action {
        NodeAction::Jump(_) => unreachable!("jumps are rewritten in phase 4"),
        NodeAction::Restart => ResolvedAction::Restart,
        NodeAction::Handover(config) => ResolvedAction::Handover(config),
        NodeAction::Link(url) => ResolvedAction::Link(url),
        NodeAction::Form(config) => ResolvedAction::Form(config),
        NodeAction::Mail(config) => ResolvedAction::Mail(config),
        NodeAction::Csv(config) => ResolvedAction::Csv(config),
    }
}
