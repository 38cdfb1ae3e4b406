use super::node::{
    CsvConfig, FormConfig, HandoverConfig, MailConfig, NodeKind, ResponseVariant,
};
use ahash::AHashMap;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A durable node identifier, assigned by the resolver.
///
/// This is a separate type from the diagram-local string ids on purpose:
/// the two addressing spaces must never be mixed, so an unresolved id can
/// never leak into the runtime.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct NodeId(pub u64);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A node action with every cross-reference resolved.
///
/// Identical to [`crate::scenario::NodeAction`] except that `Jump` carries
/// a durable id instead of an authored name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ResolvedAction {
    Jump(NodeId),
    Restart,
    Handover(HandoverConfig),
    Link(String),
    Form(FormConfig),
    Mail(MailConfig),
    Csv(CsvConfig),
}

/// A fully resolved node: durable identity, durable parentage, and an
/// action free of name-based references.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolvedNode {
    pub id: NodeId,
    pub parent: Option<NodeId>,
    /// 1 = top-level, 2 = contained in another node.
    pub depth: u8,
    pub diagram_id: String,
    pub kind: NodeKind,
    pub trigger_text: String,
    pub variants: Vec<ResponseVariant>,
    pub action: Option<ResolvedAction>,
    pub name: Option<String>,
    pub sibling_order: i64,
    pub position: usize,
    /// Durable successors, in the normalized precedence order.
    pub next: Vec<NodeId>,
    /// The original diagram-id targets, kept for diagnostics.
    pub outgoing_diagram_ids: Vec<String>,
}

impl ResolvedNode {
    pub fn message_texts(&self) -> Vec<String> {
        self.variants
            .iter()
            .filter(|v| !v.text.is_empty())
            .map(|v| v.text.clone())
            .collect()
    }
}

/// The published scenario: an immutable, durable-id-addressed node graph.
///
/// Built once per publish and shared read-only between any number of
/// concurrent sessions. No mutation API exists past construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioGraph {
    root: NodeId,
    nodes: AHashMap<NodeId, ResolvedNode>,
    names: AHashMap<String, NodeId>,
}

impl ScenarioGraph {
    pub(crate) fn new(
        root: NodeId,
        nodes: AHashMap<NodeId, ResolvedNode>,
        names: AHashMap<String, NodeId>,
    ) -> Self {
        Self { root, nodes, names }
    }

    pub fn root_id(&self) -> NodeId {
        self.root
    }

    pub fn root(&self) -> &ResolvedNode {
        // The resolver refuses to publish a graph whose root is absent.
        &self.nodes[&self.root]
    }

    pub fn get(&self, id: NodeId) -> Option<&ResolvedNode> {
        self.nodes.get(&id)
    }

    pub fn node_by_name(&self, name: &str) -> Option<&ResolvedNode> {
        self.names.get(name).and_then(|id| self.nodes.get(id))
    }

    /// The children of `id`, ordered by sibling order with ties broken by
    /// original array position.
    pub fn children(&self, id: NodeId) -> Vec<&ResolvedNode> {
        self.nodes
            .values()
            .filter(|n| n.parent == Some(id))
            .sorted_by_key(|n| (n.sibling_order, n.position))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ResolvedNode> {
        self.nodes.values()
    }
}
