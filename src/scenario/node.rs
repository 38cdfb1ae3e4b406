use serde::{Deserialize, Serialize};

/// The closed set of step kinds the engine understands.
///
/// `Start` is consumed during normalization (only its continuation pointer
/// matters) and never appears in a published graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeKind {
    Start,
    Response,
    Joint,
    HandoverSystem,
    MailSystem,
    CsvSystem,
}

impl NodeKind {
    /// Maps the export's declared kind string onto the closed enum.
    pub fn parse(kind: &str) -> Option<Self> {
        match kind {
            "start" => Some(Self::Start),
            "response" => Some(Self::Response),
            "joint" => Some(Self::Joint),
            "handoverSystem" => Some(Self::HandoverSystem),
            "mailSystem" => Some(Self::MailSystem),
            "csvSystem" => Some(Self::CsvSystem),
            _ => None,
        }
    }
}

/// One bot utterance variant together with the replies it presents.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResponseVariant {
    pub text: String,
    pub kind: VariantKind,
    pub replies: Vec<ReplyOption>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum VariantKind {
    #[default]
    Text,
    Form,
}

/// A reply choice attached to a response variant, normalized from the
/// tool's heterogeneous reply shapes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReplyOption {
    pub label: String,
    pub value: String,
    pub kind: String,
    pub link_target: Option<String>,
}

/// The action a node declares, before cross-reference resolution.
///
/// `Jump` still carries the authored target *name* here; the resolver
/// rewrites it to a durable id or drops it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum NodeAction {
    Jump(String),
    Restart,
    Handover(HandoverConfig),
    Link(String),
    Form(FormConfig),
    Mail(MailConfig),
    Csv(CsvConfig),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HandoverConfig {
    pub inbound: Option<String>,
    pub outbound: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FormConfig {
    pub fields: Vec<String>,
    pub submit: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MailConfig {
    pub to: Vec<String>,
    pub cc: Vec<String>,
    pub bcc: Vec<String>,
    pub subject: Option<String>,
    pub body: Option<String>,
    pub continuation: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CsvConfig {
    pub file_name: Option<String>,
    pub items: Vec<String>,
    pub continuation: Option<String>,
}

/// A step element normalized into the canonical node model.
///
/// Everything here is still addressed by diagram-local ids; the resolver
/// assigns durable ids and rewrites name-based references.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CanonicalNode {
    pub diagram_id: String,
    pub kind: NodeKind,
    pub trigger_text: String,
    pub variants: Vec<ResponseVariant>,
    pub action: Option<NodeAction>,
    pub name: Option<String>,
    pub memory_slot: Option<String>,
    pub sibling_order: i64,
    /// Index in the original element array; breaks sibling-order ties.
    pub position: usize,
    pub contained_ids: Vec<String>,
    /// Outgoing diagram-id targets: the explicit `next` pointer first, then
    /// edge targets. Both signals are retained for diagnostics.
    pub outgoing_ids: Vec<String>,
    pub container_id: Option<String>,
}
