use serde::Deserialize;

/// The raw export produced by the visual scenario-design tool.
///
/// The document is a single flat collection of tagged elements. Step and
/// edge elements may appear in any order and may reference each other
/// forwards or backwards; no ordering guarantee is assumed here.
#[derive(Debug, Deserialize)]
pub struct DiagramDocument {
    pub elements: Vec<serde_json::Value>,
}

/// One dialogue or system step as exported by the tool.
///
/// `state` is a free-form payload whose fields depend on `kind`; it is
/// interpreted by the normalizer, never here.
#[derive(Debug, Clone, Deserialize)]
pub struct RawStepElement {
    pub id: String,
    pub kind: String,
    #[serde(default)]
    pub state: Option<serde_json::Value>,
    #[serde(default)]
    pub contains: Vec<String>,
    #[serde(default, alias = "nextId")]
    pub next: Option<String>,
    #[serde(default)]
    pub order: i64,
}

/// A directed connection between two step elements.
#[derive(Debug, Clone, Deserialize)]
pub struct RawEdge {
    pub source: EdgeEndpoint,
    pub target: EdgeEndpoint,
}

/// One end of an edge. The port is kept for diagnostics only.
#[derive(Debug, Clone, Deserialize)]
pub struct EdgeEndpoint {
    pub id: String,
    #[serde(default)]
    pub port: Option<String>,
}

/// Per-kind state payloads. Every field is optional: the authoring tool
/// omits anything the author never touched, so decoding must not fail on
/// sparse exports.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResponseState {
    #[serde(default, alias = "displayName")]
    pub display_name: Option<String>,
    #[serde(default, alias = "memorySlot")]
    pub memory_slot: Option<String>,
    #[serde(default, alias = "memorySlots")]
    pub memory_slots: Vec<String>,
    #[serde(default)]
    pub responses: Vec<ResponseVariantState>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResponseVariantState {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default, alias = "variantKind")]
    pub kind: Option<String>,
    #[serde(default)]
    pub replies: Vec<ReplyState>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReplyState {
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default)]
    pub kind: Option<String>,
    #[serde(default, alias = "linkTarget")]
    pub link_target: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct JointState {
    #[serde(default)]
    pub condition: Option<ConditionState>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConditionState {
    #[serde(default, alias = "conditionType")]
    pub kind: Option<String>,
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default, alias = "linkTarget")]
    pub link_target: Option<String>,
    #[serde(default)]
    pub fallback: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct HandoverState {
    #[serde(default, alias = "inboundId")]
    pub inbound: Option<String>,
    #[serde(default, alias = "outboundId")]
    pub outbound: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MailState {
    #[serde(default)]
    pub to: Vec<String>,
    #[serde(default)]
    pub cc: Vec<String>,
    #[serde(default)]
    pub bcc: Vec<String>,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default, alias = "continuationId")]
    pub continuation: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CsvState {
    #[serde(default, alias = "fileName")]
    pub file_name: Option<String>,
    #[serde(default)]
    pub items: Vec<String>,
    #[serde(default, alias = "continuationId")]
    pub continuation: Option<String>,
}
