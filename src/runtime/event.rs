use crate::runtime::dispatch::Effect;
use crate::scenario::NodeId;
use serde::{Deserialize, Serialize};

/// One incoming client event for a session.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    /// The user picked one of the options offered on the current turn.
    Select { option: NodeId },
    /// Free text while the bot is driving; forwarded to the matcher.
    Text { content: String },
    /// Navigate to the previous turn.
    Back,
    /// Return to the scenario root and forget the history.
    Restart,
    /// Terminate the session.
    Close,
}

/// One choice presented to the user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TurnOption {
    pub id: NodeId,
    pub label: String,
    pub kind: OptionKind,
}

/// How an option behaves when chosen, surfaced so clients can render
/// links and handover buttons differently from plain menu entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OptionKind {
    Choice,
    Jump,
    Link,
    Handover,
    Restart,
}

/// The payload produced for one processed event.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TurnResult {
    pub messages: Vec<String>,
    pub options: Vec<TurnOption>,
    pub effect: Option<Effect>,
}
