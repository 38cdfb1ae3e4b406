use super::event::{TurnOption, TurnResult};
use crate::scenario::NodeId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Who is driving the conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionStatus {
    /// The structured, menu-driven flow.
    Bot,
    /// A handover was requested; no operator has picked up yet.
    Waiting,
    /// An operator is engaged.
    Human,
    /// Terminal. No further events are accepted.
    Closed,
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Bot => "BOT",
            Self::Waiting => "WAITING",
            Self::Human => "HUMAN",
            Self::Closed => "CLOSED",
        };
        f.write_str(s)
    }
}

/// One remembered turn: the node the user stood on and the payload that
/// was shown there. Back replays this verbatim, effects excluded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryFrame {
    pub node: NodeId,
    pub messages: Vec<String>,
    pub options: Vec<TurnOption>,
}

impl HistoryFrame {
    pub(crate) fn payload(&self) -> TurnResult {
        TurnResult {
            messages: self.messages.clone(),
            options: self.options.clone(),
            effect: None,
        }
    }
}

/// Per-session conversation state.
///
/// A session is mutated exclusively through
/// [`ConversationRuntime`](crate::runtime::ConversationRuntime); the
/// `&mut` receiver there is what serializes turns for one session, while
/// different sessions share only the read-only graph.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub id: String,
    pub current: NodeId,
    pub status: SessionStatus,
    pub(crate) history: Vec<HistoryFrame>,
}

impl Session {
    pub(crate) fn new(id: String, root: NodeId) -> Self {
        Self {
            id,
            current: root,
            status: SessionStatus::Bot,
            history: Vec::new(),
        }
    }

    /// The options currently offered to the user, if any turn was shown.
    pub fn current_options(&self) -> &[TurnOption] {
        self.history.last().map(|f| f.options.as_slice()).unwrap_or(&[])
    }

    pub fn history_depth(&self) -> usize {
        self.history.len()
    }

    pub fn is_closed(&self) -> bool {
        self.status == SessionStatus::Closed
    }

    /// Pushes a frame unless the same node already sits on top. This is
    /// the loop guard: revisiting a diagram cycle never stacks duplicate
    /// consecutive frames, so history growth stays bounded per distinct
    /// transition.
    pub(crate) fn remember(&mut self, frame: HistoryFrame) {
        if self.history.last().map(|f| f.node) == Some(frame.node) {
            return;
        }
        self.history.push(frame);
    }
}
