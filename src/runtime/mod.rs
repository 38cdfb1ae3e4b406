//! The per-session conversation state machine.
//!
//! A [`ConversationRuntime`] wraps one published [`ScenarioGraph`] and
//! computes turn payloads for incoming session events. It performs no
//! I/O: every side effect a node requests comes back as an
//! [`Effect`](dispatch::Effect) value for the caller to carry out.

use crate::compiler::normalize::GENERIC_CHOICE_LABEL;
use crate::error::SessionError;
use crate::scenario::{NodeId, ResolvedAction, ResolvedNode, ScenarioGraph};
use ahash::AHashSet;
use std::sync::Arc;
use tracing::debug;

pub mod dispatch;
pub mod event;
pub mod matcher;
pub mod session;

pub use dispatch::{Effect, dispatch};
pub use event::{OptionKind, SessionEvent, TurnOption, TurnResult};
pub use matcher::{MatchVerdict, NoopMatcher, TextMatcher};
pub use session::{HistoryFrame, Session, SessionStatus};

/// Walks a published scenario graph turn-by-turn.
///
/// The runtime is stateless apart from the graph it wraps; all mutable
/// conversation state lives in the [`Session`] the caller owns. Taking
/// the session by `&mut` is what serializes turns per session, while any
/// number of sessions may run in parallel against the same graph.
pub struct ConversationRuntime {
    graph: Arc<ScenarioGraph>,
    matcher: Box<dyn TextMatcher>,
}

impl ConversationRuntime {
    pub fn new(graph: Arc<ScenarioGraph>) -> Self {
        Self {
            graph,
            matcher: Box::new(NoopMatcher),
        }
    }

    /// Replaces the free-text matcher seam.
    #[must_use]
    pub fn with_matcher(mut self, matcher: Box<dyn TextMatcher>) -> Self {
        self.matcher = matcher;
        self
    }

    pub fn graph(&self) -> &Arc<ScenarioGraph> {
        &self.graph
    }

    /// Creates a session at the scenario root and returns the first turn.
    pub fn open(&self, session_id: impl Into<String>) -> (Session, TurnResult) {
        let mut session = Session::new(session_id.into(), self.graph.root_id());
        let payload = self.arrive(&mut session, self.graph.root());
        debug!(session = %session.id, root = %session.current, "session opened");
        (session, payload)
    }

    /// Processes one event for the session, returning the turn payload.
    ///
    /// On error the session is left exactly as it was, so the caller may
    /// retry with a corrected event.
    pub fn handle(
        &self,
        session: &mut Session,
        event: SessionEvent,
    ) -> Result<TurnResult, SessionError> {
        if session.is_closed() {
            return Err(SessionError::Closed {
                session_id: session.id.clone(),
            });
        }

        match event {
            SessionEvent::Select { option } => self.select(session, option),
            SessionEvent::Text { content } => self.free_text(session, &content),
            SessionEvent::Back => self.back(session),
            SessionEvent::Restart => Ok(self.restart(session)),
            SessionEvent::Close => {
                session.status = SessionStatus::Closed;
                debug!(session = %session.id, "session closed");
                Ok(TurnResult::default())
            }
        }
    }

    fn select(&self, session: &mut Session, option: NodeId) -> Result<TurnResult, SessionError> {
        if session.status != SessionStatus::Bot {
            return Err(SessionError::NotAccepting {
                session_id: session.id.clone(),
                status: session.status.to_string(),
            });
        }
        if !session.current_options().iter().any(|o| o.id == option) {
            return Err(SessionError::InvalidSelection {
                session_id: session.id.clone(),
                option,
            });
        }

        // Follow jump chains to the destination. The visited set stops a
        // jump cycle at the last node not seen yet.
        let mut node = self.node(session, option)?;
        let mut visited: AHashSet<NodeId> = AHashSet::new();
        visited.insert(node.id);
        while let Some(ResolvedAction::Jump(target)) = &node.action {
            if !visited.insert(*target) {
                break;
            }
            node = self.node(session, *target)?;
        }

        if matches!(node.action, Some(ResolvedAction::Restart)) {
            return Ok(self.restart(session));
        }

        debug!(session = %session.id, from = %session.current, to = %node.id, "selection");
        Ok(self.arrive(session, node))
    }

    fn free_text(&self, session: &mut Session, content: &str) -> Result<TurnResult, SessionError> {
        if session.status != SessionStatus::Bot {
            return Err(SessionError::NotAccepting {
                session_id: session.id.clone(),
                status: session.status.to_string(),
            });
        }

        // The runtime never interprets text itself; the external matcher
        // decides. Either way the session stays on its current node.
        match self
            .matcher
            .match_text(&self.graph, session.current, content)
        {
            MatchVerdict::Reply(reply) => Ok(TurnResult {
                messages: vec![reply],
                options: session.current_options().to_vec(),
                effect: None,
            }),
            MatchVerdict::NoMatch => Ok(session
                .history
                .last()
                .map(|f| f.payload())
                .unwrap_or_default()),
        }
    }

    fn back(&self, session: &mut Session) -> Result<TurnResult, SessionError> {
        if session.status != SessionStatus::Bot {
            return Err(SessionError::NotAccepting {
                session_id: session.id.clone(),
                status: session.status.to_string(),
            });
        }
        if session.history_depth() < 2 {
            return Err(SessionError::BackUnavailable {
                session_id: session.id.clone(),
            });
        }

        session.history.pop();
        // Depth was checked above, so a frame remains. The stored payload
        // is replayed verbatim and no effect is re-emitted.
        let Some(frame) = session.history.last() else {
            return Err(SessionError::BackUnavailable {
                session_id: session.id.clone(),
            });
        };
        session.current = frame.node;
        debug!(session = %session.id, to = %frame.node, "back navigation");
        Ok(frame.payload())
    }

    /// Clears the history back to the root. The result is identical to
    /// the very first turn of the session, from any depth.
    fn restart(&self, session: &mut Session) -> TurnResult {
        session.history.clear();
        session.status = SessionStatus::Bot;
        debug!(session = %session.id, "restart");
        self.arrive(session, self.graph.root())
    }

    /// Lands the session on `node`: builds the payload, dispatches the
    /// node's action, and records the turn in history when the node
    /// offers choices.
    fn arrive(&self, session: &mut Session, node: &ResolvedNode) -> TurnResult {
        let messages = node.message_texts();
        let options = self.present_options(node);
        let effect = node.action.as_ref().and_then(dispatch);

        if matches!(effect, Some(Effect::RequestHandover(_))) {
            session.status = SessionStatus::Waiting;
        }

        if !options.is_empty() {
            session.remember(HistoryFrame {
                node: node.id,
                messages: messages.clone(),
                options: options.clone(),
            });
        }
        session.current = node.id;

        TurnResult {
            messages,
            options,
            effect,
        }
    }

    /// The ordered presentable choices of a node: its children, with
    /// resolved jump labels substituted for raw target names.
    fn present_options(&self, node: &ResolvedNode) -> Vec<TurnOption> {
        self.graph
            .children(node.id)
            .into_iter()
            .map(|child| self.option_for(child))
            .collect()
    }

    fn option_for(&self, child: &ResolvedNode) -> TurnOption {
        let mut label = child.trigger_text.clone();
        let kind = match &child.action {
            Some(ResolvedAction::Jump(target)) => {
                if let Some(target) = self.graph.get(*target) {
                    // The author often labels a jump with the bare target
                    // name; show the target's own label instead.
                    let is_raw_name = target.name.as_deref() == Some(label.as_str());
                    if is_raw_name || label == GENERIC_CHOICE_LABEL {
                        label = target.trigger_text.clone();
                    }
                }
                OptionKind::Jump
            }
            Some(ResolvedAction::Link(_)) => OptionKind::Link,
            Some(ResolvedAction::Handover(_)) => OptionKind::Handover,
            Some(ResolvedAction::Restart) => OptionKind::Restart,
            _ => OptionKind::Choice,
        };
        TurnOption {
            id: child.id,
            label,
            kind,
        }
    }

    fn node<'a>(
        &'a self,
        session: &Session,
        id: NodeId,
    ) -> Result<&'a ResolvedNode, SessionError> {
        self.graph.get(id).ok_or(SessionError::NodeNotFound {
            session_id: session.id.clone(),
            id,
        })
    }
}
