use crate::scenario::{NodeId, ScenarioGraph};

/// The verdict of the external free-text matching capability.
#[derive(Debug, Clone, PartialEq)]
pub enum MatchVerdict {
    /// An out-of-band answer to send; the session stays on its node.
    Reply(String),
    /// Nothing matched; the current turn is re-presented.
    NoMatch,
}

/// The seam to the external free-text scorer.
///
/// The runtime never interprets free text itself; it forwards the raw
/// text here and acts on the verdict. Recording learning samples is the
/// collaborator's business, not the runtime's.
pub trait TextMatcher: Send + Sync {
    fn match_text(&self, graph: &ScenarioGraph, current: NodeId, text: &str) -> MatchVerdict;
}

/// Default matcher: never matches anything.
#[derive(Debug, Default)]
pub struct NoopMatcher;

impl TextMatcher for NoopMatcher {
    fn match_text(&self, _graph: &ScenarioGraph, _current: NodeId, _text: &str) -> MatchVerdict {
        MatchVerdict::NoMatch
    }
}
