use crate::scenario::NodeId;
use thiserror::Error;

/// Errors that abort a scenario publish. Nothing partially resolved is ever
/// visible to consumers when one of these is returned.
#[derive(Error, Debug, Clone)]
pub enum ImportError {
    #[error("Failed to parse diagram JSON: {0}")]
    JsonParse(String),

    #[error("Diagram document has no top-level 'elements' collection")]
    MissingElements,

    #[error("Element at index {index} is neither a step nor an edge (found tag '{found}')")]
    UnknownElement { index: usize, found: String },

    #[error("Step '{diagram_id}' declares an unknown kind '{kind}'")]
    UnknownKind { diagram_id: String, kind: String },

    #[error("Diagram has no start element")]
    MissingStart,

    #[error("Start element points at '{target}', which does not exist in the diagram")]
    MissingRootTarget { target: String },
}

/// Errors returned by the conversation runtime. The session is left
/// unchanged, so the caller may retry with a corrected event.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("Session '{session_id}' is closed and accepts no further events")]
    Closed { session_id: String },

    #[error("Option '{option}' is not part of the current turn of session '{session_id}'")]
    InvalidSelection { session_id: String, option: NodeId },

    #[error("Session '{session_id}' is not accepting structured events in status {status}")]
    NotAccepting { session_id: String, status: String },

    #[error("Session '{session_id}' has no earlier turn to go back to")]
    BackUnavailable { session_id: String },

    #[error("Node {id} is referenced by session '{session_id}' but missing from the graph")]
    NodeNotFound { session_id: String, id: NodeId },
}
