//! Prelude module for convenient imports
//!
//! Re-exports the most commonly used types from the kaiwa crate so a
//! caller can pull in the whole publish-and-converse surface at once.
//!
//! # Example
//!
//! ```rust,no_run
//! use kaiwa::prelude::*;
//!
//! # fn run_example() -> Result<()> {
//! let diagram_json = std::fs::read_to_string("path/to/diagram.json")?;
//!
//! let (graph, report) = ScenarioCompiler::from_json(&diagram_json)?.compile()?;
//! for warning in &report.warnings {
//!     eprintln!("warning: {:?}", warning);
//! }
//!
//! let runtime = ConversationRuntime::new(std::sync::Arc::new(graph));
//! let (_session, first_turn) = runtime.open("session-1");
//! println!("{:?}", first_turn.messages);
//! # Ok(())
//! # }
//! ```

// Publish pipeline
pub use crate::compiler::{ResolveReport, ResolveWarning, ScenarioCompiler};
pub use crate::diagram::DiagramDocument;

// Published graph and canonical model
pub use crate::scenario::{
    ActiveScenario, CanonicalNode, CsvConfig, FormConfig, HandoverConfig, MailConfig, NodeAction,
    NodeId, NodeKind, ReplyOption, ResolvedAction, ResolvedNode, ResponseVariant, ScenarioArtifact,
    ScenarioGraph, VariantKind,
};

// Conversation runtime
pub use crate::runtime::{
    ConversationRuntime, Effect, HistoryFrame, MatchVerdict, OptionKind, Session, SessionEvent,
    SessionStatus, TextMatcher, TurnOption, TurnResult,
};

// Error types
pub use crate::error::{ImportError, SessionError};

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
