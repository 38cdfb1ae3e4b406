//! The scenario publish pipeline: parse, normalize, resolve.
//!
//! A publish is a one-shot run of [`ScenarioCompiler`]. Any
//! [`ImportError`] aborts the whole run; consumers only ever observe a
//! fully resolved [`ScenarioGraph`].

use crate::diagram::DiagramDocument;
use crate::error::ImportError;
use crate::scenario::ScenarioGraph;
use tracing::debug;

pub mod normalize;
pub mod resolve;
pub mod text;

pub use normalize::{NormalizedDiagram, normalize};
pub use resolve::{ResolveReport, ResolveWarning, resolve};

/// Compiles one diagram export into a published scenario graph.
pub struct ScenarioCompiler {
    document: DiagramDocument,
}

impl ScenarioCompiler {
    pub fn new(document: DiagramDocument) -> Self {
        Self { document }
    }

    /// Convenience constructor straight from the export's JSON text.
    pub fn from_json(json: &str) -> Result<Self, ImportError> {
        Ok(Self::new(DiagramDocument::from_json(json)?))
    }

    /// Runs the full pipeline.
    ///
    /// The returned graph is immutable and safe to share across sessions;
    /// the report carries the non-fatal findings (dropped jumps).
    pub fn compile(self) -> Result<(ScenarioGraph, ResolveReport), ImportError> {
        let (steps, edges) = self.document.split()?;
        debug!(steps = steps.len(), edges = edges.len(), "diagram split");
        let normalized = normalize(steps, &edges)?;
        resolve(normalized)
    }
}
