use super::graph::ScenarioGraph;
use arc_swap::ArcSwapOption;
use std::sync::Arc;

/// Holder of the currently active scenario graph.
///
/// Publishing swaps the pointer in one atomic step, so a consumer either
/// sees the previous graph or the new one, never a partial pipeline
/// result. Sessions that loaded the old graph keep their `Arc` and finish
/// on it undisturbed.
#[derive(Debug, Default)]
pub struct ActiveScenario {
    current: ArcSwapOption<ScenarioGraph>,
}

impl ActiveScenario {
    pub fn new() -> Self {
        Self::default()
    }

    /// Atomically replaces the active graph, returning the one it displaced.
    pub fn publish(&self, graph: ScenarioGraph) -> Option<Arc<ScenarioGraph>> {
        self.current.swap(Some(Arc::new(graph)))
    }

    /// The active graph, if any scenario has been published yet.
    pub fn load(&self) -> Option<Arc<ScenarioGraph>> {
        self.current.load_full()
    }
}
