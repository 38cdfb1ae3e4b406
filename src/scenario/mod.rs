//! The canonical node model and the published, immutable scenario graph.

pub mod active;
pub mod artifact;
pub mod graph;
pub mod node;

pub use active::*;
pub use artifact::*;
pub use graph::*;
pub use node::*;
