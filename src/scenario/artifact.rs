use super::graph::ScenarioGraph;
use bincode::config::standard;
use bincode::serde::{decode_from_slice, encode_to_vec};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{Read, Write};

const ARTIFACT_VERSION: u32 = 1;

/// A published graph in its persisted form.
///
/// Lets a deployment compile a scenario once and ship the resolved graph
/// to runtime hosts without re-running the import pipeline there.
#[derive(Serialize, Deserialize)]
pub struct ScenarioArtifact {
    pub version: u32,
    pub graph: ScenarioGraph,
}

/// Artifact persistence failures hide no detail worth a taxonomy; a plain
/// message is enough for operators.
#[derive(Debug, thiserror::Error)]
#[error("Scenario artifact error: {0}")]
pub struct ArtifactError(String);

impl ScenarioArtifact {
    pub fn new(graph: ScenarioGraph) -> Self {
        Self {
            version: ARTIFACT_VERSION,
            graph,
        }
    }

    /// Saves the artifact to a file in bincode format.
    pub fn save(&self, path: &str) -> Result<(), ArtifactError> {
        let bytes = encode_to_vec(self, standard())
            .map_err(|e| ArtifactError(format!("Serialization failed: {}", e)))?;
        let mut file = fs::File::create(path)
            .map_err(|e| ArtifactError(format!("Could not create file '{}': {}", path, e)))?;
        file.write_all(&bytes)
            .map_err(|e| ArtifactError(format!("Could not write to file '{}': {}", path, e)))?;
        Ok(())
    }

    /// Loads a previously saved artifact.
    pub fn from_file(path: &str) -> Result<Self, ArtifactError> {
        let mut file = fs::File::open(path)
            .map_err(|e| ArtifactError(format!("Could not open file '{}': {}", path, e)))?;
        let mut bytes = Vec::new();
        file.read_to_end(&mut bytes)
            .map_err(|e| ArtifactError(format!("Could not read file '{}': {}", path, e)))?;
        let (artifact, _): (Self, usize) = decode_from_slice(&bytes, standard())
            .map_err(|e| ArtifactError(format!("Deserialization failed: {}", e)))?;
        if artifact.version != ARTIFACT_VERSION {
            return Err(ArtifactError(format!(
                "Unsupported artifact version {} (expected {})",
                artifact.version, ARTIFACT_VERSION
            )));
        }
        // The resolver guarantees this for graphs it publishes; a
        // hand-edited or corrupt file gets rejected here instead of
        // panicking on first root access.
        let root = artifact.graph.root_id();
        if artifact.graph.get(root).is_none() {
            return Err(ArtifactError(format!(
                "Artifact root node {} is missing from the graph",
                root
            )));
        }
        Ok(artifact)
    }
}
