use super::types::{DiagramDocument, RawEdge, RawStepElement};
use crate::error::ImportError;

/// The element-level discriminator tags used by the export format.
const STEP_TAG: &str = "step";
const EDGE_TAG: &str = "edge";

impl DiagramDocument {
    /// Parses a raw export document from its JSON text.
    pub fn from_json(json: &str) -> Result<Self, ImportError> {
        let value: serde_json::Value =
            serde_json::from_str(json).map_err(|e| ImportError::JsonParse(e.to_string()))?;
        if value.get("elements").is_none_or(|e| !e.is_array()) {
            return Err(ImportError::MissingElements);
        }
        serde_json::from_value(value).map_err(|e| ImportError::JsonParse(e.to_string()))
    }

    /// Splits the flat element collection into step elements and edges.
    ///
    /// Any element carrying neither discriminator tag fails the whole
    /// import; the tool never emits such elements, so their presence means
    /// a corrupted or foreign document.
    pub fn split(self) -> Result<(Vec<RawStepElement>, Vec<RawEdge>), ImportError> {
        let mut steps = Vec::new();
        let mut edges = Vec::new();

        for (index, element) in self.elements.into_iter().enumerate() {
            let tag = element
                .get("type")
                .and_then(|t| t.as_str())
                .unwrap_or_default()
                .to_string();
            match tag.as_str() {
                STEP_TAG => {
                    let step: RawStepElement = serde_json::from_value(element)
                        .map_err(|e| ImportError::JsonParse(e.to_string()))?;
                    steps.push(step);
                }
                EDGE_TAG => {
                    let edge: RawEdge = serde_json::from_value(element)
                        .map_err(|e| ImportError::JsonParse(e.to_string()))?;
                    edges.push(edge);
                }
                _ => {
                    return Err(ImportError::UnknownElement { index, found: tag });
                }
            }
        }

        Ok((steps, edges))
    }
}
