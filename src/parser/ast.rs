// Layer specifications handed from the argument parser to the dispatcher

use serde::Deserialize;

use crate::env::Environment;
use crate::error::{PlotError, PlotResult};

/// One layer as given by the user: a kind token plus its local overrides.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LayerSpec {
    pub kind: String,
    #[serde(default)]
    pub values: Environment,
}

impl LayerSpec {
    pub fn new(kind: impl Into<String>, values: Environment) -> Self {
        Self {
            kind: kind.into(),
            values,
        }
    }

    /// Parse a JSON array of `{"kind": ..., "values": {...}}` objects.
    pub fn list_from_json(input: &str) -> PlotResult<Vec<LayerSpec>> {
        let specs: Vec<LayerSpec> = serde_json::from_str(input)
            .map_err(|e| PlotError::config(format!("invalid layer list: {e}")))?;
        if specs.is_empty() {
            return Err(PlotError::usage("layer list is empty"));
        }
        Ok(specs)
    }
}
