// Library exports for gnuggplot

pub mod dispatch;
pub mod engine;
pub mod env;
pub mod error;
pub mod layer;
pub mod parser;
pub mod script;

pub use dispatch::LayerStack;
pub use env::Environment;
pub use error::{PlotError, PlotResult};
pub use script::{assemble, Script};

use std::path::Path;

use serde::Deserialize;

/// How the plotting engine is launched and driven.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EngineOptions {
    #[serde(default = "default_program")]
    pub program: String,
    #[serde(default)]
    pub args: Vec<String>,
    /// Keep plot windows open after the engine exits.
    #[serde(default)]
    pub persist: bool,
    /// Hold the session open until the operator presses Enter.
    #[serde(default = "default_true")]
    pub wait: bool,
    /// Echo the script to stdout before sending it.
    #[serde(default = "default_true")]
    pub echo: bool,
}

fn default_program() -> String { "gnuplot".to_string() }
fn default_true() -> bool { true }

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            program: default_program(),
            args: Vec::new(),
            persist: false,
            wait: true,
            echo: true,
        }
    }
}

impl EngineOptions {
    pub fn from_json(input: &str) -> PlotResult<Self> {
        serde_json::from_str(input)
            .map_err(|e| PlotError::config(format!("invalid engine options: {e}")))
    }

    pub fn from_path(path: &Path) -> PlotResult<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| PlotError::config(format!("cannot read '{}': {e}", path.display())))?;
        Self::from_json(&text)
    }
}
