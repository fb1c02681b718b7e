use tracing::debug;

use crate::env::Environment;
use crate::error::{PlotError, PlotResult};
use crate::layer::{compose, Diagnostic, Layer, LayerKind};
use crate::parser::LayerSpec;

/// The ordered sequence of composed layers and the global environment they share.
#[derive(Debug, Clone, Default)]
pub struct LayerStack {
    global: Environment,
    layers: Vec<Layer>,
}

impl LayerStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compose every spec in order.
    pub fn from_specs<I>(specs: I) -> PlotResult<Self>
    where
        I: IntoIterator<Item = LayerSpec>,
    {
        let mut stack = Self::new();
        for spec in specs {
            stack.add_layer(&spec.kind, spec.values)?;
        }
        Ok(stack)
    }

    /// Look up `token`, compose the layer against `local` and append it.
    pub fn add_layer(&mut self, token: &str, local: Environment) -> PlotResult<&Layer> {
        let kind: LayerKind = token.parse()?;
        self.add(kind, local)
    }

    pub fn add(&mut self, kind: LayerKind, local: Environment) -> PlotResult<&Layer> {
        if kind == LayerKind::Global && !self.layers.is_empty() {
            return Err(PlotError::GlobalNotFirst);
        }
        debug!(layer = %kind, position = self.layers.len(), "adding layer");
        let position = self.layers.len();
        self.layers.push(compose(kind, &mut self.global, local));
        Ok(&self.layers[position])
    }

    pub fn global(&self) -> &Environment {
        &self.global
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// All diagnostics in composition order.
    pub fn diagnostics(&self) -> impl Iterator<Item = &Diagnostic> {
        self.layers.iter().flat_map(|layer| layer.diagnostics())
    }
}
