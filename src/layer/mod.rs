//! Layer composition.
//!
//! Every layer is composed exactly once, in command-line order, against the
//! shared global environment and its own fresh local environment. The stages
//! run in a fixed order:
//!
//! ```text
//! update_globals -> update_locals -> set_setters -> set_plotcmd -> detect_inline_data
//! ```
//!
//! Variants are a closed set; each stage dispatches on [`LayerKind`].

pub mod geom;
pub mod setting;
pub mod syntax;

use std::fmt;
use std::str::FromStr;

use tracing::{error, warn};

use crate::env::Environment;
use crate::error::PlotError;

/// File value meaning "data follows the plot statement inline".
pub const INLINE_SENTINEL: &str = "-";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayerKind {
    Global,
    Labs,
    Theme,
    Point,
    Line,
    Bar,
}

impl LayerKind {
    pub const ALL: [LayerKind; 6] = [
        LayerKind::Global,
        LayerKind::Labs,
        LayerKind::Theme,
        LayerKind::Point,
        LayerKind::Line,
        LayerKind::Bar,
    ];

    pub fn token(self) -> &'static str {
        match self {
            LayerKind::Global => "global",
            LayerKind::Labs => "labs",
            LayerKind::Theme => "theme",
            LayerKind::Point => "point",
            LayerKind::Line => "line",
            LayerKind::Bar => "bar",
        }
    }

    /// Geometry layers draw data and therefore resolve a data file.
    pub fn is_geom(self) -> bool {
        matches!(self, LayerKind::Point | LayerKind::Line | LayerKind::Bar)
    }

    /// Local keys this variant resolves during composition, with their layer defaults.
    pub fn local_defaults(self) -> &'static [(&'static str, &'static str)] {
        match self {
            LayerKind::Global | LayerKind::Labs | LayerKind::Theme => &[],
            LayerKind::Point => geom::POINT_DEFAULTS,
            LayerKind::Line => geom::LINE_DEFAULTS,
            LayerKind::Bar => geom::BAR_DEFAULTS,
        }
    }
}

impl fmt::Display for LayerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for LayerKind {
    type Err = PlotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LayerKind::ALL
            .into_iter()
            .find(|kind| kind.token() == s)
            .ok_or_else(|| PlotError::UnknownLayer(s.to_string()))
    }
}

/// A non-fatal problem found while composing a layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// A global key was written twice; the first value was kept.
    Conflict {
        key: String,
        kept: String,
        rejected: String,
    },
    /// The global layer asked for inline data, which only geometry layers support.
    InlineGlobalData,
    /// Neither the layer nor the global environment names a data file.
    MissingDataFile,
    InvalidLegendPosition(String),
    InvalidLegendDirection(String),
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::Conflict { key, kept, rejected } => write!(
                f,
                "key '{key}' already set to '{kept}', ignoring '{rejected}'"
            ),
            Diagnostic::InlineGlobalData => {
                write!(f, "the global layer cannot use inline data, ignoring")
            }
            Diagnostic::MissingDataFile => {
                write!(f, "no global data set, nothing to use as default")
            }
            Diagnostic::InvalidLegendPosition(pos) => {
                write!(f, "invalid legend position '{pos}', disabling legend")
            }
            Diagnostic::InvalidLegendDirection(dir) => {
                write!(f, "invalid legend direction '{dir}', using 'vertical'")
            }
        }
    }
}

/// Literal x/y tokens supplied on the command line for one clause.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InlineData {
    pub x: Vec<String>,
    pub y: Vec<String>,
}

impl InlineData {
    /// Row-wise pairs; the shorter sequence bounds the pairing.
    pub fn rows(&self) -> impl Iterator<Item = (&str, &str)> {
        self.x
            .iter()
            .zip(self.y.iter())
            .map(|(x, y)| (x.as_str(), y.as_str()))
    }

    /// The data block as sent to the engine, terminated by `e`.
    pub fn block(&self) -> String {
        let mut block = String::new();
        for (x, y) in self.rows() {
            block.push_str(x);
            block.push(' ');
            block.push_str(y);
            block.push('\n');
        }
        block.push_str("e\n");
        block
    }
}

/// A fully composed layer.
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    kind: LayerKind,
    local: Environment,
    set_command: String,
    plot_command: String,
    inline: Option<InlineData>,
    diagnostics: Vec<Diagnostic>,
}

impl Layer {
    pub fn kind(&self) -> LayerKind {
        self.kind
    }

    /// The resolved local environment.
    pub fn local(&self) -> &Environment {
        &self.local
    }

    /// Zero or more `set ...` lines, each newline-terminated.
    pub fn set_command(&self) -> &str {
        &self.set_command
    }

    /// This layer's clause of the plot statement, empty for setting layers.
    pub fn plot_command(&self) -> &str {
        &self.plot_command
    }

    pub fn inline_data(&self) -> Option<&InlineData> {
        self.inline.as_ref()
    }

    pub fn data_block(&self) -> String {
        self.inline.as_ref().map(InlineData::block).unwrap_or_default()
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }
}

/// Compose one layer. The global environment is only borrowed for the duration of the call.
pub fn compose(kind: LayerKind, global: &mut Environment, local: Environment) -> Layer {
    let mut cx = Composition {
        global,
        layer: Layer {
            kind,
            local,
            set_command: String::new(),
            plot_command: String::new(),
            inline: None,
            diagnostics: Vec::new(),
        },
    };
    cx.update_globals();
    cx.update_locals();
    cx.set_setters();
    cx.set_plotcmd();
    cx.detect_inline_data();
    cx.layer
}

/// A layer in the middle of composition.
pub struct Composition<'g> {
    global: &'g mut Environment,
    layer: Layer,
}

impl Composition<'_> {
    fn update_globals(&mut self) {
        match self.layer.kind {
            LayerKind::Global => setting::global_update_globals(self),
            LayerKind::Labs => setting::labs_update_globals(self),
            LayerKind::Theme => setting::theme_update_globals(self),
            LayerKind::Bar => geom::bar_update_globals(self),
            LayerKind::Point | LayerKind::Line => {}
        }
    }

    fn update_locals(&mut self) {
        let kind = self.layer.kind;
        if kind.is_geom() {
            self.resolve_data_file();
        }
        for (key, default) in kind.local_defaults() {
            self.fill_local(key, default);
        }
    }

    fn set_setters(&mut self) {
        match self.layer.kind {
            LayerKind::Global => setting::global_setters(self),
            LayerKind::Labs => setting::labs_setters(self),
            LayerKind::Theme => setting::theme_setters(self),
            LayerKind::Bar => geom::bar_setters(self),
            LayerKind::Point | LayerKind::Line => {}
        }
    }

    fn set_plotcmd(&mut self) {
        match self.layer.kind {
            LayerKind::Point => geom::point_plotcmd(self),
            LayerKind::Line => geom::line_plotcmd(self),
            LayerKind::Bar => geom::bar_plotcmd(self),
            LayerKind::Global | LayerKind::Labs | LayerKind::Theme => {}
        }
    }

    fn detect_inline_data(&mut self) {
        if !self.layer.kind.is_geom() || self.local().get("file") != INLINE_SENTINEL {
            return;
        }
        self.layer.inline = Some(InlineData {
            x: syntax::parse_data(self.local().get("x_data")),
            y: syntax::parse_data(self.local().get("y_data")),
        });
    }

    /// Own value, else the global value, else the layer default.
    fn fill_local(&mut self, key: &str, layer_default: &str) {
        let value = self.global.get_or(key, layer_default).to_string();
        self.layer.local.fill(key, value);
    }

    /// Push the local value (or the layer default) into the global environment, first writer wins.
    pub(crate) fn insert_global_from_local(&mut self, key: &str, layer_default: &str) {
        let value = self.layer.local.get_or(key, layer_default).to_string();
        self.insert_global(key, value);
    }

    /// Like [`Self::insert_global_from_local`], but an existing global value wins silently.
    pub(crate) fn fill_global_from_local(&mut self, key: &str, layer_default: &str) {
        let value = self.layer.local.get_or(key, layer_default).to_string();
        self.global.fill(key, value);
    }

    pub(crate) fn insert_global(&mut self, key: &str, value: String) {
        if self.global.contains(key) {
            self.layer.diagnostics.push(Diagnostic::Conflict {
                key: key.to_string(),
                kept: self.global.get(key).to_string(),
                rejected: value.clone(),
            });
        }
        self.global.insert(key, value);
    }

    fn resolve_data_file(&mut self) {
        let local_file = self.local().get("file").to_string();
        let resolved = if !local_file.is_empty() {
            local_file
        } else if !self.global().get("file").is_empty() {
            self.global().get("file").to_string()
        } else {
            self.report(Diagnostic::MissingDataFile);
            String::new()
        };
        self.layer.local.replace("file", resolved);
    }

    pub(crate) fn report(&mut self, diagnostic: Diagnostic) {
        match &diagnostic {
            Diagnostic::MissingDataFile | Diagnostic::InlineGlobalData => {
                error!(layer = %self.layer.kind, "{diagnostic}")
            }
            _ => warn!(layer = %self.layer.kind, "{diagnostic}"),
        }
        self.layer.diagnostics.push(diagnostic);
    }

    pub(crate) fn global(&self) -> &Environment {
        &*self.global
    }

    pub(crate) fn local(&self) -> &Environment {
        &self.layer.local
    }

    pub(crate) fn push_set(&mut self, line: &str) {
        self.layer.set_command.push_str(line);
        self.layer.set_command.push('\n');
    }

    pub(crate) fn set_plot(&mut self, clause: String) {
        self.layer.plot_command = clause;
    }
}
