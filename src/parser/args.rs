// getopt-style layer arguments
//
// A layer starts at a layer flag (`--point FILE`, `--labs`, ...) and collects
// every following option until the next layer flag. Some options mean
// different things depending on the layer they appear in.

use tracing::warn;

use super::ast::LayerSpec;
use super::lexer::{classify, Token};
use crate::env::Environment;
use crate::error::{PlotError, PlotResult};
use crate::layer::LayerKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Opt {
    Layer(LayerKind),
    X,
    Y,
    Color,
    Shape,
    Size,
    Linetype,
    /// `--linewidth` and `--width`: line width for lines, box width for bars
    Width,
    Fillstyle,
    Label,
    Title,
    LegendPosition,
    LegendDirection,
}

impl Opt {
    fn from_long(name: &str) -> Option<Opt> {
        let opt = match name {
            "global" => Opt::Layer(LayerKind::Global),
            "point" => Opt::Layer(LayerKind::Point),
            "line" => Opt::Layer(LayerKind::Line),
            "bar" => Opt::Layer(LayerKind::Bar),
            "labs" => Opt::Layer(LayerKind::Labs),
            "theme" => Opt::Layer(LayerKind::Theme),
            "color" | "fill" => Opt::Color,
            "shape" => Opt::Shape,
            "size" => Opt::Size,
            "linetype" => Opt::Linetype,
            "linewidth" | "width" => Opt::Width,
            "fillstyle" => Opt::Fillstyle,
            "label" => Opt::Label,
            "title" => Opt::Title,
            "legend_position" => Opt::LegendPosition,
            "legend_direction" => Opt::LegendDirection,
            _ => return None,
        };
        Some(opt)
    }

    fn from_short(flag: char) -> Option<Opt> {
        let opt = match flag {
            'G' => Opt::Layer(LayerKind::Global),
            'P' => Opt::Layer(LayerKind::Point),
            'L' => Opt::Layer(LayerKind::Line),
            'B' => Opt::Layer(LayerKind::Bar),
            'x' => Opt::X,
            'y' => Opt::Y,
            'c' => Opt::Color,
            's' => Opt::Shape,
            _ => return None,
        };
        Some(opt)
    }

    fn takes_value(self) -> bool {
        match self {
            Opt::Layer(kind) => kind.is_geom() || kind == LayerKind::Global,
            _ => true,
        }
    }

    /// The local key this option sets inside a layer of `kind`, if any.
    fn key(self, kind: LayerKind) -> Option<&'static str> {
        let key = match (self, kind) {
            (Opt::Layer(_), _) => return None,
            (Opt::X, LayerKind::Labs) => "xlab",
            (Opt::Y, LayerKind::Labs) => "ylab",
            (Opt::X, _) => "x_data",
            (Opt::Y, _) => "y_data",
            (Opt::Width, LayerKind::Line) => "linewidth",
            (Opt::Width, LayerKind::Bar) => "width",
            (Opt::Width, _) => return None,
            (Opt::Color, _) => "color",
            (Opt::Shape, _) => "shape",
            (Opt::Size, _) => "size",
            (Opt::Linetype, _) => "linetype",
            (Opt::Fillstyle, _) => "fillstyle",
            (Opt::Label, _) => "label",
            (Opt::Title, _) => "title",
            (Opt::LegendPosition, _) => "legend_position",
            (Opt::LegendDirection, _) => "legend_direction",
        };
        Some(key)
    }
}

/// Split raw layer arguments into ordered layer specifications.
pub fn parse_layer_args<S: AsRef<str>>(args: &[S]) -> PlotResult<Vec<LayerSpec>> {
    let mut specs = Vec::new();
    let mut current: Option<(LayerKind, Environment)> = None;
    let mut args = args.iter().map(AsRef::<str>::as_ref);

    while let Some(arg) = args.next() {
        let (opt, attached) = match classify(arg) {
            Token::Long { name, value } => (
                Opt::from_long(name)
                    .ok_or_else(|| PlotError::usage(format!("unknown option '--{name}'")))?,
                value,
            ),
            Token::Short { flag, value } => (
                Opt::from_short(flag)
                    .ok_or_else(|| PlotError::usage(format!("unknown option '-{flag}'")))?,
                value,
            ),
            Token::Value(value) => {
                return Err(PlotError::usage(format!("unexpected argument '{value}'")))
            }
        };

        let value = if opt.takes_value() {
            match attached {
                Some(value) => Some(value),
                None => Some(args.next().ok_or_else(|| {
                    PlotError::usage(format!("option '{arg}' requires a value"))
                })?),
            }
        } else if attached.is_some() {
            return Err(PlotError::usage(format!("option '{arg}' does not take a value")));
        } else {
            None
        };

        if let Opt::Layer(kind) = opt {
            let started = specs.len() + usize::from(current.is_some());
            if kind == LayerKind::Global && started > 0 {
                return Err(PlotError::GlobalNotFirst);
            }
            if let Some((kind, values)) = current.take() {
                specs.push(LayerSpec::new(kind.token(), values));
            }
            let mut values = Environment::new();
            if let Some(file) = value {
                values.insert("file", file);
            }
            current = Some((kind, values));
            continue;
        }

        let Some((kind, values)) = current.as_mut() else {
            return Err(PlotError::usage(format!(
                "option '{arg}' given before any layer"
            )));
        };
        match opt.key(*kind) {
            Some(key) => {
                values.insert(key, value.unwrap_or_default());
            }
            None => warn!(
                option = %arg,
                layer = %kind,
                "option has no meaning for this layer, ignoring"
            ),
        }
    }

    if let Some((kind, values)) = current {
        specs.push(LayerSpec::new(kind.token(), values));
    }
    if specs.is_empty() {
        return Err(PlotError::usage("no layers given"));
    }
    Ok(specs)
}
