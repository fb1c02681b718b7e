//! Script assembly.
//!
//! Merges composed layers into the text sent to gnuplot:
//!
//! ```text
//! set ...            every layer's set lines, in order
//! plot a, b, c       one clause per drawing layer, in order
//! 1 1                inline data for each inline clause, in the same order
//! e
//! ```

use std::fmt;
use std::io::{self, Write};

use tracing::warn;

use crate::layer::Layer;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Script {
    /// Newline-terminated `set` directives.
    pub set_lines: String,
    /// `plot ...` without a trailing newline, absent when no layer draws anything.
    pub plot_line: Option<String>,
    /// Inline data blocks, each terminated by `e`.
    pub data_lines: String,
}

/// Merge composed layers in order.
pub fn assemble(layers: &[Layer]) -> Script {
    let mut set_lines = String::new();
    let mut clauses = Vec::new();
    let mut data_lines = String::new();

    for layer in layers {
        set_lines.push_str(layer.set_command());
        if !layer.plot_command().is_empty() {
            clauses.push(layer.plot_command());
        }
        data_lines.push_str(&layer.data_block());
    }

    let plot_line = if clauses.is_empty() {
        warn!("no layer draws anything, skipping plot statement");
        None
    } else {
        Some(format!("plot {}", clauses.join(", ")))
    };

    Script {
        set_lines,
        plot_line,
        data_lines,
    }
}

impl Script {
    /// Write set lines, the plot line and data, flushing after each part.
    pub fn write_to<W: Write>(&self, out: &mut W) -> io::Result<()> {
        out.write_all(self.set_lines.as_bytes())?;
        out.flush()?;
        if let Some(plot) = &self.plot_line {
            writeln!(out, "{plot}")?;
            out.flush()?;
        }
        if !self.data_lines.is_empty() {
            out.write_all(self.data_lines.as_bytes())?;
            out.flush()?;
        }
        Ok(())
    }
}

impl fmt::Display for Script {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.set_lines)?;
        if let Some(plot) = &self.plot_line {
            writeln!(f, "{plot}")?;
        }
        f.write_str(&self.data_lines)
    }
}
