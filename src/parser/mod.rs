// Layer argument parsing

pub mod args;
pub mod ast;
pub mod lexer;

// Public API re-exports
pub use args::parse_layer_args;
pub use ast::LayerSpec;

pub const USAGE: &str = "\
Usage: gnuggplot [OPTIONS] -- <LAYER> [LAYER OPTIONS]... [<LAYER> [LAYER OPTIONS]...]...

Layers:
  -G, --global <FILE>      shared data file and aesthetics (must come first)
  -P, --point <FILE>       points; FILE is a path, '' for the global file, or '-' for inline data
  -L, --line <FILE>        lines
  -B, --bar <FILE>         boxes
      --labs               title and axis labels
      --theme              legend placement

Layer options:
  -x <SPEC>  -y <SPEC>     column index, expression '(...)', or inline list '1,2,3'
                           (axis label text inside --labs)
  -c, --color, --fill      colour
  -s, --shape              point type
      --size               point size
      --linetype           line type
      --linewidth, --width line width (--line) or box width (--bar)
      --fillstyle          box fill style
      --label              legend entry
      --title              plot title (--labs)
      --legend_position    right | left | top | bottom | none (--theme)
      --legend_direction   vertical | horizontal (--theme)

Examples:
  gnuggplot -- --global data.csv -x 1 -y 2 --line '' --color red --point '' --size 2
  gnuggplot -- --point - -x 1,2,3 -y 1,4,9 --labs --title Squares";
