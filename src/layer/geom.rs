// Geometry layers: point, line and bar.

use super::syntax::{quote_text, quote_value, title_clause, using_clause};
use super::Composition;

pub(crate) const POINT_DEFAULTS: &[(&str, &str)] = &[
    ("x_data", "1"),
    ("y_data", "1"),
    ("color", "black"),
    ("shape", "8"),
    ("size", "1"),
    ("label", ""),
];

pub(crate) const LINE_DEFAULTS: &[(&str, &str)] = &[
    ("x_data", "1"),
    ("y_data", "1"),
    ("color", "black"),
    ("linetype", "1"),
    ("linewidth", "1"),
    ("label", ""),
];

pub(crate) const BAR_DEFAULTS: &[(&str, &str)] = &[
    ("x_data", "1"),
    ("y_data", "1"),
    ("color", "black"),
    ("shape", "1"),
    ("fillstyle", "solid"),
    ("label", ""),
];

const BAR_GLOBAL_DEFAULTS: &[(&str, &str)] = &[("width", "0.8"), ("fillstyle", "solid")];

/// Build `'<file>' [using x:y] with <style> <options...> <title>`.
fn clause(cx: &Composition<'_>, style: &str, options: &[String]) -> String {
    let local = cx.local();
    let mut parts = vec![quote_text(local.get("file"))];
    parts.extend(using_clause(local));
    parts.push(format!("with {style}"));
    parts.extend(options.iter().cloned());
    parts.push(format!("linecolor rgb {}", quote_text(local.get("color"))));
    parts.push(title_clause(local.get("label")));
    parts.join(" ")
}

pub(crate) fn point_plotcmd(cx: &mut Composition<'_>) {
    let local = cx.local();
    let options = [
        format!("pointtype {}", local.get("shape")),
        format!("pointsize {}", local.get("size")),
    ];
    let plot = clause(cx, "points", &options);
    cx.set_plot(plot);
}

pub(crate) fn line_plotcmd(cx: &mut Composition<'_>) {
    let local = cx.local();
    let options = [
        format!("linetype {}", quote_value(local.get("linetype"))),
        format!("linewidth {}", local.get("linewidth")),
    ];
    let plot = clause(cx, "lines", &options);
    cx.set_plot(plot);
}

/// Box width and fill style are shared by all bars; the first bar layer to set them wins.
pub(crate) fn bar_update_globals(cx: &mut Composition<'_>) {
    for (key, default) in BAR_GLOBAL_DEFAULTS {
        cx.fill_global_from_local(key, default);
    }
}

pub(crate) fn bar_setters(cx: &mut Composition<'_>) {
    let lines = [
        format!("set style fill {}", cx.global().get("fillstyle")),
        format!("set boxwidth {} relative", cx.global().get("width")),
    ];
    for line in &lines {
        cx.push_set(line);
    }
}

pub(crate) fn bar_plotcmd(cx: &mut Composition<'_>) {
    let options = [format!("fillstyle {}", cx.local().get("fillstyle"))];
    let plot = clause(cx, "boxes", &options);
    cx.set_plot(plot);
}
