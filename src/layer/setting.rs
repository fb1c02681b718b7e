// Setting layers: global (base), labs and theme.
//
// These layers only contribute to the global environment and emit `set`
// directives; they never produce a plot clause.

use super::syntax::quote_text;
use super::{Composition, Diagnostic, INLINE_SENTINEL};

const GLOBAL_DEFAULTS: &[(&str, &str)] = &[
    ("file_delim", " "),
    ("x_data", "1"),
    ("y_data", "1"),
    ("color", "black"),
    ("shape", "1"),
];

const LABS_DEFAULTS: &[(&str, &str)] = &[("title", ""), ("xlab", "x"), ("ylab", "y")];

const THEME_DEFAULTS: &[(&str, &str)] = &[
    ("legend_position", "right"),
    ("legend_direction", "vertical"),
];

pub(crate) fn global_update_globals(cx: &mut Composition<'_>) {
    let file = cx.local().get("file").to_string();
    if file == INLINE_SENTINEL {
        cx.report(Diagnostic::InlineGlobalData);
        cx.insert_global("file", String::new());
    } else {
        cx.insert_global("file", file);
    }
    for (key, default) in GLOBAL_DEFAULTS {
        cx.insert_global_from_local(key, default);
    }
}

pub(crate) fn global_setters(cx: &mut Composition<'_>) {
    let line = format!(
        "set datafile separator {}",
        quote_text(cx.global().get("file_delim"))
    );
    cx.push_set(&line);
}

pub(crate) fn labs_update_globals(cx: &mut Composition<'_>) {
    for (key, default) in LABS_DEFAULTS {
        cx.insert_global_from_local(key, default);
    }
}

pub(crate) fn labs_setters(cx: &mut Composition<'_>) {
    let lines = [
        format!("set title {}", quote_text(cx.global().get("title"))),
        format!("set xlabel {}", quote_text(cx.global().get("xlab"))),
        format!("set ylabel {}", quote_text(cx.global().get("ylab"))),
    ];
    for line in &lines {
        cx.push_set(line);
    }
}

pub(crate) fn theme_update_globals(cx: &mut Composition<'_>) {
    for (key, default) in THEME_DEFAULTS {
        cx.insert_global_from_local(key, default);
    }
}

pub(crate) fn theme_setters(cx: &mut Composition<'_>) {
    let position = cx.global().get("legend_position").to_string();
    let key = match position.as_str() {
        "none" => "off".to_string(),
        "right" | "left" => {
            format!("outside {position} center {}", legend_direction(cx))
        }
        "top" | "bottom" => {
            format!("outside center {position} {}", legend_direction(cx))
        }
        _ => {
            cx.report(Diagnostic::InvalidLegendPosition(position.clone()));
            "off".to_string()
        }
    };
    cx.push_set(&format!("set key {key}"));
}

fn legend_direction(cx: &mut Composition<'_>) -> &'static str {
    match cx.global().get("legend_direction") {
        "vertical" => "vertical",
        "horizontal" => "horizontal",
        other => {
            let other = other.to_string();
            cx.report(Diagnostic::InvalidLegendDirection(other));
            "vertical"
        }
    }
}
