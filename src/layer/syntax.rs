// Rendering helpers for gnuplot command fragments

use std::borrow::Cow;

use crate::env::Environment;
use crate::layer::INLINE_SENTINEL;
use crate::parser::lexer::data_list;

/// Wrap text in single quotes, doubling any embedded quote.
pub fn quote_text(text: &str) -> String {
    format!("'{}'", text.replace('\'', "''"))
}

/// Render a column spec or style value.
///
/// Digits-only values are column indices or numbers and stay bare; values
/// starting with `(` are gnuplot expressions and pass through; everything else
/// is quoted.
pub fn quote_value(value: &str) -> Cow<'_, str> {
    if value.starts_with('(') || value.chars().all(|c| c.is_ascii_digit()) {
        Cow::Borrowed(value)
    } else {
        Cow::Owned(quote_text(value))
    }
}

pub fn title_clause(label: &str) -> String {
    if label.is_empty() {
        "notitle".to_string()
    } else {
        format!("title {}", quote_text(label))
    }
}

/// `using x:y` for file-backed clauses; inline clauses carry no column spec.
pub fn using_clause(local: &Environment) -> Option<String> {
    if local.get("file") == INLINE_SENTINEL {
        return None;
    }
    Some(format!(
        "using {}:{}",
        quote_value(local.get("x_data")),
        quote_value(local.get("y_data"))
    ))
}

/// Split a comma-separated literal list into raw tokens.
pub fn parse_data(input: &str) -> Vec<String> {
    data_list(input).into_iter().map(String::from).collect()
}
