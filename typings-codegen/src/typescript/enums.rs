//! Enum literal synthesis.

use super::primitives::TS_STRING;

/// Renders allowed values as a union of literal types.
///
/// Values are quoted when the member's base type renders to `string` and
/// emitted bare otherwise.
#[must_use]
pub fn literal_union(options: &[String], base_type: &str) -> String {
    let quote = base_type == TS_STRING;
    options
        .iter()
        .map(|option| {
            if quote {
                quote_literal(option)
            } else {
                option.clone()
            }
        })
        .collect::<Vec<_>>()
        .join(" | ")
}

/// Wraps a value in single quotes, escaping backslashes and quotes.
fn quote_literal(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('\'');
    for c in value.chars() {
        if c == '\'' || c == '\\' {
            quoted.push('\\');
        }
        quoted.push(c);
    }
    quoted.push('\'');
    quoted
}
