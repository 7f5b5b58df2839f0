//! Textual substitution of variable references.
//!
//! The document is never re-serialized: only reference spans change, so
//! comments, key order, and formatting survive byte for byte.

use composenv_common::types::Variable;

use crate::placeholder::references;

/// Replaces every reference to `name` (braced with any default, or bare) with `value`.
///
/// References nested in another reference's default are replaced too.
#[must_use]
pub fn replace_references(text: &str, name: &str, value: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut copied = 0;
    for (at, seg) in references(text) {
        // Inside a span that was already replaced.
        if at < copied || seg.name() != Some(name) {
            continue;
        }
        out.push_str(&text[copied..at]);
        out.push_str(value);
        copied = at + seg.raw().len();
    }
    out.push_str(&text[copied..]);
    out
}

/// Substitutes `(name, value)` pairs in order.
///
/// Each pair is applied to the output of the previous one, so a value that
/// itself contains a reference can be resolved by a later pair. Pairs with
/// an empty value are skipped and their references left in place.
#[must_use]
pub fn substitute_pairs<'a>(
    text: &str,
    pairs: impl IntoIterator<Item = (&'a str, &'a str)>,
) -> String {
    let mut current = text.to_string();
    for (name, value) in pairs {
        if value.is_empty() {
            continue;
        }
        current = replace_references(&current, name, value);
    }
    current
}

/// Substitutes the current value of each variable into the text.
#[must_use]
pub fn substitute(text: &str, variables: &[Variable]) -> String {
    tracing::debug!(variables = variables.len(), "substituting variables");
    substitute_pairs(
        text,
        variables
            .iter()
            .map(|v| (v.name.as_str(), v.value.as_str())),
    )
}
