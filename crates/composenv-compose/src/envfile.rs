//! `.env` file parsing and rendering.

use std::collections::BTreeMap;

use composenv_common::error::{ComposenvError, Result};
use composenv_common::types::Variable;

/// Parses `.env` text into a name-to-value map.
///
/// Blank lines, `#` comments, and lines without `=` are skipped. The first
/// `=` splits key from value, both are trimmed, and one pair of matching
/// single or double quotes around the value is removed. Later duplicates win.
#[must_use]
pub fn parse_env_file(content: &str) -> BTreeMap<String, String> {
    let mut result = BTreeMap::new();

    for line in content.split('\n') {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        let key = key.trim();
        if key.is_empty() {
            continue;
        }
        let _ = result.insert(key.to_string(), unquote(value.trim()).to_string());
    }

    tracing::debug!(entries = result.len(), "parsed .env content");
    result
}

/// Parses raw `.env` bytes as uploaded.
///
/// # Errors
///
/// Returns [`ComposenvError::EnvFile`] if the bytes are not UTF-8.
pub fn parse_env_bytes(bytes: &[u8]) -> Result<BTreeMap<String, String>> {
    let text = std::str::from_utf8(bytes).map_err(|e| ComposenvError::EnvFile {
        message: e.to_string(),
    })?;
    Ok(parse_env_file(text))
}

fn unquote(value: &str) -> &str {
    for quote in ['"', '\''] {
        if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
            return &value[1..value.len() - 1];
        }
    }
    value
}

/// Renders variables as `.env` text: one `NAME=value` line each, in order,
/// newline-joined without a trailing newline.
#[must_use]
pub fn render_env_file(variables: &[Variable]) -> String {
    variables
        .iter()
        .map(|v| format!("{}={}", v.name, v.value))
        .collect::<Vec<_>>()
        .join("\n")
}
