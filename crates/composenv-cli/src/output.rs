//! Formatted output helpers for CLI commands.
//!
//! Renders variables grouped by category, lint findings, and suggestions
//! as plain text.

use std::collections::BTreeMap;
use std::fmt::Write;

use composenv_common::types::{Category, LintReport, Variable};
use composenv_compose::classify::suggested_values;

const CATEGORY_ORDER: [Category; 5] = [
    Category::Database,
    Category::Paths,
    Category::Ports,
    Category::Security,
    Category::Other,
];

/// Formats variables grouped by category, with validation failures inline.
#[must_use]
pub fn format_variables(variables: &[Variable], errors: &BTreeMap<String, String>) -> String {
    let mut out = String::new();
    for category in CATEGORY_ORDER {
        let group: Vec<&Variable> = variables.iter().filter(|v| v.category == category).collect();
        if group.is_empty() {
            continue;
        }
        let _ = writeln!(out, "[{category}]");
        for var in group {
            let marker = if var.modified { "*" } else { " " };
            let value = if var.value.is_empty() { "<empty>" } else { var.value.as_str() };
            let _ = writeln!(out, " {marker} {}={value}", var.name);
            if !var.description.is_empty() {
                let _ = writeln!(out, "      {}", var.description);
            }
            let hints = suggested_values(&var.name);
            if !hints.is_empty() {
                let _ = writeln!(out, "      e.g. {}", hints.join(", "));
            }
            if let Some(error) = errors.get(&var.name) {
                let _ = writeln!(out, "      ! {error}");
            }
        }
    }
    if out.is_empty() {
        out.push_str("no variables found\n");
    }
    out
}

/// Formats lint errors and warnings, errors first.
#[must_use]
pub fn format_lint(report: &LintReport) -> String {
    let mut out = String::new();
    for error in &report.errors {
        let _ = writeln!(out, "error: {error}");
    }
    for warning in &report.warnings {
        let _ = writeln!(out, "warning: {warning}");
    }
    let status = if report.is_valid { "valid" } else { "invalid" };
    let _ = writeln!(
        out,
        "{status} ({} error(s), {} warning(s))",
        report.errors.len(),
        report.warnings.len()
    );
    out
}

/// Formats suggestions as a bulleted list.
#[must_use]
pub fn format_suggestions(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        return "no suggestions\n".into();
    }
    suggestions.iter().fold(String::new(), |mut out, s| {
        let _ = writeln!(out, "- {s}");
        out
    })
}
