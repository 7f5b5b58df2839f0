//! Variable discovery.
//!
//! Three independent passes each yield `(name, default)` candidates:
//!
//! 1. [`structured_pass`]: service `environment` blocks of the decoded document.
//! 2. [`braced_pass`]: `${NAME}` / `${NAME:default}` references in the raw text.
//! 3. [`bare_pass`]: `$NAME` references in the raw text.
//!
//! [`extract`] merges them in that order into one first-writer-wins list:
//! a name recorded by an earlier pass (or earlier in the same pass) is never
//! overwritten.

use std::collections::HashSet;

use composenv_common::types::Variable;

use crate::classify::{classify, describe};
use crate::document::ComposeDocument;
use crate::placeholder::{Segment, references, tokenize};

/// A variable name and the default value it was first seen with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Discovered {
    /// Variable name.
    pub name: String,
    /// First-seen default, empty when none was given.
    pub default: String,
}

/// Ordered, deduplicated discovery list.
#[derive(Debug, Default)]
struct Discoveries {
    seen: HashSet<String>,
    entries: Vec<Discovered>,
}

impl Discoveries {
    fn record(&mut self, name: String, default: String) {
        if self.seen.insert(name.clone()) {
            tracing::debug!(name = %name, "discovered variable");
            self.entries.push(Discovered { name, default });
        }
    }

    fn merge(&mut self, candidates: impl IntoIterator<Item = (String, String)>) {
        for (name, default) in candidates {
            self.record(name, default);
        }
    }
}

/// Yields `environment` entries of every service, in document order.
pub fn structured_pass(doc: &ComposeDocument) -> impl Iterator<Item = (String, String)> + '_ {
    doc.services()
        .iter()
        .flat_map(|service| service.environment.iter().cloned())
}

/// Yields braced references, left to right and top to bottom.
pub fn braced_pass(text: &str) -> impl Iterator<Item = (String, String)> + '_ {
    tokenize(text).into_iter().filter_map(|seg| match seg {
        Segment::Braced { name, default, .. } => {
            Some((name.to_string(), default.unwrap_or_default().to_string()))
        }
        _ => None,
    })
}

/// Yields bare references with an empty default.
///
/// Every `$` is tried, including those inside a braced default.
pub fn bare_pass(text: &str) -> impl Iterator<Item = (String, String)> + '_ {
    references(text).filter_map(|(_, seg)| match seg {
        Segment::Bare { name, .. } => Some((name.to_string(), String::new())),
        _ => None,
    })
}

/// Discovers variables in compose text.
///
/// When `doc` is `None` (the text failed to decode) only the textual passes run.
#[must_use]
pub fn extract(text: &str, doc: Option<&ComposeDocument>) -> Vec<Discovered> {
    tracing::info!(structured = doc.is_some(), "extracting variables");
    let mut found = Discoveries::default();
    if let Some(doc) = doc {
        found.merge(structured_pass(doc));
    }
    found.merge(braced_pass(text));
    found.merge(bare_pass(text));
    found.entries
}

/// Turns discoveries into unmodified [`Variable`]s holding their defaults.
#[must_use]
pub fn into_variables(discovered: Vec<Discovered>) -> Vec<Variable> {
    discovered
        .into_iter()
        .map(|d| Variable {
            category: classify(&d.name),
            description: describe(&d.name).unwrap_or_default().to_string(),
            name: d.name,
            value: d.default,
            modified: false,
        })
        .collect()
}
