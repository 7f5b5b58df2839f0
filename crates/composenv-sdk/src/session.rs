//! Analysis sessions.
//!
//! A [`Session`] is computed once from compose text and never mutated.
//! Edits, resets, and `.env` imports each return a new session derived
//! from the previous one, so a UI shell can keep history or compare
//! snapshots without defensive copies.

use std::collections::BTreeMap;

use composenv_common::config::ComposenvConfig;
use composenv_common::error::{ComposenvError, Result};
use composenv_common::types::{
    Category, ConfigurationId, LintReport, SavedConfiguration, Template, Variable,
};
use composenv_compose::advisor::suggest_document;
use composenv_compose::document::{ComposeDocument, decode};
use composenv_compose::envfile::{parse_env_bytes, parse_env_file, render_env_file};
use composenv_compose::extract::{extract, into_variables};
use composenv_compose::graph::DependencyGraph;
use composenv_compose::lint::{EMPTY_DOCUMENT, lint_document};
use composenv_compose::substitute;
use composenv_compose::validate::RuleTable;
use serde::Serialize;

use crate::secret::generate_password;

/// Runs analyses with a fixed configuration.
#[derive(Debug, Clone, Default)]
pub struct Analyzer {
    config: ComposenvConfig,
}

impl Analyzer {
    /// Creates an analyzer with the given configuration.
    #[must_use]
    pub const fn new(config: ComposenvConfig) -> Self {
        Self { config }
    }

    /// Analyses compose text: discovers variables, validates their
    /// defaults, lints, and collects suggestions.
    #[must_use]
    pub fn analyze(&self, text: impl Into<String>) -> Session {
        let source = text.into();
        tracing::info!(bytes = source.len(), "analyzing compose document");

        let decoded = decode(&source);
        let doc = decoded.as_ref().ok().and_then(Option::as_ref);

        let variables = into_variables(extract(&source, doc));
        let originals = variables
            .iter()
            .map(|v| (v.name.clone(), v.value.clone()))
            .collect();
        let rules = RuleTable::from_config(&self.config.validation);
        let validation_errors = rules.validate_all(&variables);
        let (lint, suggestions, document_error) = self.review(&decoded);

        let session = Session {
            source,
            variables,
            originals,
            lint,
            suggestions,
            validation_errors,
            document_error,
            rules,
        };
        tracing::info!(
            variables = session.variables.len(),
            valid = session.lint.is_valid,
            "analysis complete"
        );
        session
    }

    /// Rebuilds a session from a saved configuration.
    ///
    /// Variables are taken verbatim from the record; originals are
    /// re-derived from the saved text so `modified` flags and resets keep
    /// working.
    #[must_use]
    pub fn resume(&self, record: &SavedConfiguration) -> Session {
        tracing::info!(id = %record.id, name = %record.name, "resuming saved configuration");
        let fresh = self.analyze(record.docker_compose.clone());
        let mut session = Session {
            variables: record.variables.clone(),
            ..fresh
        };
        session.validation_errors = session.rules.validate_all(&session.variables);
        session
    }

    /// Analyses the compose text of a template.
    #[must_use]
    pub fn analyze_template(&self, template: &Template) -> Session {
        tracing::info!(template = %template.name, "analyzing template");
        self.analyze(template.text.clone())
    }

    /// Lints and collects suggestions from the one decode of the text.
    fn review(
        &self,
        decoded: &Result<Option<ComposeDocument>>,
    ) -> (LintReport, Vec<String>, Option<String>) {
        let mut lint = LintReport::new();
        match decoded {
            Ok(Some(doc)) => {
                lint_document(doc, &self.config.lint, &mut lint);
                (lint, suggest_document(doc), None)
            }
            Ok(None) => {
                lint.error(EMPTY_DOCUMENT);
                (lint, Vec::new(), None)
            }
            Err(e) => {
                lint.error(e.to_string());
                (lint, Vec::new(), Some(e.to_string()))
            }
        }
    }
}

/// The analysis result surface handed to a UI shell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalysisReport<'a> {
    /// Discovered variables with their current values.
    pub variables: &'a [Variable],
    /// Linter findings.
    pub lint: &'a LintReport,
    /// Improvement suggestions.
    pub suggestions: &'a [String],
    /// Validation failures keyed by variable name.
    pub validation_errors: &'a BTreeMap<String, String>,
    /// Decoder message when the text is not valid YAML.
    pub document_error: Option<&'a str>,
}

/// One immutable analysis of a compose document and its variable values.
#[derive(Debug, Clone)]
pub struct Session {
    source: String,
    variables: Vec<Variable>,
    originals: BTreeMap<String, String>,
    lint: LintReport,
    suggestions: Vec<String>,
    validation_errors: BTreeMap<String, String>,
    document_error: Option<String>,
    rules: RuleTable,
}

impl Session {
    /// Analyses compose text with the default configuration.
    #[must_use]
    pub fn analyze(text: impl Into<String>) -> Self {
        Analyzer::default().analyze(text)
    }

    /// Rebuilds a session from a saved configuration with the default
    /// configuration.
    #[must_use]
    pub fn resume(record: &SavedConfiguration) -> Self {
        Analyzer::default().resume(record)
    }

    /// Returns the compose text this session was computed from.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Returns the variables in discovery order.
    #[must_use]
    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    /// Returns one variable by name.
    #[must_use]
    pub fn variable(&self, name: &str) -> Option<&Variable> {
        self.variables.iter().find(|v| v.name == name)
    }

    /// Returns the defaults captured right after extraction.
    #[must_use]
    pub const fn originals(&self) -> &BTreeMap<String, String> {
        &self.originals
    }

    /// Returns the linter findings.
    #[must_use]
    pub const fn lint(&self) -> &LintReport {
        &self.lint
    }

    /// Returns the improvement suggestions.
    #[must_use]
    pub fn suggestions(&self) -> &[String] {
        &self.suggestions
    }

    /// Returns validation failures keyed by variable name.
    #[must_use]
    pub const fn validation_errors(&self) -> &BTreeMap<String, String> {
        &self.validation_errors
    }

    /// Returns the decoder message if the text is not valid YAML.
    #[must_use]
    pub fn document_error(&self) -> Option<&str> {
        self.document_error.as_deref()
    }

    /// Returns the full result surface.
    #[must_use]
    pub fn report(&self) -> AnalysisReport<'_> {
        AnalysisReport {
            variables: &self.variables,
            lint: &self.lint,
            suggestions: &self.suggestions,
            validation_errors: &self.validation_errors,
            document_error: self.document_error.as_deref(),
        }
    }

    /// Returns a session where `name` holds `value`.
    ///
    /// # Errors
    ///
    /// Returns [`ComposenvError::NotFound`] if no such variable was discovered.
    pub fn with_value(&self, name: &str, value: impl Into<String>) -> Result<Self> {
        let value = value.into();
        let mut next = self.clone();
        let modified = next.originals.get(name) != Some(&value);
        let variable = next.variable_mut(name)?;
        variable.value = value;
        variable.modified = modified;
        next.revalidate(name);
        Ok(next)
    }

    /// Returns a session where `name` is back to its discovered default.
    ///
    /// # Errors
    ///
    /// Returns [`ComposenvError::NotFound`] if no such variable was discovered.
    pub fn reset(&self, name: &str) -> Result<Self> {
        let mut next = self.clone();
        let original = next.originals.get(name).cloned().unwrap_or_default();
        let variable = next.variable_mut(name)?;
        variable.value = original;
        variable.modified = false;
        next.revalidate(name);
        Ok(next)
    }

    /// Returns a session where every variable is back to its discovered default.
    #[must_use]
    pub fn reset_all(&self) -> Self {
        let mut next = self.clone();
        for variable in &mut next.variables {
            variable.value = next.originals.get(&variable.name).cloned().unwrap_or_default();
            variable.modified = false;
        }
        next.validation_errors = next.rules.validate_all(&next.variables);
        next
    }

    /// Returns a session with values imported from `.env` text.
    ///
    /// Only already discovered variables are updated; names that appear
    /// only in the `.env` text are ignored.
    #[must_use]
    pub fn with_env_file(&self, content: &str) -> Self {
        self.apply_env(&parse_env_file(content))
    }

    /// Returns a session with values imported from raw `.env` bytes.
    ///
    /// # Errors
    ///
    /// Returns [`ComposenvError::EnvFile`] if the bytes are not UTF-8; the
    /// current session is left as it was.
    pub fn with_env_bytes(&self, bytes: &[u8]) -> Result<Self> {
        Ok(self.apply_env(&parse_env_bytes(bytes)?))
    }

    fn apply_env(&self, env: &BTreeMap<String, String>) -> Self {
        let mut next = self.clone();
        let mut applied = 0usize;
        for variable in &mut next.variables {
            if let Some(value) = env.get(&variable.name) {
                variable.modified = next.originals.get(&variable.name) != Some(value);
                variable.value.clone_from(value);
                applied += 1;
            }
        }
        tracing::debug!(applied, "imported .env values");
        next.validation_errors = next.rules.validate_all(&next.variables);
        next
    }

    /// Returns a session where every empty `security` variable holds a
    /// freshly generated secret.
    #[must_use]
    pub fn with_generated_secrets(&self) -> Self {
        let mut next = self.clone();
        for variable in &mut next.variables {
            if variable.category == Category::Security && variable.value.is_empty() {
                variable.value = generate_password();
                variable.modified = true;
            }
        }
        next.validation_errors = next.rules.validate_all(&next.variables);
        next
    }

    /// Returns the compose text with current values substituted.
    #[must_use]
    pub fn preview(&self) -> String {
        substitute::substitute(&self.source, &self.variables)
    }

    /// Returns the substituted compose document for export.
    ///
    /// Validation failures do not block export.
    #[must_use]
    pub fn export_compose(&self) -> String {
        self.preview()
    }

    /// Returns `.env` text for the current values.
    #[must_use]
    pub fn export_env(&self) -> String {
        render_env_file(&self.variables)
    }

    /// Returns the startup order implied by `depends_on`.
    ///
    /// # Errors
    ///
    /// Returns an error if the text does not decode or the graph has a cycle.
    pub fn startup_order(&self) -> Result<Vec<String>> {
        let Some(doc) = decode(&self.source)? else {
            return Ok(Vec::new());
        };
        DependencyGraph::from_document(&doc).resolve_order()
    }

    /// Captures the session as a named, storable record.
    #[must_use]
    pub fn snapshot(&self, name: impl Into<String>) -> SavedConfiguration {
        SavedConfiguration {
            id: ConfigurationId::generate(),
            name: name.into(),
            variables: self.variables.clone(),
            docker_compose: self.source.clone(),
            saved_at: chrono::Utc::now().to_rfc3339(),
        }
    }

    fn variable_mut(&mut self, name: &str) -> Result<&mut Variable> {
        self.variables
            .iter_mut()
            .find(|v| v.name == name)
            .ok_or_else(|| ComposenvError::NotFound {
                kind: "variable",
                id: name.to_string(),
            })
    }

    fn revalidate(&mut self, name: &str) {
        let value = self.variable(name).map(|v| v.value.clone()).unwrap_or_default();
        match self.rules.validate(name, &value) {
            Some(message) => {
                let _ = self.validation_errors.insert(name.to_string(), message);
            }
            None => {
                let _ = self.validation_errors.remove(name);
            }
        }
    }
}
