//! Domain primitive types used across the composenv workspace.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Semantic category of a discovered variable, derived from its name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Database connection settings.
    Database,
    /// Filesystem paths and directories.
    Paths,
    /// Network ports.
    Ports,
    /// Secrets, keys, tokens, and passwords.
    Security,
    /// Anything else.
    Other,
}

impl Category {
    /// Returns the lowercase tag of the category.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Database => "database",
            Self::Paths => "paths",
            Self::Ports => "ports",
            Self::Security => "security",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validation rule applied to the value of a specific variable name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidatorKind {
    /// Empty, or a leading integer in `1..=65535`.
    Port,
    /// Non-empty after trimming whitespace.
    Required,
    /// Empty, or at least eight characters long.
    Password,
    /// Empty, or starting with `/`, `./`, or `../`.
    Path,
}

impl fmt::Display for ValidatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Port => "port",
            Self::Required => "required",
            Self::Password => "password",
            Self::Path => "path",
        };
        f.write_str(s)
    }
}

/// A variable discovered in a compose document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variable {
    /// Variable name as referenced in the document.
    pub name: String,
    /// Current value (initially the discovered default).
    pub value: String,
    /// Category derived from the name.
    pub category: Category,
    /// Human-readable description for well-known names, empty otherwise.
    #[serde(default)]
    pub description: String,
    /// Whether `value` differs from the discovered default.
    #[serde(default)]
    pub modified: bool,
}

/// Outcome of linting a compose document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LintReport {
    /// Must-fix findings, in discovery order.
    pub errors: Vec<String>,
    /// Should-review findings, in discovery order.
    pub warnings: Vec<String>,
    /// `false` if and only if at least one error was recorded.
    pub is_valid: bool,
}

impl LintReport {
    /// Creates an empty, valid report.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            errors: Vec::new(),
            warnings: Vec::new(),
            is_valid: true,
        }
    }

    /// Records an error and marks the report invalid.
    pub fn error(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
        self.is_valid = false;
    }

    /// Records a warning. Warnings never affect validity.
    pub fn warning(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }
}

impl Default for LintReport {
    fn default() -> Self {
        Self::new()
    }
}

/// Unique identifier for a saved configuration.
///
/// Serialized as a string. Numeric ids (millisecond timestamps written by
/// older shells) are accepted and kept in their decimal form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "RawConfigurationId")]
pub struct ConfigurationId(String);

#[derive(Deserialize)]
#[serde(untagged)]
enum RawConfigurationId {
    Text(String),
    Number(u64),
}

impl From<RawConfigurationId> for ConfigurationId {
    fn from(raw: RawConfigurationId) -> Self {
        match raw {
            RawConfigurationId::Text(id) => Self::new(id),
            RawConfigurationId::Number(id) => Self::new(id.to_string()),
        }
    }
}

impl ConfigurationId {
    /// Creates a configuration ID from a string value.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generates a random configuration ID.
    #[must_use]
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    /// Returns the inner string representation.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConfigurationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A named snapshot of an editing session, as persisted by a UI shell.
///
/// Field names follow the shell's stored JSON (`dockerCompose`, `savedAt`);
/// records without a timestamp are accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedConfiguration {
    /// Record identifier.
    pub id: ConfigurationId,
    /// User-chosen name.
    pub name: String,
    /// Variables with their values at save time.
    pub variables: Vec<Variable>,
    /// Compose document text at save time.
    #[serde(alias = "dockerComposeText")]
    pub docker_compose: String,
    /// RFC 3339 timestamp of the snapshot, empty when unknown.
    #[serde(default)]
    pub saved_at: String,
}

/// A starter compose document offered by a template library.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Template {
    /// Display name.
    pub name: String,
    /// Short description.
    pub description: String,
    /// Icon tag understood by the UI shell.
    pub icon: String,
    /// Compose document text.
    #[serde(rename = "template", alias = "text")]
    pub text: String,
}
