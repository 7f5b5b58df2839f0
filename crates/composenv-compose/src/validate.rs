//! Per-name validation of variable values.
//!
//! Rules are looked up by exact variable name, never by category: a
//! variable named `DB_PORT` is checked as a port, `OTHER_DB_PORT` is not.

use std::collections::{BTreeMap, HashMap};

use composenv_common::config::ValidationConfig;
use composenv_common::constants::MIN_PASSWORD_LENGTH;
use composenv_common::types::{ValidatorKind, Variable};

/// Built-in name-to-rule table.
const BUILTIN_RULES: [(&str, ValidatorKind); 16] = [
    ("DB_PORT", ValidatorKind::Port),
    ("DB_PASSWORD", ValidatorKind::Password),
    ("POSTGRES_PASSWORD", ValidatorKind::Password),
    ("MYSQL_ROOT_PASSWORD", ValidatorKind::Password),
    ("MYSQL_PASSWORD", ValidatorKind::Password),
    ("UPLOAD_PATH", ValidatorKind::Path),
    ("CONFIG_PATH", ValidatorKind::Path),
    ("DATA_PATH", ValidatorKind::Path),
    ("LOG_PATH", ValidatorKind::Path),
    ("PORT", ValidatorKind::Port),
    ("EXTERNAL_PORT", ValidatorKind::Port),
    ("HTTP_PORT", ValidatorKind::Port),
    ("HTTPS_PORT", ValidatorKind::Port),
    ("JWT_SECRET", ValidatorKind::Password),
    ("API_KEY", ValidatorKind::Password),
    ("SECRET_KEY", ValidatorKind::Password),
];

/// A check applied to a single value.
pub trait Rule {
    /// Returns an error message if the value fails the rule.
    fn check(&self, value: &str) -> Option<String>;
}

impl Rule for ValidatorKind {
    fn check(&self, value: &str) -> Option<String> {
        match self {
            Self::Port => {
                if value.is_empty() {
                    return None;
                }
                match leading_integer(value) {
                    Some(port) if port > 0 && port < 65536 => None,
                    _ => Some("invalid port (1-65535)".into()),
                }
            }
            Self::Required => {
                if value.trim().is_empty() {
                    Some("required field".into())
                } else {
                    None
                }
            }
            Self::Password => {
                if value.is_empty() || value.chars().count() >= MIN_PASSWORD_LENGTH {
                    None
                } else {
                    Some(format!(
                        "password too short (min {MIN_PASSWORD_LENGTH} characters)"
                    ))
                }
            }
            Self::Path => {
                if value.is_empty()
                    || value.starts_with('/')
                    || value.starts_with("./")
                    || value.starts_with("../")
                {
                    None
                } else {
                    Some("invalid path (must start with /, ./ or ../)".into())
                }
            }
        }
    }
}

/// Reads an optionally signed run of leading digits, ignoring leading whitespace.
pub(crate) fn leading_integer(text: &str) -> Option<i64> {
    let text = text.trim_start();
    let (negative, digits) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text.strip_prefix('+').unwrap_or(text)),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    let value: i64 = digits[..end].parse().ok()?;
    Some(if negative { -value } else { value })
}

/// Name-to-rule lookup table.
#[derive(Debug, Clone)]
pub struct RuleTable {
    rules: HashMap<String, ValidatorKind>,
}

impl RuleTable {
    /// Creates the table of built-in rules.
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            rules: BUILTIN_RULES
                .iter()
                .map(|(name, kind)| ((*name).to_string(), *kind))
                .collect(),
        }
    }

    /// Creates the built-in table with configured entries layered on top.
    #[must_use]
    pub fn from_config(config: &ValidationConfig) -> Self {
        let mut table = Self::builtin();
        for (name, kind) in &config.rules {
            let _ = table.rules.insert(name.clone(), *kind);
        }
        table
    }

    /// Returns the rule registered for a name.
    #[must_use]
    pub fn rule_for(&self, name: &str) -> Option<ValidatorKind> {
        self.rules.get(name).copied()
    }

    /// Validates one value. Names without a rule always pass.
    #[must_use]
    pub fn validate(&self, name: &str, value: &str) -> Option<String> {
        let kind = self.rule_for(name)?;
        let outcome = kind.check(value);
        tracing::debug!(name, rule = %kind, passed = outcome.is_none(), "validated variable");
        outcome
    }

    /// Validates every variable, returning the failures keyed by name.
    #[must_use]
    pub fn validate_all(&self, variables: &[Variable]) -> BTreeMap<String, String> {
        variables
            .iter()
            .filter_map(|v| Some((v.name.clone(), self.validate(&v.name, &v.value)?)))
            .collect()
    }
}

impl Default for RuleTable {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Validates one value against the built-in table.
#[must_use]
pub fn validate(name: &str, value: &str) -> Option<String> {
    RuleTable::builtin().validate(name, value)
}
