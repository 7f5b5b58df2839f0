//! Configuration model for the analysis engine.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::constants::{ACCEPTED_COMPOSE_VERSIONS, ALLOWED_PRIVILEGED_PORTS, PRIVILEGED_PORT_LIMIT};
use crate::types::ValidatorKind;

/// Root configuration for composenv.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComposenvConfig {
    /// Compose linter settings.
    pub lint: LintConfig,
    /// Variable validation settings.
    pub validation: ValidationConfig,
}

impl ComposenvConfig {
    /// Parses a configuration from JSON text. Missing fields take defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid JSON for this model.
    pub fn from_json(text: &str) -> crate::error::Result<Self> {
        Ok(serde_json::from_str(text)?)
    }
}

/// Settings for the compose linter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LintConfig {
    /// `version` values that do not raise a warning.
    pub accepted_versions: Vec<String>,
    /// Host ports below this value are reported as privileged.
    pub privileged_port_limit: u16,
    /// Privileged host ports that are never reported.
    pub allowed_privileged_ports: Vec<u16>,
}

impl Default for LintConfig {
    fn default() -> Self {
        Self {
            accepted_versions: ACCEPTED_COMPOSE_VERSIONS
                .iter()
                .map(|v| (*v).to_string())
                .collect(),
            privileged_port_limit: PRIVILEGED_PORT_LIMIT,
            allowed_privileged_ports: ALLOWED_PRIVILEGED_PORTS.to_vec(),
        }
    }
}

/// Settings for per-variable validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Extra name-to-rule entries, layered over the built-in table.
    pub rules: BTreeMap<String, ValidatorKind>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_accepts_fixed_versions() {
        let config = ComposenvConfig::default();
        assert_eq!(config.lint.accepted_versions.len(), 12);
        assert!(config.lint.accepted_versions.contains(&"3.8".to_string()));
        assert_eq!(config.lint.privileged_port_limit, 1024);
        assert_eq!(config.lint.allowed_privileged_ports, vec![80, 443]);
        assert!(config.validation.rules.is_empty());
    }

    #[test]
    fn from_json_fills_missing_fields() {
        let config = ComposenvConfig::from_json(
            r#"{ "validation": { "rules": { "APP_NAME": "required" } } }"#,
        )
        .expect("should parse");
        assert_eq!(
            config.validation.rules.get("APP_NAME"),
            Some(&ValidatorKind::Required)
        );
        assert_eq!(config.lint, LintConfig::default());
    }

    #[test]
    fn from_json_rejects_unknown_rule_kind() {
        let result = ComposenvConfig::from_json(r#"{ "validation": { "rules": { "X": "email" } } }"#);
        assert!(result.is_err());
    }
}
