//! Typed, read-only view of a decoded compose document.
//!
//! Only the attributes the linter, advisor, and extractor look at are
//! lifted out of the YAML tree. Presence checks follow YAML truthiness:
//! `null`, `false`, `0`, and the empty string count as absent.

use composenv_common::error::{ComposenvError, Result};
use serde_yaml::{Mapping, Value};

/// The `version` field of a compose document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Version {
    /// A string scalar, e.g. `version: "3.8"`.
    Text(String),
    /// Any other scalar, rendered as text, e.g. the number in `version: 3.8`.
    Other(String),
}

/// A `ports` entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PortSpec {
    /// Short string syntax such as `"8080:80"`.
    Short(String),
    /// Numbers and long-form mappings.
    Long,
}

/// A `volumes` entry of a service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VolumeSpec {
    /// Short string syntax such as `"./data:/var/lib/data"`.
    Short(String),
    /// Long-form mappings.
    Long,
}

/// The analysed attributes of one service.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServiceSpec {
    /// Service name (its key under `services`).
    pub name: String,
    /// `image`, rendered as text.
    pub image: Option<String>,
    /// Whether a `build` section is present.
    pub build: bool,
    /// `restart` policy.
    pub restart: Option<String>,
    /// `ports` entries in document order.
    pub ports: Vec<PortSpec>,
    /// `volumes` entries in document order.
    pub volumes: Vec<VolumeSpec>,
    /// `depends_on` targets, from either the list or the mapping form.
    pub depends_on: Vec<String>,
    /// `environment` entries, from either the list or the mapping form.
    pub environment: Vec<(String, String)>,
    /// Whether a `healthcheck` is present.
    pub healthcheck: bool,
    /// Whether `deploy.resources` or `deploy.limits` is present.
    pub deploy_limits: bool,
    /// Whether `labels` are present.
    pub labels: bool,
}

/// A decoded, non-empty compose document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComposeDocument {
    /// The `version` field, if present.
    pub version: Option<Version>,
    /// Services in document order, `None` when `services` is absent or not a mapping.
    pub services: Option<Vec<ServiceSpec>>,
    /// Whether top-level `networks` are declared.
    pub networks: bool,
    /// Whether top-level `volumes` are declared.
    pub volumes: bool,
}

impl ComposeDocument {
    /// Returns the service with the given name.
    #[must_use]
    pub fn service(&self, name: &str) -> Option<&ServiceSpec> {
        self.services.as_deref()?.iter().find(|s| s.name == name)
    }

    /// Returns the services, or an empty slice when none are declared.
    #[must_use]
    pub fn services(&self) -> &[ServiceSpec] {
        self.services.as_deref().unwrap_or_default()
    }
}

/// Decodes compose text.
///
/// Returns `Ok(None)` when the document decodes to nothing (empty text,
/// `null`, or another falsy scalar).
///
/// # Errors
///
/// Returns [`ComposenvError::Parse`] if the text is not valid YAML.
pub fn decode(text: &str) -> Result<Option<ComposeDocument>> {
    let root: Value = serde_yaml::from_str(text).map_err(|e| {
        tracing::warn!(error = %e, "compose document failed to decode");
        ComposenvError::Parse {
            message: e.to_string(),
        }
    })?;
    let root = untag(&root);
    if !truthy(root) {
        return Ok(None);
    }

    let Some(top) = root.as_mapping() else {
        return Ok(Some(ComposeDocument::default()));
    };

    let version = field(top, "version").map(|v| match v {
        Value::String(s) => Version::Text(s.clone()),
        other => Version::Other(render_scalar(other).unwrap_or_default()),
    });

    let services = match top.get("services").map(untag) {
        Some(Value::Mapping(entries)) => Some(
            entries
                .iter()
                .filter_map(|(key, spec)| Some(service_spec(render_scalar(key)?, untag(spec))))
                .collect(),
        ),
        _ => None,
    };

    let doc = ComposeDocument {
        version,
        services,
        networks: field(top, "networks").is_some(),
        volumes: field(top, "volumes").is_some(),
    };
    tracing::debug!(services = doc.services().len(), "decoded compose document");
    Ok(Some(doc))
}

fn service_spec(name: String, spec: &Value) -> ServiceSpec {
    let empty = Mapping::new();
    let map = spec.as_mapping().unwrap_or(&empty);

    let deploy_limits = field(map, "deploy")
        .and_then(Value::as_mapping)
        .is_some_and(|d| field(d, "resources").is_some() || field(d, "limits").is_some());

    ServiceSpec {
        image: field(map, "image").and_then(render_scalar),
        build: field(map, "build").is_some(),
        restart: field(map, "restart").and_then(render_scalar),
        ports: sequence(map, "ports")
            .map(|p| match p {
                Value::String(s) => PortSpec::Short(s.clone()),
                _ => PortSpec::Long,
            })
            .collect(),
        volumes: sequence(map, "volumes")
            .map(|v| match v {
                Value::String(s) => VolumeSpec::Short(s.clone()),
                _ => VolumeSpec::Long,
            })
            .collect(),
        depends_on: depends_on(map),
        environment: environment(map),
        healthcheck: field(map, "healthcheck").is_some(),
        deploy_limits,
        labels: field(map, "labels").is_some(),
        name,
    }
}

fn depends_on(map: &Mapping) -> Vec<String> {
    match field(map, "depends_on") {
        Some(Value::Sequence(items)) => items.iter().map(untag).filter_map(render_scalar).collect(),
        Some(Value::Mapping(targets)) => targets.keys().filter_map(render_scalar).collect(),
        _ => Vec::new(),
    }
}

fn environment(map: &Mapping) -> Vec<(String, String)> {
    match field(map, "environment") {
        Some(Value::Sequence(items)) => items
            .iter()
            .filter_map(|item| match untag(item) {
                Value::String(entry) => Some(match entry.split_once('=') {
                    Some((key, value)) => (key.to_string(), value.to_string()),
                    None => (entry.clone(), String::new()),
                }),
                _ => None,
            })
            .collect(),
        // Falsy values (`false`, `0`, `""`, null) count as no default.
        Some(Value::Mapping(entries)) => entries
            .iter()
            .filter_map(|(key, value)| {
                let value = untag(value);
                let text = if truthy(value) {
                    render_scalar(value).unwrap_or_default()
                } else {
                    String::new()
                };
                Some((render_scalar(key)?, text))
            })
            .collect(),
        _ => Vec::new(),
    }
}

/// Looks up a key, returning the untagged value only if it is truthy.
fn field<'a>(map: &'a Mapping, key: &str) -> Option<&'a Value> {
    map.get(key).map(untag).filter(|v| truthy(v))
}

fn sequence<'a>(map: &'a Mapping, key: &str) -> impl Iterator<Item = &'a Value> {
    field(map, key)
        .and_then(Value::as_sequence)
        .into_iter()
        .flatten()
        .map(untag)
}

fn untag(value: &Value) -> &Value {
    match value {
        Value::Tagged(tagged) => untag(&tagged.value),
        other => other,
    }
}

fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Sequence(_) | Value::Mapping(_) => true,
        Value::Tagged(tagged) => truthy(&tagged.value),
    }
}

/// Renders a scalar as text; `None` for `null`, sequences, and mappings.
fn render_scalar(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Tagged(tagged) => render_scalar(&tagged.value),
        Value::Null | Value::Sequence(_) | Value::Mapping(_) => None,
    }
}
