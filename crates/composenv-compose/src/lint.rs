//! Static analysis of compose documents.
//!
//! # Checks performed, in order
//!
//! 1. The text decodes as YAML (otherwise one error, stop).
//! 2. The document is not empty (otherwise one error, stop).
//! 3. `version` is present and in the accepted set.
//! 4. `services` is present and non-empty (otherwise one error, stop).
//! 5. Per service: image or build, `restart: always`, privileged host
//!    ports, absolute bind-mount paths, undefined `depends_on` targets.
//! 6. Services nobody depends on, when there is more than one service.
//!
//! Only steps 1, 2, and 4 stop early; every other finding is collected and
//! the remaining checks still run.

use composenv_common::config::LintConfig;
use composenv_common::types::LintReport;

use crate::document::{ComposeDocument, PortSpec, ServiceSpec, Version, VolumeSpec, decode};
use crate::graph::DependencyGraph;
use crate::validate::leading_integer;

/// Error reported when the text decodes to nothing.
pub const EMPTY_DOCUMENT: &str = "document is empty or not valid YAML";

/// Lints compose text with the default configuration.
#[must_use]
pub fn lint(text: &str) -> LintReport {
    lint_with(text, &LintConfig::default())
}

/// Lints compose text.
#[must_use]
pub fn lint_with(text: &str, config: &LintConfig) -> LintReport {
    let mut report = LintReport::new();

    let doc = match decode(text) {
        Ok(Some(doc)) => doc,
        Ok(None) => {
            report.error(EMPTY_DOCUMENT);
            return report;
        }
        Err(e) => {
            report.error(e.to_string());
            return report;
        }
    };

    lint_document(&doc, config, &mut report);
    report
}

/// Runs the structural checks (steps 3 to 6) on a decoded document.
pub fn lint_document(doc: &ComposeDocument, config: &LintConfig, report: &mut LintReport) {
    tracing::info!("linting compose document");
    check_version(doc, config, report);

    let services = doc.services();
    if services.is_empty() {
        report.error("no services defined in the compose document");
        return;
    }

    for service in services {
        check_service(doc, service, config, report);
    }

    check_isolated(doc, report);
    tracing::debug!(
        errors = report.errors.len(),
        warnings = report.warnings.len(),
        "lint complete"
    );
}

fn check_version(doc: &ComposeDocument, config: &LintConfig, report: &mut LintReport) {
    match &doc.version {
        None => report.warning("compose version is not specified"),
        Some(Version::Text(v)) if config.accepted_versions.iter().any(|a| a == v) => {}
        Some(Version::Text(v) | Version::Other(v)) => {
            report.warning(format!("version {v} may not be supported"));
        }
    }
}

fn check_service(
    doc: &ComposeDocument,
    service: &ServiceSpec,
    config: &LintConfig,
    report: &mut LintReport,
) {
    let name = &service.name;

    if service.image.is_none() && !service.build {
        report.error(format!(
            "service \"{name}\" has neither an image nor a build configuration"
        ));
    }

    if service.restart.as_deref() == Some("always") {
        report.warning(format!(
            "service \"{name}\" is set to always restart, which can cause restart loops on failure"
        ));
    }

    for port in &service.ports {
        let PortSpec::Short(mapping) = port else {
            continue;
        };
        let parts: Vec<&str> = mapping.split(':').collect();
        let [host, _container] = parts.as_slice() else {
            continue;
        };
        if is_privileged(host, config) {
            report.warning(format!(
                "service \"{name}\" uses privileged port {host}, which may require elevated permissions"
            ));
        }
    }

    for volume in &service.volumes {
        let VolumeSpec::Short(mount) = volume else {
            continue;
        };
        let mut parts = mount.split(':');
        let host = parts.next().unwrap_or_default();
        if parts.next().is_some() && host.starts_with('/') {
            report.warning(format!(
                "service \"{name}\" uses absolute path \"{host}\", which can hurt portability"
            ));
        }
    }

    for dependency in &service.depends_on {
        if doc.service(dependency).is_none() {
            report.error(format!(
                "service \"{name}\" depends on \"{dependency}\", which is not defined"
            ));
        }
    }
}

fn check_isolated(doc: &ComposeDocument, report: &mut LintReport) {
    let graph = DependencyGraph::from_document(doc);
    if graph.len() <= 1 {
        return;
    }
    for service in doc.services() {
        if !graph.has_dependents(&service.name) {
            report.warning(format!(
                "service \"{}\" is not referenced by any other service and may be isolated",
                service.name
            ));
        }
    }
}

fn is_privileged(host: &str, config: &LintConfig) -> bool {
    leading_integer(host).is_some_and(|port| {
        port < i64::from(config.privileged_port_limit)
            && !config
                .allowed_privileged_ports
                .iter()
                .any(|&allowed| i64::from(allowed) == port)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn has(messages: &[String], needle: &str) -> bool {
        messages.iter().any(|m| m.contains(needle))
    }

    #[test]
    fn lint_parse_failure_single_error() {
        let report = lint("services:\n  web: [unclosed\n");
        assert!(!report.is_valid);
        assert_eq!(report.errors.len(), 1);
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn lint_empty_document() {
        let report = lint("");
        assert!(!report.is_valid);
        assert_eq!(report.errors, vec!["document is empty or not valid YAML"]);
    }

    #[test]
    fn lint_missing_services_single_error() {
        let report = lint("version: \"3.8\"\nnetworks:\n  front: {}\n");
        assert!(!report.is_valid);
        assert_eq!(report.errors.len(), 1);
        assert!(has(&report.errors, "no services"));
    }

    #[test]
    fn lint_empty_services_mapping_is_error() {
        let report = lint("version: \"3\"\nservices: {}\n");
        assert!(!report.is_valid);
        assert_eq!(report.errors.len(), 1);
    }

    #[test]
    fn lint_version_warnings() {
        let missing = lint("services:\n  web:\n    image: nginx\n");
        assert!(has(&missing.warnings, "not specified"));

        let accepted = lint("version: \"3.8\"\nservices:\n  web:\n    image: nginx\n");
        assert!(accepted.warnings.is_empty(), "got: {:?}", accepted.warnings);

        let unknown = lint("version: \"4.0\"\nservices:\n  web:\n    image: nginx\n");
        assert!(has(&unknown.warnings, "version 4.0"));
    }

    #[test]
    fn lint_numeric_version_is_not_normalized() {
        let report = lint("version: 3.8\nservices:\n  web:\n    image: nginx\n");
        assert!(has(&report.warnings, "version 3.8 may not be supported"));
        assert!(report.is_valid);
    }

    #[test]
    fn lint_missing_image_and_build() {
        let report = lint("version: \"3\"\nservices:\n  web:\n    restart: always\n");
        assert!(!report.is_valid);
        assert!(has(&report.errors, "\"web\" has neither"));
        assert!(has(&report.warnings, "always restart"));
    }

    #[test]
    fn lint_build_without_image_is_fine() {
        let report = lint("version: \"3\"\nservices:\n  app:\n    build: .\n");
        assert!(report.is_valid);
    }

    #[test]
    fn lint_privileged_ports() {
        let report = lint(
            r#"
version: "3"
services:
  web:
    image: nginx
    ports:
      - "80:80"
      - "443:443"
      - "22:22"
      - "8080:80"
      - "127.0.0.1:25:25"
      - 21
"#,
        );
        let privileged: Vec<&String> = report
            .warnings
            .iter()
            .filter(|w| w.contains("privileged port"))
            .collect();
        assert_eq!(privileged.len(), 1, "got: {privileged:?}");
        assert!(privileged[0].contains("port 22"));
    }

    #[test]
    fn lint_privileged_port_limit_is_configurable() {
        let config = LintConfig {
            privileged_port_limit: 9000,
            ..LintConfig::default()
        };
        let report = lint_with(
            "version: \"3\"\nservices:\n  web:\n    image: nginx\n    ports:\n      - \"8080:80\"\n",
            &config,
        );
        assert!(has(&report.warnings, "privileged port 8080"));
    }

    #[test]
    fn lint_absolute_volume_paths() {
        let report = lint(
            r#"
version: "3"
services:
  db:
    image: postgres
    volumes:
      - /srv/pg:/var/lib/postgresql/data
      - ./init:/docker-entrypoint-initdb.d
      - /just/a/container/path
      - data:/data
"#,
        );
        let paths: Vec<&String> = report
            .warnings
            .iter()
            .filter(|w| w.contains("absolute path"))
            .collect();
        assert_eq!(paths.len(), 1, "got: {paths:?}");
        assert!(paths[0].contains("/srv/pg"));
    }

    #[test]
    fn lint_undefined_dependency_names_both_services() {
        let report = lint("version: \"3\"\nservices:\n  web:\n    image: nginx\n    depends_on: [db]\n");
        assert!(!report.is_valid);
        assert_eq!(report.errors.len(), 1);
        assert!(report.errors[0].contains("web"));
        assert!(report.errors[0].contains("db"));
    }

    #[test]
    fn lint_continues_after_service_errors() {
        let report = lint(
            r#"
version: "3"
services:
  broken:
    depends_on: [ghost]
  web:
    image: nginx
    restart: always
"#,
        );
        assert_eq!(report.errors.len(), 2, "got: {:?}", report.errors);
        assert!(report.errors[0].contains("neither"));
        assert!(report.errors[1].contains("ghost"));
        assert!(has(&report.warnings, "\"web\" is set to always restart"));
    }

    #[test]
    fn lint_isolated_services() {
        let report = lint(
            r#"
version: "3"
services:
  web:
    image: nginx
    depends_on: [api]
  api:
    image: api
  cron:
    image: cron
"#,
        );
        assert!(report.is_valid);
        assert!(has(&report.warnings, "\"web\" is not referenced"));
        assert!(has(&report.warnings, "\"cron\" is not referenced"));
        assert!(!has(&report.warnings, "\"api\" is not referenced"));
    }

    #[test]
    fn lint_single_service_is_never_isolated() {
        let report = lint("version: \"3\"\nservices:\n  web:\n    image: nginx\n");
        assert!(report.warnings.is_empty(), "got: {:?}", report.warnings);
    }
}
