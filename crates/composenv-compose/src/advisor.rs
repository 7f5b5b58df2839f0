//! Best-practice suggestions for compose documents.
//!
//! Suggestions never block anything and never fail: text that does not
//! decode, or that has no `services`, yields no suggestions.

use crate::document::{ComposeDocument, VolumeSpec, decode};

/// Suggests improvements for compose text.
#[must_use]
pub fn suggest(text: &str) -> Vec<String> {
    match decode(text) {
        Ok(Some(doc)) => suggest_document(&doc),
        Ok(None) | Err(_) => Vec::new(),
    }
}

/// Suggests improvements for a decoded document.
#[must_use]
pub fn suggest_document(doc: &ComposeDocument) -> Vec<String> {
    let Some(services) = doc.services.as_deref() else {
        return Vec::new();
    };
    tracing::info!(services = services.len(), "collecting suggestions");
    let mut suggestions = Vec::new();

    for service in services {
        let name = &service.name;
        if !service.healthcheck {
            suggestions.push(format!(
                "consider adding a healthcheck to service \"{name}\" to improve resilience"
            ));
        }
        if !service.deploy_limits {
            suggestions.push(format!(
                "consider setting resource limits for service \"{name}\" to prevent resource exhaustion"
            ));
        }
        if !service.labels {
            suggestions.push(format!(
                "consider adding labels to service \"{name}\" for better documentation"
            ));
        }
    }

    if !doc.networks {
        suggestions.push("consider defining custom networks for better isolation and security".into());
    }

    let has_bind_mounts = services.iter().any(|s| {
        s.volumes
            .iter()
            .any(|v| matches!(v, VolumeSpec::Short(mount) if mount.contains(':')))
    });
    if !doc.volumes && has_bind_mounts {
        suggestions.push(
            "consider using named volumes instead of bind mounts for better portability".into(),
        );
    }

    suggestions
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suggest_minimal_service() {
        let suggestions = suggest("services:\n  web:\n    image: nginx\n");
        assert_eq!(suggestions.len(), 4, "got: {suggestions:?}");
        assert!(suggestions[0].contains("healthcheck"));
        assert!(suggestions[1].contains("resource limits"));
        assert!(suggestions[2].contains("labels"));
        assert!(suggestions[3].contains("networks"));
    }

    #[test]
    fn suggest_nothing_for_invalid_or_serviceless_text() {
        assert!(suggest("services: [oops").is_empty());
        assert!(suggest("").is_empty());
        assert!(suggest("version: \"3\"\n").is_empty());
    }

    #[test]
    fn suggest_nothing_for_well_configured_service() {
        let text = r#"
services:
  web:
    image: nginx
    healthcheck:
      test: ["CMD", "curl", "-f", "http://localhost"]
    deploy:
      resources:
        limits:
          cpus: "0.5"
    labels:
      team: platform
    volumes:
      - web-data:/data
networks:
  front: {}
volumes:
  web-data: {}
"#;
        assert!(suggest(text).is_empty(), "got: {:?}", suggest(text));
    }

    #[test]
    fn suggest_named_volumes_for_bind_mounts() {
        let text = "services:\n  db:\n    image: pg\n    volumes:\n      - ./data:/var/lib/data\nnetworks:\n  back: {}\n";
        let suggestions = suggest(text);
        assert!(
            suggestions.iter().any(|s| s.contains("named volumes")),
            "got: {suggestions:?}"
        );
    }

    #[test]
    fn suggest_no_named_volume_hint_without_colon() {
        let text = "services:\n  db:\n    image: pg\n    volumes:\n      - /var/lib/data\n";
        assert!(!suggest(text).iter().any(|s| s.contains("named volumes")));
    }

    #[test]
    fn suggest_deploy_limits_shortcut_counts() {
        let text = "services:\n  a:\n    image: a\n    deploy:\n      limits:\n        memory: 1g\n";
        assert!(!suggest(text).iter().any(|s| s.contains("resource limits")));
    }
}
