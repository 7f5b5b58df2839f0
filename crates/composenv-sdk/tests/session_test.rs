//! End-to-end tests for the composenv analysis pipeline.
//!
//! These tests drive a session the way an editor shell would:
//! 1. Analyse compose text (extraction, validation, lint, suggestions)
//! 2. Edit and reset variable values
//! 3. Import `.env` files
//! 4. Export compose and `.env` text
//! 5. Save and resume configurations

#![allow(clippy::expect_used, clippy::unwrap_used)]

use composenv_common::config::ComposenvConfig;
use composenv_common::types::{Category, SavedConfiguration};
use composenv_compose::extract::extract;
use composenv_sdk::session::{Analyzer, Session};

const WEB_STACK: &str = r#"version: "3.8"
services:
  api:
    image: "registry.local/api:${API_TAG:1.4.0}"
    restart: always
    ports:
      - "${HTTP_PORT:8080}:8080"
    volumes:
      - "${UPLOAD_PATH:./uploads}:/srv/uploads"
    environment:
      - DB_HOST=db
      - JWT_SECRET=
    depends_on:
      - db
  db:
    image: postgres:16
    ports:
      - "22:22"
    environment:
      POSTGRES_PASSWORD: changeme
      DB_PORT: 5432
"#;

// ── Analysis ─────────────────────────────────────────────────────────

#[test]
fn pipeline_discovers_variables_in_order() {
    let session = Session::analyze(WEB_STACK);
    let names: Vec<&str> = session.variables().iter().map(|v| v.name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "DB_HOST",
            "JWT_SECRET",
            "POSTGRES_PASSWORD",
            "DB_PORT",
            "API_TAG",
            "HTTP_PORT",
            "UPLOAD_PATH",
        ]
    );
}

#[test]
fn pipeline_classifies_variables() {
    let session = Session::analyze(WEB_STACK);
    let category = |name: &str| session.variable(name).expect("discovered").category;
    assert_eq!(category("DB_HOST"), Category::Database);
    assert_eq!(category("JWT_SECRET"), Category::Security);
    assert_eq!(category("HTTP_PORT"), Category::Ports);
    assert_eq!(category("UPLOAD_PATH"), Category::Paths);
    assert_eq!(category("API_TAG"), Category::Other);
}

#[test]
fn pipeline_validates_defaults() {
    let session = Session::analyze(WEB_STACK);
    let errors = session.validation_errors();
    assert_eq!(
        errors.get("POSTGRES_PASSWORD").map(String::as_str),
        Some("password too short (min 8 characters)")
    );
    // Empty passwords are not flagged until a value is entered.
    assert!(!errors.contains_key("JWT_SECRET"), "got: {errors:?}");
    assert!(!errors.contains_key("UPLOAD_PATH"), "got: {errors:?}");
    assert!(!errors.contains_key("HTTP_PORT"), "got: {errors:?}");
}

#[test]
fn pipeline_lints_and_suggests() {
    let session = Session::analyze(WEB_STACK);
    let lint = session.lint();
    assert!(lint.is_valid, "got: {lint:?}");
    assert!(
        lint.warnings.iter().any(|w| w.contains("always restart")),
        "got: {lint:?}"
    );
    assert!(
        lint.warnings.iter().any(|w| w.contains("privileged port 22")),
        "got: {lint:?}"
    );
    assert!(
        session.suggestions().iter().any(|s| s.contains("named volumes")),
        "got: {:?}",
        session.suggestions()
    );
}

#[test]
fn pipeline_reports_invalid_yaml_without_failing() {
    let session = Session::analyze("services:\n  api: [${API_TAG:1}\n");
    assert!(session.document_error().is_some());
    assert!(!session.lint().is_valid);
    assert_eq!(session.variables().len(), 1);
    assert!(session.startup_order().is_err());
}

// ── Editing ──────────────────────────────────────────────────────────

#[test]
fn pipeline_edit_then_export() {
    let session = Session::analyze(WEB_STACK)
        .with_value("API_TAG", "1.5.0")
        .and_then(|s| s.with_value("HTTP_PORT", "9090"))
        .expect("variables were discovered");

    let compose = session.export_compose();
    assert!(compose.contains("registry.local/api:1.5.0"), "got: {compose}");
    assert!(compose.contains("\"9090:8080\""), "got: {compose}");
    assert!(compose.contains("\"./uploads:/srv/uploads\""), "got: {compose}");
    assert!(!compose.contains("${"), "got: {compose}");

    let env = session.export_env();
    assert!(env.lines().any(|l| l == "API_TAG=1.5.0"), "got: {env}");
    assert!(env.lines().any(|l| l == "HTTP_PORT=9090"), "got: {env}");
    assert!(env.lines().any(|l| l == "DB_HOST=db"), "got: {env}");
}

#[test]
fn pipeline_exported_compose_rediscovers_no_placeholders() {
    let session = Session::analyze(WEB_STACK);
    let exported = session.export_compose();
    let rescanned = extract(&exported, None);
    assert!(
        rescanned.iter().all(|d| d.name != "API_TAG" && d.name != "HTTP_PORT"),
        "got: {rescanned:?}"
    );
}

#[test]
fn pipeline_invalid_edit_is_reported_but_exportable() {
    let session = Session::analyze(WEB_STACK)
        .with_value("HTTP_PORT", "70000")
        .expect("HTTP_PORT was discovered");
    assert_eq!(
        session.validation_errors().get("HTTP_PORT").map(String::as_str),
        Some("invalid port (1-65535)")
    );
    assert!(session.export_compose().contains("\"70000:8080\""));
}

#[test]
fn pipeline_empty_value_keeps_placeholder() {
    let session = Session::analyze(WEB_STACK)
        .with_value("API_TAG", "")
        .expect("API_TAG was discovered");
    assert!(session.export_compose().contains("${API_TAG:1.4.0}"));
}

#[test]
fn pipeline_fill_secrets() {
    let session = Session::analyze(WEB_STACK).with_generated_secrets();
    let secret = session.variable("JWT_SECRET").expect("discovered");
    assert_eq!(secret.value.len(), 12);
    assert!(!session.validation_errors().contains_key("JWT_SECRET"));
    // Non-empty security values are left alone.
    assert_eq!(
        session.variable("POSTGRES_PASSWORD").expect("discovered").value,
        "changeme"
    );
}

// ── .env import ──────────────────────────────────────────────────────

#[test]
fn pipeline_env_import_applies_known_names() {
    let env = "# production values\nAPI_TAG=\"2.0.0\"\nPOSTGRES_PASSWORD='a-strong-password'\nEXTRA=ignored\n";
    let session = Session::analyze(WEB_STACK)
        .with_env_bytes(env.as_bytes())
        .expect("valid utf-8");
    assert_eq!(session.variable("API_TAG").expect("discovered").value, "2.0.0");
    assert!(!session.validation_errors().contains_key("POSTGRES_PASSWORD"));
    assert!(session.variable("EXTRA").is_none());
    assert_eq!(session.variables().len(), 7);
}

#[test]
fn pipeline_env_import_then_reset_all() {
    let session = Session::analyze(WEB_STACK)
        .with_env_file("API_TAG=2.0.0\nDB_PORT=99999\n")
        .reset_all();
    assert!(session.variables().iter().all(|v| !v.modified));
    assert!(!session.validation_errors().contains_key("DB_PORT"));
}

// ── Configuration ────────────────────────────────────────────────────

#[test]
fn pipeline_custom_lint_config() {
    let config = ComposenvConfig::from_json(
        r#"{ "lint": { "allowed_privileged_ports": [22, 80, 443] } }"#,
    )
    .expect("valid config");
    let session = Analyzer::new(config).analyze(WEB_STACK);
    assert!(
        !session.lint().warnings.iter().any(|w| w.contains("privileged port")),
        "got: {:?}",
        session.lint()
    );
}

#[test]
fn pipeline_startup_order() {
    let order = Session::analyze(WEB_STACK)
        .startup_order()
        .expect("acyclic");
    assert_eq!(order, vec!["db", "api"]);
}

#[test]
fn pipeline_cyclic_dependencies_fail_order() {
    let text = "services:\n  a:\n    image: a\n    depends_on: [b]\n  b:\n    image: b\n    depends_on: [a]\n";
    let err = Session::analyze(text).startup_order().unwrap_err();
    assert!(err.to_string().contains("cyclic"), "got: {err}");
}

// ── Saved configurations ─────────────────────────────────────────────

#[test]
fn pipeline_snapshot_serializes_and_resumes() {
    let session = Session::analyze(WEB_STACK)
        .with_value("API_TAG", "1.5.0")
        .expect("API_TAG was discovered");
    let record = session.snapshot("staging");
    let json = serde_json::to_string(&record).expect("serialize");
    let restored: SavedConfiguration = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(restored, record);

    let resumed = Session::resume(&restored);
    assert_eq!(resumed.variables(), session.variables());
    assert_eq!(resumed.export_compose(), session.export_compose());
    assert_eq!(resumed.lint(), session.lint());
    assert_eq!(resumed.validation_errors(), session.validation_errors());
}

#[test]
fn pipeline_snapshots_get_distinct_ids() {
    let session = Session::analyze(WEB_STACK);
    assert_ne!(session.snapshot("a").id, session.snapshot("b").id);
}

#[test]
fn pipeline_resumes_record_stored_by_shell() {
    let record = serde_json::json!({
        "id": 1_700_000_000_000_u64,
        "name": "legacy",
        "variables": [
            { "name": "API_TAG", "value": "2.1.0", "category": "other" },
            { "name": "HTTP_PORT", "value": "8080", "category": "ports" }
        ],
        "dockerCompose": "services:\n  api:\n    image: \"api:${API_TAG:1.0}\"\n    ports:\n      - \"${HTTP_PORT:8080}:80\"\n"
    });
    let saved: SavedConfiguration = serde_json::from_value(record).expect("deserialize");
    assert_eq!(saved.id.to_string(), "1700000000000");

    let session = Session::resume(&saved);
    assert_eq!(session.variable("API_TAG").expect("restored").value, "2.1.0");
    let compose = session.export_compose();
    assert!(compose.contains("api:2.1.0"), "got: {compose}");
    assert!(compose.contains("\"8080:80\""), "got: {compose}");
    assert!(session.lint().is_valid, "got: {:?}", session.lint());
}
