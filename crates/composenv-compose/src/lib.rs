//! # composenv-compose
//!
//! Analysis engine for Docker Compose documents.
//!
//! Handles:
//! - **Document**: Decoding compose YAML into a typed, read-only view.
//! - **Placeholder**: Lexing `${NAME}`, `${NAME:default}`, and `$NAME` references.
//! - **Extract**: Discovering variables with first-writer-wins precedence.
//! - **Classify / Validate**: Naming-convention categories and value rules.
//! - **Substitute**: Textual substitution for preview and export.
//! - **Lint / Advisor**: Structural findings and best-practice suggestions.
//! - **Graph**: `depends_on` graph and startup ordering.
//! - **Envfile**: `.env` parsing and rendering.

pub mod advisor;
pub mod classify;
pub mod document;
pub mod envfile;
pub mod extract;
pub mod graph;
pub mod lint;
pub mod placeholder;
pub mod substitute;
pub mod validate;
