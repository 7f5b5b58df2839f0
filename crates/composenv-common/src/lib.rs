//! # composenv-common
//!
//! Shared types, error definitions, configuration models, and constants
//! used across the entire composenv workspace.
//!
//! This crate is the leaf of the dependency graph. It depends on no other
//! internal crate and provides the primitives the engine, the SDK, and the
//! host binary all build upon.

pub mod config;
pub mod constants;
pub mod error;
pub mod types;
