//! # composenv-sdk
//!
//! Public SDK for embedding composenv in an editor shell.
//!
//! Provides two entry points:
//! - [`Analyzer`](session::Analyzer): Runs an analysis with a given configuration.
//! - [`Session`](session::Session): The immutable result of one analysis. Every
//!   user action (edit, reset, `.env` import) returns a new session.
//!
//! # Example
//!
//! ```rust
//! use composenv_sdk::session::Session;
//!
//! let session = Session::analyze("services:\n  web:\n    image: \"nginx:${TAG:stable}\"\n");
//! let edited = session.with_value("TAG", "1.27").expect("TAG was discovered");
//! assert!(edited.export_compose().contains("nginx:1.27"));
//! assert_eq!(edited.export_env(), "TAG=1.27");
//! ```

pub mod secret;
pub mod session;
