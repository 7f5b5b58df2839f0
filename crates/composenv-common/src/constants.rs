//! Workspace-wide constants and defaults.

/// Compose document versions accepted without a warning.
pub const ACCEPTED_COMPOSE_VERSIONS: [&str; 12] = [
    "2", "2.0", "3", "3.0", "3.1", "3.2", "3.3", "3.4", "3.5", "3.6", "3.7", "3.8",
];

/// Host ports below this value are privileged.
pub const PRIVILEGED_PORT_LIMIT: u16 = 1024;

/// Privileged host ports that are expected and never flagged.
pub const ALLOWED_PRIVILEGED_PORTS: [u16; 2] = [80, 443];

/// Minimum length accepted by the `password` validation rule.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Length of generated secrets.
pub const GENERATED_PASSWORD_LENGTH: usize = 12;

/// Default compose document name.
pub const DEFAULT_COMPOSE_FILE: &str = "docker-compose.yml";

/// Default `.env` file name.
pub const DEFAULT_ENV_FILE: &str = ".env";

/// Default file name for a substituted compose document.
pub const DEFAULT_EXPORT_FILE: &str = "docker-compose.modified.yml";

/// Application name used in CLI output.
pub const APP_NAME: &str = "composenv";
