//! Naming-convention classification of variables.
//!
//! Categories are decided by substring matching on the name, in a fixed
//! precedence order. `KEYSTORE_DIR` is therefore `paths`, while
//! `KEYSTORE_PASS` is `security`.

use composenv_common::types::Category;

/// Ordered classification table; the first matching row wins.
const CATEGORY_MARKERS: [(Category, &[&str]); 4] = [
    (
        Category::Database,
        &["DB_", "DATABASE_", "POSTGRES_", "MYSQL_", "MONGO_"],
    ),
    (Category::Paths, &["PATH", "DIR", "FOLDER", "VOLUME"]),
    (Category::Ports, &["PORT"]),
    (Category::Security, &["SECRET", "KEY", "TOKEN", "PASS"]),
];

const DESCRIPTIONS: [(&str, &str); 25] = [
    ("DB_HOST", "Hostname or IP address of the database"),
    ("DB_PORT", "Port on which the database accepts connections"),
    ("DB_USER", "User name used to connect to the database"),
    ("DB_PASSWORD", "Password used to connect to the database (should be strong)"),
    ("DB_NAME", "Name of the database to use"),
    ("DATABASE_URL", "Full database connection URL"),
    ("POSTGRES_USER", "PostgreSQL user name"),
    ("POSTGRES_PASSWORD", "PostgreSQL password"),
    ("POSTGRES_DB", "PostgreSQL database name"),
    ("MYSQL_ROOT_PASSWORD", "Password of the MySQL root user"),
    ("MYSQL_DATABASE", "MySQL database name"),
    ("MYSQL_USER", "MySQL user name"),
    ("MYSQL_PASSWORD", "MySQL password"),
    ("UPLOAD_PATH", "Directory where uploaded files are stored"),
    ("CONFIG_PATH", "Directory holding configuration files"),
    ("DATA_PATH", "Directory holding persistent data"),
    ("LOG_PATH", "Directory holding log files"),
    ("PORT", "Internal port the application listens on"),
    ("EXTERNAL_PORT", "External port mapped to the internal port"),
    ("HTTP_PORT", "Port for HTTP traffic"),
    ("HTTPS_PORT", "Port for HTTPS traffic"),
    ("JWT_SECRET", "Secret key used to sign JWT tokens"),
    ("API_KEY", "API key used to authenticate requests"),
    ("SECRET_KEY", "General application secret key"),
    ("TOKEN", "Authentication token"),
];

const SUGGESTED_VALUES: [(&str, &[&str]); 9] = [
    ("DB_HOST", &["localhost", "db", "database"]),
    ("DB_PORT", &["3306", "5432", "27017"]),
    ("DB_USER", &["root", "postgres", "admin"]),
    ("DB_NAME", &["myapp_db", "production_db", "development_db"]),
    ("UPLOAD_PATH", &["/data/uploads", "/var/www/uploads", "./uploads"]),
    ("CONFIG_PATH", &["/etc/myapp", "./config", "/opt/myapp/config"]),
    ("PORT", &["3000", "8080", "80"]),
    ("EXTERNAL_PORT", &["80", "443", "8080"]),
    ("HTTP_PORT", &["80", "8080"]),
];

/// Returns the category of a variable name.
#[must_use]
pub fn classify(name: &str) -> Category {
    CATEGORY_MARKERS
        .iter()
        .find(|(_, markers)| markers.iter().any(|m| name.contains(m)))
        .map_or(Category::Other, |(category, _)| *category)
}

/// Returns the description of a well-known variable name.
#[must_use]
pub fn describe(name: &str) -> Option<&'static str> {
    DESCRIPTIONS
        .iter()
        .find(|(known, _)| *known == name)
        .map(|(_, text)| *text)
}

/// Returns example values for a well-known variable name.
#[must_use]
pub fn suggested_values(name: &str) -> &'static [&'static str] {
    SUGGESTED_VALUES
        .iter()
        .find(|(known, _)| *known == name)
        .map_or(&[][..], |(_, values)| *values)
}
