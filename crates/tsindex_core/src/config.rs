//! Connection parameters for each backend.

use crate::error::IndexResult;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Default MySQL server port.
pub const DEFAULT_MYSQL_PORT: u16 = 3306;

/// Connection parameters for a MySQL server.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MySqlConfig {
    /// Server host name or address.
    pub host: String,
    /// Server TCP port.
    #[serde(default = "default_port")]
    pub port: u16,
    /// User name.
    pub user: String,
    /// Password.
    #[serde(default)]
    pub password: String,
    /// Database (schema) name.
    pub database: String,
}

fn default_port() -> u16 {
    DEFAULT_MYSQL_PORT
}

impl Default for MySqlConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: DEFAULT_MYSQL_PORT,
            user: "root".to_string(),
            password: String::new(),
            database: String::new(),
        }
    }
}

impl MySqlConfig {
    /// Creates a configuration for `database` on localhost with default values.
    pub fn new(database: impl Into<String>) -> Self {
        Self {
            database: database.into(),
            ..Self::default()
        }
    }

    /// Sets the server host.
    #[must_use]
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Sets the server port.
    #[must_use]
    pub const fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Sets the user and password.
    #[must_use]
    pub fn with_credentials(mut self, user: impl Into<String>, password: impl Into<String>) -> Self {
        self.user = user.into();
        self.password = password.into();
        self
    }

    /// Connection URL with the password masked, for logs and errors.
    #[must_use]
    pub fn redacted_url(&self) -> String {
        format!(
            "mysql://{}:***@{}:{}/{}",
            self.user, self.host, self.port, self.database
        )
    }
}

/// Connection parameters for an SQLite database file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SqliteConfig {
    /// Path to the database file. Created if missing.
    pub path: PathBuf,
}

impl SqliteConfig {
    /// Creates a configuration for the file at `path`.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

/// Connection parameters for either backend.
///
/// Deserializes from a JSON object tagged by `backend`:
///
/// ```rust
/// use tsindex_core::DatabaseConfig;
///
/// let config: DatabaseConfig = serde_json::from_str(
///     r#"{"backend": "sqlite", "path": "market.db"}"#,
/// ).unwrap();
/// assert!(matches!(config, DatabaseConfig::Sqlite(_)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "backend", rename_all = "lowercase")]
pub enum DatabaseConfig {
    /// A MySQL server.
    MySql(MySqlConfig),
    /// An SQLite file.
    Sqlite(SqliteConfig),
}

impl DatabaseConfig {
    /// Shorthand for an SQLite configuration.
    pub fn sqlite(path: impl AsRef<Path>) -> Self {
        Self::Sqlite(SqliteConfig::new(path))
    }

    /// Describes the connection target without credentials.
    #[must_use]
    pub fn target(&self) -> String {
        match self {
            Self::MySql(cfg) => cfg.redacted_url(),
            Self::Sqlite(cfg) => format!("sqlite://{}", cfg.path.display()),
        }
    }

    /// Reads a configuration from a JSON file.
    ///
    /// The file holds either the configuration object itself or an object
    /// with the configuration under a `database_config` key.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_json_file(path: &Path) -> IndexResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Parses a configuration from JSON text. See [`Self::from_json_file`].
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a valid configuration.
    pub fn from_json_str(text: &str) -> IndexResult<Self> {
        let mut value: serde_json::Value = serde_json::from_str(text)?;
        if let Some(nested) = value.get_mut("database_config") {
            value = nested.take();
        }
        Ok(serde_json::from_value(value)?)
    }
}
