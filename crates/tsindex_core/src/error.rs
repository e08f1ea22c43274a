//! Error types for index operations.

use std::io;
use thiserror::Error;

/// Result type for index operations.
pub type IndexResult<T> = Result<T, IndexError>;

/// Boxed engine error carried as the source of connection and query failures.
pub type EngineError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors that can occur while ensuring indexes.
///
/// Engine errors are never translated: the driver's error is kept verbatim
/// as the `source` of [`IndexError::Connection`] or [`IndexError::Query`].
#[derive(Debug, Error)]
pub enum IndexError {
    /// The connection resource could not be established.
    #[error("failed to connect to {target}: {source}")]
    Connection {
        /// Redacted description of the connection target.
        target: String,
        /// The underlying driver error.
        #[source]
        source: EngineError,
    },

    /// An introspection or DDL statement failed.
    #[error("query failed: {sql}: {source}")]
    Query {
        /// The statement that failed.
        sql: String,
        /// The underlying driver error.
        #[source]
        source: EngineError,
    },

    /// The table does not exist.
    ///
    /// Raised where the engine reports a missing table as an empty
    /// introspection result rather than failing.
    #[error("table not found: {table}")]
    TableNotFound {
        /// Name of the table.
        table: String,
    },

    /// The configuration could not be parsed.
    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),

    /// An I/O error occurred while reading configuration.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl IndexError {
    /// Returns true for failures raised while establishing a connection.
    #[must_use]
    pub fn is_connection(&self) -> bool {
        matches!(self, Self::Connection { .. })
    }

    /// Returns true for failures raised by introspection or DDL.
    #[must_use]
    pub fn is_query(&self) -> bool {
        matches!(self, Self::Query { .. } | Self::TableNotFound { .. })
    }

    pub(crate) fn connection(
        target: impl Into<String>,
        source: impl Into<EngineError>,
    ) -> Self {
        Self::Connection {
            target: target.into(),
            source: source.into(),
        }
    }

    pub(crate) fn query(sql: impl Into<String>, source: impl Into<EngineError>) -> Self {
        Self::Query {
            sql: sql.into(),
            source: source.into(),
        }
    }
}
