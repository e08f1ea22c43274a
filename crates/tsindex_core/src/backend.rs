//! Index backend trait definition.

use crate::config::DatabaseConfig;
use crate::error::IndexResult;

/// What a call to [`IndexBackend::ensure_index`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndexOutcome {
    /// The table already had at least one index; nothing was issued.
    AlreadyIndexed,
    /// Indexes were created, in creation order. May be empty when the table
    /// carries none of the recognized columns.
    Created(Vec<String>),
}

impl IndexOutcome {
    /// Names of the indexes created by this call.
    #[must_use]
    pub fn created(&self) -> &[String] {
        match self {
            Self::AlreadyIndexed => &[],
            Self::Created(names) => names,
        }
    }
}

/// A database that can ensure the recognized indexes exist on a table.
///
/// Implementors own a connection resource that is established when they are
/// constructed. Every call re-reads the table's live state; nothing is cached.
///
/// # Invariants
///
/// - `ensure_index` is idempotent: a second call on the same table issues no DDL
/// - Created indexes are named `idx_{table}_{column}`
/// - Each call runs its statements inside a scoped transaction
/// - Backends must be `Send + Sync`
///
/// # Limitations
///
/// The existence check is coarse. A table carrying any index at all, even
/// one unrelated to the recognized columns, is skipped entirely. The check
/// and the DDL run in separate transactions, so two concurrent callers may
/// both pass the check.
///
/// # Implementors
///
/// - [`crate::MySqlBackend`] - client-server MySQL
/// - [`crate::SqliteBackend`] - embedded SQLite file
pub trait IndexBackend: Send + Sync {
    /// Short engine name used in logs.
    fn engine(&self) -> &'static str;

    /// Creates an index for each recognized column present in `table`,
    /// unless the table already has any index.
    ///
    /// # Errors
    ///
    /// Returns a query error if:
    /// - The table does not exist
    /// - The name is malformed or privileges are insufficient
    /// - The connection is lost
    ///
    /// Statements already issued by the failing call are rolled back where
    /// the engine supports transactional DDL.
    fn ensure_index(&self, table: &str) -> IndexResult<IndexOutcome>;

    /// Returns true if `table` has one or more indexes of any kind.
    ///
    /// # Errors
    ///
    /// Returns a query error if introspection fails.
    fn index_exists(&self, table: &str) -> IndexResult<bool>;

    /// Returns the distinct index names on `table`.
    ///
    /// # Errors
    ///
    /// Returns a query error if introspection fails.
    fn list_indexes(&self, table: &str) -> IndexResult<Vec<String>>;
}

/// Opens the backend described by `config`.
///
/// The connection is established before this returns.
///
/// # Errors
///
/// Returns [`crate::IndexError::Connection`] if the connection cannot be
/// established.
pub fn open_backend(config: &DatabaseConfig) -> IndexResult<Box<dyn IndexBackend>> {
    match config {
        #[cfg(feature = "mysql")]
        DatabaseConfig::MySql(cfg) => Ok(Box::new(crate::MySqlBackend::connect(cfg)?)),
        #[cfg(feature = "sqlite")]
        DatabaseConfig::Sqlite(cfg) => Ok(Box::new(crate::SqliteBackend::open(cfg)?)),
        #[allow(unreachable_patterns)]
        other => Err(crate::IndexError::connection(
            other.target(),
            "backend support not compiled in",
        )),
    }
}
