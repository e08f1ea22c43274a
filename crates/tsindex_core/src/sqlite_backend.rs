//! SQLite index backend for embedded database files.

use crate::backend::{IndexBackend, IndexOutcome};
use crate::columns::{index_name, present_in};
use crate::config::SqliteConfig;
use crate::dialect::Dialect;
use crate::error::{IndexError, IndexResult};
use parking_lot::Mutex;
use rusqlite::Connection;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

const DIALECT: Dialect = Dialect::Sqlite;

/// An index backend over an SQLite database file.
///
/// Introspection uses `PRAGMA index_list` and `PRAGMA table_info`. Indexes
/// are created without length prefixes since SQLite indexes text in full.
///
/// # Thread Safety
///
/// The connection sits behind a mutex; concurrent callers are serialized
/// per statement group, not across the whole check-then-create sequence.
///
/// # Example
///
/// ```no_run
/// use tsindex_core::{IndexBackend, SqliteBackend, SqliteConfig};
///
/// let backend = SqliteBackend::open(&SqliteConfig::new("market.db")).unwrap();
/// backend.ensure_index("daily").unwrap();
/// ```
#[derive(Debug)]
pub struct SqliteBackend {
    path: Option<PathBuf>,
    conn: Mutex<Connection>,
}

impl SqliteBackend {
    /// Opens or creates the database file described by `config`.
    ///
    /// # Errors
    ///
    /// Returns [`IndexError::Connection`] if the file cannot be opened or created.
    pub fn open(config: &SqliteConfig) -> IndexResult<Self> {
        Self::open_path(&config.path)
    }

    /// Opens or creates the database file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`IndexError::Connection`] if the file cannot be opened or created.
    pub fn open_path(path: &Path) -> IndexResult<Self> {
        let conn = Connection::open(path)
            .map_err(|e| IndexError::connection(format!("sqlite://{}", path.display()), e))?;
        debug!("Opened sqlite database {:?}", path);

        Ok(Self {
            path: Some(path.to_path_buf()),
            conn: Mutex::new(conn),
        })
    }

    /// Opens a private in-memory database.
    ///
    /// # Errors
    ///
    /// Returns [`IndexError::Connection`] if SQLite cannot allocate the database.
    pub fn open_in_memory() -> IndexResult<Self> {
        let conn = Connection::open_in_memory()
            .map_err(|e| IndexError::connection("sqlite://:memory:", e))?;

        Ok(Self {
            path: None,
            conn: Mutex::new(conn),
        })
    }

    /// Returns the database file path, or `None` for an in-memory database.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}

/// Runs an introspection statement and collects one text field per row.
fn query_field(conn: &Connection, sql: &str, field: usize) -> IndexResult<Vec<String>> {
    let mut stmt = conn.prepare(sql).map_err(|e| IndexError::query(sql, e))?;
    let rows = stmt
        .query_map([], |row| row.get::<_, String>(field))
        .map_err(|e| IndexError::query(sql, e))?;
    let values = rows
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| IndexError::query(sql, e))?;
    Ok(values)
}

impl IndexBackend for SqliteBackend {
    fn engine(&self) -> &'static str {
        "sqlite"
    }

    fn ensure_index(&self, table: &str) -> IndexResult<IndexOutcome> {
        if self.index_exists(table)? {
            info!("Table {} already indexed, skipping", table);
            return Ok(IndexOutcome::AlreadyIndexed);
        }

        let mut conn = self.conn.lock();
        let tx = conn
            .transaction()
            .map_err(|e| IndexError::query("BEGIN", e))?;

        let columns = query_field(&tx, &DIALECT.list_columns(table), DIALECT.column_name_field())?;
        if columns.is_empty() {
            return Err(IndexError::TableNotFound {
                table: table.to_string(),
            });
        }
        debug!("Table {} has columns {:?}", table, columns);

        let mut created = Vec::new();
        for column in present_in(&columns) {
            let sql = DIALECT.create_index(table, column);
            tx.execute(&sql, []).map_err(|e| IndexError::query(&sql, e))?;
            created.push(index_name(table, column.name));
        }

        tx.commit().map_err(|e| IndexError::query("COMMIT", e))?;
        info!("Created {} index(es) on {}: {:?}", created.len(), table, created);

        Ok(IndexOutcome::Created(created))
    }

    fn index_exists(&self, table: &str) -> IndexResult<bool> {
        Ok(!self.list_indexes(table)?.is_empty())
    }

    fn list_indexes(&self, table: &str) -> IndexResult<Vec<String>> {
        let mut conn = self.conn.lock();
        let tx = conn
            .transaction()
            .map_err(|e| IndexError::query("BEGIN", e))?;
        let names = query_field(&tx, &DIALECT.list_indexes(table), DIALECT.index_name_field())?;
        tx.commit().map_err(|e| IndexError::query("COMMIT", e))?;
        Ok(names)
    }
}
