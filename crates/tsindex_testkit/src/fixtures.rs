//! SQLite test fixtures.
//!
//! A [`TestSqlite`] pairs a backend with a second raw connection to the same
//! file, so tests can build tables and inspect indexes without going through
//! the code under test.

use rusqlite::Connection;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tsindex_core::SqliteBackend;

/// An SQLite database in a temporary directory with automatic cleanup.
pub struct TestSqlite {
    /// The backend under test.
    pub backend: SqliteBackend,
    /// Raw connection used for setup and inspection.
    pub conn: Connection,
    path: PathBuf,
    /// The temporary directory (kept alive to prevent cleanup).
    _temp_dir: TempDir,
}

impl TestSqlite {
    /// Creates a new file-based test database.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let path = temp_dir.path().join("market.db");

        let backend = SqliteBackend::open_path(&path).expect("Failed to open sqlite backend");
        let conn = Connection::open(&path).expect("Failed to open raw connection");

        Self {
            backend,
            conn,
            path,
            _temp_dir: temp_dir,
        }
    }

    /// Returns the database file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Creates `table` with the given column definitions, e.g. `"ts_code TEXT"`.
    pub fn create_table(&self, table: &str, columns: &[&str]) {
        let sql = format!("CREATE TABLE \"{}\" ({})", table, columns.join(", "));
        self.conn.execute(&sql, []).expect("Failed to create table");
    }

    /// Creates an index directly, bypassing the backend.
    pub fn create_raw_index(&self, name: &str, table: &str, column: &str) {
        let sql = format!("CREATE INDEX \"{}\" ON \"{}\"(\"{}\")", name, table, column);
        self.conn.execute(&sql, []).expect("Failed to create index");
    }

    /// Returns the index names on `table`, sorted.
    pub fn index_names(&self, table: &str) -> Vec<String> {
        let mut stmt = self
            .conn
            .prepare(&format!("PRAGMA index_list(\"{}\")", table))
            .expect("Failed to prepare index_list");
        let mut names: Vec<String> = stmt
            .query_map([], |row| row.get::<_, String>(1))
            .expect("Failed to list indexes")
            .collect::<Result<_, _>>()
            .expect("Failed to read index row");
        names.sort();
        names
    }

    /// Returns the indexed column names of index `name`.
    pub fn index_columns(&self, name: &str) -> Vec<String> {
        let mut stmt = self
            .conn
            .prepare(&format!("PRAGMA index_info(\"{}\")", name))
            .expect("Failed to prepare index_info");
        let columns: Vec<String> = stmt
            .query_map([], |row| row.get::<_, String>(2))
            .expect("Failed to read index info")
            .collect::<Result<_, _>>()
            .expect("Failed to read index info row");
        columns
    }
}

impl Default for TestSqlite {
    fn default() -> Self {
        Self::new()
    }
}

impl std::ops::Deref for TestSqlite {
    type Target = SqliteBackend;

    fn deref(&self) -> &Self::Target {
        &self.backend
    }
}

/// Runs a test with a temporary SQLite database.
pub fn with_temp_sqlite<F, R>(f: F) -> R
where
    F: FnOnce(&TestSqlite) -> R,
{
    let db = TestSqlite::new();
    f(&db)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tsindex_core::IndexBackend;

    #[test]
    fn test_sqlite_file_exists() {
        let db = TestSqlite::new();
        assert!(db.path().exists());
        assert_eq!(db.backend.path(), Some(db.path()));
    }

    #[test]
    fn test_raw_connection_sees_backend_indexes() {
        with_temp_sqlite(|db| {
            db.create_table("daily", &["trade_date DATE"]);
            db.ensure_index("daily").unwrap();

            assert_eq!(db.index_names("daily"), ["idx_daily_trade_date"]);
            assert_eq!(db.index_columns("idx_daily_trade_date"), ["trade_date"]);
        });
    }

    #[test]
    fn test_raw_index() {
        let db = TestSqlite::new();
        db.create_table("daily", &["close REAL"]);
        db.create_raw_index("manual", "daily", "close");

        assert_eq!(db.index_names("daily"), ["manual"]);
        assert!(db.index_exists("daily").unwrap());
    }
}
