//! Live MySQL fixtures.
//!
//! MySQL tests need a running server. They are enabled by pointing
//! `TSINDEX_MYSQL_CONFIG` at a JSON configuration file and are skipped
//! otherwise:
//!
//! ```json
//! {"database_config": {"backend": "mysql", "host": "127.0.0.1", "port": 3306,
//!   "user": "root", "password": "secret", "database": "tsindex_test"}}
//! ```

use mysql::prelude::Queryable;
use mysql::{Conn, OptsBuilder};
use std::cell::RefCell;
use std::path::PathBuf;
use tsindex_core::{DatabaseConfig, MySqlBackend, MySqlConfig};

/// Environment variable naming the MySQL configuration file.
pub const MYSQL_CONFIG_ENV: &str = "TSINDEX_MYSQL_CONFIG";

/// Reads the MySQL configuration named by [`MYSQL_CONFIG_ENV`].
///
/// Returns `None` when the variable is unset.
///
/// # Panics
///
/// Panics if the variable is set but the file is not a valid MySQL configuration.
pub fn mysql_config_from_env() -> Option<MySqlConfig> {
    let path = PathBuf::from(std::env::var_os(MYSQL_CONFIG_ENV)?);
    match DatabaseConfig::from_json_file(&path).expect("Failed to read MySQL test config") {
        DatabaseConfig::MySql(config) => Some(config),
        other => panic!("{MYSQL_CONFIG_ENV} must name a mysql config, got {other:?}"),
    }
}

/// A MySQL database with a raw setup connection.
///
/// Tables created through [`TestMySql::create_table`] are dropped when the
/// fixture is dropped.
pub struct TestMySql {
    /// The backend under test.
    pub backend: MySqlBackend,
    conn: RefCell<Conn>,
    tables: RefCell<Vec<String>>,
}

impl TestMySql {
    /// Connects to the configured server, or returns `None` when no server is configured.
    pub fn from_env() -> Option<Self> {
        let config = mysql_config_from_env()?;
        Some(Self::connect(&config))
    }

    /// Connects to the server described by `config`.
    pub fn connect(config: &MySqlConfig) -> Self {
        let backend = MySqlBackend::connect(config).expect("Failed to connect backend");
        let opts = OptsBuilder::new()
            .ip_or_hostname(Some(config.host.as_str()))
            .tcp_port(config.port)
            .user(Some(config.user.as_str()))
            .pass(Some(config.password.as_str()))
            .db_name(Some(config.database.as_str()));
        let conn = Conn::new(opts).expect("Failed to open raw connection");

        Self {
            backend,
            conn: RefCell::new(conn),
            tables: RefCell::new(Vec::new()),
        }
    }

    /// Creates `table` with the given column definitions, replacing any
    /// table of the same name.
    pub fn create_table(&self, table: &str, columns: &[&str]) {
        self.execute(&format!("DROP TABLE IF EXISTS `{}`", table));
        self.execute(&format!("CREATE TABLE `{}` ({})", table, columns.join(", ")));
        self.tables.borrow_mut().push(table.to_string());
    }

    /// Creates an index directly, bypassing the backend.
    pub fn create_raw_index(&self, name: &str, table: &str, column: &str) {
        self.execute(&format!("CREATE INDEX `{}` ON `{}`(`{}`)", name, table, column));
    }

    /// Returns the distinct index names on `table`, sorted.
    pub fn index_names(&self, table: &str) -> Vec<String> {
        let mut names: Vec<String> = self
            .conn
            .borrow_mut()
            .query_map(
                format!("SHOW INDEX FROM `{}`", table),
                |row: mysql::Row| row.get::<String, _>("Key_name").unwrap_or_default(),
            )
            .expect("Failed to list indexes");
        names.sort();
        names.dedup();
        names
    }

    /// Returns the prefix length of index `name` on `table`, if any.
    pub fn index_prefix(&self, table: &str, name: &str) -> Option<u32> {
        let rows: Vec<mysql::Row> = self
            .conn
            .borrow_mut()
            .query(format!("SHOW INDEX FROM `{}`", table))
            .expect("Failed to list indexes");
        rows.into_iter()
            .find(|row| row.get::<String, _>("Key_name").as_deref() == Some(name))
            .and_then(|row| row.get::<Option<u32>, _>("Sub_part").flatten())
    }

    fn execute(&self, sql: &str) {
        self.conn
            .borrow_mut()
            .query_drop(sql)
            .unwrap_or_else(|e| panic!("Failed to execute {sql}: {e}"));
    }
}

impl std::ops::Deref for TestMySql {
    type Target = MySqlBackend;

    fn deref(&self) -> &Self::Target {
        &self.backend
    }
}

impl Drop for TestMySql {
    fn drop(&mut self) {
        let tables = std::mem::take(self.tables.get_mut());
        for table in tables {
            let _ = self
                .conn
                .get_mut()
                .query_drop(format!("DROP TABLE IF EXISTS `{}`", table));
        }
    }
}
