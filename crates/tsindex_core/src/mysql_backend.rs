//! MySQL index backend for client-server databases.

use crate::backend::{IndexBackend, IndexOutcome};
use crate::columns::{index_name, present_in};
use crate::config::MySqlConfig;
use crate::dialect::Dialect;
use crate::error::{IndexError, IndexResult};
use mysql::prelude::Queryable;
use mysql::{OptsBuilder, Pool, PooledConn, Row, TxOpts};
use tracing::{debug, info};

const DIALECT: Dialect = Dialect::MySql;

/// An index backend over a MySQL database.
///
/// Introspection uses `SHOW INDEX` and `SHOW COLUMNS`. The security-code
/// column is indexed on its first 10 characters because MySQL requires an
/// explicit length to index variable-length text.
///
/// # Transactions
///
/// Each unit of work checks out a pooled connection and runs inside a
/// transaction. MySQL commits DDL implicitly, so indexes created before a
/// failing statement in the same call are not rolled back.
///
/// # Example
///
/// ```no_run
/// use tsindex_core::{IndexBackend, MySqlBackend, MySqlConfig};
///
/// let config = MySqlConfig::new("tushare").with_credentials("root", "secret");
/// let backend = MySqlBackend::connect(&config).unwrap();
/// backend.ensure_index("daily").unwrap();
/// ```
pub struct MySqlBackend {
    target: String,
    pool: Pool,
}

impl std::fmt::Debug for MySqlBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MySqlBackend")
            .field("target", &self.target)
            .finish_non_exhaustive()
    }
}

impl MySqlBackend {
    /// Connects to the server described by `config`.
    ///
    /// One connection is checked out and returned to the pool before this
    /// returns, so bad credentials or an unreachable host fail here.
    ///
    /// # Errors
    ///
    /// Returns [`IndexError::Connection`] if the server cannot be reached or
    /// rejects the credentials.
    pub fn connect(config: &MySqlConfig) -> IndexResult<Self> {
        let target = config.redacted_url();
        let opts = OptsBuilder::new()
            .ip_or_hostname(Some(config.host.as_str()))
            .tcp_port(config.port)
            .user(Some(config.user.as_str()))
            .pass(Some(config.password.as_str()))
            .db_name(Some(config.database.as_str()));

        let pool = Pool::new(opts).map_err(|e| IndexError::connection(&target, e))?;
        let backend = Self { target, pool };
        drop(backend.conn()?);
        debug!("Connected to {}", backend.target);

        Ok(backend)
    }

    /// Returns the connection target with the password masked.
    #[must_use]
    pub fn target(&self) -> &str {
        &self.target
    }

    fn conn(&self) -> IndexResult<PooledConn> {
        self.pool
            .get_conn()
            .map_err(|e| IndexError::connection(&self.target, e))
    }
}

/// Collects one text field from each row, failing on a missing or non-text value.
fn text_field(rows: Vec<Row>, field: usize, sql: &str) -> IndexResult<Vec<String>> {
    rows.into_iter()
        .map(|mut row| match row.take_opt::<String, _>(field) {
            Some(Ok(value)) => Ok(value),
            Some(Err(e)) => Err(IndexError::query(sql, e)),
            None => Err(IndexError::query(sql, format!("row has no field {field}"))),
        })
        .collect()
}

/// Removes repeated names, keeping first-seen order.
///
/// `SHOW INDEX` returns one row per indexed column, so a composite index
/// appears once per column.
fn distinct(names: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(names.len());
    for name in names {
        if !out.contains(&name) {
            out.push(name);
        }
    }
    out
}

impl IndexBackend for MySqlBackend {
    fn engine(&self) -> &'static str {
        "mysql"
    }

    fn ensure_index(&self, table: &str) -> IndexResult<IndexOutcome> {
        if self.index_exists(table)? {
            info!("Table {} already indexed, skipping", table);
            return Ok(IndexOutcome::AlreadyIndexed);
        }

        let mut conn = self.conn()?;
        let mut tx = conn
            .start_transaction(TxOpts::default())
            .map_err(|e| IndexError::query("START TRANSACTION", e))?;

        let sql = DIALECT.list_columns(table);
        let rows: Vec<Row> = tx.query(&sql).map_err(|e| IndexError::query(&sql, e))?;
        let columns = text_field(rows, DIALECT.column_name_field(), &sql)?;
        debug!("Table {} has columns {:?}", table, columns);

        let mut created = Vec::new();
        for column in present_in(&columns) {
            let sql = DIALECT.create_index(table, column);
            tx.query_drop(&sql).map_err(|e| IndexError::query(&sql, e))?;
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
        let mut conn = self.conn()?;
        let mut tx = conn
            .start_transaction(TxOpts::default())
            .map_err(|e| IndexError::query("START TRANSACTION", e))?;

        let sql = DIALECT.list_indexes(table);
        let rows: Vec<Row> = tx.query(&sql).map_err(|e| IndexError::query(&sql, e))?;
        let names = distinct(text_field(rows, DIALECT.index_name_field(), &sql)?);

        tx.commit().map_err(|e| IndexError::query("COMMIT", e))?;
        Ok(names)
    }
}
