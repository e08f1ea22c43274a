//! # tsindex core
//!
//! Ensures query indexes exist on market-data tables before they are
//! queried in bulk.
//!
//! Given a table name, a backend checks whether the table has any index. If
//! it has none, the backend reads the table's columns and creates one index
//! per recognized column present: `ts_code`, `trade_date` and `f_ann_date`.
//! Indexes are named `idx_{table}_{column}`.
//!
//! ## Available Backends
//!
//! - [`MySqlBackend`] - client-server MySQL (feature `mysql`)
//! - [`SqliteBackend`] - embedded SQLite file (feature `sqlite`)
//!
//! ## Example
//!
//! ```rust
//! # #[cfg(feature = "sqlite")]
//! # {
//! use tsindex_core::{IndexBackend, SqliteBackend};
//!
//! let backend = SqliteBackend::open_in_memory().unwrap();
//! let err = backend.ensure_index("daily").unwrap_err();
//! assert!(err.is_query());
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod backend;
mod columns;
mod config;
mod dialect;
mod error;
#[cfg(feature = "mysql")]
mod mysql_backend;
#[cfg(feature = "sqlite")]
mod sqlite_backend;

pub use backend::{open_backend, IndexBackend, IndexOutcome};
pub use columns::{index_name, RecognizedColumn, RECOGNIZED_COLUMNS};
pub use config::{DatabaseConfig, MySqlConfig, SqliteConfig, DEFAULT_MYSQL_PORT};
pub use dialect::Dialect;
pub use error::{EngineError, IndexError, IndexResult};
#[cfg(feature = "mysql")]
pub use mysql_backend::MySqlBackend;
#[cfg(feature = "sqlite")]
pub use sqlite_backend::SqliteBackend;

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
