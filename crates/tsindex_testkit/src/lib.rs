//! # tsindex testkit
//!
//! Test utilities for tsindex.
//!
//! This crate provides:
//! - SQLite fixtures backed by a temporary file
//! - Live MySQL fixtures, enabled by `TSINDEX_MYSQL_CONFIG`
//! - Property-based test generators using proptest
//!
//! ## Usage
//!
//! ```rust
//! use tsindex_testkit::prelude::*;
//!
//! let db = TestSqlite::new();
//! db.create_table("daily", &["ts_code TEXT", "trade_date DATE"]);
//! db.ensure_index("daily").unwrap();
//! assert_eq!(db.index_names("daily").len(), 2);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod fixtures;
pub mod generators;
pub mod live;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::fixtures::*;
    pub use crate::generators::*;
    pub use crate::live::*;
    pub use tsindex_core::{IndexBackend, IndexError, IndexOutcome};
}

pub use fixtures::*;
pub use generators::*;
pub use live::*;
