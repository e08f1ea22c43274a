//! SQL text for each supported engine.
//!
//! Statements are built here and nowhere else, so the two backends differ
//! only in which [`Dialect`] they hold.

use crate::columns::{index_name, RecognizedColumn};

/// The SQL dialect of a backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    /// MySQL: backtick identifiers, `SHOW` introspection, text prefixes.
    MySql,
    /// SQLite: double-quoted identifiers, `PRAGMA` introspection.
    Sqlite,
}

impl Dialect {
    /// Quotes an identifier, doubling any embedded quote character.
    #[must_use]
    pub fn quote(self, ident: &str) -> String {
        let q = match self {
            Self::MySql => '`',
            Self::Sqlite => '"',
        };
        let mut out = String::with_capacity(ident.len() + 2);
        out.push(q);
        for ch in ident.chars() {
            if ch == q {
                out.push(q);
            }
            out.push(ch);
        }
        out.push(q);
        out
    }

    /// Statement listing the indexes on `table`, one or more rows per index.
    #[must_use]
    pub fn list_indexes(self, table: &str) -> String {
        match self {
            Self::MySql => format!("SHOW INDEX FROM {}", self.quote(table)),
            Self::Sqlite => format!("PRAGMA index_list({})", self.quote(table)),
        }
    }

    /// Statement listing the columns of `table`, one row per column.
    #[must_use]
    pub fn list_columns(self, table: &str) -> String {
        match self {
            Self::MySql => format!("SHOW COLUMNS FROM {}", self.quote(table)),
            Self::Sqlite => format!("PRAGMA table_info({})", self.quote(table)),
        }
    }

    /// Position of the index name in a row of [`Dialect::list_indexes`].
    #[must_use]
    pub const fn index_name_field(self) -> usize {
        match self {
            // Table, Non_unique, Key_name, ...
            Self::MySql => 2,
            // seq, name, unique, origin, partial
            Self::Sqlite => 1,
        }
    }

    /// Position of the column name in a row of [`Dialect::list_columns`].
    #[must_use]
    pub const fn column_name_field(self) -> usize {
        match self {
            // Field, Type, Null, Key, Default, Extra
            Self::MySql => 0,
            // cid, name, type, notnull, dflt_value, pk
            Self::Sqlite => 1,
        }
    }

    /// `CREATE INDEX` statement for a recognized column on `table`.
    #[must_use]
    pub fn create_index(self, table: &str, column: &RecognizedColumn) -> String {
        let target = match (self, column.text_prefix) {
            (Self::MySql, Some(len)) => format!("{}({len})", self.quote(column.name)),
            _ => self.quote(column.name),
        };
        format!(
            "CREATE INDEX {} ON {}({target})",
            self.quote(&index_name(table, column.name)),
            self.quote(table),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::columns::RECOGNIZED_COLUMNS;

    #[test]
    fn quote_plain() {
        assert_eq!(Dialect::MySql.quote("daily"), "`daily`");
        assert_eq!(Dialect::Sqlite.quote("daily"), "\"daily\"");
    }

    #[test]
    fn quote_escapes_embedded_quote() {
        assert_eq!(Dialect::MySql.quote("a`b"), "`a``b`");
        assert_eq!(Dialect::Sqlite.quote("a\"b"), "\"a\"\"b\"");
        assert_eq!(Dialect::Sqlite.quote("a`b"), "\"a`b\"");
    }

    #[test]
    fn introspection_statements() {
        assert_eq!(Dialect::MySql.list_indexes("daily"), "SHOW INDEX FROM `daily`");
        assert_eq!(Dialect::MySql.list_columns("daily"), "SHOW COLUMNS FROM `daily`");
        assert_eq!(
            Dialect::Sqlite.list_indexes("daily"),
            "PRAGMA index_list(\"daily\")"
        );
        assert_eq!(
            Dialect::Sqlite.list_columns("daily"),
            "PRAGMA table_info(\"daily\")"
        );
    }

    #[test]
    fn mysql_prefixes_security_code() {
        let sql: Vec<_> = RECOGNIZED_COLUMNS
            .iter()
            .map(|c| Dialect::MySql.create_index("daily", c))
            .collect();
        assert_eq!(
            sql,
            [
                "CREATE INDEX `idx_daily_ts_code` ON `daily`(`ts_code`(10))",
                "CREATE INDEX `idx_daily_trade_date` ON `daily`(`trade_date`)",
                "CREATE INDEX `idx_daily_f_ann_date` ON `daily`(`f_ann_date`)",
            ]
        );
    }

    #[test]
    fn sqlite_never_prefixes() {
        let sql: Vec<_> = RECOGNIZED_COLUMNS
            .iter()
            .map(|c| Dialect::Sqlite.create_index("daily", c))
            .collect();
        assert_eq!(
            sql,
            [
                "CREATE INDEX \"idx_daily_ts_code\" ON \"daily\"(\"ts_code\")",
                "CREATE INDEX \"idx_daily_trade_date\" ON \"daily\"(\"trade_date\")",
                "CREATE INDEX \"idx_daily_f_ann_date\" ON \"daily\"(\"f_ann_date\")",
            ]
        );
    }
}
