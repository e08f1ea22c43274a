//! The fixed set of columns that receive indexes.

/// A column that is indexed automatically when a table carries it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecognizedColumn {
    /// Column name as it appears in the table.
    pub name: &'static str,
    /// Prefix length for engines that cannot index variable-length text
    /// without one. Engines that index text in full ignore it.
    pub text_prefix: Option<u16>,
}

/// Columns indexed by [`crate::IndexBackend::ensure_index`], in creation order.
pub const RECOGNIZED_COLUMNS: &[RecognizedColumn] = &[
    // Security code.
    RecognizedColumn {
        name: "ts_code",
        text_prefix: Some(10),
    },
    RecognizedColumn {
        name: "trade_date",
        text_prefix: None,
    },
    // Announcement date.
    RecognizedColumn {
        name: "f_ann_date",
        text_prefix: None,
    },
];

/// Returns the name of the index created for `column` on `table`.
#[must_use]
pub fn index_name(table: &str, column: &str) -> String {
    format!("idx_{table}_{column}")
}

/// Returns the recognized columns present in `columns`, in creation order.
pub fn present_in<'a, S: AsRef<str>>(
    columns: &'a [S],
) -> impl Iterator<Item = &'static RecognizedColumn> + 'a {
    RECOGNIZED_COLUMNS
        .iter()
        .filter(move |rc| columns.iter().any(|c| c.as_ref() == rc.name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn recognized_set() {
        let names: Vec<_> = RECOGNIZED_COLUMNS.iter().map(|c| c.name).collect();
        assert_eq!(names, ["ts_code", "trade_date", "f_ann_date"]);
    }

    #[test]
    fn only_security_code_has_prefix() {
        for column in RECOGNIZED_COLUMNS {
            assert_eq!(column.text_prefix.is_some(), column.name == "ts_code");
        }
    }

    #[test]
    fn present_keeps_creation_order() {
        let columns = ["f_ann_date", "close", "ts_code"];
        let found: Vec<_> = present_in(&columns).map(|c| c.name).collect();
        assert_eq!(found, ["ts_code", "f_ann_date"]);
    }

    #[test]
    fn present_matches_exact_names() {
        let columns = ["TS_CODE", "trade_date_x", "ann_date"];
        assert_eq!(present_in(&columns).count(), 0);
    }

    proptest! {
        #[test]
        fn index_name_is_deterministic(table in "[a-z][a-z0-9_]{0,30}") {
            for column in RECOGNIZED_COLUMNS {
                let name = index_name(&table, column.name);
                prop_assert_eq!(&name, &format!("idx_{}_{}", table, column.name));
                prop_assert_eq!(name, index_name(&table, column.name));
            }
        }
    }
}
