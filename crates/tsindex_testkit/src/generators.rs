//! Property-based test generators using proptest.
//!
//! Provides strategies for table names and column layouts that mix
//! recognized columns with ordinary ones.

use proptest::prelude::*;
use tsindex_core::RECOGNIZED_COLUMNS;

/// Ordinary columns that never receive an index.
pub const PLAIN_COLUMNS: &[&str] = &["close", "open", "vol", "name", "end_date", "ann_date"];

/// A generated table layout.
#[derive(Debug, Clone)]
pub struct TableLayout {
    /// Column definitions in table order, e.g. `"ts_code TEXT"`.
    pub definitions: Vec<String>,
    /// Recognized column names present, in recognized-set order.
    pub recognized: Vec<&'static str>,
}

impl TableLayout {
    /// Column definitions as string slices, for fixture helpers.
    pub fn definition_refs(&self) -> Vec<&str> {
        self.definitions.iter().map(String::as_str).collect()
    }
}

/// Strategy for generating valid table names.
pub fn table_name_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-z][a-z0-9_]{0,23}")
        .expect("Invalid regex")
        .prop_filter("sqlite_ prefix is reserved", |s| !s.starts_with("sqlite_"))
}

/// Strategy for generating table layouts with at least one column.
pub fn table_layout_strategy() -> impl Strategy<Value = TableLayout> {
    (
        prop::collection::vec(any::<bool>(), RECOGNIZED_COLUMNS.len()),
        prop::sample::subsequence(PLAIN_COLUMNS.to_vec(), 0..=PLAIN_COLUMNS.len()),
    )
        .prop_filter("Table must have a column", |(mask, plain)| {
            mask.iter().any(|b| *b) || !plain.is_empty()
        })
        .prop_flat_map(|(mask, plain)| {
            let recognized: Vec<&'static str> = RECOGNIZED_COLUMNS
                .iter()
                .zip(&mask)
                .filter(|(_, keep)| **keep)
                .map(|(column, _)| column.name)
                .collect();
            let names: Vec<&'static str> = recognized.iter().chain(&plain).copied().collect();
            (Just(recognized), Just(names).prop_shuffle())
        })
        .prop_map(|(recognized, names)| TableLayout {
            definitions: names.iter().map(|name| definition(name)).collect(),
            recognized,
        })
}

fn definition(name: &str) -> String {
    let ty = match name {
        "ts_code" | "name" => "VARCHAR(32)",
        n if n.ends_with("date") => "DATE",
        _ => "DOUBLE",
    };
    format!("{name} {ty}")
}
