//! Columns command implementation.

use tsindex_core::{Dialect, RECOGNIZED_COLUMNS};

/// Prints the recognized columns and the MySQL index target for each.
pub fn run() {
    for column in RECOGNIZED_COLUMNS {
        let prefix = column
            .text_prefix
            .map_or_else(|| "-".to_string(), |len| len.to_string());
        println!(
            "{:<12} prefix {:<3} {}",
            column.name,
            prefix,
            Dialect::MySql.create_index("<table>", column)
        );
    }
}
