//! Indexes command implementation.

use serde::Serialize;
use tsindex_core::IndexBackend;

/// Indexes present on one table.
#[derive(Debug, Serialize)]
pub struct IndexListing {
    /// Table name.
    pub table: String,
    /// Index names in engine order.
    pub indexes: Vec<String>,
}

/// Runs the indexes command.
pub fn run(
    backend: &dyn IndexBackend,
    table: &str,
    format: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let listing = IndexListing {
        table: table.to_string(),
        indexes: backend.list_indexes(table)?,
    };

    match format {
        "json" => println!("{}", serde_json::to_string_pretty(&listing)?),
        "text" => {
            if listing.indexes.is_empty() {
                println!("{}: no indexes", listing.table);
            }
            for name in &listing.indexes {
                println!("{name}");
            }
        }
        other => return Err(format!("Unknown format: {other}").into()),
    }

    Ok(())
}
