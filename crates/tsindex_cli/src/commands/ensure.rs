//! Ensure command implementation.

use tracing::info;
use tsindex_core::{IndexBackend, IndexOutcome};

/// Runs the ensure command on each table in order, stopping at the first error.
pub fn run(backend: &dyn IndexBackend, tables: &[String]) -> Result<(), Box<dyn std::error::Error>> {
    info!("Ensuring indexes on {} table(s) via {}", tables.len(), backend.engine());

    for table in tables {
        match backend.ensure_index(table)? {
            IndexOutcome::AlreadyIndexed => println!("{table}: already indexed"),
            IndexOutcome::Created(names) if names.is_empty() => {
                println!("{table}: no recognized columns")
            }
            IndexOutcome::Created(names) => {
                println!("{table}: created {}", names.join(", "))
            }
        }
    }

    Ok(())
}
