//! tsindex CLI
//!
//! Command-line tool that ensures query indexes exist on market-data tables.
//!
//! # Commands
//!
//! - `ensure` - Create recognized indexes on tables that have none
//! - `indexes` - List the indexes on a table
//! - `columns` - Show the recognized column set

mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use tsindex_core::{open_backend, DatabaseConfig, IndexBackend};

/// Ensures query indexes on MySQL and SQLite tables.
#[derive(Parser)]
#[command(name = "tsindex")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// JSON connection configuration file
    #[arg(global = true, short, long, conflicts_with = "sqlite")]
    config: Option<PathBuf>,

    /// SQLite database file (shorthand for a sqlite config)
    #[arg(global = true, long)]
    sqlite: Option<PathBuf>,

    /// Enable verbose output
    #[arg(global = true, short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create recognized indexes on each table that has no index yet
    Ensure {
        /// Tables to process, in order
        #[arg(required = true)]
        tables: Vec<String>,
    },

    /// List the indexes on a table
    Indexes {
        /// Table to inspect
        table: String,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Show the recognized column set
    Columns,

    /// Show version information
    Version,
}

impl Cli {
    fn backend(&self) -> Result<Box<dyn IndexBackend>, Box<dyn std::error::Error>> {
        let config = match (&self.config, &self.sqlite) {
            (Some(path), _) => DatabaseConfig::from_json_file(path)?,
            (None, Some(path)) => DatabaseConfig::sqlite(path),
            (None, None) => return Err("Either --config or --sqlite is required".into()),
        };
        Ok(open_backend(&config)?)
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match &cli.command {
        Commands::Ensure { tables } => {
            let backend = cli.backend()?;
            commands::ensure::run(backend.as_ref(), tables)?;
        }
        Commands::Indexes { table, format } => {
            let backend = cli.backend()?;
            commands::indexes::run(backend.as_ref(), table, format)?;
        }
        Commands::Columns => commands::columns::run(),
        Commands::Version => {
            println!("tsindex CLI v{}", env!("CARGO_PKG_VERSION"));
            println!("tsindex core v{}", tsindex_core::VERSION);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_ensure_with_sqlite() {
        let cli = Cli::parse_from(["tsindex", "--sqlite", "market.db", "ensure", "daily", "weekly"]);
        assert_eq!(cli.sqlite, Some(PathBuf::from("market.db")));
        match cli.command {
            Commands::Ensure { tables } => assert_eq!(tables, ["daily", "weekly"]),
            _ => panic!("expected ensure"),
        }
    }

    #[test]
    fn config_and_sqlite_conflict() {
        let result = Cli::try_parse_from([
            "tsindex", "--config", "c.json", "--sqlite", "a.db", "columns",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn backend_requires_target() {
        let cli = Cli::parse_from(["tsindex", "columns"]);
        assert!(cli.backend().is_err());
    }
}
