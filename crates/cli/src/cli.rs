//! Command-line definition

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Entiform - query, validate and inspect entity data from the terminal.
///
/// Schemas are JSON objects of `key -> {"kind": ...}` entries; row files
/// are JSON arrays of records.
#[derive(Parser, Debug)]
#[command(name = "entiform")]
#[command(version)]
#[command(about = "Schema-driven entity editor tools")]
pub struct Cli {
    /// Enable debug logging to stderr
    #[arg(short, long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Filter and sort a row file
    Query {
        /// Schema file
        #[arg(long, env = "ENTIFORM_SCHEMA", value_name = "FILE")]
        schema: PathBuf,

        /// Row file (JSON array of records)
        #[arg(long, env = "ENTIFORM_ROWS", value_name = "FILE")]
        rows: PathBuf,

        /// Filter as `path=value`; dates take `from..to`, multiselects a
        /// comma-separated list. Repeatable.
        #[arg(short, long = "filter", value_name = "PATH=VALUE")]
        filters: Vec<String>,

        /// Sort as `key`, `key:asc` or `key:desc`
        #[arg(short, long, value_name = "KEY[:DIR]")]
        sort: Option<String>,

        /// Return at most this many rows
        #[arg(long)]
        limit: Option<usize>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Validate a draft record against a schema
    Validate {
        /// Schema file
        #[arg(long, env = "ENTIFORM_SCHEMA", value_name = "FILE")]
        schema: PathBuf,

        /// Draft file (one JSON record)
        #[arg(long, value_name = "FILE")]
        draft: PathBuf,
    },

    /// Print the table columns and filterable paths of a schema
    Columns {
        /// Schema file
        #[arg(long, env = "ENTIFORM_SCHEMA", value_name = "FILE")]
        schema: PathBuf,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_repeated_filters() {
        let cli = Cli::try_parse_from([
            "entiform", "query", "--schema", "s.json", "--rows", "r.json", "-f", "active=true",
            "-f", "name=al", "--sort", "name:desc",
        ])
        .unwrap();
        match cli.command {
            Commands::Query { filters, sort, .. } => {
                assert_eq!(filters, vec!["active=true", "name=al"]);
                assert_eq!(sort.as_deref(), Some("name:desc"));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }
}
