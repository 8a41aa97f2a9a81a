//! # Entiform CLI
//!
//! Command-line interface for Entiform.
//!
//! Runs the same filter, sort and validation code as the desktop widgets
//! against JSON files.
//!
//! ## Commands
//!
//! - `query` - Filter and sort a row file, print a table or JSON
//! - `validate` - Validate a draft record; exits non-zero on field errors
//! - `columns` - Show the columns and filterable paths of a schema
//!

pub mod cli;
pub mod commands;
pub mod table;

pub use cli::{Cli, Commands};
pub use commands::{QueryOptions, Validation};

// Re-export dependencies for use in main.rs
pub use entiform_core;
pub use entiform_schema;

/// CLI version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// CLI name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Run a parsed command.
///
/// Returns the text to print and whether the command succeeded.
pub async fn run(command: Commands) -> anyhow::Result<(String, bool)> {
    match command {
        Commands::Query {
            schema,
            rows,
            filters,
            sort,
            limit,
            json,
        } => {
            let options = QueryOptions {
                filters,
                sort,
                limit,
                json,
            };
            Ok((commands::query(&schema, &rows, &options).await?, true))
        }
        Commands::Validate { schema, draft } => {
            let outcome = commands::validate(&schema, &draft)?;
            Ok((outcome.render()?, outcome.is_valid()))
        }
        Commands::Columns { schema } => Ok((commands::columns(&schema)?, true)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
        assert_eq!(NAME, "entiform_cli");
    }
}
