//! # Entiform Core
//!
//! Core types, traits, and error handling for Entiform.
//!
//! This crate provides the foundational building blocks used throughout
//! the workspace, including:
//!
//! - **Types**: the untyped `Row` record and value conversions
//! - **Paths**: dotted `FieldPath` addressing for nested records
//! - **Traits**: `Validatable` and `Persistable`
//! - **Errors**: unified error handling with `EditorError` and `EditorResult`
//!

pub mod error;
pub mod path;
pub mod traits;
pub mod types;

// Re-export commonly used items at crate root
pub use error::{EditorError, EditorResult, FieldErrors};
pub use path::{FieldPath, get_path, set_path};
pub use traits::{Persistable, Validatable};
pub use types::{Row, is_blank, row_from_value, value_as_f64, value_to_string, values_match};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
