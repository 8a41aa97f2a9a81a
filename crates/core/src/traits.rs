//! Core traits for Entiform
//!
//! This module defines the traits shared across the workspace: structural
//! validation of configuration (schemas) and JSON file persistence for the
//! schema and row documents the command line works with.

use crate::error::{EditorError, EditorResult};
use serde::{Serialize, de::DeserializeOwned};

// ============================================================================
// Validatable Trait
// ============================================================================

/// Trait for types that can check their own structural consistency
///
/// # Example
///
/// ```rust,ignore
/// use entiform_core::{Validatable, EditorResult, EditorError};
///
/// struct Column {
///     key: String,
/// }
///
/// impl Validatable for Column {
///     fn validate(&self) -> EditorResult<()> {
///         if self.key.is_empty() {
///             return Err(EditorError::validation("Column key cannot be empty"));
///         }
///         Ok(())
///     }
/// }
/// ```
pub trait Validatable {
    /// Validate the current state of the object
    fn validate(&self) -> EditorResult<()>;

    /// Check if the object is valid without returning error details
    fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }
}

// ============================================================================
// Persistable Trait
// ============================================================================

/// Trait for documents stored as JSON files
pub trait Persistable: Serialize + DeserializeOwned + Sized {
    /// Save to a pretty JSON string
    fn to_json(&self) -> EditorResult<String> {
        serde_json::to_string_pretty(self).map_err(Into::into)
    }

    /// Load from a JSON string
    fn from_json(json: &str) -> EditorResult<Self> {
        serde_json::from_str(json).map_err(Into::into)
    }

    /// Save to a file
    fn save_to_file(&self, path: &std::path::Path) -> EditorResult<()> {
        let json = self.to_json()?;
        std::fs::write(path, json).map_err(|e| EditorError::FileWrite {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Load from a file
    fn load_from_file(path: &std::path::Path) -> EditorResult<Self> {
        let json = std::fs::read_to_string(path).map_err(|e| EditorError::FileRead {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::from_json(&json)
    }
}

// ============================================================================
// Tests
// ============================================================================
