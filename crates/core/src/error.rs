//! Error types for Entiform
//!
//! This module provides unified error handling across the editor toolkit:
//! form validation failures, path and schema problems, provider failures,
//! and the IO/serialization errors raised while loading schema and row files.

use indexmap::IndexMap;
use std::path::PathBuf;
use thiserror::Error;

// ============================================================================
// FieldErrors
// ============================================================================

/// Validation messages keyed by dotted field path, in schema order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(IndexMap<String, String>);

impl FieldErrors {
    /// Create an empty error map
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an error for a field path (replaces an earlier one)
    pub fn insert(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.0.insert(path.into(), message.into());
    }

    /// Get the error for a field path
    pub fn get(&self, path: &str) -> Option<&str> {
        self.0.get(path).map(String::as_str)
    }

    /// Check if there are no errors
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of failing fields
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterate over `(path, message)` pairs
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl std::fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let joined = self
            .iter()
            .map(|(path, message)| format!("{}: {}", path, message))
            .collect::<Vec<_>>()
            .join("; ");
        write!(f, "{}", joined)
    }
}

// ============================================================================
// EditorError
// ============================================================================

/// The main error type for Entiform
#[derive(Debug, Error)]
pub enum EditorError {
    // ========================================================================
    // Validation Errors
    // ========================================================================
    /// General validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// A single field failed validation
    #[error("Field validation failed for '{field}': {message}")]
    FieldValidation { field: String, message: String },

    /// A form submission was blocked by field errors
    #[error("Form has invalid fields: {0}")]
    FormInvalid(FieldErrors),

    /// Schema definition is malformed
    #[error("Invalid schema: {0}")]
    InvalidSchema(String),

    // ========================================================================
    // Path / Lookup Errors
    // ========================================================================
    /// Dotted path is empty or malformed
    #[error("Invalid field path: '{0}'")]
    InvalidPath(String),

    /// Path traverses a value that is not a record
    #[error("Cannot set '{path}': '{segment}' is not a record")]
    PathConflict { path: String, segment: String },

    /// Row with the given key was not found
    #[error("Row not found for {key_prop} = {key}")]
    RowNotFound { key_prop: String, key: String },

    /// Row lacks the designated key property
    #[error("Row is missing key property '{0}'")]
    MissingKey(String),

    // ========================================================================
    // Form State Errors
    // ========================================================================
    /// Operation requires an open form
    #[error("No edit session is open")]
    FormClosed,

    // ========================================================================
    // Provider Errors
    // ========================================================================
    /// Provider query failed
    #[error("Provider query failed: {0}")]
    ProviderQuery(String),

    /// Provider save failed
    #[error("Provider save failed: {0}")]
    ProviderSave(String),

    // ========================================================================
    // IO Errors
    // ========================================================================
    /// File IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// File read error
    #[error("Failed to read file '{path}': {message}")]
    FileRead { path: PathBuf, message: String },

    /// File write error
    #[error("Failed to write file '{path}': {message}")]
    FileWrite { path: PathBuf, message: String },

    // ========================================================================
    // Serialization Errors
    // ========================================================================
    /// JSON serialization error
    #[error("JSON serialization error: {0}")]
    JsonSerialization(#[from] serde_json::Error),

    /// File content is not in the expected shape
    #[error("Invalid file format: {0}")]
    InvalidFormat(String),

    // ========================================================================
    // Configuration Errors
    // ========================================================================
    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ========================================================================
    // Generic Errors
    // ========================================================================
    /// Internal error (should not happen)
    #[error("Internal error: {0}")]
    Internal(String),

    /// Operation cancelled by user
    #[error("Operation cancelled")]
    Cancelled,
}

impl EditorError {
    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        EditorError::Validation(msg.into())
    }

    /// Create a field validation error
    pub fn field_validation(field: impl Into<String>, msg: impl Into<String>) -> Self {
        EditorError::FieldValidation {
            field: field.into(),
            message: msg.into(),
        }
    }

    /// Create a schema error
    pub fn invalid_schema(msg: impl Into<String>) -> Self {
        EditorError::InvalidSchema(msg.into())
    }

    /// Create a provider query error
    pub fn provider_query(msg: impl Into<String>) -> Self {
        EditorError::ProviderQuery(msg.into())
    }

    /// Create a provider save error
    pub fn provider_save(msg: impl Into<String>) -> Self {
        EditorError::ProviderSave(msg.into())
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        EditorError::Internal(msg.into())
    }

    /// Check if this error is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            EditorError::Validation(_)
                | EditorError::FieldValidation { .. }
                | EditorError::FormInvalid(_)
                | EditorError::InvalidSchema(_)
        )
    }

    /// Check if this error is a not-found error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            EditorError::RowNotFound { .. } | EditorError::MissingKey(_)
        )
    }

    /// Check if this error is an IO error
    pub fn is_io(&self) -> bool {
        matches!(
            self,
            EditorError::Io(_) | EditorError::FileRead { .. } | EditorError::FileWrite { .. }
        )
    }

    /// Field errors carried by a blocked submission
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            EditorError::FormInvalid(errors) => Some(errors),
            _ => None,
        }
    }
}

/// Result type alias using EditorError
pub type EditorResult<T> = Result<T, EditorError>;

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_validation_error() {
        let err = EditorError::validation("Schema key is empty");
        assert!(err.is_validation());
        assert!(!err.is_not_found());
        assert_eq!(err.to_string(), "Validation error: Schema key is empty");
    }

    #[test]
    fn test_field_validation_error() {
        let err = EditorError::field_validation("payload", "Invalid JSON");
        assert!(err.is_validation());
        assert_eq!(
            err.to_string(),
            "Field validation failed for 'payload': Invalid JSON"
        );
    }

    #[test]
    fn test_form_invalid_carries_errors() {
        let mut errors = FieldErrors::new();
        errors.insert("payload", "Invalid JSON");
        errors.insert("avatar", "File is required");

        let err = EditorError::FormInvalid(errors);
        assert!(err.is_validation());
        assert_eq!(
            err.to_string(),
            "Form has invalid fields: payload: Invalid JSON; avatar: File is required"
        );
        assert_eq!(
            err.field_errors().and_then(|e| e.get("payload")),
            Some("Invalid JSON")
        );
    }

    #[test]
    fn test_field_errors_replace() {
        let mut errors = FieldErrors::new();
        errors.insert("a", "first");
        errors.insert("a", "second");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get("a"), Some("second"));
    }

    #[test]
    fn test_not_found_errors() {
        let err = EditorError::RowNotFound {
            key_prop: "id".to_string(),
            key: "42".to_string(),
        };
        assert!(err.is_not_found());
        assert!(!err.is_validation());
        assert_eq!(err.to_string(), "Row not found for id = 42");
    }

    #[test]
    fn test_missing_key_is_not_found() {
        let err = EditorError::MissingKey("id".to_string());
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "Row is missing key property 'id'");
    }

    #[test]
    fn test_io_error_classification() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: EditorError = io_err.into();
        assert!(err.is_io());
    }
}
