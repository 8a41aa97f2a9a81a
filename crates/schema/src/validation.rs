//! Draft validation
//!
//! Only file and json fields carry validation rules; every other kind always
//! passes. Validation walks nested entity fields recursively and reports at
//! most one message per field, keyed by dotted path.

use crate::field::{Field, FileField};
use crate::schema::Schema;
use entiform_core::{FieldErrors, FieldPath, Row, is_blank};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Bytes in one megabyte for `maxSizeMb` limits
pub const BYTES_PER_MB: u64 = 1_048_576;

pub const MSG_FILE_REQUIRED: &str = "File is required";
pub const MSG_INVALID_FILE: &str = "Invalid file";
pub const MSG_INVALID_JSON: &str = "Invalid JSON";

// ============================================================================
// FileInfo
// ============================================================================

/// A picked file as stored in a draft: `{name, size, type}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileInfo {
    pub name: String,
    pub size: u64,
    #[serde(rename = "type", default)]
    pub mime: String,
}

impl FileInfo {
    pub fn new(name: impl Into<String>, size: u64, mime: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            size,
            mime: mime.into(),
        }
    }

    /// Encode a list of files as a draft value
    pub fn list_to_value(files: &[FileInfo]) -> Value {
        Value::Array(
            files
                .iter()
                .map(|f| serde_json::to_value(f).unwrap_or(Value::Null))
                .collect(),
        )
    }

    /// Decode a draft value into a file list; `None` when it is not one
    pub fn list_from_value(value: &Value) -> Option<Vec<FileInfo>> {
        serde_json::from_value(value.clone()).ok()
    }
}

// ============================================================================
// Field validation
// ============================================================================

/// Check one file against the size limit and MIME allow-list
pub fn check_file(field: &FileField, file: &FileInfo) -> Option<String> {
    if let Some(limit) = field.max_size_mb {
        if file.size as f64 > limit * BYTES_PER_MB as f64 {
            return Some(format!("File must be <= {}MB", limit));
        }
    }
    if !field.accept_files.is_empty() && !field.accept_files.iter().any(|m| *m == file.mime) {
        return Some(format!(
            "Invalid file type. Allowed: {}",
            field.accept_files.join(", ")
        ));
    }
    None
}

fn validate_file(field: &FileField, value: Option<&Value>) -> Option<String> {
    if is_blank(value) {
        return field.required.then(|| MSG_FILE_REQUIRED.to_string());
    }
    let Some(files) = value.and_then(FileInfo::list_from_value) else {
        return Some(MSG_INVALID_FILE.to_string());
    };
    if field.multiple {
        files.iter().find_map(|file| check_file(field, file))
    } else {
        files.first().and_then(|file| check_file(field, file))
    }
}

fn validate_json(value: Option<&Value>) -> Option<String> {
    match value {
        Some(Value::String(text)) if !text.is_empty() => serde_json::from_str::<Value>(text)
            .err()
            .map(|_| MSG_INVALID_JSON.to_string()),
        _ => None,
    }
}

/// Validate a single top-level value; entity fields are not descended
pub fn validate_field(field: &Field, value: Option<&Value>) -> Option<String> {
    match field {
        Field::File(f) => validate_file(f, value),
        Field::Json(_) => validate_json(value),
        Field::Text(_)
        | Field::Number(_)
        | Field::Bool(_)
        | Field::Select(_)
        | Field::Multiselect(_)
        | Field::Date(_)
        | Field::Entity(_) => None,
    }
}

/// Validate every field of a draft, descending into entity fields
pub fn validate_draft(schema: &Schema, draft: &Row) -> FieldErrors {
    let mut errors = FieldErrors::new();
    validate_level(schema, Some(draft), None, &mut errors);
    errors
}

fn validate_level(
    schema: &Schema,
    record: Option<&Row>,
    parent: Option<&FieldPath>,
    errors: &mut FieldErrors,
) {
    for (key, field) in schema.iter() {
        let path = match parent {
            Some(p) => p.child(key),
            None => FieldPath::key(key),
        };
        let value = record.and_then(|r| r.get(key));
        if let Some(nested) = field.nested_schema() {
            validate_level(nested, value.and_then(Value::as_object), Some(&path), errors);
        } else if let Some(message) = validate_field(field, value) {
            errors.insert(path.to_string(), message);
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
