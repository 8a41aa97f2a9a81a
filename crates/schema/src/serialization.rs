//! Schema and row files
//!
//! Schemas are stored as JSON objects (`key -> {"kind": .., ...}`), row sets
//! as JSON arrays of records and drafts as a single record. Loaded schemas
//! are structurally validated before use.

use crate::schema::Schema;
use entiform_core::{EditorError, EditorResult, Persistable, Row, Validatable};
use serde_json::Value;
use std::path::Path;

fn read_file(path: &Path) -> EditorResult<String> {
    std::fs::read_to_string(path).map_err(|e| EditorError::FileRead {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

fn write_file(path: &Path, contents: String) -> EditorResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent).map_err(|e| EditorError::FileWrite {
                path: parent.to_path_buf(),
                message: e.to_string(),
            })?;
        }
    }
    std::fs::write(path, contents).map_err(|e| EditorError::FileWrite {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

fn parse_json(path: &Path, text: &str) -> EditorResult<Value> {
    serde_json::from_str(text).map_err(|e| EditorError::FileRead {
        path: path.to_path_buf(),
        message: format!("Invalid JSON: {}", e),
    })
}

// ============================================================================
// Schemas
// ============================================================================

/// Load and validate a schema file
pub fn load_schema(path: impl AsRef<Path>) -> EditorResult<Schema> {
    let path = path.as_ref();
    let schema = load_schema_from_string(&read_file(path)?).map_err(|e| match e {
        EditorError::JsonSerialization(je) => EditorError::FileRead {
            path: path.to_path_buf(),
            message: format!("Invalid schema file format: {}", je),
        },
        other => other,
    })?;
    tracing::debug!("Loaded schema with {} fields from {}", schema.len(), path.display());
    Ok(schema)
}

/// Parse and validate a schema document
pub fn load_schema_from_string(json: &str) -> EditorResult<Schema> {
    let schema = Schema::from_json(json)?;
    schema.validate()?;
    Ok(schema)
}

pub fn save_schema(schema: &Schema, path: impl AsRef<Path>) -> EditorResult<()> {
    write_file(path.as_ref(), schema.to_json()?)
}

// ============================================================================
// Rows
// ============================================================================

/// Load a JSON array of records
pub fn load_rows(path: impl AsRef<Path>) -> EditorResult<Vec<Row>> {
    let path = path.as_ref();
    let value = parse_json(path, &read_file(path)?)?;
    let Value::Array(items) = value else {
        return Err(EditorError::InvalidFormat(format!(
            "{}: expected an array of records",
            path.display()
        )));
    };
    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| match item {
            Value::Object(row) => Ok(row),
            _ => Err(EditorError::InvalidFormat(format!(
                "{}: item {} is not a record",
                path.display(),
                index
            ))),
        })
        .collect()
}

pub fn save_rows(rows: &[Row], path: impl AsRef<Path>) -> EditorResult<()> {
    write_file(path.as_ref(), serde_json::to_string_pretty(rows)?)
}

/// Load a single record (an edit draft)
pub fn load_row(path: impl AsRef<Path>) -> EditorResult<Row> {
    let path = path.as_ref();
    match parse_json(path, &read_file(path)?)? {
        Value::Object(row) => Ok(row),
        _ => Err(EditorError::InvalidFormat(format!(
            "{}: expected a record",
            path.display()
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::{entity_field, file, text};
    use crate::schema::entity;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use tempfile::tempdir;

    #[test]
    fn test_schema_file_round() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("schema.json");
        let schema = entity([
            ("title", text().filterable().into()),
            ("avatar", file().required().accept(["image/png"]).into()),
            (
                "options",
                entity_field(entity([("size", text().into())])).into(),
            ),
        ]);
        save_schema(&schema, &path).unwrap();
        assert_eq!(load_schema(&path).unwrap(), schema);
    }

    #[test]
    fn test_load_schema_rejects_dotted_key() {
        let err = load_schema_from_string(r#"{"a.b": {"kind": "text"}}"#).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_load_schema_unknown_kind() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("schema.json");
        std::fs::write(&path, r#"{"a": {"kind": "color"}}"#).unwrap();
        assert!(load_schema(&path).unwrap_err().is_io());
    }

    #[test]
    fn test_rows_round() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("rows.json");
        let rows: Vec<Row> = vec![
            json!({"id": 1, "title": "a"}).as_object().cloned().unwrap(),
            json!({"id": 2, "title": "b"}).as_object().cloned().unwrap(),
        ];
        save_rows(&rows, &path).unwrap();
        assert_eq!(load_rows(&path).unwrap(), rows);
    }

    #[test]
    fn test_rows_must_be_records() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("rows.json");
        std::fs::write(&path, "[1, 2]").unwrap();
        assert!(matches!(load_rows(&path), Err(EditorError::InvalidFormat(_))));

        std::fs::write(&path, r#"{"id": 1}"#).unwrap();
        assert!(matches!(load_rows(&path), Err(EditorError::InvalidFormat(_))));
        assert_eq!(load_row(&path).unwrap()["id"], json!(1));
    }

    #[test]
    fn test_missing_file() {
        assert!(load_rows("/nonexistent/rows.json").unwrap_err().is_io());
    }
}
