//! Dotted field paths
//!
//! A `FieldPath` is the parsed form of keys like `options.size`: an explicit
//! list of segments used to read and write nested record values. Rows, drafts
//! and filter sets all address nested fields this way.

use crate::error::{EditorError, EditorResult};
use serde_json::{Map, Value};

/// Separator between path segments
pub const PATH_SEPARATOR: char = '.';

/// A non-empty list of record keys
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FieldPath {
    segments: Vec<String>,
}

impl FieldPath {
    /// Parse a dotted path. Empty paths and empty segments are rejected.
    pub fn parse(path: &str) -> EditorResult<Self> {
        if path.is_empty() {
            return Err(EditorError::InvalidPath(path.to_string()));
        }
        let segments: Vec<String> = path.split(PATH_SEPARATOR).map(str::to_string).collect();
        if segments.iter().any(String::is_empty) {
            return Err(EditorError::InvalidPath(path.to_string()));
        }
        Ok(Self { segments })
    }

    /// Build a single-segment path from a schema key
    pub fn key(key: impl Into<String>) -> Self {
        Self {
            segments: vec![key.into()],
        }
    }

    /// Append a nested key
    pub fn child(&self, key: impl Into<String>) -> Self {
        let mut segments = self.segments.clone();
        segments.push(key.into());
        Self { segments }
    }

    /// The path segments
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// The first segment
    pub fn head(&self) -> &str {
        &self.segments[0]
    }

    /// The last segment
    pub fn leaf(&self) -> &str {
        &self.segments[self.segments.len() - 1]
    }

    /// Number of segments
    pub fn depth(&self) -> usize {
        self.segments.len()
    }

    /// Resolve the path inside a record
    pub fn get<'a>(&self, record: &'a Map<String, Value>) -> Option<&'a Value> {
        let (first, rest) = self.segments.split_first()?;
        let mut current = record.get(first)?;
        for segment in rest {
            current = current.as_object()?.get(segment)?;
        }
        Some(current)
    }

    /// Write a value at the path, creating intermediate records as needed.
    ///
    /// Fails when an intermediate value exists and is not a record.
    pub fn set(&self, record: &mut Map<String, Value>, value: Value) -> EditorResult<()> {
        let (last, parents) = self
            .segments
            .split_last()
            .ok_or_else(|| EditorError::InvalidPath(String::new()))?;

        let mut current = record;
        for segment in parents {
            let entry = current
                .entry(segment.clone())
                .or_insert_with(|| Value::Object(Map::new()));
            if entry.is_null() {
                *entry = Value::Object(Map::new());
            }
            current = entry
                .as_object_mut()
                .ok_or_else(|| EditorError::PathConflict {
                    path: self.to_string(),
                    segment: segment.clone(),
                })?;
        }
        current.insert(last.clone(), value);
        Ok(())
    }
}

impl std::fmt::Display for FieldPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.segments.join("."))
    }
}

impl std::str::FromStr for FieldPath {
    type Err = EditorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Read a dotted path from a record, treating malformed paths as absent
pub fn get_path<'a>(record: &'a Map<String, Value>, path: &str) -> Option<&'a Value> {
    FieldPath::parse(path).ok()?.get(record)
}

/// Write a dotted path into a record
pub fn set_path(record: &mut Map<String, Value>, path: &str, value: Value) -> EditorResult<()> {
    FieldPath::parse(path)?.set(record, value)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn record(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_parse() {
        let path = FieldPath::parse("options.size").unwrap();
        assert_eq!(path.segments(), ["options", "size"]);
        assert_eq!(path.head(), "options");
        assert_eq!(path.leaf(), "size");
        assert_eq!(path.to_string(), "options.size");
    }

    #[test]
    fn test_parse_rejects_empty_segments() {
        assert!(FieldPath::parse("").is_err());
        assert!(FieldPath::parse("options.").is_err());
        assert!(FieldPath::parse(".size").is_err());
        assert!(FieldPath::parse("a..b").is_err());
    }

    #[test]
    fn test_get_nested() {
        let row = record(json!({"id": 1, "options": {"size": "L", "amount": 20}}));
        assert_eq!(get_path(&row, "id"), Some(&json!(1)));
        assert_eq!(get_path(&row, "options.size"), Some(&json!("L")));
        assert_eq!(get_path(&row, "options.color"), None);
        assert_eq!(get_path(&row, "id.deeper"), None);
        assert_eq!(get_path(&row, "bad..path"), None);
    }

    #[test]
    fn test_set_creates_intermediate_records() {
        let mut row = record(json!({"id": 1}));
        set_path(&mut row, "options.size", json!("XL")).unwrap();
        assert_eq!(Value::Object(row), json!({"id": 1, "options": {"size": "XL"}}));
    }

    #[test]
    fn test_set_replaces_null_parent() {
        let mut row = record(json!({"options": null}));
        set_path(&mut row, "options.amount", json!(5)).unwrap();
        assert_eq!(get_path(&row, "options.amount"), Some(&json!(5)));
    }

    #[test]
    fn test_set_conflict() {
        let mut row = record(json!({"id": 1}));
        let err = set_path(&mut row, "id.value", json!(2)).unwrap_err();
        assert!(matches!(err, EditorError::PathConflict { .. }));
        assert_eq!(get_path(&row, "id"), Some(&json!(1)));
    }

    #[test]
    fn test_child() {
        let path = FieldPath::key("options").child("amount");
        assert_eq!(path.to_string(), "options.amount");
        assert_eq!(path.depth(), 2);
    }
}
