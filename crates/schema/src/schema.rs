//! Entity schemas and table columns
//!
//! A `Schema` is an ordered mapping from field key to `Field`. Entity fields
//! carry their own nested schema, so a schema is a tree addressed by dotted
//! paths. This module also holds the table projection (`Column`) and the
//! `SchemaSource` used when a schema depends on the row being edited.

use crate::field::{Field, FieldKind, ValueFormatter};
use entiform_core::{EditorError, EditorResult, FieldPath, Row, Validatable};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

// ============================================================================
// Schema
// ============================================================================

/// Ordered mapping of field key to field
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Schema(IndexMap<String, Field>);

/// Build a schema from `(key, field)` pairs
///
/// ```rust,ignore
/// let products = entity([
///     ("id", text().readonly().into()),
///     ("title", text().filterable().into()),
/// ]);
/// ```
pub fn entity<I, K>(fields: I) -> Schema
where
    I: IntoIterator<Item = (K, Field)>,
    K: Into<String>,
{
    Schema(fields.into_iter().map(|(k, f)| (k.into(), f)).collect())
}

/// A field resolved from a dotted path
#[derive(Debug, Clone, Copy)]
pub struct FieldLookup<'a> {
    pub field: &'a Field,
    /// Every field along the path is filterable
    pub filterable: bool,
    /// Some field along the path is read-only
    pub readonly: bool,
}

/// One entry of the flattened filter panel layout
#[derive(Debug, Clone)]
pub struct FilterableField<'a> {
    pub path: FieldPath,
    pub label: String,
    pub field: &'a Field,
    /// Nesting level (0 for top-level fields)
    pub depth: usize,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a field
    pub fn insert(&mut self, key: impl Into<String>, field: impl Into<Field>) {
        self.0.insert(key.into(), field.into());
    }

    /// Builder-style insert
    pub fn with_field(mut self, key: impl Into<String>, field: impl Into<Field>) -> Self {
        self.insert(key, field);
        self
    }

    pub fn get(&self, key: &str) -> Option<&Field> {
        self.0.get(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Field)> {
        self.0.iter().map(|(k, f)| (k.as_str(), f))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Resolve a dotted path through nested entity fields
    pub fn lookup(&self, path: &FieldPath) -> Option<FieldLookup<'_>> {
        let (first, rest) = path.segments().split_first()?;
        let mut field = self.get(first)?;
        let mut filterable = field.is_filterable();
        let mut readonly = field.is_readonly();
        for segment in rest {
            field = field.nested_schema()?.get(segment)?;
            filterable &= field.is_filterable();
            readonly |= field.is_readonly();
        }
        Some(FieldLookup {
            field,
            filterable,
            readonly,
        })
    }

    /// Whether a path lies under a read-only field.
    ///
    /// Resolves as far as the schema goes, so an unknown key below a
    /// read-only entity is read-only too.
    pub fn is_readonly_path(&self, path: &FieldPath) -> bool {
        let mut schema = Some(self);
        for segment in path.segments() {
            let Some(field) = schema.and_then(|s| s.get(segment)) else {
                return false;
            };
            if field.is_readonly() {
                return true;
            }
            schema = field.nested_schema();
        }
        false
    }

    /// Resolve a dotted path given as text
    pub fn lookup_str(&self, path: &str) -> Option<FieldLookup<'_>> {
        self.lookup(&FieldPath::parse(path).ok()?)
    }

    /// The filter panel layout.
    ///
    /// Only filterable fields are listed. An entity field contributes a group
    /// entry followed by its own filterable fields, one level deeper.
    pub fn filterable_fields(&self) -> Vec<FilterableField<'_>> {
        let mut out = Vec::new();
        collect_filterable(self, None, 0, &mut out);
        out
    }

    /// Whether the filter panel has anything to show
    pub fn has_filters(&self) -> bool {
        self.iter().any(|(_, f)| f.is_filterable())
    }

    /// Project into table column specs, in schema order
    pub fn table_schema(&self) -> Vec<Column> {
        self.iter()
            .map(|(key, field)| Column {
                key: key.to_string(),
                label: field.label().map(str::to_string),
                sortable: false,
                formatter: field.formatter().cloned(),
            })
            .collect()
    }
}

fn collect_filterable<'a>(
    schema: &'a Schema,
    parent: Option<&FieldPath>,
    depth: usize,
    out: &mut Vec<FilterableField<'a>>,
) {
    for (key, field) in schema.iter().filter(|(_, f)| f.is_filterable()) {
        let path = match parent {
            Some(p) => p.child(key),
            None => FieldPath::key(key),
        };
        out.push(FilterableField {
            path: path.clone(),
            label: field.label_or(key).to_string(),
            field,
            depth,
        });
        if let Some(nested) = field.nested_schema() {
            collect_filterable(nested, Some(&path), depth + 1, out);
        }
    }
}

impl Validatable for Schema {
    fn validate(&self) -> EditorResult<()> {
        validate_level(self, None)
    }
}

fn validate_level(schema: &Schema, parent: Option<&FieldPath>) -> EditorResult<()> {
    for (key, field) in schema.iter() {
        let location = match parent {
            Some(p) => format!("{}.{}", p, key),
            None => key.to_string(),
        };
        if key.is_empty() {
            return Err(EditorError::invalid_schema(format!(
                "empty field key under '{}'",
                parent.map(|p| p.to_string()).unwrap_or_default()
            )));
        }
        if key.contains(entiform_core::path::PATH_SEPARATOR) {
            return Err(EditorError::invalid_schema(format!(
                "field key '{}' must not contain '.'",
                location
            )));
        }
        if let Some(nested) = field.nested_schema() {
            let path = match parent {
                Some(p) => p.child(key),
                None => FieldPath::key(key),
            };
            validate_level(nested, Some(&path))?;
        }
    }
    Ok(())
}

impl entiform_core::Persistable for Schema {}

impl<K: Into<String>> FromIterator<(K, Field)> for Schema {
    fn from_iter<T: IntoIterator<Item = (K, Field)>>(iter: T) -> Self {
        entity(iter)
    }
}

// ============================================================================
// Column
// ============================================================================

/// Table column, aligned with schema fields by key
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub sortable: bool,
    #[serde(skip)]
    pub formatter: Option<ValueFormatter>,
}

impl Column {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: None,
            sortable: false,
            formatter: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    pub fn with_formatter(mut self, f: impl Fn(&Row) -> String + Send + Sync + 'static) -> Self {
        self.formatter = Some(ValueFormatter::new(f));
        self
    }

    /// Header text: the label, or the key
    pub fn title(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.key)
    }
}

// ============================================================================
// SchemaSource
// ============================================================================

/// Where the edit schema comes from
#[derive(Clone)]
pub enum SchemaSource {
    /// One schema for every row
    Static(Schema),
    /// Schema computed from the row under edit
    PerRow(Arc<dyn Fn(&Row) -> Schema + Send + Sync>),
}

impl SchemaSource {
    pub fn per_row(f: impl Fn(&Row) -> Schema + Send + Sync + 'static) -> Self {
        SchemaSource::PerRow(Arc::new(f))
    }

    /// Evaluate the schema for a row
    pub fn resolve(&self, row: &Row) -> Schema {
        match self {
            SchemaSource::Static(schema) => schema.clone(),
            SchemaSource::PerRow(f) => f(row),
        }
    }

    pub fn is_per_row(&self) -> bool {
        matches!(self, SchemaSource::PerRow(_))
    }
}

impl From<Schema> for SchemaSource {
    fn from(schema: Schema) -> Self {
        SchemaSource::Static(schema)
    }
}

impl fmt::Debug for SchemaSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaSource::Static(schema) => f.debug_tuple("Static").field(schema).finish(),
            SchemaSource::PerRow(_) => f.write_str("PerRow(..)"),
        }
    }
}

impl PartialEq for SchemaSource {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (SchemaSource::Static(a), SchemaSource::Static(b)) => a == b,
            (SchemaSource::PerRow(a), SchemaSource::PerRow(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

/// Kinds that have a filter control
pub fn kind_has_filter_control(kind: FieldKind) -> bool {
    !matches!(kind, FieldKind::File | FieldKind::Json)
}

// ============================================================================
// Tests
// ============================================================================
