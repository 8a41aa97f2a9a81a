//! Remote data providers
//!
//! A provider supplies rows for the current filters and sort, and persists
//! edits. The widget treats it as opaque: each call is single-shot, with no
//! cancellation, retries or timeouts.

use crate::filter::{FilterSet, filter_rows};
use crate::schema::Schema;
use crate::sort::{SortConfig, sort_rows};
use async_trait::async_trait;
use entiform_core::{EditorError, EditorResult, Row, values_match};
use serde_json::Value;
use std::sync::RwLock;

/// Async source of rows
#[async_trait]
pub trait EntityProvider: Send + Sync {
    /// Rows matching the filters, in sort order
    async fn query(&self, filters: &FilterSet, sort: Option<&SortConfig>)
    -> EditorResult<Vec<Row>>;

    /// Merge `values` into the row with key `id`; `None` when there is no
    /// such row
    async fn edit(&self, id: &Value, values: Row) -> EditorResult<Option<Row>>;
}

// ============================================================================
// InMemoryProvider
// ============================================================================

/// Provider over an in-memory row list
///
/// Queries use the same filter and sort code as local widgets. Edits are
/// shallow merges: every key of the patch replaces the stored value, except
/// that `null` never clobbers an existing value.
#[derive(Debug)]
pub struct InMemoryProvider {
    key_prop: String,
    schema: Option<Schema>,
    limit: Option<usize>,
    rows: RwLock<Vec<Row>>,
}

impl InMemoryProvider {
    pub fn new(key_prop: impl Into<String>, rows: Vec<Row>) -> Self {
        Self {
            key_prop: key_prop.into(),
            schema: None,
            limit: None,
            rows: RwLock::new(rows),
        }
    }

    /// Resolve filter kinds against a schema
    pub fn with_schema(mut self, schema: Schema) -> Self {
        self.schema = Some(schema);
        self
    }

    /// Return at most `limit` rows per query
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn key_prop(&self) -> &str {
        &self.key_prop
    }

    /// Copy of every stored row, unfiltered
    pub fn snapshot(&self) -> EditorResult<Vec<Row>> {
        self.rows
            .read()
            .map(|rows| rows.clone())
            .map_err(|_| EditorError::internal("row store lock poisoned"))
    }
}

#[async_trait]
impl EntityProvider for InMemoryProvider {
    async fn query(
        &self,
        filters: &FilterSet,
        sort: Option<&SortConfig>,
    ) -> EditorResult<Vec<Row>> {
        let rows = self
            .rows
            .read()
            .map_err(|_| EditorError::provider_query("row store lock poisoned"))?;
        let filtered = filter_rows(&rows, filters, self.schema.as_ref());
        let mut result = sort_rows(&filtered, sort);
        if let Some(limit) = self.limit {
            result.truncate(limit);
        }
        Ok(result)
    }

    async fn edit(&self, id: &Value, values: Row) -> EditorResult<Option<Row>> {
        let mut rows = self
            .rows
            .write()
            .map_err(|_| EditorError::provider_save("row store lock poisoned"))?;
        let Some(stored) = rows
            .iter_mut()
            .find(|row| row.get(&self.key_prop).is_some_and(|k| values_match(k, id)))
        else {
            tracing::debug!("No row with {} = {}", self.key_prop, id);
            return Ok(None);
        };
        for (key, value) in values {
            if value.is_null() && stored.get(&key).is_some_and(|v| !v.is_null()) {
                continue;
            }
            stored.insert(key, value);
        }
        Ok(Some(stored.clone()))
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::FieldKind;
    use crate::filter::FilterValue;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use tokio_test::block_on;

    fn provider() -> InMemoryProvider {
        let rows = json!([
            {"id": 1, "name": "enim", "options": {"size": "L", "amount": 20}},
            {"id": 2, "name": "esse elit", "options": {"size": "S", "amount": 10}},
            {"id": 3, "name": "eu ad", "options": {"size": "L", "amount": 1000}}
        ]);
        let rows = rows
            .as_array()
            .unwrap()
            .iter()
            .map(|r| r.as_object().cloned().unwrap())
            .collect();
        InMemoryProvider::new("id", rows)
    }

    fn ids(rows: &[Row]) -> Vec<i64> {
        rows.iter().map(|r| r["id"].as_i64().unwrap()).collect()
    }

    #[test]
    fn test_query_filter_and_sort() {
        let filters = FilterSet::new().with(
            "options.size",
            FieldKind::Select,
            FilterValue::Select(json!("L")),
        );
        let sort = SortConfig::desc("options.amount");
        let rows = block_on(provider().query(&filters, Some(&sort))).unwrap();
        assert_eq!(ids(&rows), [3, 1]);
    }

    #[test]
    fn test_query_limit() {
        let p = provider().with_limit(2);
        let rows = block_on(p.query(&FilterSet::new(), None)).unwrap();
        assert_eq!(ids(&rows), [1, 2]);
    }

    #[test]
    fn test_edit_merges() {
        let p = provider();
        let patch = json!({"name": "renamed", "options": null})
            .as_object()
            .cloned()
            .unwrap();
        let updated = block_on(p.edit(&json!(2), patch)).unwrap().unwrap();
        assert_eq!(updated["name"], json!("renamed"));
        assert_eq!(updated["options"], json!({"size": "S", "amount": 10}));

        let stored = p.snapshot().unwrap();
        assert_eq!(stored[1]["name"], json!("renamed"));
    }

    #[test]
    fn test_edit_unknown_id() {
        let p = provider();
        let result = block_on(p.edit(&json!(99), Row::new())).unwrap();
        assert_eq!(result, None);
        assert_eq!(p.snapshot().unwrap().len(), 3);
    }
}
