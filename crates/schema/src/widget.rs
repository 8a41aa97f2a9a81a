//! Headless entity widget
//!
//! `EntityWidget` glues the pieces together: it owns the row collection
//! (or the rows last fetched from a provider), the filter and sort state and
//! the edit form. Local widgets derive the visible rows by filtering and
//! sorting in memory; remote widgets hand filters and sort to a provider on
//! every change and display what comes back.
//!
//! Saving is optimistic: the local copy is updated before the provider is
//! asked to persist, and a failed save is reported but not rolled back.

use crate::datetime::display_instant;
use crate::field::{Field, FieldKind};
use crate::filter::{FilterSet, FilterValue, filter_rows};
use crate::form::EntityForm;
use crate::provider::EntityProvider;
use crate::schema::{Column, Schema, SchemaSource};
use crate::sort::{SortConfig, sort_rows, toggle_sort};
use entiform_core::{EditorError, EditorResult, Row, get_path, value_to_string, values_match};
use serde_json::Value;

/// Where the displayed rows come from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataMode {
    /// Filter and sort the owned rows in memory
    Local,
    /// Rows are fetched from a provider with the current filters and sort
    Remote,
}

#[derive(Debug, Clone)]
pub struct EntityWidget {
    schema: SchemaSource,
    columns: Vec<Column>,
    key_prop: String,
    rows: Vec<Row>,
    mode: DataMode,
    filters: FilterSet,
    sort: Option<SortConfig>,
    form: EntityForm,
    editing_key: Option<Value>,
}

impl EntityWidget {
    /// A local widget with no rows
    pub fn new(
        schema: impl Into<SchemaSource>,
        columns: Vec<Column>,
        key_prop: impl Into<String>,
    ) -> Self {
        Self {
            schema: schema.into(),
            columns,
            key_prop: key_prop.into(),
            rows: Vec::new(),
            mode: DataMode::Local,
            filters: FilterSet::new(),
            sort: None,
            form: EntityForm::new(),
            editing_key: None,
        }
    }

    pub fn with_rows(mut self, rows: Vec<Row>) -> Self {
        self.rows = rows;
        self
    }

    /// Switch to provider-backed rows
    pub fn remote(mut self) -> Self {
        self.mode = DataMode::Remote;
        self
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn mode(&self) -> DataMode {
        self.mode
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn key_prop(&self) -> &str {
        &self.key_prop
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn filters(&self) -> &FilterSet {
        &self.filters
    }

    pub fn sort(&self) -> Option<&SortConfig> {
        self.sort.as_ref()
    }

    pub fn form(&self) -> &EntityForm {
        &self.form
    }

    pub fn editing_key(&self) -> Option<&Value> {
        self.editing_key.as_ref()
    }

    /// Key value of a row; every row must carry the key property
    pub fn row_key<'a>(&self, row: &'a Row) -> EditorResult<&'a Value> {
        row.get(&self.key_prop)
            .filter(|key| !key.is_null())
            .ok_or_else(|| EditorError::MissingKey(self.key_prop.clone()))
    }

    /// Schema for the filter panel; a per-row schema is evaluated against
    /// the first row, or an empty row when there is none
    pub fn filter_schema(&self) -> Schema {
        let empty = Row::new();
        self.schema.resolve(self.rows.first().unwrap_or(&empty))
    }

    // ========================================================================
    // Filters and sort
    // ========================================================================

    pub fn set_filters(&mut self, filters: FilterSet) {
        self.filters = filters;
    }

    pub fn set_filter(&mut self, path: impl Into<String>, kind: FieldKind, value: FilterValue) {
        self.filters.set_typed(path, kind, value);
    }

    pub fn clear_filters(&mut self) {
        self.filters.clear();
    }

    /// Cycle the sort on a column header. Non-sortable and unknown columns
    /// are ignored.
    pub fn toggle_sort(&mut self, key: &str) -> Option<&SortConfig> {
        let sortable = self.columns.iter().any(|c| c.key == key && c.sortable);
        if sortable {
            self.sort = toggle_sort(self.sort.as_ref(), key);
        }
        self.sort.as_ref()
    }

    pub fn set_sort(&mut self, sort: Option<SortConfig>) {
        self.sort = sort;
    }

    /// The rows to display
    pub fn visible_rows(&self) -> Vec<Row> {
        match self.mode {
            DataMode::Local => {
                let schema = self.filter_schema();
                let filtered = filter_rows(&self.rows, &self.filters, Some(&schema));
                sort_rows(&filtered, self.sort.as_ref())
            }
            DataMode::Remote => self.rows.clone(),
        }
    }

    /// Replace the owned rows (new data, or a provider result)
    pub fn replace_rows(&mut self, rows: Vec<Row>) {
        self.rows = rows;
    }

    /// Fetch rows from a provider with the current filters and sort
    pub async fn refresh(&mut self, provider: &dyn EntityProvider) -> EditorResult<()> {
        let rows = provider.query(&self.filters, self.sort.as_ref()).await?;
        tracing::debug!("Provider returned {} rows", rows.len());
        self.rows = rows;
        Ok(())
    }

    // ========================================================================
    // Editing
    // ========================================================================

    /// Open the edit form on the row with the given key
    pub fn begin_edit(&mut self, key: &Value) -> EditorResult<()> {
        let row = self
            .find_row(key)
            .ok_or_else(|| EditorError::RowNotFound {
                key_prop: self.key_prop.clone(),
                key: value_to_string(Some(key)),
            })?
            .clone();
        let schema = self.schema.resolve(&row);
        self.form.open(schema, &row);
        self.editing_key = Some(key.clone());
        Ok(())
    }

    /// Edit the open draft
    pub fn set_draft_value(&mut self, path: &str, value: Value) -> EditorResult<()> {
        self.form.set_value(path, value)
    }

    pub fn cancel_edit(&mut self) {
        self.form.cancel();
        self.editing_key = None;
    }

    /// Validate the draft and apply it to the local rows.
    ///
    /// Returns the payload for the save callback. On validation failure the
    /// form stays open with its errors.
    pub fn submit_edit(&mut self) -> EditorResult<Row> {
        let key = self.editing_key.clone().ok_or(EditorError::FormClosed)?;
        let payload = self.form.submit()?;
        self.editing_key = None;
        if let Some(row) = self.find_row_mut(&key) {
            *row = payload.clone();
        }
        tracing::info!("Saved row {} = {}", self.key_prop, key);
        Ok(payload)
    }

    /// Submit, update locally, then persist through the provider.
    ///
    /// A provider error is returned as-is; the local update is kept.
    pub async fn submit_and_save(
        &mut self,
        provider: &dyn EntityProvider,
    ) -> EditorResult<Option<Row>> {
        let key = self.editing_key.clone().ok_or(EditorError::FormClosed)?;
        let payload = self.submit_edit()?;
        provider.edit(&key, payload).await
    }

    fn find_row(&self, key: &Value) -> Option<&Row> {
        self.rows
            .iter()
            .find(|row| row.get(&self.key_prop).is_some_and(|k| values_match(k, key)))
    }

    fn find_row_mut(&mut self, key: &Value) -> Option<&mut Row> {
        let key_prop = &self.key_prop;
        self.rows
            .iter_mut()
            .find(|row| row.get(key_prop).is_some_and(|k| values_match(k, key)))
    }

    // ========================================================================
    // Display
    // ========================================================================

    /// Text for one table cell
    pub fn cell_text(&self, column: &Column, row: &Row) -> String {
        if let Some(formatter) = &column.formatter {
            return formatter.format(row);
        }
        let schema = self.schema.resolve(row);
        let field = schema.lookup_str(&column.key).map(|found| found.field);
        if let Some(formatter) = field.and_then(Field::formatter) {
            return formatter.format(row);
        }
        default_cell_text(field, get_path(row, &column.key))
    }
}

/// Kind-aware rendering of a value: dates as local date-time, bools as
/// Yes/No, nested entities as `key: value` lines
pub fn default_cell_text(field: Option<&Field>, value: Option<&Value>) -> String {
    match (field, value) {
        (_, None | Some(Value::Null)) => String::new(),
        (Some(Field::Date(_)), Some(Value::String(s))) => display_instant(s),
        (_, Some(Value::Bool(b))) => (if *b { "Yes" } else { "No" }).to_string(),
        (Some(Field::Entity(nested)), Some(Value::Object(record))) => nested
            .schema
            .iter()
            .map(|(key, f)| {
                format!(
                    "{}: {}",
                    f.label_or(key),
                    default_cell_text(Some(f), record.get(key))
                )
            })
            .collect::<Vec<_>>()
            .join("\n"),
        (Some(Field::File(_)), Some(Value::Array(files))) => files
            .iter()
            .filter_map(|f| f.get("name").and_then(Value::as_str))
            .collect::<Vec<_>>()
            .join(", "),
        (_, Some(other)) => value_to_string(Some(other)),
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::{bool, date, entity_field, number, select, text};
    use crate::provider::InMemoryProvider;
    use crate::schema::entity;
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use tokio_test::block_on;

    fn rows(values: Value) -> Vec<Row> {
        values
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v.as_object().cloned().unwrap())
            .collect()
    }

    fn ids(rows: &[Row]) -> Vec<i64> {
        rows.iter().map(|r| r["id"].as_i64().unwrap()).collect()
    }

    fn schema() -> Schema {
        entity([
            ("id", number().readonly().into()),
            ("title", text().filterable().into()),
            ("active", bool().filterable().into()),
            (
                "options",
                entity_field(entity([
                    ("size", select([("M", "M"), ("L", "L")]).filterable().into()),
                    ("amount", number().into()),
                ]))
                .filterable()
                .into(),
            ),
        ])
    }

    fn columns() -> Vec<Column> {
        vec![
            Column::new("id").sortable(),
            Column::new("title").with_label("Title").sortable(),
            Column::new("active"),
        ]
    }

    fn widget() -> EntityWidget {
        EntityWidget::new(schema(), columns(), "id").with_rows(rows(json!([
            {"id": 3, "title": "gamma", "active": true, "options": {"size": "L", "amount": 1}},
            {"id": 1, "title": "Alpha", "active": false, "options": {"size": "M", "amount": 2}},
            {"id": 2, "title": "beta", "active": true, "options": {"size": "L", "amount": 3}}
        ])))
    }

    #[test]
    fn test_local_filter_and_sort() {
        let mut w = widget();
        w.set_filter("options.size", FieldKind::Select, FilterValue::Select(json!("L")));
        assert_eq!(ids(&w.visible_rows()), [3, 2]);

        w.toggle_sort("id");
        assert_eq!(ids(&w.visible_rows()), [2, 3]);

        w.clear_filters();
        assert_eq!(ids(&w.visible_rows()), [1, 2, 3]);
    }

    #[test]
    fn test_sort_cycle() {
        let mut w = widget();
        assert_eq!(w.toggle_sort("id"), Some(&SortConfig::asc("id")));
        assert_eq!(ids(&w.visible_rows()), [1, 2, 3]);
        w.toggle_sort("id");
        assert_eq!(ids(&w.visible_rows()), [3, 2, 1]);
        assert_eq!(w.toggle_sort("id"), None);
        assert_eq!(ids(&w.visible_rows()), [3, 1, 2]);
    }

    #[test]
    fn test_non_sortable_header_ignored() {
        let mut w = widget();
        assert_eq!(w.toggle_sort("active"), None);
        assert_eq!(w.toggle_sort("missing"), None);
        w.toggle_sort("title");
        assert_eq!(w.toggle_sort("active"), Some(&SortConfig::asc("title")));
    }

    #[test]
    fn test_edit_updates_local_copy() {
        let mut w = widget();
        w.begin_edit(&json!(1)).unwrap();
        assert!(w.form().is_open());
        w.set_draft_value("active", json!(true)).unwrap();

        let payload = w.submit_edit().unwrap();
        assert_eq!(payload["active"], json!(true));
        assert!(!w.form().is_open());
        assert_eq!(w.editing_key(), None);

        let row = w.rows().iter().find(|r| r["id"] == json!(1)).unwrap();
        assert_eq!(row["active"], json!(true));
    }

    #[test]
    fn test_cancel_leaves_rows_untouched() {
        let mut w = widget();
        let before = w.rows().to_vec();
        w.begin_edit(&json!(2)).unwrap();
        w.set_draft_value("title", json!("changed")).unwrap();
        w.cancel_edit();
        assert_eq!(w.rows(), before.as_slice());
        assert!(matches!(w.submit_edit(), Err(EditorError::FormClosed)));
    }

    #[test]
    fn test_begin_edit_unknown_key() {
        let mut w = widget();
        let err = w.begin_edit(&json!(42)).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_row_without_key_prop() {
        let w = widget();
        let keyed = rows(json!([{"id": 7, "title": "x"}]));
        assert_eq!(w.row_key(&keyed[0]).unwrap(), &json!(7));

        let unkeyed = rows(json!([{"title": "no id"}, {"id": null}]));
        for row in &unkeyed {
            let err = w.row_key(row).unwrap_err();
            assert!(matches!(err, EditorError::MissingKey(ref prop) if prop == "id"));
            assert!(err.is_not_found());
        }
    }

    #[test]
    fn test_per_row_schema() {
        let source = SchemaSource::per_row(|row| {
            if row.get("digital") == Some(&json!(true)) {
                entity([("url", text().filterable().into())])
            } else {
                entity([("weight", number().filterable().into())])
            }
        });
        let mut w = EntityWidget::new(source, vec![Column::new("id")], "id").with_rows(rows(
            json!([{"id": 1, "digital": true}, {"id": 2, "digital": false}]),
        ));
        assert_eq!(w.filter_schema().keys().collect::<Vec<_>>(), ["url"]);

        w.begin_edit(&json!(2)).unwrap();
        assert_eq!(w.form().schema().keys().collect::<Vec<_>>(), ["weight"]);

        let empty = EntityWidget::new(
            SchemaSource::per_row(|row| {
                if row.is_empty() {
                    entity([("placeholder", text().into())])
                } else {
                    Schema::new()
                }
            }),
            vec![],
            "id",
        );
        assert_eq!(empty.filter_schema().keys().collect::<Vec<_>>(), ["placeholder"]);
    }

    #[test]
    fn test_remote_refresh_and_save() {
        let provider = InMemoryProvider::new("id", widget().rows().to_vec());
        let mut w = EntityWidget::new(schema(), columns(), "id").remote();

        w.set_filter("title", FieldKind::Text, FilterValue::Text("a".into()));
        w.toggle_sort("title");
        block_on(w.refresh(&provider)).unwrap();
        assert_eq!(ids(&w.visible_rows()), [1, 2, 3]);

        w.begin_edit(&json!(2)).unwrap();
        w.set_draft_value("title", json!("bravo")).unwrap();
        let saved = block_on(w.submit_and_save(&provider)).unwrap().unwrap();
        assert_eq!(saved["title"], json!("bravo"));
        assert_eq!(provider.snapshot().unwrap()[2]["title"], json!("bravo"));
    }

    struct FailingProvider;

    #[async_trait]
    impl EntityProvider for FailingProvider {
        async fn query(&self, _: &FilterSet, _: Option<&SortConfig>) -> EditorResult<Vec<Row>> {
            Err(EditorError::provider_query("offline"))
        }

        async fn edit(&self, _: &Value, _: Row) -> EditorResult<Option<Row>> {
            Err(EditorError::provider_save("offline"))
        }
    }

    #[test]
    fn test_failed_save_keeps_optimistic_update() {
        let mut w = widget();
        w.begin_edit(&json!(3)).unwrap();
        w.set_draft_value("title", json!("delta")).unwrap();

        let err = block_on(w.submit_and_save(&FailingProvider)).unwrap_err();
        assert!(matches!(err, EditorError::ProviderSave(_)));
        assert_eq!(w.rows()[0]["title"], json!("delta"));
    }

    #[test]
    fn test_failed_refresh_keeps_rows() {
        let mut w = widget();
        assert!(block_on(w.refresh(&FailingProvider)).is_err());
        assert_eq!(w.rows().len(), 3);
    }

    #[test]
    fn test_cell_text() {
        let schema = entity([
            ("active", bool().into()),
            ("createdAt", date().into()),
            (
                "options",
                entity_field(entity([
                    ("size", text().with_label("Size").into()),
                    ("amount", number().into()),
                ]))
                .into(),
            ),
            ("price", number().with_formatter(|row| format!("${}", row["price"])).into()),
        ]);
        let columns = vec![
            Column::new("active"),
            Column::new("options"),
            Column::new("price"),
            Column::new("missing"),
            Column::new("id").with_formatter(|row| format!("#{}", row["id"])),
        ];
        let w = EntityWidget::new(schema, columns.clone(), "id");
        let row = json!({
            "id": 7,
            "active": false,
            "createdAt": "not a date",
            "options": {"size": "L", "amount": 3},
            "price": 12
        })
        .as_object()
        .cloned()
        .unwrap();

        assert_eq!(w.cell_text(&columns[0], &row), "No");
        assert_eq!(w.cell_text(&columns[1], &row), "Size: L\namount: 3");
        assert_eq!(w.cell_text(&columns[2], &row), "$12");
        assert_eq!(w.cell_text(&columns[3], &row), "");
        assert_eq!(w.cell_text(&columns[4], &row), "#7");
        assert_eq!(
            w.cell_text(&Column::new("createdAt"), &row),
            "not a date"
        );
    }
}
