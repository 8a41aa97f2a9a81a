//! Row filtering
//!
//! A `FilterSet` maps dotted field paths to typed filter values. Evaluating
//! it against a row ANDs every active entry; inactive entries (empty text,
//! unset ranges, an unannotated `false`) always pass. The kind of each entry
//! comes from its annotation, then from the schema, and finally from the
//! shape of the value itself, so unknown paths degrade to a substring match
//! instead of failing.

use crate::datetime::parse_instant;
use crate::field::FieldKind;
use crate::schema::Schema;
use entiform_core::{
    EditorError, EditorResult, FieldPath, Row, get_path, set_path, value_to_string, values_match,
};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Separator between the bounds of a textual date range
pub const RANGE_SEPARATOR: &str = "..";

// ============================================================================
// FilterValue
// ============================================================================

/// A user-entered filter value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum FilterValue {
    Text(String),
    Number(f64),
    Bool(bool),
    Select(Value),
    MultiSelect(Vec<Value>),
    DateRange {
        from: Option<String>,
        to: Option<String>,
    },
}

impl FilterValue {
    /// Parse textual input (command line, text boxes) for a field kind.
    ///
    /// Dates take `from..to` with either side optional; multiselect takes a
    /// comma-separated list.
    pub fn parse_for_kind(kind: FieldKind, raw: &str) -> EditorResult<Self> {
        match kind {
            FieldKind::Text => Ok(FilterValue::Text(raw.to_string())),
            FieldKind::Number => raw
                .trim()
                .parse::<f64>()
                .map(FilterValue::Number)
                .map_err(|_| EditorError::validation(format!("'{}' is not a number", raw))),
            FieldKind::Bool => match raw.trim().to_ascii_lowercase().as_str() {
                "true" | "yes" | "1" => Ok(FilterValue::Bool(true)),
                "false" | "no" | "0" => Ok(FilterValue::Bool(false)),
                _ => Err(EditorError::validation(format!(
                    "'{}' is not a boolean (use true/false)",
                    raw
                ))),
            },
            FieldKind::Select => Ok(FilterValue::Select(Value::String(raw.to_string()))),
            FieldKind::Multiselect => Ok(FilterValue::MultiSelect(
                raw.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(|s| Value::String(s.to_string()))
                    .collect(),
            )),
            FieldKind::Date => {
                let (from, to) = match raw.split_once(RANGE_SEPARATOR) {
                    Some((from, to)) => (from, to),
                    None => (raw, ""),
                };
                let (from, to) = (non_empty(from), non_empty(to));
                for bound in from.iter().chain(to.iter()) {
                    if parse_instant(bound).is_none() {
                        return Err(EditorError::validation(format!(
                            "'{}' is not a date (use an ISO-8601 date or date-time)",
                            bound
                        )));
                    }
                }
                Ok(FilterValue::date_range(from, to))
            }
            FieldKind::File | FieldKind::Json | FieldKind::Entity => Err(
                EditorError::validation(format!("{} fields cannot be filtered", kind)),
            ),
        }
    }

    /// Build a date range, dropping empty bounds
    pub fn date_range(from: Option<String>, to: Option<String>) -> Self {
        FilterValue::DateRange {
            from: from.filter(|s| !s.is_empty()),
            to: to.filter(|s| !s.is_empty()),
        }
    }

    /// The raw JSON shape of the value, as handed to remote providers
    pub fn to_json(&self) -> Value {
        match self {
            FilterValue::Text(s) => Value::String(s.clone()),
            FilterValue::Number(n) => serde_json::Number::from_f64(*n)
                .map(Value::Number)
                .unwrap_or(Value::Null),
            FilterValue::Bool(b) => Value::Bool(*b),
            FilterValue::Select(v) => v.clone(),
            FilterValue::MultiSelect(items) => Value::Array(items.clone()),
            FilterValue::DateRange { from, to } => Value::Array(vec![
                from.clone().map(Value::String).unwrap_or(Value::Null),
                to.clone().map(Value::String).unwrap_or(Value::Null),
            ]),
        }
    }
}

fn non_empty(s: &str) -> Option<String> {
    let s = s.trim();
    (!s.is_empty()).then(|| s.to_string())
}

// ============================================================================
// FilterEntry / FilterSet
// ============================================================================

/// A filter value with the kind of the control that produced it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterEntry {
    pub value: FilterValue,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<FieldKind>,
}

impl FilterEntry {
    /// Whether this entry restricts anything
    pub fn is_active(&self) -> bool {
        match &self.value {
            FilterValue::Text(s) => !s.is_empty(),
            FilterValue::Number(n) => !n.is_nan(),
            // An unannotated false is indistinguishable from "not set"
            FilterValue::Bool(b) => *b || self.kind == Some(FieldKind::Bool),
            FilterValue::Select(v) => !(v.is_null() || v.as_str() == Some("")),
            FilterValue::MultiSelect(items) => !items.is_empty(),
            FilterValue::DateRange { from, to } => from.is_some() || to.is_some(),
        }
    }
}

/// Filter values keyed by dotted field path
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilterSet(IndexMap<String, FilterEntry>);

impl FilterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a value without a kind annotation.
    ///
    /// Activity is judged from the value alone, so a bare `Bool(false)`
    /// counts as "no filter" even on a bool field; use [`FilterSet::set_typed`]
    /// to filter for `false`.
    pub fn set(&mut self, path: impl Into<String>, value: FilterValue) {
        self.0.insert(path.into(), FilterEntry { value, kind: None });
    }

    /// Set a value produced by a control of the given kind
    pub fn set_typed(&mut self, path: impl Into<String>, kind: FieldKind, value: FilterValue) {
        self.0.insert(
            path.into(),
            FilterEntry {
                value,
                kind: Some(kind),
            },
        );
    }

    /// Builder-style typed set
    pub fn with(mut self, path: impl Into<String>, kind: FieldKind, value: FilterValue) -> Self {
        self.set_typed(path, kind, value);
        self
    }

    pub fn remove(&mut self, path: &str) -> Option<FilterEntry> {
        self.0.shift_remove(path)
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn get(&self, path: &str) -> Option<&FilterEntry> {
        self.0.get(path)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FilterEntry)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Entries that restrict anything
    pub fn active(&self) -> impl Iterator<Item = (&str, &FilterEntry)> {
        self.iter().filter(|(_, entry)| entry.is_active())
    }

    /// Rebuild the nested object shape from dotted paths
    /// (`options.size` becomes `{"options": {"size": ..}}`)
    pub fn to_nested_json(&self) -> EditorResult<Value> {
        let mut out = Map::new();
        for (path, entry) in self.iter() {
            set_path(&mut out, path, entry.value.to_json())?;
        }
        Ok(Value::Object(out))
    }

    /// Whether a row passes every active entry
    pub fn matches(&self, row: &Row, schema: Option<&Schema>) -> bool {
        self.active()
            .all(|(path, entry)| entry_matches(path, entry, row, schema))
    }
}

impl FromIterator<(String, FilterEntry)> for FilterSet {
    fn from_iter<T: IntoIterator<Item = (String, FilterEntry)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

// ============================================================================
// Evaluation
// ============================================================================

/// Keep the rows passing every active filter, preserving order
pub fn filter_rows(rows: &[Row], filters: &FilterSet, schema: Option<&Schema>) -> Vec<Row> {
    let out: Vec<Row> = rows
        .iter()
        .filter(|row| filters.matches(row, schema))
        .cloned()
        .collect();
    tracing::debug!(
        "Filtered {} rows to {} ({} active filters)",
        rows.len(),
        out.len(),
        filters.active().count()
    );
    out
}

fn entry_matches(path: &str, entry: &FilterEntry, row: &Row, schema: Option<&Schema>) -> bool {
    let lookup = schema.and_then(|s| {
        FieldPath::parse(path)
            .ok()
            .and_then(|p| s.lookup(&p))
    });
    if let Some(found) = lookup {
        if !found.filterable {
            return true;
        }
    }
    let kind = entry.kind.or(lookup.map(|found| found.field.kind()));
    let cell = get_path(row, path);

    match &entry.value {
        FilterValue::Text(needle) => match kind {
            Some(FieldKind::Select | FieldKind::Multiselect) => {
                cell.is_some_and(|v| matches_any(v, &Value::String(needle.clone())))
            }
            Some(FieldKind::Number) => match needle.trim().parse::<f64>() {
                Ok(n) => cell.and_then(Value::as_f64) == Some(n),
                Err(_) => contains_text(cell, needle),
            },
            _ => contains_text(cell, needle),
        },
        FilterValue::Number(n) => cell.and_then(Value::as_f64) == Some(*n),
        FilterValue::Bool(b) => cell.and_then(Value::as_bool) == Some(*b),
        FilterValue::Select(wanted) => cell.is_some_and(|v| matches_any(v, wanted)),
        FilterValue::MultiSelect(list) => {
            list.is_empty() || cell.is_some_and(|v| list.iter().any(|w| matches_any(v, w)))
        }
        FilterValue::DateRange { from, to } => in_range(cell, from.as_deref(), to.as_deref()),
    }
}

fn contains_text(cell: Option<&Value>, needle: &str) -> bool {
    cell.is_some_and(|v| {
        value_to_string(Some(v))
            .to_lowercase()
            .contains(&needle.to_lowercase())
    })
}

/// Equality against a scalar cell, or membership for list-valued cells
fn matches_any(cell: &Value, wanted: &Value) -> bool {
    match cell {
        Value::Array(items) => items.iter().any(|item| values_match(item, wanted)),
        other => values_match(other, wanted),
    }
}

fn in_range(cell: Option<&Value>, from: Option<&str>, to: Option<&str>) -> bool {
    let Some(instant) = cell.and_then(Value::as_str).and_then(parse_instant) else {
        return false;
    };
    // A bound that does not parse matches nothing
    let after_from = from.is_none_or(|raw| parse_instant(raw).is_some_and(|b| instant >= b));
    let before_to = to.is_none_or(|raw| parse_instant(raw).is_some_and(|b| instant <= b));
    after_from && before_to
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::{bool, date, entity_field, multiselect, number, select, text};
    use crate::schema::entity;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use serde_json::json;

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

    fn products() -> Vec<Row> {
        rows(json!([
            {"id": 1, "title": "Alpha", "price": 10, "active": true,
             "options": {"size": "L", "amount": 5}, "tags": ["new"],
             "createdAt": "2024-01-01T00:00:00Z"},
            {"id": 2, "title": "beta", "price": 20, "active": false,
             "options": {"size": "M", "amount": 7}, "tags": ["sale", "new"],
             "createdAt": "2024-02-01T00:00:00Z"},
            {"id": 3, "title": "gamma", "price": 10, "active": true,
             "options": {"size": "L", "amount": 9}, "tags": [],
             "createdAt": "2024-03-01T00:00:00Z"}
        ]))
    }

    fn schema() -> Schema {
        entity([
            ("id", number().into()),
            ("title", text().filterable().into()),
            ("price", number().filterable().into()),
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
            ("tags", multiselect([("New", "new"), ("Sale", "sale")]).filterable().into()),
            ("createdAt", date().filterable().into()),
        ])
    }

    #[test]
    fn test_text_filter_case_insensitive() {
        let filters = FilterSet::new().with("title", FieldKind::Text, FilterValue::Text("al".into()));
        assert_eq!(ids(&filter_rows(&products(), &filters, Some(&schema()))), [1]);
    }

    #[test]
    fn test_empty_filters_are_identity() {
        let all = products();
        assert_eq!(filter_rows(&all, &FilterSet::new(), None), all);

        let mut inactive = FilterSet::new();
        inactive.set("title", FilterValue::Text(String::new()));
        inactive.set("active", FilterValue::Bool(false));
        inactive.set("tags", FilterValue::MultiSelect(vec![]));
        inactive.set("createdAt", FilterValue::date_range(None, Some(String::new())));
        assert_eq!(filter_rows(&all, &inactive, None), all);
    }

    #[test]
    fn test_number_equality() {
        let filters = FilterSet::new().with("price", FieldKind::Number, FilterValue::Number(10.0));
        assert_eq!(ids(&filter_rows(&products(), &filters, None)), [1, 3]);
    }

    #[test]
    fn test_bool_false_only_when_annotated() {
        let annotated = FilterSet::new().with("active", FieldKind::Bool, FilterValue::Bool(false));
        assert_eq!(ids(&filter_rows(&products(), &annotated, None)), [2]);

        let mut bare = FilterSet::new();
        bare.set("active", FilterValue::Bool(false));
        assert_eq!(ids(&filter_rows(&products(), &bare, None)), [1, 2, 3]);
        // The schema knowing the field is a bool does not activate it
        assert_eq!(ids(&filter_rows(&products(), &bare, Some(&schema()))), [1, 2, 3]);

        bare.set("active", FilterValue::Bool(true));
        assert_eq!(ids(&filter_rows(&products(), &bare, None)), [1, 3]);
    }

    #[test]
    fn test_nested_select() {
        let filters = FilterSet::new().with(
            "options.size",
            FieldKind::Select,
            FilterValue::Select(json!("L")),
        );
        assert_eq!(ids(&filter_rows(&products(), &filters, Some(&schema()))), [1, 3]);
    }

    #[test]
    fn test_nested_gated_by_parent_filterable() {
        let closed = entity([(
            "options",
            entity_field(entity([("size", text().filterable().into())])).into(),
        )]);
        let mut filters = FilterSet::new();
        filters.set("options.size", FilterValue::Text("L".into()));
        assert_eq!(ids(&filter_rows(&products(), &filters, Some(&closed))), [1, 2, 3]);
    }

    #[test]
    fn test_multiselect_membership() {
        let filters = FilterSet::new().with(
            "tags",
            FieldKind::Multiselect,
            FilterValue::MultiSelect(vec![json!("sale")]),
        );
        assert_eq!(ids(&filter_rows(&products(), &filters, None)), [2]);

        let scalar = FilterSet::new().with(
            "options.size",
            FieldKind::Multiselect,
            FilterValue::MultiSelect(vec![json!("M"), json!("L")]),
        );
        assert_eq!(ids(&filter_rows(&products(), &scalar, None)), [1, 2, 3]);
    }

    #[test]
    fn test_date_range_inclusive() {
        let filters = FilterSet::new().with(
            "createdAt",
            FieldKind::Date,
            FilterValue::date_range(
                Some("2024-02-01T00:00:00Z".into()),
                Some("2024-03-01T00:00:00Z".into()),
            ),
        );
        assert_eq!(ids(&filter_rows(&products(), &filters, None)), [2, 3]);

        let open_end = FilterSet::new().with(
            "createdAt",
            FieldKind::Date,
            FilterValue::date_range(None, Some("2024-01-01T00:00:00Z".into())),
        );
        assert_eq!(ids(&filter_rows(&products(), &open_end, None)), [1]);
    }

    #[test]
    fn test_unknown_path_falls_back_to_substring() {
        let mut filters = FilterSet::new();
        filters.set("price", FilterValue::Text("2".into()));
        assert_eq!(ids(&filter_rows(&products(), &filters, None)), [2]);

        // with the schema the same text is read as a number
        assert!(filter_rows(&products(), &filters, Some(&schema())).is_empty());

        filters.clear();
        filters.set("missing.path", FilterValue::Text("x".into()));
        assert!(filter_rows(&products(), &filters, Some(&schema())).is_empty());
    }

    #[test]
    fn test_and_across_fields() {
        let filters = FilterSet::new()
            .with("price", FieldKind::Number, FilterValue::Number(10.0))
            .with("title", FieldKind::Text, FilterValue::Text("GAM".into()));
        assert_eq!(ids(&filter_rows(&products(), &filters, None)), [3]);
    }

    #[test]
    fn test_to_nested_json() {
        let filters = FilterSet::new()
            .with("title", FieldKind::Text, FilterValue::Text("al".into()))
            .with("options.size", FieldKind::Select, FilterValue::Select(json!("L")))
            .with(
                "createdAt",
                FieldKind::Date,
                FilterValue::date_range(Some("2024-01-01T00:00".into()), None),
            );
        assert_eq!(
            filters.to_nested_json().unwrap(),
            json!({
                "title": "al",
                "options": {"size": "L"},
                "createdAt": ["2024-01-01T00:00", null]
            })
        );
    }

    #[test]
    fn test_parse_for_kind() {
        assert_eq!(
            FilterValue::parse_for_kind(FieldKind::Number, "12.5").unwrap(),
            FilterValue::Number(12.5)
        );
        assert_eq!(
            FilterValue::parse_for_kind(FieldKind::Bool, "no").unwrap(),
            FilterValue::Bool(false)
        );
        assert_eq!(
            FilterValue::parse_for_kind(FieldKind::Multiselect, "a, b,,c").unwrap(),
            FilterValue::MultiSelect(vec![json!("a"), json!("b"), json!("c")])
        );
        assert_eq!(
            FilterValue::parse_for_kind(FieldKind::Date, "..2024-01-01").unwrap(),
            FilterValue::date_range(None, Some("2024-01-01".into()))
        );
        assert!(FilterValue::parse_for_kind(FieldKind::Number, "ten").is_err());
        assert!(FilterValue::parse_for_kind(FieldKind::Json, "{}").is_err());
    }

    #[test]
    fn test_malformed_date_bound_is_rejected() {
        let err = FilterValue::parse_for_kind(FieldKind::Date, "not-a-date..").unwrap_err();
        assert!(err.is_validation());
        assert!(err.to_string().contains("not-a-date"));
        assert!(FilterValue::parse_for_kind(FieldKind::Date, "2024-01-01..soon").is_err());

        // Set programmatically, a bad bound excludes rows instead of widening the range
        let data = rows(json!([
            {"id": 1, "createdAt": "1999-05-01T00:00:00Z"},
            {"id": 2, "createdAt": "2024-05-01T00:00:00Z"}
        ]));
        let filters = FilterSet::new().with(
            "createdAt",
            FieldKind::Date,
            FilterValue::date_range(Some("not-a-date".into()), None),
        );
        assert!(filter_rows(&data, &filters, None).is_empty());
    }

    fn arb_row() -> impl Strategy<Value = Row> {
        (0i64..1000, "[a-zA-Z]{0,8}", 0i64..5, any::<bool>()).prop_map(|(id, title, price, active)| {
            json!({"id": id, "title": title, "price": price, "active": active})
                .as_object()
                .cloned()
                .unwrap()
        })
    }

    proptest! {
        #[test]
        fn prop_filter_is_subset(
            rows in prop::collection::vec(arb_row(), 0..20),
            needle in "[a-z]{0,2}",
            price in 0i64..5,
        ) {
            let filters = FilterSet::new()
                .with("title", FieldKind::Text, FilterValue::Text(needle.clone()))
                .with("price", FieldKind::Number, FilterValue::Number(price as f64));
            let out = filter_rows(&rows, &filters, None);
            prop_assert!(out.len() <= rows.len());
            for row in &out {
                prop_assert!(rows.contains(row));
                prop_assert!(row["title"].as_str().unwrap().to_lowercase().contains(&needle));
                prop_assert_eq!(row["price"].as_i64(), Some(price));
            }
        }

        #[test]
        fn prop_empty_filter_is_identity(rows in prop::collection::vec(arb_row(), 0..20)) {
            prop_assert_eq!(filter_rows(&rows, &FilterSet::new(), None), rows);
        }
    }
}
