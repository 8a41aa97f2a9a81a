//! Products Page
//!
//! Remote widget over an in-memory product store. Inactive products open
//! with every field read-only except the id, which is always read-only.

use dioxus::prelude::*;
use entiform_schema::field::{bool, date, entity_field, number, select, text};
use entiform_schema::{Column, InMemoryProvider, Row, Schema, SchemaSource, entity};

use crate::components::{EntityWidgetView, ProviderHandle, WidgetData};
use crate::pages::demo_data;

/// Product sizes offered by the size select
pub const SIZES: [&str; 5] = ["S", "M", "L", "XL", "XXL"];

/// Edit schema for a product; `disabled` locks the editable fields
pub fn products_schema(disabled: bool) -> Schema {
    entity([
        (
            "id",
            text().with_label("ID").readonly().filterable().into(),
        ),
        (
            "name",
            text()
                .with_label("Name")
                .readonly_if(disabled)
                .filterable()
                .into(),
        ),
        (
            "createdAt",
            date()
                .with_label("Created At")
                .readonly_if(disabled)
                .filterable()
                .into(),
        ),
        (
            "active",
            bool()
                .with_label("Active")
                .readonly_if(disabled)
                .filterable()
                .into(),
        ),
        (
            "options",
            entity_field(entity([
                (
                    "size",
                    select(SIZES.iter().map(|s| (*s, *s)))
                        .with_label("Size")
                        .filterable()
                        .into(),
                ),
                (
                    "amount",
                    number()
                        .with_label("Amount")
                        .with_min(0.0)
                        .with_max(1000.0)
                        .with_step(1.0)
                        .filterable()
                        .into(),
                ),
            ]))
            .with_label("Options")
            .filterable()
            .into(),
        ),
    ])
}

pub fn products_columns() -> Vec<Column> {
    vec![
        Column::new("id").with_label("ID"),
        Column::new("name").with_label("Name"),
        Column::new("active").with_label("Active").sortable(),
        Column::new("createdAt").with_label("Created At").sortable(),
        Column::new("options").with_label("Options"),
    ]
}

fn is_active(row: &Row) -> bool {
    row.get("active").and_then(|v| v.as_bool()).unwrap_or(false)
}

#[component]
pub fn ProductsPage() -> Element {
    let provider = use_hook(|| {
        ProviderHandle::new(
            InMemoryProvider::new("id", demo_data::or_empty(demo_data::products()))
                .with_schema(products_schema(false)),
        )
    });
    let schema = use_hook(|| SchemaSource::per_row(|row| products_schema(!is_active(row))));

    rsx! {
        div {
            class: "p-8",
            EntityWidgetView {
                schema,
                columns: products_columns(),
                data: WidgetData::Remote(provider),
                title: "Products".to_string(),
                on_save: move |row: Row| {
                    tracing::debug!("Product submitted: {:?}", row.get("id"));
                },
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use entiform_schema::{EntityProvider, FieldKind, FilterSet, FilterValue, SortConfig};
    use serde_json::json;

    #[test]
    fn test_inactive_product_is_locked() {
        let locked = products_schema(true);
        assert!(locked.get("name").unwrap().is_readonly());
        assert!(locked.get("id").unwrap().is_readonly());

        let open = products_schema(false);
        assert!(!open.get("name").unwrap().is_readonly());
        assert!(open.get("id").unwrap().is_readonly());
    }

    #[test]
    fn test_nested_filters_listed() {
        let schema = products_schema(false);
        let paths: Vec<String> = schema
            .filterable_fields()
            .iter()
            .map(|f| f.path.to_string())
            .collect();
        assert!(paths.contains(&"options.size".to_string()));
        assert!(paths.contains(&"options.amount".to_string()));
    }

    #[test]
    fn test_provider_filters_by_nested_size() {
        let provider = InMemoryProvider::new("id", demo_data::products().unwrap())
            .with_schema(products_schema(false));
        let filters = FilterSet::new().with(
            "options.size",
            FieldKind::Select,
            FilterValue::Select(json!("XXL")),
        );
        let sort = SortConfig::asc("createdAt");

        let rows = tokio_test::block_on(provider.query(&filters, Some(&sort))).unwrap();
        let ids: Vec<_> = rows.iter().map(|r| r["id"].clone()).collect();
        assert_eq!(ids, vec![json!(79901249), json!(32497729)]);
    }
}
