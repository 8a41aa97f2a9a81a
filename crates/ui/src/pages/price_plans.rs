//! Price Plans Page

use dioxus::prelude::*;
use entiform_schema::field::{bool, date, text};
use entiform_schema::{Column, InMemoryProvider, Row, Schema, SchemaSource, entity};

use crate::components::{EntityWidgetView, ProviderHandle, WidgetData};
use crate::pages::demo_data;

pub fn price_plans_schema(disabled: bool) -> Schema {
    entity([
        (
            "id",
            text()
                .with_label("ID")
                .readonly_if(disabled)
                .filterable()
                .into(),
        ),
        (
            "description",
            text()
                .textarea()
                .with_label("Description")
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
            "removedAt",
            date()
                .with_label("Removed At")
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
    ])
}

pub fn price_plans_columns() -> Vec<Column> {
    vec![
        Column::new("id").with_label("ID"),
        Column::new("description").with_label("Description"),
        Column::new("active").with_label("Active").sortable(),
        Column::new("createdAt").with_label("Created At").sortable(),
        Column::new("removedAt").with_label("Removed At"),
    ]
}

#[component]
pub fn PricePlansPage() -> Element {
    let provider = use_hook(|| {
        ProviderHandle::new(
            InMemoryProvider::new("id", demo_data::or_empty(demo_data::price_plans()))
                .with_schema(price_plans_schema(false)),
        )
    });
    let schema = use_hook(|| {
        SchemaSource::per_row(|row: &Row| {
            let active = row.get("active").and_then(|v| v.as_bool()).unwrap_or(false);
            price_plans_schema(!active)
        })
    });

    rsx! {
        div {
            class: "p-8",
            EntityWidgetView {
                schema,
                columns: price_plans_columns(),
                data: WidgetData::Remote(provider),
                title: "Price Plans".to_string(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use entiform_schema::{EntityProvider, FieldKind, FilterSet, FilterValue};
    use serde_json::json;

    #[test]
    fn test_active_filter_on_provider() {
        let provider = InMemoryProvider::new("id", demo_data::price_plans().unwrap())
            .with_schema(price_plans_schema(false));
        let filters = FilterSet::new().with("active", FieldKind::Bool, FilterValue::Bool(true));

        let rows = tokio_test::block_on(provider.query(&filters, None)).unwrap();
        assert_eq!(rows.len(), 3);
        assert!(rows.iter().all(|r| r["active"] == json!(true)));
    }

    #[test]
    fn test_edit_through_provider() {
        let provider = InMemoryProvider::new("id", demo_data::price_plans().unwrap());
        let patch = json!({"description": "renamed"}).as_object().cloned().unwrap();

        let updated = tokio_test::block_on(provider.edit(&json!(92933022), patch))
            .unwrap()
            .unwrap();
        assert_eq!(updated["description"], json!("renamed"));
        assert_eq!(updated["createdAt"], json!("1975-02-06T15:44:29.0Z"));
    }
}
