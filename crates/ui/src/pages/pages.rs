//! Pages Page
//!
//! Local widget: rows live in the widget itself and are filtered and sorted
//! in memory. Saved rows are reported through the app state.

use dioxus::prelude::*;
use entiform_schema::field::{bool, date, text};
use entiform_schema::{Column, Row, Schema, SchemaSource, entity};

use crate::components::{EntityWidgetView, WidgetData};
use crate::pages::demo_data;
use crate::state::{APP_STATE, Page};

pub fn pages_schema(disabled: bool) -> Schema {
    let locked = |label: &str| text().with_label(label).readonly_if(disabled).filterable();
    entity([
        ("id", locked("ID").into()),
        ("title", locked("Title").into()),
        (
            "updatedAt",
            date()
                .with_label("Updated At")
                .readonly_if(disabled)
                .filterable()
                .into(),
        ),
        (
            "publishedAt",
            date()
                .with_label("Published At")
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

pub fn pages_columns() -> Vec<Column> {
    vec![
        Column::new("id").with_label("ID"),
        Column::new("title").with_label("Title"),
        Column::new("active").with_label("Active").sortable(),
        Column::new("updatedAt").with_label("Updated At").sortable(),
        Column::new("publishedAt").with_label("Published At"),
    ]
}

#[component]
pub fn PagesPage() -> Element {
    let rows = use_hook(|| demo_data::or_empty(demo_data::pages()));
    let schema = use_hook(|| {
        SchemaSource::per_row(|row: &Row| {
            let active = row.get("active").and_then(|v| v.as_bool()).unwrap_or(false);
            pages_schema(!active)
        })
    });

    rsx! {
        div {
            class: "p-8",
            EntityWidgetView {
                schema,
                columns: pages_columns(),
                data: WidgetData::Local(rows),
                title: "Pages".to_string(),
                on_save: move |row: Row| APP_STATE.write().record_save(Page::Pages, row),
            }
        }
    }
}
