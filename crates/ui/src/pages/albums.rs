//! Albums Page
//!
//! A single-row local widget whose schema uses every field kind and input
//! variant. The last submitted payload is shown below the table.

use dioxus::prelude::*;
use entiform_schema::field::{bool, date, file, json, multiselect, number, select, text};
use entiform_schema::{Column, Row, Schema, entity};
use serde_json::json;

use crate::components::{EntityWidgetView, WidgetData};
use crate::state::{APP_STATE, Page};

pub fn albums_schema() -> Schema {
    entity([
        ("id", number().with_label("ID").readonly().into()),
        ("title", text().with_label("Title").filterable().into()),
        (
            "description",
            text().textarea().with_label("Description").into(),
        ),
        (
            "rating",
            number()
                .slider()
                .with_label("Rating")
                .with_min(0.0)
                .with_max(100.0)
                .with_step(2.0)
                .filterable()
                .into(),
        ),
        (
            "country",
            select([("Japan", "japan"), ("China", "china")])
                .with_label("Country")
                .filterable()
                .into(),
        ),
        (
            "genres",
            multiselect([("Rock", 1), ("Jazz", 2), ("Pop", 3)])
                .with_label("Genres")
                .filterable()
                .into(),
        ),
        (
            "cover",
            file()
                .with_label("Cover")
                .with_max_size_mb(10.0)
                .accept(["image/webp"])
                .into(),
        ),
        ("releasedAt", date().with_label("Released At").filterable().into()),
        ("meta", json().with_label("Metadata").into()),
        ("active", bool().with_label("Active").filterable().into()),
        (
            "agreement",
            bool().checkbox().with_label("Agreement").into(),
        ),
    ])
}

pub fn albums_columns() -> Vec<Column> {
    vec![
        Column::new("title").with_label("Title"),
        Column::new("rating").with_label("Rating").sortable(),
        Column::new("country").with_label("Country"),
        Column::new("genres")
            .with_label("Genres")
            .with_formatter(genre_names),
        Column::new("releasedAt").with_label("Released At").sortable(),
        Column::new("active").with_label("Active"),
    ]
}

/// Genre ids rendered by name
fn genre_names(row: &Row) -> String {
    let Some(items) = row.get("genres").and_then(|v| v.as_array()) else {
        return String::new();
    };
    items
        .iter()
        .map(|id| match id.as_i64() {
            Some(1) => "Rock".to_string(),
            Some(2) => "Jazz".to_string(),
            Some(3) => "Pop".to_string(),
            _ => id.to_string(),
        })
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn album_rows() -> Vec<Row> {
    let album = json!({
        "id": 1,
        "title": "texxxx",
        "description": "hello album",
        "rating": 10,
        "country": "japan",
        "genres": [2],
        "cover": null,
        "releasedAt": "2001-04-01T09:00:00.000Z",
        "meta": {"label": "demo"},
        "active": false,
        "agreement": true
    });
    album.as_object().cloned().into_iter().collect()
}

#[component]
pub fn AlbumsPage() -> Element {
    let rows = use_hook(album_rows);
    let schema = use_hook(albums_schema);
    let last_saved = APP_STATE
        .read()
        .last_saved_on(Page::Albums)
        .map(|saved| saved.to_pretty_json());

    rsx! {
        div {
            class: "p-8 flex flex-col gap-6",
            EntityWidgetView {
                schema,
                columns: albums_columns(),
                data: WidgetData::Local(rows),
                title: "Albums".to_string(),
                on_save: move |row: Row| APP_STATE.write().record_save(Page::Albums, row),
            }

            if let Some(payload) = last_saved {
                section {
                    class: "rounded-lg border border-slate-700 bg-slate-800 p-4",
                    h3 { class: "text-sm font-semibold text-slate-300 mb-2", "Last saved payload" }
                    pre { class: "text-xs font-mono text-slate-200 whitespace-pre-wrap", "{payload}" }
                }
            }
        }
    }
}
