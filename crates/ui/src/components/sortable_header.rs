//! # Sortable Header
//!
//! Table header cell. Sortable columns are buttons that cycle the sort
//! (ascending, descending, none) and show ▲ or ▼ while active; other
//! columns are plain labels.

use dioxus::prelude::*;
use entiform_schema::{Column, SortConfig, SortDirection};

#[derive(Props, Clone, PartialEq)]
pub struct SortableHeaderProps {
    pub column: Column,

    /// The widget's current sort
    #[props(default)]
    pub sort: Option<SortConfig>,

    /// Receives the column key when a sortable header is clicked
    #[props(default)]
    pub on_sort: EventHandler<String>,
}

#[component]
pub fn SortableHeader(props: SortableHeaderProps) -> Element {
    let title = props.column.title().to_string();

    if !props.column.sortable {
        return rsx! {
            th { class: "table-head", "{title}" }
        };
    }

    let key = props.column.key.clone();
    let indicator = sort_indicator(props.sort.as_ref(), &key);
    let on_sort = props.on_sort;

    rsx! {
        th {
            class: "table-head",
            aria_sort: aria_sort(props.sort.as_ref(), &key),
            button {
                r#type: "button",
                class: "sort-button inline-flex items-center gap-1",
                onclick: move |_| on_sort.call(key.clone()),
                span { "{title}" }
                span { class: "sort-indicator w-3 text-indigo-400", "{indicator}" }
            }
        }
    }
}

/// ▲ / ▼ when `key` is the active sort column, empty otherwise
pub fn sort_indicator(sort: Option<&SortConfig>, key: &str) -> &'static str {
    match sort {
        Some(s) if s.key == key => match s.direction {
            SortDirection::Asc => "▲",
            SortDirection::Desc => "▼",
        },
        _ => "",
    }
}

fn aria_sort(sort: Option<&SortConfig>, key: &str) -> &'static str {
    match sort {
        Some(s) if s.key == key => match s.direction {
            SortDirection::Asc => "ascending",
            SortDirection::Desc => "descending",
        },
        _ => "none",
    }
}
