//! # Entity Table
//!
//! Rows rendered through pre-computed cell text, one Edit button per row.

use dioxus::prelude::*;
use entiform_core::value_to_string;
use entiform_schema::{Column, SortConfig};
use serde_json::Value;

use crate::components::sortable_header::SortableHeader;

/// One rendered row: its key and the text of each column
#[derive(Debug, Clone, PartialEq)]
pub struct TableRow {
    pub key: Value,
    pub cells: Vec<String>,
}

impl TableRow {
    pub fn new(key: Value, cells: Vec<String>) -> Self {
        Self { key, cells }
    }

    /// Key as text, for element keys
    pub fn id(&self) -> String {
        value_to_string(Some(&self.key))
    }
}

#[derive(Props, Clone, PartialEq)]
pub struct EntityTableProps {
    pub columns: Vec<Column>,

    pub rows: Vec<TableRow>,

    #[props(default)]
    pub sort: Option<SortConfig>,

    #[props(default)]
    pub loading: bool,

    #[props(default)]
    pub on_sort: EventHandler<String>,

    /// Receives the key of the row whose Edit button was pressed
    #[props(default)]
    pub on_edit: EventHandler<Value>,
}

#[component]
pub fn EntityTable(props: EntityTableProps) -> Element {
    let column_count = props.columns.len() + 1;
    let on_edit = props.on_edit;

    rsx! {
        div {
            class: "table-wrapper rounded-lg border border-slate-700 overflow-x-auto",
            class: if props.loading { "opacity-60" } else { "" },

            table {
                class: "entity-table w-full text-sm",
                thead {
                    tr {
                        for column in props.columns.iter() {
                            SortableHeader {
                                key: "{column.key}",
                                column: column.clone(),
                                sort: props.sort.clone(),
                                on_sort: props.on_sort,
                            }
                        }
                        th { class: "table-head w-16", "" }
                    }
                }
                tbody {
                    if props.rows.is_empty() {
                        tr {
                            td {
                                class: "px-4 py-6 text-center text-slate-500",
                                colspan: "{column_count}",
                                if props.loading { "Loading…" } else { "No rows" }
                            }
                        }
                    }
                    for (id, row) in props.rows.iter().map(|r| (r.id(), r)) {
                        tr {
                            key: "{id}",
                            class: "table-row",
                            for (i, cell) in row.cells.iter().enumerate() {
                                td { key: "{i}", class: "table-cell", "{cell}" }
                            }
                            td {
                                class: "table-cell text-right",
                                button {
                                    r#type: "button",
                                    class: "btn btn-ghost",
                                    onclick: {
                                        let key = row.key.clone();
                                        move |_| on_edit.call(key.clone())
                                    },
                                    "Edit"
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_row_id() {
        assert_eq!(TableRow::new(json!(14381328), vec![]).id(), "14381328");
        assert_eq!(TableRow::new(json!("a-1"), vec![]).id(), "a-1");
    }
}
