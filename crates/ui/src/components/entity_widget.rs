//! # Entity Widget View
//!
//! Filter panel, sortable table and edit dialog around a headless
//! [`EntityWidget`]. Local data is filtered and sorted in memory; remote
//! data is re-fetched from the provider whenever filters or sort change.
//!
//! Saving is optimistic: the table shows the submitted row immediately, the
//! `on_save` callback receives the payload, and remote widgets also persist
//! it through the provider. Failures are logged and shown in the status bar
//! but the local update is kept.

use dioxus::prelude::*;
use entiform_core::EditorError;
use entiform_schema::{
    Column, EntityProvider, EntityWidget, FilterSet, Row, SchemaSource,
};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

use crate::components::dialogs::EntityEditDialog;
use crate::components::entity_filters::EntityFilters;
use crate::components::entity_table::{EntityTable, TableRow};
use crate::state::{APP_STATE, StatusLevel};

// ============================================================================
// Data source
// ============================================================================

/// Shared provider; equal when both handles point at the same provider
#[derive(Clone)]
pub struct ProviderHandle(pub Arc<dyn EntityProvider>);

impl ProviderHandle {
    pub fn new(provider: impl EntityProvider + 'static) -> Self {
        Self(Arc::new(provider))
    }
}

impl PartialEq for ProviderHandle {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for ProviderHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ProviderHandle(..)")
    }
}

/// Where the widget's rows come from
#[derive(Debug, Clone, PartialEq)]
pub enum WidgetData {
    /// Rows owned by the widget, filtered and sorted in memory
    Local(Vec<Row>),
    /// Rows queried from a provider
    Remote(ProviderHandle),
}

impl WidgetData {
    fn provider(&self) -> Option<ProviderHandle> {
        match self {
            WidgetData::Local(_) => None,
            WidgetData::Remote(provider) => Some(provider.clone()),
        }
    }
}

// ============================================================================
// Component
// ============================================================================

/// The widget state is built from these props on mount. Later changes to
/// `schema`, `columns`, `key_prop` or `data` are not picked up; give the
/// component a new `key` to rebuild it.
#[derive(Props, Clone, PartialEq)]
pub struct EntityWidgetViewProps {
    /// Fixed schema, or a function of the edited row
    pub schema: SchemaSource,

    pub columns: Vec<Column>,

    #[props(default = "id".to_string())]
    pub key_prop: String,

    pub data: WidgetData,

    #[props(default)]
    pub title: Option<String>,

    /// Receives every successfully submitted row
    #[props(default)]
    pub on_save: EventHandler<Row>,
}

#[component]
pub fn EntityWidgetView(props: EntityWidgetViewProps) -> Element {
    let mut widget = use_signal(|| {
        let base = EntityWidget::new(
            props.schema.clone(),
            props.columns.clone(),
            props.key_prop.clone(),
        );
        match &props.data {
            WidgetData::Local(rows) => base.with_rows(rows.clone()),
            WidgetData::Remote(_) => base.remote(),
        }
    });
    let mut query_rev = use_signal(|| 0u64);
    let mut loading = use_signal(|| false);
    let provider = props.data.provider();

    // Remote fetch on mount and on every filter/sort change. Responses are
    // applied in arrival order.
    use_effect({
        let provider = provider.clone();
        move || {
            let revision = query_rev();
            let Some(provider) = provider.clone() else {
                return;
            };
            let (filters, sort) = {
                let w = widget.peek();
                (w.filters().clone(), w.sort().cloned())
            };
            loading.set(true);
            spawn(async move {
                match provider.0.query(&filters, sort.as_ref()).await {
                    Ok(rows) => {
                        tracing::debug!("Query #{} returned {} rows", revision, rows.len());
                        widget.write().replace_rows(rows);
                    }
                    Err(e) => {
                        tracing::error!("Failed to load rows: {}", e);
                        APP_STATE
                            .write()
                            .ui
                            .set_status(format!("Failed to load rows: {}", e), StatusLevel::Error);
                    }
                }
                loading.set(false);
            });
        }
    });

    let remote = provider.is_some();
    let mut refetch = move || {
        if remote {
            *query_rev.write() += 1;
        }
    };

    // Handlers
    let on_apply = move |filters: FilterSet| {
        tracing::debug!("Applying {} filter(s)", filters.active().count());
        widget.write().set_filters(filters);
        refetch();
    };
    let on_clear = move |_: ()| {
        widget.write().clear_filters();
        refetch();
    };
    let on_sort = move |key: String| {
        widget.write().toggle_sort(&key);
        refetch();
    };
    let on_edit = move |key: Value| {
        if let Err(e) = widget.write().begin_edit(&key) {
            tracing::error!("Cannot edit row: {}", e);
        }
    };
    let on_draft_change = move |(path, value): (String, Value)| {
        if let Err(e) = widget.write().set_draft_value(&path, value) {
            tracing::warn!("Rejected edit of '{}': {}", path, e);
        }
    };
    let on_cancel = move |_: ()| widget.write().cancel_edit();
    let on_save = props.on_save;
    let on_submit = move |_: ()| {
        let key = widget.read().editing_key().cloned();
        let result = widget.write().submit_edit();
        match result {
            Ok(payload) => {
                on_save.call(payload.clone());
                match (provider.clone(), key) {
                    (Some(provider), Some(key)) => {
                        spawn(persist(provider, key, payload));
                    }
                    _ => {
                        APP_STATE.write().ui.set_status("Saved", StatusLevel::Success);
                    }
                }
            }
            Err(EditorError::FormInvalid(errors)) => {
                tracing::debug!("Form has {} invalid field(s)", errors.len());
            }
            Err(e) => tracing::error!("Submit failed: {}", e),
        }
    };

    // Snapshot for rendering
    let (filter_schema, filters, sort, columns, rows, form) = {
        let w = widget.read();
        let rows: Vec<TableRow> = w
            .visible_rows()
            .iter()
            .filter_map(|row| match w.row_key(row) {
                Ok(key) => Some(TableRow::new(
                    key.clone(),
                    w.columns().iter().map(|c| w.cell_text(c, row)).collect(),
                )),
                Err(e) => {
                    tracing::warn!("Skipping row: {}", e);
                    None
                }
            })
            .collect();
        (
            w.filter_schema(),
            w.filters().clone(),
            w.sort().cloned(),
            w.columns().to_vec(),
            rows,
            w.form().clone(),
        )
    };
    let row_count = rows.len();

    rsx! {
        div {
            class: "entity-widget flex flex-col",

            div {
                class: "flex items-center justify-between mb-3",
                if let Some(title) = &props.title {
                    h2 { class: "text-xl font-semibold text-slate-100", "{title}" }
                }
                span { class: "text-xs text-slate-400", "{row_count} row(s)" }
            }

            EntityFilters {
                schema: filter_schema,
                filters,
                on_apply,
                on_clear,
            }

            EntityTable {
                columns,
                rows,
                sort,
                loading: loading(),
                on_sort,
                on_edit,
            }

            EntityEditDialog {
                form,
                on_change: on_draft_change,
                on_submit,
                on_cancel,
            }
        }
    }
}

/// Persist a submitted row through the provider
async fn persist(provider: ProviderHandle, key: Value, payload: Row) {
    match provider.0.edit(&key, payload).await {
        Ok(Some(_)) => {
            tracing::info!("Persisted row {}", key);
            APP_STATE.write().ui.set_status("Saved", StatusLevel::Success);
        }
        Ok(None) => {
            tracing::warn!("Provider has no row {}", key);
            APP_STATE
                .write()
                .ui
                .set_status(format!("Row {} no longer exists", key), StatusLevel::Warning);
        }
        Err(e) => {
            tracing::error!("Failed to save row {}: {}", key, e);
            APP_STATE
                .write()
                .ui
                .set_status(format!("Failed to save: {}", e), StatusLevel::Error);
        }
    }
}
