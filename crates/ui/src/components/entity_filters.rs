//! # Entity Filters Panel
//!
//! One control per filterable field of a schema. Edits go into a local draft
//! that is handed to the widget on "Apply Filters"; "Clear All" resets both.
//! Nested filterable fields are listed under their entity's label with
//! `key.nestedKey` paths. File and json fields never get a control, and the
//! panel is not rendered at all when nothing is filterable.

use dioxus::prelude::*;
use entiform_core::value_to_string;
use entiform_schema::schema::kind_has_filter_control;
use entiform_schema::{Field, FilterSet, FilterValue, Schema};
use serde_json::Value;

use crate::components::field_values::{
    date_from_input, date_input_value, option_at, option_choices, options_at, selected_index,
    selected_indices,
};
use crate::components::inputs::{
    ChoiceOption, DateTimeInput, MultiSelect, NumberInput, Select, TextInput,
};

#[derive(Props, Clone, PartialEq)]
pub struct EntityFiltersProps {
    /// Schema whose filterable fields get controls
    pub schema: Schema,

    /// Filters currently applied by the widget
    pub filters: FilterSet,

    pub on_apply: EventHandler<FilterSet>,

    pub on_clear: EventHandler<()>,
}

#[component]
pub fn EntityFilters(props: EntityFiltersProps) -> Element {
    let mut draft = use_signal(|| props.filters.clone());

    if !props.schema.has_filters() {
        return rsx! {};
    }

    let entries: Vec<(String, String, Field, usize)> = props
        .schema
        .filterable_fields()
        .into_iter()
        .filter(|f| kind_has_filter_control(f.field.kind()))
        .map(|f| (f.path.to_string(), f.label, f.field.clone(), f.depth))
        .collect();

    let on_apply = props.on_apply;
    let on_clear = props.on_clear;

    rsx! {
        section {
            class: "filters-panel p-4 mb-4 rounded-lg border border-slate-700 bg-slate-800",

            div {
                class: "filters-grid",
                for (path, label, field, depth) in entries {
                    FilterControl {
                        key: "{path}",
                        path: path.clone(),
                        label,
                        field,
                        depth,
                        draft,
                    }
                }
            }

            div {
                class: "flex justify-end gap-3 mt-4",
                button {
                    r#type: "button",
                    class: "btn btn-secondary",
                    onclick: move |_| {
                        draft.write().clear();
                        on_clear.call(());
                    },
                    "Clear All"
                }
                button {
                    r#type: "button",
                    class: "btn btn-primary",
                    onclick: move |_| on_apply.call(draft.read().clone()),
                    "Apply Filters"
                }
            }
        }
    }
}

// ============================================================================
// Controls
// ============================================================================

#[derive(Props, Clone, PartialEq)]
struct FilterControlProps {
    path: String,
    label: String,
    field: Field,
    depth: usize,
    draft: Signal<FilterSet>,
}

#[component]
fn FilterControl(props: FilterControlProps) -> Element {
    let draft = props.draft;
    let path = props.path.clone();
    let kind = props.field.kind();
    let current = draft.read().get(&path).map(|entry| entry.value.clone());
    let label = props.label.clone();
    let indent = if props.depth > 0 { "pl-4" } else { "" };

    let set = {
        let path = path.clone();
        move |value: Option<FilterValue>| {
            let mut draft = draft;
            match value {
                Some(v) => draft.write().set_typed(path.clone(), kind, v),
                None => {
                    draft.write().remove(&path);
                }
            }
        }
    };

    let control = match &props.field {
        Field::Entity(_) => rsx! {
            h4 { class: "text-xs font-semibold uppercase text-slate-400 pt-2", "{label}" }
        },
        Field::Text(_) => rsx! {
            TextInput {
                value: text_filter_value(current.as_ref()),
                placeholder: label.clone(),
                on_change: move |s: String| set((!s.is_empty()).then_some(FilterValue::Text(s))),
            }
        },
        Field::Number(_) => rsx! {
            NumberInput {
                value: match current {
                    Some(FilterValue::Number(n)) => Some(n),
                    _ => None,
                },
                placeholder: label.clone(),
                show_controls: false,
                on_change: move |n: Option<f64>| set(n.map(FilterValue::Number)),
            }
        },
        Field::Bool(_) => rsx! {
            Select {
                value: bool_filter_value(current.as_ref()),
                options: bool_choices(),
                label: label.clone(),
                placeholder: "All".to_string(),
                placeholder_selectable: true,
                on_change: move |s: String| set(parse_bool_choice(&s).map(FilterValue::Bool)),
            }
        },
        Field::Select(select) => {
            let options = select.options.clone();
            let selected = match &current {
                Some(FilterValue::Select(v)) => selected_index(&options, Some(v)),
                _ => String::new(),
            };
            rsx! {
                Select {
                    value: selected,
                    options: option_choices(&options),
                    label: label.clone(),
                    placeholder: "All".to_string(),
                    placeholder_selectable: true,
                    on_change: move |index: String| set(option_at(&options, &index).map(FilterValue::Select)),
                }
            }
        }
        Field::Multiselect(multi) => {
            let options = multi.options.clone();
            let selected = match &current {
                Some(FilterValue::MultiSelect(items)) => {
                    selected_indices(&options, Some(&Value::Array(items.clone())))
                }
                _ => Vec::new(),
            };
            rsx! {
                MultiSelect {
                    values: selected,
                    options: option_choices(&options),
                    label: label.clone(),
                    on_change: move |indices: Vec<String>| {
                        let values = options_at(&options, &indices);
                        set((!values.is_empty()).then_some(FilterValue::MultiSelect(values)))
                    },
                }
            }
        }
        Field::Date(_) => {
            let (from, to) = match &current {
                Some(FilterValue::DateRange { from, to }) => (from.clone(), to.clone()),
                _ => (None, None),
            };
            let from_shown = date_input_value(from.clone().map(Value::String).as_ref());
            let to_shown = date_input_value(to.clone().map(Value::String).as_ref());
            let set_from = set.clone();
            let set_to = set;
            let (from_kept, to_kept) = (from.clone(), to.clone());
            rsx! {
                div {
                    class: "flex flex-col gap-1",
                    span { class: "text-sm font-medium text-slate-300", "{label}" }
                    div {
                        class: "grid grid-cols-2 gap-2",
                        DateTimeInput {
                            value: from_shown,
                            on_change: move |s: String| set_from(date_range_filter(
                                non_null_string(date_from_input(&s)),
                                to_kept.clone(),
                            )),
                        }
                        DateTimeInput {
                            value: to_shown,
                            on_change: move |s: String| set_to(date_range_filter(
                                from_kept.clone(),
                                non_null_string(date_from_input(&s)),
                            )),
                        }
                    }
                }
            }
        }
        Field::File(_) | Field::Json(_) => rsx! {},
    };

    rsx! {
        div {
            class: "filter-control {indent}",
            {control}
        }
    }
}

// ============================================================================
// Helpers
// ============================================================================

fn bool_choices() -> Vec<ChoiceOption> {
    vec![
        ChoiceOption::new("true", "Yes"),
        ChoiceOption::new("false", "No"),
    ]
}

/// `"true"`/`"false"` from the tri-state select; the "All" entry is `None`
fn parse_bool_choice(raw: &str) -> Option<bool> {
    match raw {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

fn bool_filter_value(current: Option<&FilterValue>) -> String {
    match current {
        Some(FilterValue::Bool(b)) => b.to_string(),
        _ => String::new(),
    }
}

fn text_filter_value(current: Option<&FilterValue>) -> String {
    match current {
        Some(FilterValue::Text(s)) => s.clone(),
        Some(FilterValue::Select(v)) => value_to_string(Some(v)),
        _ => String::new(),
    }
}

fn non_null_string(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        _ => None,
    }
}

/// A date range filter, or `None` when both bounds are empty
fn date_range_filter(from: Option<String>, to: Option<String>) -> Option<FilterValue> {
    (from.is_some() || to.is_some()).then(|| FilterValue::date_range(from, to))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_bool_choice_is_tri_state() {
        assert_eq!(parse_bool_choice("true"), Some(true));
        assert_eq!(parse_bool_choice("false"), Some(false));
        assert_eq!(parse_bool_choice(""), None);
    }

    #[test]
    fn test_bool_filter_value() {
        assert_eq!(bool_filter_value(Some(&FilterValue::Bool(false))), "false");
        assert_eq!(bool_filter_value(None), "");
    }

    #[test]
    fn test_date_range_filter_drops_empty() {
        assert_eq!(date_range_filter(None, None), None);
        assert_eq!(
            date_range_filter(Some("2000-01-01T00:00:00.000Z".to_string()), None),
            Some(FilterValue::DateRange {
                from: Some("2000-01-01T00:00:00.000Z".to_string()),
                to: None,
            })
        );
    }
}
