//! # Entity Edit Dialog
//!
//! Renders an [`EntityForm`] inside a [`Modal`]: one control per schema
//! field, nested entity fields as recursive sub-forms, and the per-field
//! errors of the last submit. The dialog holds no state of its own; every
//! edit is reported through `on_change` with the field's dotted path.

use dioxus::prelude::*;
use entiform_core::{value_as_f64, value_to_string};
use entiform_schema::{BoolInput, Field, FileInfo, NumberInput, Schema, TextInput};
use serde_json::Value;

use crate::components::dialogs::Modal;
use crate::components::field_values::{
    date_from_input, date_input_value, json_text, number_value, option_at, option_choices,
    options_at, selected_index, selected_indices,
};
use crate::components::file_picker::FilePicker;
use crate::components::inputs::{
    Checkbox, DateTimeInput, MultiSelect, NumberInput as NumberBox, Select, Slider, TextArea,
    TextInput as TextBox, Toggle,
};
use entiform_schema::EntityForm;

/// Placeholder of the JSON editor
pub const JSON_PLACEHOLDER: &str = r#"{"foo": "bar"}"#;

// ============================================================================
// Dialog
// ============================================================================

#[derive(Props, Clone, PartialEq)]
pub struct EntityEditDialogProps {
    /// The form being edited; the dialog is shown while it is open
    pub form: EntityForm,

    #[props(default = "Edit".to_string())]
    pub title: String,

    /// A draft value changed: `(dotted path, new value)`
    pub on_change: EventHandler<(String, Value)>,

    pub on_submit: EventHandler<()>,

    /// Cancel button, backdrop click or Escape
    pub on_cancel: EventHandler<()>,
}

#[component]
pub fn EntityEditDialog(props: EntityEditDialogProps) -> Element {
    let on_submit = props.on_submit;
    let on_cancel = props.on_cancel;
    let error_count = props.form.errors().len();

    rsx! {
        Modal {
            open: props.form.is_open(),
            title: props.title.clone(),
            width: "max-w-2xl".to_string(),
            on_close: move |_| on_cancel.call(()),

            form {
                class: "p-6 flex flex-col gap-4",
                onsubmit: move |e| {
                    e.prevent_default();
                    on_submit.call(());
                },

                SchemaFields {
                    schema: props.form.schema().clone(),
                    prefix: String::new(),
                    form: props.form.clone(),
                    on_change: props.on_change,
                }

                if error_count > 0 {
                    p {
                        class: "text-sm text-rose-400",
                        "Please fix {error_count} invalid field(s)."
                    }
                }

                div {
                    class: "flex justify-end gap-3 pt-2 border-t border-slate-700",
                    button {
                        r#type: "button",
                        class: "btn btn-secondary",
                        onclick: move |_| on_cancel.call(()),
                        "Cancel"
                    }
                    button {
                        r#type: "submit",
                        class: "btn btn-primary",
                        "Save"
                    }
                }
            }
        }
    }
}

// ============================================================================
// Fields
// ============================================================================

#[derive(Props, Clone, PartialEq)]
struct SchemaFieldsProps {
    schema: Schema,
    /// Dotted path of the enclosing entity field; empty at the top level
    prefix: String,
    form: EntityForm,
    on_change: EventHandler<(String, Value)>,
}

/// One control per field of `schema`, in schema order
#[component]
fn SchemaFields(props: SchemaFieldsProps) -> Element {
    rsx! {
        for (key, field) in props.schema.iter() {
            FieldControl {
                key: "{key}",
                path: join_path(&props.prefix, key),
                name: key.to_string(),
                field: field.clone(),
                form: props.form.clone(),
                on_change: props.on_change,
            }
        }
    }
}

#[derive(Props, Clone, PartialEq)]
struct FieldControlProps {
    path: String,
    name: String,
    field: Field,
    form: EntityForm,
    on_change: EventHandler<(String, Value)>,
}

/// The control matching a field's kind and input variant
#[component]
fn FieldControl(props: FieldControlProps) -> Element {
    let path = props.path.clone();
    let value = props.form.value(&path).cloned();
    let error = props.form.error(&path).map(str::to_string);
    let label = props.field.label_or(&props.name).to_string();
    let disabled = props.field.is_readonly();
    let on_change = props.on_change;
    let emit = move |v: Value| on_change.call((path.clone(), v));

    match &props.field {
        Field::Text(text) => {
            let current = value_to_string(value.as_ref());
            match text.input {
                TextInput::Input => rsx! {
                    TextBox {
                        value: current,
                        label,
                        error,
                        disabled,
                        on_change: move |s: String| emit(Value::String(s)),
                    }
                },
                TextInput::Textarea => rsx! {
                    TextArea {
                        value: current,
                        label,
                        error,
                        disabled,
                        on_change: move |s: String| emit(Value::String(s)),
                    }
                },
            }
        }
        Field::Number(number) => {
            let current = value_as_f64(value.as_ref());
            match number.input {
                NumberInput::Input => rsx! {
                    NumberBox {
                        value: current,
                        label,
                        error,
                        min: number.min,
                        max: number.max,
                        step: number.step,
                        disabled,
                        on_change: move |n: Option<f64>| emit(n.map(number_value).unwrap_or(Value::Null)),
                    }
                },
                NumberInput::Slider => rsx! {
                    Slider {
                        value: current.unwrap_or(number.min.unwrap_or(0.0)),
                        label,
                        error,
                        min: number.min.unwrap_or(0.0),
                        max: number.max.unwrap_or(100.0),
                        step: number.step.unwrap_or(1.0),
                        disabled,
                        on_change: move |n: f64| emit(number_value(n)),
                    }
                },
            }
        }
        Field::Bool(flag) => {
            let checked = value.as_ref().and_then(Value::as_bool).unwrap_or(false);
            match flag.input {
                BoolInput::Switch => rsx! {
                    Toggle {
                        checked,
                        label,
                        disabled,
                        on_change: move |b: bool| emit(Value::Bool(b)),
                    }
                },
                BoolInput::Checkbox => rsx! {
                    Checkbox {
                        checked,
                        label,
                        disabled,
                        on_change: move |b: bool| emit(Value::Bool(b)),
                    }
                },
            }
        }
        Field::Select(select) => {
            let options = select.options.clone();
            rsx! {
                Select {
                    value: selected_index(&options, value.as_ref()),
                    options: option_choices(&options),
                    label,
                    placeholder: "Select...".to_string(),
                    error,
                    disabled,
                    on_change: move |index: String| {
                        emit(option_at(&options, &index).unwrap_or(Value::Null))
                    },
                }
            }
        }
        Field::Multiselect(multi) => {
            let options = multi.options.clone();
            rsx! {
                MultiSelect {
                    values: selected_indices(&options, value.as_ref()),
                    options: option_choices(&options),
                    label,
                    error,
                    disabled,
                    on_change: move |indices: Vec<String>| {
                        emit(Value::Array(options_at(&options, &indices)))
                    },
                }
            }
        }
        Field::File(file) => {
            let files = value
                .as_ref()
                .and_then(FileInfo::list_from_value)
                .unwrap_or_default();
            rsx! {
                FilePicker {
                    files,
                    label,
                    multiple: file.multiple,
                    accept: file.accept_files.clone(),
                    max_size_mb: file.max_size_mb,
                    required: file.required,
                    error,
                    disabled,
                    on_change: move |picked: Vec<FileInfo>| {
                        if picked.is_empty() {
                            emit(Value::Null)
                        } else {
                            emit(FileInfo::list_to_value(&picked))
                        }
                    },
                }
            }
        }
        Field::Json(_) => rsx! {
            TextArea {
                value: json_text(value.as_ref()),
                label,
                placeholder: JSON_PLACEHOLDER.to_string(),
                error,
                disabled,
                rows: 6,
                monospace: true,
                on_change: move |s: String| emit(Value::String(s)),
            }
        },
        Field::Date(_) => rsx! {
            DateTimeInput {
                value: date_input_value(value.as_ref()),
                label,
                error,
                disabled,
                on_change: move |s: String| emit(date_from_input(&s)),
            }
        },
        Field::Entity(nested) => rsx! {
            fieldset {
                class: "nested-entity rounded-lg border border-slate-700 p-4 flex flex-col gap-4",
                disabled,
                legend { class: "px-1 text-sm font-medium text-slate-300", "{label}" }
                SchemaFields {
                    schema: nested.schema.clone(),
                    prefix: props.path.clone(),
                    form: props.form.clone(),
                    on_change: props.on_change,
                }
            }
        },
    }
}

fn join_path(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", prefix, key)
    }
}
