//! # Input Components
//!
//! The form controls every field kind renders through:
//! - **TextInput** / **TextArea**: single and multi-line text (TextArea also
//!   serves as the JSON editor in monospace mode)
//! - **NumberInput**: numeric entry with +/- controls; empty input is `None`
//! - **Slider**: range input for bounded numbers
//! - **Select** / **MultiSelect**: single choice dropdown and checkbox list
//! - **Checkbox** / **Toggle**: boolean primitives with `checked`,
//!   `on_change` and `disabled`
//! - **DateTimeInput**: local date-time entry
//!
//! Every labelled control is wrapped in a [`FieldFrame`], which draws the
//! label, the required marker and the error or help line below.

use dioxus::prelude::*;

// ============================================================================
// Field Frame
// ============================================================================

#[derive(Props, Clone, PartialEq)]
pub struct FieldFrameProps {
    #[props(default)]
    pub label: Option<String>,

    #[props(default = false)]
    pub required: bool,

    /// Error message; replaces the help text when present
    #[props(default)]
    pub error: Option<String>,

    #[props(default)]
    pub help_text: Option<String>,

    pub children: Element,
}

/// Label, control and error line
#[component]
pub fn FieldFrame(props: FieldFrameProps) -> Element {
    rsx! {
        div {
            class: "input-group",

            if let Some(label) = &props.label {
                label {
                    class: "block text-sm font-medium text-slate-300 mb-1",
                    "{label}"
                    if props.required {
                        span { class: "text-rose-400 ml-1", "*" }
                    }
                }
            }

            {props.children}

            if let Some(error) = &props.error {
                p { class: "mt-1 text-xs text-rose-400", "{error}" }
            } else if let Some(help) = &props.help_text {
                p { class: "mt-1 text-xs text-slate-500", "{help}" }
            }
        }
    }
}

// ============================================================================
// Text Input Component
// ============================================================================

#[derive(Props, Clone, PartialEq)]
pub struct TextInputProps {
    pub value: String,

    #[props(default)]
    pub label: Option<String>,

    #[props(default)]
    pub placeholder: Option<String>,

    #[props(default)]
    pub help_text: Option<String>,

    #[props(default)]
    pub error: Option<String>,

    #[props(default = false)]
    pub required: bool,

    #[props(default = false)]
    pub disabled: bool,

    #[props(default)]
    pub class: Option<String>,

    #[props(default)]
    pub on_change: EventHandler<String>,

    /// Fired with the current value when Enter is pressed
    #[props(default)]
    pub on_enter: EventHandler<String>,
}

/// Single-line text input component
#[component]
pub fn TextInput(props: TextInputProps) -> Element {
    let input_class = build_input_class(props.error.is_some(), props.disabled, &props.class);

    rsx! {
        FieldFrame {
            label: props.label.clone(),
            required: props.required,
            error: props.error.clone(),
            help_text: props.help_text.clone(),

            input {
                class: "{input_class}",
                r#type: "text",
                value: "{props.value}",
                placeholder: props.placeholder.as_deref().unwrap_or(""),
                disabled: props.disabled,
                oninput: move |e| props.on_change.call(e.value()),
                onkeydown: {
                    let value = props.value.clone();
                    move |e: KeyboardEvent| {
                        if e.key() == Key::Enter {
                            props.on_enter.call(value.clone());
                        }
                    }
                },
            }
        }
    }
}

// ============================================================================
// Text Area Component
// ============================================================================

#[derive(Props, Clone, PartialEq)]
pub struct TextAreaProps {
    pub value: String,

    #[props(default)]
    pub label: Option<String>,

    #[props(default)]
    pub placeholder: Option<String>,

    #[props(default)]
    pub help_text: Option<String>,

    #[props(default)]
    pub error: Option<String>,

    #[props(default = false)]
    pub required: bool,

    #[props(default = false)]
    pub disabled: bool,

    #[props(default = 4)]
    pub rows: u32,

    /// Monospace font, for code such as JSON
    #[props(default = false)]
    pub monospace: bool,

    #[props(default)]
    pub on_change: EventHandler<String>,
}

/// Multi-line text input component
#[component]
pub fn TextArea(props: TextAreaProps) -> Element {
    let textarea_class =
        build_textarea_class(props.error.is_some(), props.disabled, props.monospace);

    rsx! {
        FieldFrame {
            label: props.label.clone(),
            required: props.required,
            error: props.error.clone(),
            help_text: props.help_text.clone(),

            textarea {
                class: "{textarea_class}",
                rows: "{props.rows}",
                value: "{props.value}",
                placeholder: props.placeholder.as_deref().unwrap_or(""),
                disabled: props.disabled,
                spellcheck: if props.monospace { "false" } else { "true" },
                oninput: move |e| props.on_change.call(e.value()),
            }
        }
    }
}

// ============================================================================
// Number Input Component
// ============================================================================

#[derive(Props, Clone, PartialEq)]
pub struct NumberInputProps {
    /// Current value; `None` renders an empty input
    pub value: Option<f64>,

    #[props(default)]
    pub label: Option<String>,

    #[props(default)]
    pub placeholder: Option<String>,

    #[props(default)]
    pub error: Option<String>,

    #[props(default)]
    pub min: Option<f64>,

    #[props(default)]
    pub max: Option<f64>,

    #[props(default)]
    pub step: Option<f64>,

    #[props(default = false)]
    pub disabled: bool,

    /// Show the +/- buttons
    #[props(default = true)]
    pub show_controls: bool,

    #[props(default)]
    pub class: Option<String>,

    /// Receives `None` when the input is cleared
    #[props(default)]
    pub on_change: EventHandler<Option<f64>>,
}

/// Numeric input component with optional +/- controls
#[component]
pub fn NumberInput(props: NumberInputProps) -> Element {
    let input_class = build_input_class(props.error.is_some(), props.disabled, &props.class);
    let step = props.step.unwrap_or(1.0);
    let shown = props.value.map(format_number).unwrap_or_default();

    let (min, max) = (props.min, props.max);
    let current = props.value.unwrap_or(0.0);
    let on_change = props.on_change;

    rsx! {
        FieldFrame {
            label: props.label.clone(),
            error: props.error.clone(),

            div {
                class: "relative flex items-center",

                if props.show_controls {
                    button {
                        class: "stepper stepper-left",
                        r#type: "button",
                        disabled: props.disabled || min.is_some_and(|m| current <= m),
                        onclick: move |_| on_change.call(Some(clamp_value(current - step, min, max))),
                        "−"
                    }
                }

                input {
                    class: "{input_class}",
                    class: if props.show_controls { "text-center px-10" } else { "" },
                    r#type: "number",
                    value: "{shown}",
                    placeholder: props.placeholder.as_deref().unwrap_or(""),
                    disabled: props.disabled,
                    min: min.map(|v| v.to_string()),
                    max: max.map(|v| v.to_string()),
                    step: props.step.map(|v| v.to_string()).unwrap_or_else(|| "any".to_string()),
                    oninput: move |e| on_change.call(parse_number_input(&e.value(), min, max)),
                }

                if props.show_controls {
                    button {
                        class: "stepper stepper-right",
                        r#type: "button",
                        disabled: props.disabled || max.is_some_and(|m| current >= m),
                        onclick: move |_| on_change.call(Some(clamp_value(current + step, min, max))),
                        "+"
                    }
                }
            }
        }
    }
}

// ============================================================================
// Slider Component
// ============================================================================

#[derive(Props, Clone, PartialEq)]
pub struct SliderProps {
    pub value: f64,

    #[props(default)]
    pub label: Option<String>,

    #[props(default)]
    pub error: Option<String>,

    #[props(default = 0.0)]
    pub min: f64,

    #[props(default = 100.0)]
    pub max: f64,

    #[props(default = 1.0)]
    pub step: f64,

    #[props(default = false)]
    pub disabled: bool,

    #[props(default)]
    pub on_change: EventHandler<f64>,
}

/// Range slider with the current value shown beside it
#[component]
pub fn Slider(props: SliderProps) -> Element {
    let shown = format_number(props.value);
    let (min, max) = (props.min, props.max);

    rsx! {
        FieldFrame {
            label: props.label.clone(),
            error: props.error.clone(),

            div {
                class: "flex items-center gap-3",
                input {
                    class: "slider flex-1",
                    class: if props.disabled { "opacity-50 cursor-not-allowed" } else { "" },
                    r#type: "range",
                    min: "{min}",
                    max: "{max}",
                    step: "{props.step}",
                    value: "{props.value}",
                    disabled: props.disabled,
                    oninput: move |e| {
                        if let Some(v) = parse_number_input(&e.value(), Some(min), Some(max)) {
                            props.on_change.call(v);
                        }
                    },
                }
                span { class: "w-12 text-right text-sm text-slate-300 font-mono", "{shown}" }
            }
        }
    }
}

// ============================================================================
// Select Component
// ============================================================================

/// One entry of a Select or MultiSelect
#[derive(Clone, PartialEq, Debug)]
pub struct ChoiceOption {
    pub value: String,
    pub label: String,
}

impl ChoiceOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

#[derive(Props, Clone, PartialEq)]
pub struct SelectProps {
    /// Selected value; empty selects the placeholder
    pub value: String,

    pub options: Vec<ChoiceOption>,

    #[props(default)]
    pub label: Option<String>,

    /// Leading entry with the empty value
    #[props(default)]
    pub placeholder: Option<String>,

    /// Whether the placeholder entry may be picked again
    #[props(default = false)]
    pub placeholder_selectable: bool,

    #[props(default)]
    pub error: Option<String>,

    #[props(default = false)]
    pub disabled: bool,

    #[props(default)]
    pub on_change: EventHandler<String>,
}

/// Dropdown select component
#[component]
pub fn Select(props: SelectProps) -> Element {
    let select_class = build_select_class(props.error.is_some(), props.disabled);

    rsx! {
        FieldFrame {
            label: props.label.clone(),
            error: props.error.clone(),

            select {
                class: "{select_class}",
                disabled: props.disabled,
                onchange: move |e| props.on_change.call(e.value()),

                if let Some(placeholder) = &props.placeholder {
                    option {
                        value: "",
                        disabled: !props.placeholder_selectable,
                        selected: props.value.is_empty(),
                        "{placeholder}"
                    }
                }

                for option in props.options.iter() {
                    option {
                        key: "{option.value}",
                        value: "{option.value}",
                        selected: props.value == option.value,
                        "{option.label}"
                    }
                }
            }
        }
    }
}

// ============================================================================
// MultiSelect Component
// ============================================================================

#[derive(Props, Clone, PartialEq)]
pub struct MultiSelectProps {
    /// Values of the checked options
    pub values: Vec<String>,

    pub options: Vec<ChoiceOption>,

    #[props(default)]
    pub label: Option<String>,

    #[props(default)]
    pub error: Option<String>,

    #[props(default = false)]
    pub disabled: bool,

    /// Receives the new selection, in option order
    #[props(default)]
    pub on_change: EventHandler<Vec<String>>,
}

/// List of checkboxes, one per option
#[component]
pub fn MultiSelect(props: MultiSelectProps) -> Element {
    rsx! {
        FieldFrame {
            label: props.label.clone(),
            error: props.error.clone(),

            div {
                class: "multi-select flex flex-col gap-1 p-2 rounded-lg border border-slate-700 bg-slate-800",
                if props.options.is_empty() {
                    span { class: "text-xs text-slate-500", "No options" }
                }
                for option in props.options.iter() {
                    Checkbox {
                        key: "{option.value}",
                        checked: props.values.contains(&option.value),
                        label: option.label.clone(),
                        disabled: props.disabled,
                        on_change: {
                            let values = props.values.clone();
                            let options = props.options.clone();
                            let value = option.value.clone();
                            let on_change = props.on_change;
                            move |_| on_change.call(toggle_membership(&values, &options, &value))
                        },
                    }
                }
            }
        }
    }
}

// ============================================================================
// Checkbox Component
// ============================================================================

#[derive(Props, Clone, PartialEq)]
pub struct CheckboxProps {
    pub checked: bool,

    #[props(default)]
    pub label: Option<String>,

    #[props(default = false)]
    pub disabled: bool,

    #[props(default)]
    pub on_change: EventHandler<bool>,
}

/// Checkbox input component
#[component]
pub fn Checkbox(props: CheckboxProps) -> Element {
    let box_class = build_checkbox_class(props.checked, props.disabled);

    rsx! {
        label {
            class: "inline-flex items-center gap-2 cursor-pointer select-none",
            class: if props.disabled { "opacity-50 cursor-not-allowed" } else { "" },

            input {
                class: "sr-only",
                r#type: "checkbox",
                checked: props.checked,
                disabled: props.disabled,
                onchange: move |_| {
                    if !props.disabled {
                        props.on_change.call(!props.checked);
                    }
                },
            }

            div {
                class: "{box_class}",
                if props.checked {
                    svg {
                        class: "w-3 h-3 text-white",
                        fill: "none",
                        stroke: "currentColor",
                        stroke_width: "3",
                        view_box: "0 0 24 24",
                        path { d: "M5 13l4 4L19 7" }
                    }
                }
            }

            if let Some(label) = &props.label {
                span { class: "text-sm text-slate-200", "{label}" }
            }
        }
    }
}

// ============================================================================
// Toggle Component
// ============================================================================

#[derive(Props, Clone, PartialEq)]
pub struct ToggleProps {
    pub checked: bool,

    #[props(default)]
    pub label: Option<String>,

    #[props(default)]
    pub help_text: Option<String>,

    #[props(default = false)]
    pub disabled: bool,

    #[props(default)]
    pub on_change: EventHandler<bool>,
}

/// On/off switch
#[component]
pub fn Toggle(props: ToggleProps) -> Element {
    let track = if props.checked {
        "toggle-track toggle-on"
    } else {
        "toggle-track"
    };

    rsx! {
        div {
            class: "inline-flex items-center gap-3 select-none",
            class: if props.disabled { "opacity-50 cursor-not-allowed" } else { "cursor-pointer" },
            role: "switch",
            aria_checked: "{props.checked}",
            onclick: move |_| {
                if !props.disabled {
                    props.on_change.call(!props.checked);
                }
            },

            span {
                class: "{track}",
                span { class: "toggle-thumb" }
            }

            if props.label.is_some() || props.help_text.is_some() {
                div {
                    class: "flex flex-col",
                    if let Some(label) = &props.label {
                        span { class: "text-sm font-medium text-slate-200", "{label}" }
                    }
                    if let Some(help) = &props.help_text {
                        span { class: "text-xs text-slate-400", "{help}" }
                    }
                }
            }
        }
    }
}

// ============================================================================
// Date-Time Input Component
// ============================================================================

#[derive(Props, Clone, PartialEq)]
pub struct DateTimeInputProps {
    /// Local `YYYY-MM-DDTHH:MM` value, or empty
    pub value: String,

    #[props(default)]
    pub label: Option<String>,

    #[props(default)]
    pub error: Option<String>,

    #[props(default = false)]
    pub disabled: bool,

    #[props(default)]
    pub on_change: EventHandler<String>,
}

/// Local date-time picker
#[component]
pub fn DateTimeInput(props: DateTimeInputProps) -> Element {
    let input_class = build_input_class(props.error.is_some(), props.disabled, &None);

    rsx! {
        FieldFrame {
            label: props.label.clone(),
            error: props.error.clone(),

            input {
                class: "{input_class}",
                r#type: "datetime-local",
                value: "{props.value}",
                disabled: props.disabled,
                oninput: move |e| props.on_change.call(e.value()),
            }
        }
    }
}

// ============================================================================
// Helpers
// ============================================================================

fn build_input_class(has_error: bool, disabled: bool, extra: &Option<String>) -> String {
    let mut classes = vec![
        "w-full",
        "px-3",
        "py-2",
        "rounded-lg",
        "text-sm",
        "bg-slate-800",
        "text-slate-100",
        "border",
        "focus-ring",
    ];

    classes.push(if has_error {
        "border-rose-500"
    } else {
        "border-slate-700"
    });

    if disabled {
        classes.push("opacity-50");
        classes.push("cursor-not-allowed");
    }

    let mut class = classes.join(" ");
    if let Some(extra) = extra {
        class.push(' ');
        class.push_str(extra);
    }
    class
}

fn build_textarea_class(has_error: bool, disabled: bool, monospace: bool) -> String {
    let font = if monospace { "font-mono" } else { "" };
    format!(
        "{} resize-y {}",
        build_input_class(has_error, disabled, &None),
        font
    )
    .trim_end()
    .to_string()
}

fn build_select_class(has_error: bool, disabled: bool) -> String {
    format!(
        "select-control {}",
        build_input_class(has_error, disabled, &None)
    )
}

fn build_checkbox_class(checked: bool, disabled: bool) -> String {
    let mut classes = vec![
        "w-4",
        "h-4",
        "rounded",
        "border",
        "flex",
        "items-center",
        "justify-center",
    ];
    if checked {
        classes.push("bg-indigo-600");
        classes.push("border-indigo-600");
    } else {
        classes.push("bg-slate-800");
        classes.push("border-slate-500");
    }
    if disabled {
        classes.push("opacity-50");
    }
    classes.join(" ")
}

/// Clamp a value between optional min and max
fn clamp_value(value: f64, min: Option<f64>, max: Option<f64>) -> f64 {
    let mut result = value;
    if let Some(min) = min {
        result = result.max(min);
    }
    if let Some(max) = max {
        result = result.min(max);
    }
    result
}

/// Parse number input text; blank or unparseable input is `None`
fn parse_number_input(raw: &str, min: Option<f64>, max: Option<f64>) -> Option<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .map(|v| clamp_value(v, min, max))
}

/// Integers without the trailing `.0`
pub(crate) fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

/// Flip `value` in the selection, keeping option order
fn toggle_membership(selected: &[String], options: &[ChoiceOption], value: &str) -> Vec<String> {
    let checked = selected.iter().any(|s| s == value);
    options
        .iter()
        .filter(|o| {
            if o.value == value {
                !checked
            } else {
                selected.contains(&o.value)
            }
        })
        .map(|o| o.value.clone())
        .collect()
}

// ============================================================================
// Tests
// ============================================================================
