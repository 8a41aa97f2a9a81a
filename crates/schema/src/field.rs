//! Field definitions for entity schemas
//!
//! A `Field` describes one attribute of an entity: how it is labelled, how
//! it is edited in the form dialog, whether it appears in the filter panel
//! and how it is rendered in a table cell. Fields are built with the free
//! builder functions (`text()`, `number()`, ...) and chained setters, then
//! converted into the tagged `Field` enum.

use crate::schema::Schema;
use entiform_core::Row;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

// ============================================================================
// FieldKind
// ============================================================================

/// The kind tag of a field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Text,
    Number,
    Bool,
    Select,
    Multiselect,
    File,
    Json,
    Date,
    Entity,
}

impl FieldKind {
    /// Get all field kinds
    pub fn all() -> &'static [FieldKind] {
        &[
            FieldKind::Text,
            FieldKind::Number,
            FieldKind::Bool,
            FieldKind::Select,
            FieldKind::Multiselect,
            FieldKind::File,
            FieldKind::Json,
            FieldKind::Date,
            FieldKind::Entity,
        ]
    }

    /// Lowercase tag as used in schema files
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKind::Text => "text",
            FieldKind::Number => "number",
            FieldKind::Bool => "bool",
            FieldKind::Select => "select",
            FieldKind::Multiselect => "multiselect",
            FieldKind::File => "file",
            FieldKind::Json => "json",
            FieldKind::Date => "date",
            FieldKind::Entity => "entity",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// ValueFormatter
// ============================================================================

/// Display formatter: renders a cell from the whole row
#[derive(Clone)]
pub struct ValueFormatter(Arc<dyn Fn(&Row) -> String + Send + Sync>);

impl ValueFormatter {
    pub fn new(f: impl Fn(&Row) -> String + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    pub fn format(&self, row: &Row) -> String {
        (self.0)(row)
    }
}

impl fmt::Debug for ValueFormatter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ValueFormatter(..)")
    }
}

impl PartialEq for ValueFormatter {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

// ============================================================================
// Common attributes
// ============================================================================

/// Attributes shared by every field kind
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldCommon {
    /// Display label (falls back to the schema key)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    /// Shown but not editable in the form
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub readonly: bool,

    /// Listed in the filter panel
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub filterable: bool,

    /// Cell formatter; code-only, never serialized
    #[serde(skip)]
    pub formatter: Option<ValueFormatter>,
}

/// Generates the common chained setters for a kind struct
macro_rules! common_setters {
    ($ty:ty) => {
        impl $ty {
            /// Set the display label
            pub fn with_label(mut self, label: impl Into<String>) -> Self {
                self.common.label = Some(label.into());
                self
            }

            /// Mark the field as read-only
            pub fn readonly(mut self) -> Self {
                self.common.readonly = true;
                self
            }

            /// Mark the field as read-only when `cond` holds
            pub fn readonly_if(mut self, cond: bool) -> Self {
                self.common.readonly = cond;
                self
            }

            /// Show the field in the filter panel
            pub fn filterable(mut self) -> Self {
                self.common.filterable = true;
                self
            }

            /// Set a cell formatter
            pub fn with_formatter(
                mut self,
                f: impl Fn(&Row) -> String + Send + Sync + 'static,
            ) -> Self {
                self.common.formatter = Some(ValueFormatter::new(f));
                self
            }
        }
    };
}

// ============================================================================
// Kind structs
// ============================================================================

/// Control used for text fields
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextInput {
    #[default]
    Input,
    Textarea,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextField {
    #[serde(flatten)]
    pub common: FieldCommon,
    #[serde(default, rename = "type")]
    pub input: TextInput,
}

impl TextField {
    pub fn textarea(mut self) -> Self {
        self.input = TextInput::Textarea;
        self
    }
}

/// Control used for number fields
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NumberInput {
    #[default]
    Input,
    Slider,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NumberField {
    #[serde(flatten)]
    pub common: FieldCommon,
    #[serde(default, rename = "type")]
    pub input: NumberInput,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step: Option<f64>,
}

impl NumberField {
    pub fn slider(mut self) -> Self {
        self.input = NumberInput::Slider;
        self
    }

    pub fn with_min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    pub fn with_max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }

    pub fn with_step(mut self, step: f64) -> Self {
        self.step = Some(step);
        self
    }
}

/// Control used for bool fields
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoolInput {
    #[default]
    Switch,
    Checkbox,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoolField {
    #[serde(flatten)]
    pub common: FieldCommon,
    #[serde(default, rename = "type")]
    pub input: BoolInput,
}

impl BoolField {
    pub fn checkbox(mut self) -> Self {
        self.input = BoolInput::Checkbox;
        self
    }
}

/// Value of a select option (string or number)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
    Number(f64),
    Text(String),
}

impl OptionValue {
    /// The option value as a JSON value (integers stay integers)
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            OptionValue::Text(s) => serde_json::Value::String(s.clone()),
            OptionValue::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => {
                serde_json::Value::from(*n as i64)
            }
            OptionValue::Number(n) => serde_json::Value::from(*n),
        }
    }
}

impl From<&str> for OptionValue {
    fn from(value: &str) -> Self {
        OptionValue::Text(value.to_string())
    }
}

impl From<String> for OptionValue {
    fn from(value: String) -> Self {
        OptionValue::Text(value)
    }
}

impl From<i32> for OptionValue {
    fn from(value: i32) -> Self {
        OptionValue::Number(f64::from(value))
    }
}

impl From<i64> for OptionValue {
    fn from(value: i64) -> Self {
        OptionValue::Number(value as f64)
    }
}

impl From<f64> for OptionValue {
    fn from(value: f64) -> Self {
        OptionValue::Number(value)
    }
}

/// One `{label, value}` choice of a select or multiselect field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectOption {
    pub label: String,
    pub value: OptionValue,
}

impl SelectOption {
    pub fn new(label: impl Into<String>, value: impl Into<OptionValue>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectField {
    #[serde(flatten)]
    pub common: FieldCommon,
    #[serde(default)]
    pub options: Vec<SelectOption>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MultiselectField {
    #[serde(flatten)]
    pub common: FieldCommon,
    #[serde(default)]
    pub options: Vec<SelectOption>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileField {
    #[serde(flatten)]
    pub common: FieldCommon,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub multiple: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_size_mb: Option<f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub accept_files: Vec<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub required: bool,
}

impl FileField {
    pub fn multiple(mut self) -> Self {
        self.multiple = true;
        self
    }

    pub fn with_max_size_mb(mut self, mb: f64) -> Self {
        self.max_size_mb = Some(mb);
        self
    }

    pub fn accept<I, S>(mut self, mimes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.accept_files = mimes.into_iter().map(Into::into).collect();
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonField {
    #[serde(flatten)]
    pub common: FieldCommon,
}

/// ISO-8601 instant, edited as a local date-time
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateField {
    #[serde(flatten)]
    pub common: FieldCommon,
}

/// Nested record with its own sub-schema
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityField {
    #[serde(flatten)]
    pub common: FieldCommon,
    pub schema: Schema,
}

common_setters!(TextField);
common_setters!(NumberField);
common_setters!(BoolField);
common_setters!(SelectField);
common_setters!(MultiselectField);
common_setters!(FileField);
common_setters!(JsonField);
common_setters!(DateField);
common_setters!(EntityField);

// ============================================================================
// Field
// ============================================================================

/// One schema entry, tagged by kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Field {
    Text(TextField),
    Number(NumberField),
    Bool(BoolField),
    Select(SelectField),
    Multiselect(MultiselectField),
    File(FileField),
    Json(JsonField),
    Date(DateField),
    Entity(EntityField),
}

impl Field {
    /// The field's kind tag
    pub fn kind(&self) -> FieldKind {
        match self {
            Field::Text(_) => FieldKind::Text,
            Field::Number(_) => FieldKind::Number,
            Field::Bool(_) => FieldKind::Bool,
            Field::Select(_) => FieldKind::Select,
            Field::Multiselect(_) => FieldKind::Multiselect,
            Field::File(_) => FieldKind::File,
            Field::Json(_) => FieldKind::Json,
            Field::Date(_) => FieldKind::Date,
            Field::Entity(_) => FieldKind::Entity,
        }
    }

    /// Attributes shared by every kind
    pub fn common(&self) -> &FieldCommon {
        match self {
            Field::Text(f) => &f.common,
            Field::Number(f) => &f.common,
            Field::Bool(f) => &f.common,
            Field::Select(f) => &f.common,
            Field::Multiselect(f) => &f.common,
            Field::File(f) => &f.common,
            Field::Json(f) => &f.common,
            Field::Date(f) => &f.common,
            Field::Entity(f) => &f.common,
        }
    }

    pub fn label(&self) -> Option<&str> {
        self.common().label.as_deref()
    }

    /// The label, or the given key when none is set
    pub fn label_or<'a>(&'a self, key: &'a str) -> &'a str {
        self.label().unwrap_or(key)
    }

    pub fn is_readonly(&self) -> bool {
        self.common().readonly
    }

    pub fn is_filterable(&self) -> bool {
        self.common().filterable
    }

    pub fn formatter(&self) -> Option<&ValueFormatter> {
        self.common().formatter.as_ref()
    }

    /// Options of a select or multiselect field
    pub fn options(&self) -> &[SelectOption] {
        match self {
            Field::Select(f) => &f.options,
            Field::Multiselect(f) => &f.options,
            _ => &[],
        }
    }

    /// Sub-schema of an entity field
    pub fn nested_schema(&self) -> Option<&Schema> {
        match self {
            Field::Entity(f) => Some(&f.schema),
            _ => None,
        }
    }
}

macro_rules! into_field {
    ($ty:ty, $variant:ident) => {
        impl From<$ty> for Field {
            fn from(value: $ty) -> Self {
                Field::$variant(value)
            }
        }
    };
}

into_field!(TextField, Text);
into_field!(NumberField, Number);
into_field!(BoolField, Bool);
into_field!(SelectField, Select);
into_field!(MultiselectField, Multiselect);
into_field!(FileField, File);
into_field!(JsonField, Json);
into_field!(DateField, Date);
into_field!(EntityField, Entity);

// ============================================================================
// Builders
// ============================================================================

pub fn text() -> TextField {
    TextField::default()
}

pub fn number() -> NumberField {
    NumberField::default()
}

pub fn bool() -> BoolField {
    BoolField::default()
}

pub fn select<I, O>(options: I) -> SelectField
where
    I: IntoIterator<Item = O>,
    O: Into<SelectOption>,
{
    SelectField {
        options: options.into_iter().map(Into::into).collect(),
        ..Default::default()
    }
}

pub fn multiselect<I, O>(options: I) -> MultiselectField
where
    I: IntoIterator<Item = O>,
    O: Into<SelectOption>,
{
    MultiselectField {
        options: options.into_iter().map(Into::into).collect(),
        ..Default::default()
    }
}

pub fn file() -> FileField {
    FileField::default()
}

pub fn json() -> JsonField {
    JsonField::default()
}

pub fn date() -> DateField {
    DateField::default()
}

/// A nested entity field with the given sub-schema
pub fn entity_field(schema: Schema) -> EntityField {
    EntityField {
        common: FieldCommon::default(),
        schema,
    }
}

impl<L: Into<String>, V: Into<OptionValue>> From<(L, V)> for SelectOption {
    fn from((label, value): (L, V)) -> Self {
        SelectOption::new(label, value)
    }
}

// ============================================================================
// Tests
// ============================================================================
