//! # Entiform Schema
//!
//! The headless half of the entity editor: everything that can be decided
//! without a screen.
//!
//! ## Core Concepts
//!
//! - **Field / Schema**: declarative description of an entity's attributes
//! - **FilterSet**: typed filter values keyed by dotted path
//! - **SortConfig**: single-column, type-aware ordering
//! - **EntityForm**: the edit-session state machine and its validation
//! - **EntityProvider**: async source of rows for remote widgets
//! - **EntityWidget**: filter + sort + table + edit form, without a UI
//!

pub mod datetime;
pub mod field;
pub mod filter;
pub mod form;
pub mod provider;
pub mod schema;
pub mod serialization;
pub mod sort;
pub mod validation;
pub mod widget;

// Re-export commonly used types at crate root
pub use field::{
    BoolField, BoolInput, DateField, EntityField, Field, FieldCommon, FieldKind, FileField,
    JsonField, MultiselectField, NumberField, NumberInput, OptionValue, SelectField, SelectOption,
    TextField, TextInput, ValueFormatter,
};
pub use filter::{FilterEntry, FilterSet, FilterValue, filter_rows};
pub use form::{EntityForm, FormStatus};
pub use provider::{EntityProvider, InMemoryProvider};
pub use schema::{Column, FieldLookup, FilterableField, Schema, SchemaSource, entity};
pub use serialization::{load_row, load_rows, load_schema, save_rows, save_schema};
pub use sort::{SortConfig, SortDirection, compare_values, sort_rows, toggle_sort};
pub use validation::{BYTES_PER_MB, FileInfo, validate_draft, validate_field};
pub use widget::{DataMode, EntityWidget, default_cell_text};

// Re-export core types that are commonly used with schemas
pub use entiform_core::{EditorError, EditorResult, FieldErrors, FieldPath, Row};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Prelude Module
// ============================================================================

/// Convenient re-exports for declaring schemas
pub mod prelude {
    pub use crate::field::{
        bool, date, entity_field, file, json, multiselect, number, select, text,
    };
    pub use crate::{
        Column, EditorError, EditorResult, EntityProvider, EntityWidget, Field, FieldKind,
        FilterSet, FilterValue, Row, Schema, SchemaSource, SortConfig, SortDirection, entity,
    };
}
