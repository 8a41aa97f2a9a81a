//! # UI Components
//!
//! Reusable Dioxus components for rendering entity schemas.
//!
//! ## Component Hierarchy
//!
//! ```text
//! EntityWidgetView
//! ├── EntityFilters (one control per filterable field)
//! ├── EntityTable
//! │   └── SortableHeader (per column)
//! └── EntityEditDialog (inside a Modal)
//!     └── FieldControl (per field, recursive for entity fields)
//!         ├── Input components
//!         └── FilePicker
//! ```

// ============================================================================
// Module Declarations
// ============================================================================

pub mod dialogs;
pub mod entity_filters;
pub mod entity_table;
pub mod entity_widget;
pub mod field_values;
pub mod file_picker;
pub mod inputs;
pub mod sortable_header;

// ============================================================================
// Re-exports
// ============================================================================

pub use dialogs::{EntityEditDialog, Modal};
pub use entity_filters::EntityFilters;
pub use entity_table::{EntityTable, TableRow};
pub use entity_widget::{EntityWidgetView, ProviderHandle, WidgetData};
pub use file_picker::FilePicker;
pub use inputs::{
    Checkbox, ChoiceOption, DateTimeInput, FieldFrame, MultiSelect, NumberInput, Select, Slider,
    TextArea, TextInput, Toggle,
};
pub use sortable_header::SortableHeader;
