//! # Dialog Components
//!
//! - **Modal**: overlay container closed by backdrop click or Escape
//! - **EntityEditDialog**: the edit form for one row

pub mod entity_edit;
pub mod modal;

pub use entity_edit::{EntityEditDialog, JSON_PLACEHOLDER};
pub use modal::Modal;
