//! # Entiform UI
//!
//! Dioxus Desktop UI for Entiform.
//!
//! This crate renders schema-driven entity widgets: a filter panel, a
//! sortable table and a modal edit form, plus a small studio app with demo
//! pages that exercise every field kind.
//!
//! ## Features
//!
//! - Local widgets filtered and sorted in memory
//! - Remote widgets backed by an [`entiform_schema::EntityProvider`]
//! - Native file dialogs for file fields
//!

// ============================================================================
// Modules
// ============================================================================

pub mod app;
pub mod components;
pub mod file_ops;
pub mod pages;
pub mod state;

// ============================================================================
// Re-exports
// ============================================================================

// Re-export internal crates for convenience
pub use entiform_core;
pub use entiform_schema;

pub use app::App;
pub use components::{
    Checkbox, EntityEditDialog, EntityFilters, EntityTable, EntityWidgetView, FilePicker, Modal,
    MultiSelect, NumberInput, ProviderHandle, Select, Slider, TextArea, TextInput, Toggle,
    WidgetData,
};
pub use file_ops::{file_info, pick_files, show_pick_dialog};
pub use state::{APP_STATE, AppState, Page, StatusLevel, StatusMessage, UiState};

use entiform_core::{EditorError, EditorResult};
use serde::Deserialize;

// ============================================================================
// Constants
// ============================================================================

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const NAME: &str = "Entiform";

/// Application display title
pub const TITLE: &str = "Entiform - Entity Editor Studio";

/// CSS styles for the application
const STYLES: &str = include_str!("../../../assets/styles/main.css");

const MIN_WIDTH: f64 = 800.0;
const MIN_HEIGHT: f64 = 600.0;

// ============================================================================
// Launch Configuration
// ============================================================================

/// Window settings
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LaunchConfig {
    pub title: String,
    pub width: f64,
    pub height: f64,
}

impl Default for LaunchConfig {
    fn default() -> Self {
        Self {
            title: TITLE.to_string(),
            width: 1400.0,
            height: 900.0,
        }
    }
}

impl LaunchConfig {
    /// Parse a JSON config; missing keys keep their defaults
    pub fn from_json(json: &str) -> EditorResult<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| EditorError::InvalidConfig(e.to_string()))?;
        config.checked()
    }

    /// Defaults overridden by `ENTIFORM_TITLE`, `ENTIFORM_WIDTH` and
    /// `ENTIFORM_HEIGHT`
    pub fn from_env() -> EditorResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> EditorResult<Self> {
        let mut config = Self::default();
        if let Some(title) = lookup("ENTIFORM_TITLE") {
            config.title = title;
        }
        if let Some(width) = lookup("ENTIFORM_WIDTH") {
            config.width = parse_dimension("ENTIFORM_WIDTH", &width)?;
        }
        if let Some(height) = lookup("ENTIFORM_HEIGHT") {
            config.height = parse_dimension("ENTIFORM_HEIGHT", &height)?;
        }
        config.checked()
    }

    fn checked(self) -> EditorResult<Self> {
        if self.width < MIN_WIDTH || self.height < MIN_HEIGHT {
            return Err(EditorError::InvalidConfig(format!(
                "window must be at least {}x{}, got {}x{}",
                MIN_WIDTH, MIN_HEIGHT, self.width, self.height
            )));
        }
        Ok(self)
    }
}

fn parse_dimension(name: &str, raw: &str) -> EditorResult<f64> {
    raw.trim()
        .parse::<f64>()
        .map_err(|_| EditorError::InvalidConfig(format!("{} must be a number, got '{}'", name, raw)))
}

// ============================================================================
// Launch Function
// ============================================================================

/// Launch the Entiform desktop application
///
/// Window settings come from the environment; invalid settings are logged
/// and the defaults are used instead.
///
/// # Example
///
/// ```rust,ignore
/// fn main() {
///     entiform_ui::launch();
/// }
/// ```
pub fn launch() {
    let config = LaunchConfig::from_env().unwrap_or_else(|e| {
        tracing::warn!("{}; using default window settings", e);
        LaunchConfig::default()
    });
    launch_with_config(config);
}

/// Launch with explicit window settings
pub fn launch_with_config(config: LaunchConfig) {
    tracing::info!(
        "Starting {} v{} ({}x{})",
        NAME,
        VERSION,
        config.width,
        config.height
    );

    let custom_head = format!(r#"<style type="text/css">{}</style>"#, STYLES);

    dioxus::LaunchBuilder::desktop()
        .with_cfg(
            dioxus::desktop::Config::new()
                .with_window(
                    dioxus::desktop::WindowBuilder::new()
                        .with_title(config.title)
                        .with_resizable(true)
                        .with_inner_size(dioxus::desktop::LogicalSize::new(
                            config.width,
                            config.height,
                        ))
                        .with_min_inner_size(dioxus::desktop::LogicalSize::new(
                            MIN_WIDTH, MIN_HEIGHT,
                        )),
                )
                .with_menu(None)
                .with_custom_head(custom_head),
        )
        .launch(App);
}

/// Get the embedded CSS styles
pub fn get_styles() -> &'static str {
    STYLES
}

// ============================================================================
// Tests
// ============================================================================
