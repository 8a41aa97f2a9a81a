//! Application State Management for Entiform Studio
//!
//! Global UI state held in a Dioxus 0.7 Signal: the active page, the
//! sidebar, the status bar message and the last payload submitted by a
//! local widget. Row data lives in the widgets and their providers, not here.

use dioxus::prelude::*;
use entiform_schema::Row;

// ============================================================================
// Page Navigation
// ============================================================================

/// Application pages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Page {
    #[default]
    Home,
    Products,
    PricePlans,
    Pages,
    /// Local widget showing every field kind
    Albums,
}

impl Page {
    /// Every page, in sidebar order
    pub fn all() -> &'static [Page] {
        &[
            Page::Home,
            Page::Products,
            Page::PricePlans,
            Page::Pages,
            Page::Albums,
        ]
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Page::Home => "Home",
            Page::Products => "Products",
            Page::PricePlans => "Price Plans",
            Page::Pages => "Pages",
            Page::Albums => "Albums",
        }
    }

    /// Icon for the sidebar
    pub fn icon(&self) -> &'static str {
        match self {
            Page::Home => "🏠",
            Page::Products => "📦",
            Page::PricePlans => "💳",
            Page::Pages => "📄",
            Page::Albums => "💿",
        }
    }
}

// ============================================================================
// UI State
// ============================================================================

/// Status message for the status bar
#[derive(Debug, Clone, PartialEq)]
pub struct StatusMessage {
    pub text: String,
    pub level: StatusLevel,
}

/// Status message severity level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct UiState {
    pub sidebar_collapsed: bool,
    pub active_page: Page,
    pub status_message: Option<StatusMessage>,
}

impl UiState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Navigate to a page; the status line is cleared
    pub fn navigate(&mut self, page: Page) {
        if self.active_page != page {
            tracing::debug!("Navigating to {}", page.display_name());
        }
        self.active_page = page;
        self.status_message = None;
    }

    pub fn set_status(&mut self, message: impl Into<String>, level: StatusLevel) {
        self.status_message = Some(StatusMessage {
            text: message.into(),
            level,
        });
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    pub fn toggle_sidebar(&mut self) {
        self.sidebar_collapsed = !self.sidebar_collapsed;
    }
}

// ============================================================================
// App State
// ============================================================================

/// A payload handed to a page's save callback
#[derive(Debug, Clone, PartialEq)]
pub struct SavedPayload {
    pub page: Page,
    pub row: Row,
}

impl SavedPayload {
    /// Pretty-printed JSON of the row
    pub fn to_pretty_json(&self) -> String {
        serde_json::to_string_pretty(&self.row).unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppState {
    pub ui: UiState,
    /// Last payload submitted by a local widget
    pub last_saved: Option<SavedPayload>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remember a submitted payload and report it in the status bar
    pub fn record_save(&mut self, page: Page, row: Row) {
        tracing::info!(
            "{} saved a row with {} field(s)",
            page.display_name(),
            row.len()
        );
        self.ui.set_status(
            format!("Saved {} row", page.display_name().to_lowercase()),
            StatusLevel::Success,
        );
        self.last_saved = Some(SavedPayload { page, row });
    }

    /// Last payload submitted on `page`
    pub fn last_saved_on(&self, page: Page) -> Option<&SavedPayload> {
        self.last_saved.as_ref().filter(|saved| saved.page == page)
    }
}

// ============================================================================
// Global State
// ============================================================================

/// Global application state signal
pub static APP_STATE: GlobalSignal<AppState> = Signal::global(AppState::new);

/// Hook to get the current page
pub fn use_current_page() -> Page {
    APP_STATE.read().ui.active_page
}

// ============================================================================
// Tests
// ============================================================================
