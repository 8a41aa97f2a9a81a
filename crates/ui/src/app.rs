//! Main Application Component for Entiform Studio
//!
//! Root layout: toolbar, navigation sidebar, the active demo page and the
//! status bar. Edit dialogs are owned by each page's widget.

use dioxus::prelude::*;

use crate::pages::{AlbumsPage, HomePage, PagesPage, PricePlansPage, ProductsPage};
use crate::state::{APP_STATE, Page, StatusLevel};
use crate::{NAME, VERSION};

// ============================================================================
// Main App Component
// ============================================================================

/// Root application component
#[component]
pub fn App() -> Element {
    use_effect(|| {
        tracing::info!("{} UI initialized", NAME);
    });

    rsx! {
        div {
            class: "app-container h-screen w-screen flex flex-col bg-slate-900 text-slate-100 overflow-hidden",

            Toolbar {}

            div {
                class: "flex flex-1 overflow-hidden",
                Sidebar {}
                MainContent {}
            }

            StatusBar {}
        }
    }
}

// ============================================================================
// Toolbar Component
// ============================================================================

#[component]
fn Toolbar() -> Element {
    let page = APP_STATE.read().ui.active_page;
    let page_name = page.display_name();

    rsx! {
        header {
            class: "toolbar h-12 bg-slate-800 border-b border-slate-700 flex items-center px-4 gap-2 shrink-0",

            div {
                class: "flex items-center gap-2 mr-4",
                span { class: "text-xl", "🧩" }
                span { class: "font-semibold text-sm", "{NAME}" }
            }

            div { class: "w-px h-6 bg-slate-700 mx-2" }
            span { class: "text-sm text-slate-300", "{page_name}" }

            div { class: "flex-1" }
            span { class: "text-xs text-slate-500", "v{VERSION}" }
        }
    }
}

// ============================================================================
// Sidebar Component
// ============================================================================

/// Left sidebar with navigation
#[component]
fn Sidebar() -> Element {
    let state = APP_STATE.read();
    let collapsed = state.ui.sidebar_collapsed;
    let current_page = state.ui.active_page;
    drop(state);

    rsx! {
        aside {
            class: "sidebar flex flex-col shrink-0 bg-slate-800 border-r border-slate-700",
            style: if collapsed { "width: 60px;" } else { "width: 220px;" },

            div {
                class: "h-12 flex items-center justify-between px-3 border-b border-slate-700",
                if !collapsed {
                    span { class: "text-sm font-semibold text-slate-300", "Navigation" }
                }
                button {
                    class: "icon-button",
                    title: if collapsed { "Expand sidebar" } else { "Collapse sidebar" },
                    onclick: move |_| APP_STATE.write().ui.toggle_sidebar(),
                    if collapsed { "☰" } else { "✕" }
                }
            }

            nav {
                class: "flex-1 py-4 overflow-y-auto",
                for page in Page::all().iter().copied() {
                    SidebarItem {
                        key: "{page:?}",
                        page,
                        current: current_page,
                        collapsed,
                    }
                }
            }
        }
    }
}

/// Sidebar navigation item
#[component]
fn SidebarItem(page: Page, current: Page, collapsed: bool) -> Element {
    let icon = page.icon();
    let name = page.display_name();
    let class = sidebar_item_class(page == current, collapsed);

    rsx! {
        button {
            class: "{class}",
            title: "{name}",
            onclick: move |_| APP_STATE.write().ui.navigate(page),
            span { class: "text-xl leading-none", "{icon}" }
            if !collapsed {
                span { class: "text-sm font-medium", "{name}" }
            }
        }
    }
}

fn sidebar_item_class(active: bool, collapsed: bool) -> String {
    let layout = if collapsed {
        "sidebar-item sidebar-item-collapsed"
    } else {
        "sidebar-item"
    };
    let state = if active {
        "bg-indigo-600 text-white"
    } else {
        "text-slate-300 hover:bg-slate-700"
    };
    format!("{} {}", layout, state)
}

// ============================================================================
// Main Content Component
// ============================================================================

/// Main content area that renders the active page
#[component]
fn MainContent() -> Element {
    let current_page = APP_STATE.read().ui.active_page;

    rsx! {
        main {
            class: "flex-1 overflow-auto bg-slate-900",
            match current_page {
                Page::Home => rsx! { HomePage {} },
                Page::Products => rsx! { ProductsPage {} },
                Page::PricePlans => rsx! { PricePlansPage {} },
                Page::Pages => rsx! { PagesPage {} },
                Page::Albums => rsx! { AlbumsPage {} },
            }
        }
    }
}

// ============================================================================
// Status Bar Component
// ============================================================================

/// Bottom status bar
#[component]
fn StatusBar() -> Element {
    let status = APP_STATE.read().ui.status_message.clone();

    rsx! {
        footer {
            class: "status-bar h-6 bg-slate-800 border-t border-slate-700 flex items-center px-4 text-xs text-slate-400 shrink-0",

            if let Some(msg) = status {
                span { class: status_class(msg.level), "{msg.text}" }
                div { class: "flex-1" }
                button {
                    class: "btn-ghost text-xs",
                    onclick: move |_| APP_STATE.write().ui.clear_status(),
                    "Dismiss"
                }
            } else {
                span { "Ready" }
            }
        }
    }
}

fn status_class(level: StatusLevel) -> &'static str {
    match level {
        StatusLevel::Info => "text-slate-400",
        StatusLevel::Success => "text-green-400",
        StatusLevel::Warning => "text-amber-400",
        StatusLevel::Error => "text-red-400",
    }
}

// ============================================================================
// Tests
// ============================================================================
