//! Home Page Component
//!
//! Landing page with one card per demo page.

use dioxus::prelude::*;

use crate::state::{APP_STATE, Page};

/// Card text for a demo page
fn card_blurb(page: Page) -> &'static str {
    match page {
        Page::Products => "Remote data with nested option filters and read-only inactive rows.",
        Page::PricePlans => "Remote price plans with date range filters and sorting.",
        Page::Pages => "Local rows filtered and sorted in memory.",
        Page::Albums => "Every field kind and input variant in one form.",
        Page::Home => "",
    }
}

#[component]
pub fn HomePage() -> Element {
    rsx! {
        div {
            class: "p-8 text-center",
            div {
                class: "max-w-2xl mx-auto",
                h1 { class: "text-4xl font-bold text-slate-100 mb-6", "Welcome to Entity Editor" }
                p {
                    class: "text-lg text-slate-400 mb-8",
                    "Schema-driven forms, filters and sortable tables for entity data."
                }
                div {
                    class: "grid grid-cols-2 gap-6",
                    for page in Page::all().iter().copied().filter(|p| *p != Page::Home) {
                        HomeCard { key: "{page:?}", page }
                    }
                }
            }
        }
    }
}

#[component]
fn HomeCard(page: Page) -> Element {
    let name = page.display_name();
    let icon = page.icon();
    let blurb = card_blurb(page);

    rsx! {
        div {
            class: "bg-slate-800 p-6 rounded-lg border border-slate-700 text-left",
            h3 { class: "text-lg font-semibold text-slate-100 mb-2", "{icon} {name}" }
            p { class: "text-slate-400 mb-4", "{blurb}" }
            button {
                class: "btn btn-primary",
                onclick: move |_| APP_STATE.write().ui.navigate(page),
                "View {name}"
            }
        }
    }
}
