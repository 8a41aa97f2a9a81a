//! # Modal Component
//!
//! Overlay container for dialogs. The parent owns the open flag; the modal
//! asks to be closed through `on_close` when the backdrop is clicked, the
//! close button is pressed or Escape is hit while it has focus.

use dioxus::prelude::*;

#[derive(Props, Clone, PartialEq)]
pub struct ModalProps {
    /// Whether the modal is shown
    pub open: bool,

    #[props(default)]
    pub title: Option<String>,

    /// Width class of the panel
    #[props(default = "max-w-lg".to_string())]
    pub width: String,

    /// Close request (backdrop, close button, Escape)
    #[props(default)]
    pub on_close: EventHandler<()>,

    pub children: Element,
}

#[component]
pub fn Modal(props: ModalProps) -> Element {
    if !props.open {
        return rsx! {};
    }

    let on_close = props.on_close;

    rsx! {
        div {
            class: "fixed inset-0 z-50 flex items-center justify-center",
            tabindex: "-1",
            onmounted: move |e| async move {
                if let Err(err) = e.set_focus(true).await {
                    tracing::debug!("Modal focus failed: {:?}", err);
                }
            },
            onkeydown: move |e: KeyboardEvent| {
                if e.key() == Key::Escape {
                    on_close.call(());
                }
            },

            // Backdrop
            div {
                class: "absolute inset-0 bg-black-50",
                onclick: move |_| on_close.call(()),
            }

            // Panel
            div {
                class: "relative w-full {props.width} mx-4 bg-slate-800 rounded-lg shadow-xl border border-slate-700 max-h-screen-90 flex flex-col",
                role: "dialog",
                onclick: move |e| e.stop_propagation(),

                div {
                    class: "flex items-center justify-between px-6 py-4 border-b border-slate-700",
                    h2 {
                        class: "text-lg font-semibold text-slate-100",
                        {props.title.clone().unwrap_or_default()}
                    }
                    button {
                        r#type: "button",
                        class: "icon-button",
                        title: "Close",
                        onclick: move |_| on_close.call(()),
                        "✕"
                    }
                }

                div {
                    class: "overflow-y-auto",
                    {props.children}
                }
            }
        }
    }
}
