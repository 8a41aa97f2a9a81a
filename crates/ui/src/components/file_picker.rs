//! # File Picker Component
//!
//! Button that opens the native file dialog plus the list of chosen files.

use dioxus::prelude::*;
use entiform_core::EditorError;
use entiform_schema::FileInfo;

use crate::components::inputs::FieldFrame;
use crate::file_ops;

#[derive(Props, Clone, PartialEq)]
pub struct FilePickerProps {
    /// Currently chosen files
    pub files: Vec<FileInfo>,

    #[props(default)]
    pub label: Option<String>,

    #[props(default = false)]
    pub multiple: bool,

    /// Accepted MIME types; empty accepts anything
    #[props(default)]
    pub accept: Vec<String>,

    #[props(default)]
    pub max_size_mb: Option<f64>,

    #[props(default = false)]
    pub required: bool,

    #[props(default)]
    pub error: Option<String>,

    #[props(default = false)]
    pub disabled: bool,

    /// Receives the new file list; empty when cleared
    #[props(default)]
    pub on_change: EventHandler<Vec<FileInfo>>,
}

#[component]
pub fn FilePicker(props: FilePickerProps) -> Element {
    let on_change = props.on_change;
    let multiple = props.multiple;
    let accept = props.accept.clone();
    let help = constraints_text(&props.accept, props.max_size_mb);

    let choose = move |_| {
        let accept = accept.clone();
        spawn(async move {
            match file_ops::pick_files(multiple, &accept).await {
                Ok(files) => on_change.call(files),
                Err(EditorError::Cancelled) => tracing::debug!("File dialog cancelled"),
                Err(e) => tracing::error!("Failed to read picked file: {}", e),
            }
        });
    };

    rsx! {
        FieldFrame {
            label: props.label.clone(),
            required: props.required,
            error: props.error.clone(),
            help_text: help,

            div {
                class: "flex flex-col gap-2",

                div {
                    class: "flex items-center gap-2",
                    button {
                        r#type: "button",
                        class: "btn btn-secondary",
                        disabled: props.disabled,
                        onclick: choose,
                        if multiple { "Choose files…" } else { "Choose file…" }
                    }
                    if !props.files.is_empty() {
                        button {
                            r#type: "button",
                            class: "btn btn-ghost",
                            disabled: props.disabled,
                            onclick: move |_| on_change.call(Vec::new()),
                            "Clear"
                        }
                    }
                }

                if props.files.is_empty() {
                    span { class: "text-xs text-slate-500", "No file chosen" }
                }
                for file in props.files.iter() {
                    div {
                        key: "{file.name}",
                        class: "flex items-center justify-between px-3 py-1 rounded bg-slate-700 text-sm",
                        span { class: "text-slate-200 truncate", "{file.name}" }
                        span { class: "text-xs text-slate-400 ml-3", {format_size(file.size)} }
                    }
                }
            }
        }
    }
}

/// Human-readable byte count
pub fn format_size(bytes: u64) -> String {
    const KB: f64 = 1024.0;
    let b = bytes as f64;
    if b < KB {
        format!("{} B", bytes)
    } else if b < KB * KB {
        format!("{:.1} KB", b / KB)
    } else {
        format!("{:.1} MB", b / (KB * KB))
    }
}

fn constraints_text(accept: &[String], max_size_mb: Option<f64>) -> Option<String> {
    let mut parts = Vec::new();
    if !accept.is_empty() {
        parts.push(accept.join(", "));
    }
    if let Some(mb) = max_size_mb {
        parts.push(format!("up to {}MB", mb));
    }
    (!parts.is_empty()).then(|| parts.join(", "))
}
