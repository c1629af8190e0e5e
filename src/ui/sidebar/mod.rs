//! Sidebar: model picker plus conversation-level actions.

pub mod model_picker;

use crate::app::AppState;
use crate::storage::settings::save_settings;
use dioxus::prelude::*;
use model_picker::ModelPicker;

#[component]
pub fn Sidebar() -> Element {
    let app_state = use_context::<AppState>();
    let mut messages = app_state.messages;
    let is_sending = app_state.is_sending;
    let mut settings = app_state.settings;

    let sending = *is_sending.read();
    let has_messages = !messages.read().is_empty();

    let handle_new_chat = move |_| {
        if !*is_sending.read() {
            messages.set(Vec::new());
        }
    };

    let handle_theme_toggle = move |_| {
        let mut current = settings.write();
        current.theme = if current.theme == "dark" {
            "light".to_string()
        } else {
            "dark".to_string()
        };
        if let Err(e) = save_settings(&current) {
            tracing::warn!("failed to save settings: {}", e);
        }
    };

    let theme_label = if settings.read().theme == "dark" {
        "Light theme"
    } else {
        "Dark theme"
    };

    rsx! {
        aside { class: "sidebar",
            div { class: "brand",
                div { class: "brand-mark",
                    svg {
                        width: "16",
                        height: "16",
                        view_box: "0 0 24 24",
                        fill: "none",
                        stroke: "currentColor",
                        stroke_width: "2.5",
                        stroke_linecap: "round",
                        stroke_linejoin: "round",
                        path { d: "M21 15a2 2 0 0 1-2 2H7l-4 4V5a2 2 0 0 1 2-2h14a2 2 0 0 1 2 2z" }
                    }
                }
                span { class: "brand-name", "TideLM" }
            }

            ModelPicker {}

            div { class: "sidebar-spacer" }

            button {
                class: "sidebar-action",
                onclick: handle_new_chat,
                disabled: sending || !has_messages,
                svg {
                    width: "14",
                    height: "14",
                    view_box: "0 0 24 24",
                    fill: "none",
                    stroke: "currentColor",
                    stroke_width: "2",
                    stroke_linecap: "round",
                    line { x1: "12", y1: "5", x2: "12", y2: "19" }
                    line { x1: "5", y1: "12", x2: "19", y2: "12" }
                }
                "New chat"
            }

            button {
                class: "sidebar-action",
                onclick: handle_theme_toggle,
                "{theme_label}"
            }
        }
    }
}
