//! Application shell: sidebar on the left, conversation on the right.

use crate::app::AppState;
use crate::ui::chat::ChatView;
use crate::ui::sidebar::Sidebar;
use dioxus::prelude::*;

#[component]
pub fn Layout() -> Element {
    let app_state = use_context::<AppState>();
    let theme = app_state.settings.read().theme.clone();
    let selected = app_state.selected_model.read().clone();

    rsx! {
        div { class: "app-shell", "data-theme": "{theme}",
            Sidebar {}

            div { class: "chat-column",
                header { class: "chat-header",
                    span { class: "chat-title", "TideLM" }
                    if let Some(model) = selected {
                        span { class: "chat-model", "{model}" }
                    }
                }
                ChatView {}
            }
        }
    }
}
