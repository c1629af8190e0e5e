use crate::app::{load_catalog, AppState, CatalogState};
use crate::ui::components::loading::Spinner;
use dioxus::prelude::*;

#[component]
pub fn ModelPicker() -> Element {
    let app_state = use_context::<AppState>();
    let catalog_state = app_state.catalog_state;
    let models = app_state.models;
    let mut selected = app_state.selected_model;

    let handle_refresh = {
        let state = app_state.clone();
        move |_| {
            let state = state.clone();
            spawn(async move {
                load_catalog(state).await;
            });
        }
    };

    let state_now = catalog_state.read().clone();

    rsx! {
        div { class: "model-picker",
            div { class: "picker-header",
                span { class: "picker-label", "Model" }
                if state_now == CatalogState::Ready {
                    button {
                        class: "icon-button",
                        onclick: handle_refresh,
                        title: "Refresh model list",
                        svg {
                            width: "12",
                            height: "12",
                            view_box: "0 0 24 24",
                            fill: "none",
                            stroke: "currentColor",
                            stroke_width: "2",
                            stroke_linecap: "round",
                            stroke_linejoin: "round",
                            path { d: "M23 4v6h-6" }
                            path { d: "M1 20v-6h6" }
                            path { d: "M3.51 9a9 9 0 0 1 14.85-3.36L23 10M1 14l4.64 4.36A9 9 0 0 0 20.49 15" }
                        }
                    }
                }
            }

            match state_now {
                CatalogState::Loading => rsx! {
                    div { class: "picker-loading",
                        Spinner { size: 14 }
                        span { "Contacting the model server..." }
                    }
                },
                CatalogState::Error(message) => rsx! {
                    div { class: "picker-error",
                        span { class: "picker-error-title", "Could not load models" }
                        span { class: "picker-error-detail", "{message}" }
                    }
                },
                CatalogState::Ready => rsx! {
                    if models.read().is_empty() {
                        div { class: "picker-empty",
                            span { "No models installed" }
                            span { class: "picker-hint", "Try: ollama pull llama3.2" }
                        }
                    } else {
                        select {
                            class: "model-select",
                            onchange: move |evt| selected.set(Some(evt.value())),
                            value: selected.read().clone().unwrap_or_default(),

                            for model in models.read().iter() {
                                option { value: "{model.name}", "{model.name}" }
                            }
                        }

                        if let Some(name) = selected.read().as_ref() {
                            if let Some(model) = models.read().iter().find(|m| &m.name == name) {
                                div { class: "model-meta",
                                    span {
                                        class: "model-size",
                                        title: "Modified {model.modified_at}",
                                        "{model.size}"
                                    }
                                    if let Some(desc) = model.description.as_ref() {
                                        span { class: "model-desc", "{desc}" }
                                    }
                                }
                            }
                        }
                    }
                },
            }
        }
    }
}
