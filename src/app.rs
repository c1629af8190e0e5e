//! Root Dioxus application component
//!
//! This module contains the main App component and the shared state that
//! the UI tree reads through context.

use crate::backend::BackendClient;
use crate::storage::settings::{load_settings, AppSettings};
use crate::types::message::ChatMessage;
use crate::types::model::ModelDescriptor;
use crate::ui::Layout;
use dioxus::prelude::*;
use std::sync::Arc;

static CSS: Asset = asset!("/assets/main.css");

/// Where the model catalog currently stands
#[derive(Clone, PartialEq, Debug)]
pub enum CatalogState {
    /// Initial fetch in progress
    Loading,
    /// The fetch failed; the message is shown in the picker
    Error(String),
    /// Models are available (possibly zero of them)
    Ready,
}

/// Global application state shared across components
#[derive(Clone)]
pub struct AppState {
    pub client: Arc<BackendClient>,
    pub settings: Signal<AppSettings>,
    pub catalog_state: Signal<CatalogState>,
    pub models: Signal<Vec<ModelDescriptor>>,
    pub selected_model: Signal<Option<String>>,
    /// Append-only conversation; messages are never edited or removed
    pub messages: Signal<Vec<ChatMessage>>,
    /// True while a completion request is in flight; gates the send path
    pub is_sending: Signal<bool>,
}

impl AppState {
    pub fn new() -> Self {
        let settings = load_settings();
        let backend_url = settings.resolved_backend_url();
        tracing::info!("using model server at {}", backend_url);

        Self {
            client: Arc::new(BackendClient::new(backend_url)),
            settings: Signal::new(settings),
            catalog_state: Signal::new(CatalogState::Loading),
            models: Signal::new(Vec::new()),
            selected_model: Signal::new(None),
            messages: Signal::new(Vec::new()),
            is_sending: Signal::new(false),
        }
    }
}

/// Pick the selection after a fetch: keep the current model when it still
/// exists in the catalog, otherwise fall back to the first entry.
fn pick_selected(current: Option<String>, models: &[ModelDescriptor]) -> Option<String> {
    current
        .filter(|name| models.iter().any(|m| &m.name == name))
        .or_else(|| models.first().map(|m| m.name.clone()))
}

/// Fetch the catalog and move the state machine along.
///
/// On failure the error state holds the message; nothing retries
/// automatically.
pub async fn load_catalog(mut state: AppState) {
    state.catalog_state.set(CatalogState::Loading);

    match state.client.list_models().await {
        Ok(models) => {
            let current = state.selected_model.read().clone();
            state.selected_model.set(pick_selected(current, &models));
            state.models.set(models);
            state.catalog_state.set(CatalogState::Ready);
        }
        Err(e) => {
            tracing::error!("failed to load model catalog: {}", e);
            state.catalog_state.set(CatalogState::Error(e.to_string()));
        }
    }
}

#[component]
pub fn App() -> Element {
    let app_state = AppState::new();
    use_context_provider(|| app_state);

    {
        let state = use_context::<AppState>();
        use_effect(move || {
            let state = state.clone();
            spawn(async move {
                load_catalog(state).await;
            });
        });
    }

    rsx! {
        document::Stylesheet { href: CSS }
        Layout {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptor(name: &str) -> ModelDescriptor {
        ModelDescriptor {
            name: name.to_string(),
            size: "1.00 GB".to_string(),
            modified_at: String::new(),
            description: None,
        }
    }

    #[test]
    fn test_first_model_selected_when_nothing_chosen() {
        let models = vec![descriptor("llama3.2"), descriptor("qwen2.5")];
        assert_eq!(pick_selected(None, &models), Some("llama3.2".to_string()));
    }

    #[test]
    fn test_existing_selection_is_kept() {
        let models = vec![descriptor("llama3.2"), descriptor("qwen2.5")];
        assert_eq!(
            pick_selected(Some("qwen2.5".to_string()), &models),
            Some("qwen2.5".to_string())
        );
    }

    #[test]
    fn test_vanished_selection_falls_back_to_first() {
        let models = vec![descriptor("llama3.2")];
        assert_eq!(
            pick_selected(Some("gone".to_string()), &models),
            Some("llama3.2".to_string())
        );
    }

    #[test]
    fn test_empty_catalog_selects_nothing() {
        assert_eq!(pick_selected(None, &[]), None);
        assert_eq!(pick_selected(Some("x".to_string()), &[]), None);
    }
}
