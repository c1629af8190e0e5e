//! Chat interface components
//!
//! Contains the conversation view, message display, and input components.

pub mod input;
pub mod message;

use crate::app::AppState;
use crate::types::message::ChatMessage;
use dioxus::prelude::*;
use input::ChatInput;
use message::MessageBubble;

#[component]
pub fn ChatView() -> Element {
    let app_state = use_context::<AppState>();
    let messages = app_state.messages;
    let is_sending = app_state.is_sending;

    // Handler for sending a prompt. One completion may be in flight at a
    // time; the guard below is what enforces it, the disabled input is
    // only the visible half.
    let handle_send = {
        let app_state = app_state.clone();
        move |text: String| {
            let mut messages = app_state.messages;
            let mut is_sending = app_state.is_sending;

            if *is_sending.read() {
                return;
            }
            let prompt = text.trim().to_string();
            if prompt.is_empty() {
                return;
            }

            let model = app_state
                .selected_model
                .read()
                .clone()
                .unwrap_or_default();

            messages.write().push(ChatMessage::user(prompt.clone()));
            is_sending.set(true);

            let client = app_state.client.clone();
            spawn(async move {
                let reply = match client.complete(&model, &prompt).await {
                    Ok(text) => ChatMessage::model(text),
                    Err(e) => {
                        tracing::warn!("completion failed: {}", e);
                        ChatMessage::model(format!("Error: {e}"))
                    }
                };
                messages.write().push(reply);
                is_sending.set(false);
            });
        }
    };

    rsx! {
        div { class: "chat-view",
            div { class: "messages-area",
                div { class: "messages-inner",
                    if messages.read().is_empty() {
                        div { class: "empty-conversation",
                            span { class: "empty-title", "Start a conversation" }
                            span { class: "empty-hint", "Responses render markdown; your messages stay as typed." }
                        }
                    }

                    for msg in messages.read().iter() {
                        MessageBubble { key: "{msg.id}", message: msg.clone() }
                    }

                    if is_sending() {
                        div { class: "sending-indicator",
                            div { class: "dot" }
                            div { class: "dot" }
                            div { class: "dot" }
                        }
                    }
                }
            }

            ChatInput {
                on_send: handle_send,
                is_sending: is_sending(),
            }
        }
    }
}
