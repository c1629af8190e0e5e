//! Ollama HTTP client
//!
//! Two calls: `/api/tags` for the installed-model catalog and `/api/chat`
//! for a single-turn completion. Nothing is retried or cached; each call
//! either succeeds or comes back as a classified [`BackendError`].

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

use crate::backend::error::BackendError;
use crate::types::model::{format_gigabytes, ModelDescriptor};

// ============================================================================
// Wire types
// ============================================================================

/// Body of a `/api/chat` request. Kept to exactly the fields the exchange
/// needs: the model and a single user message.
#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<PromptMessage>,
}

#[derive(Debug, Serialize)]
struct PromptMessage {
    role: &'static str,
    content: String,
}

impl ChatRequest {
    fn single_turn(model: &str, prompt: &str) -> Self {
        Self {
            model: model.to_string(),
            messages: vec![PromptMessage {
                role: "user",
                content: prompt.to_string(),
            }],
        }
    }
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    message: CompletionMessage,
}

#[derive(Debug, Deserialize)]
struct CompletionMessage {
    content: String,
}

/// Raw shape of the `/api/tags` JSON response.
#[derive(Debug, Deserialize)]
struct TagsResponse {
    models: Vec<TagEntry>,
}

#[derive(Debug, Deserialize)]
struct TagEntry {
    name: String,
    size: u64,
    modified_at: String,
    #[serde(default)]
    details: Option<TagDetails>,
}

#[derive(Debug, Deserialize)]
struct TagDetails {
    #[serde(default)]
    parameter_size: Option<String>,
    #[serde(default)]
    quantization_level: Option<String>,
}

impl From<TagEntry> for ModelDescriptor {
    fn from(tag: TagEntry) -> Self {
        let description = tag.details.and_then(|details| {
            let parts: Vec<String> = [details.parameter_size, details.quantization_level]
                .into_iter()
                .flatten()
                .collect();
            if parts.is_empty() {
                None
            } else {
                Some(parts.join(" "))
            }
        });

        ModelDescriptor {
            name: tag.name,
            size: format_gigabytes(tag.size),
            modified_at: tag.modified_at,
            description,
        }
    }
}

/// Error body Ollama returns on failed requests.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

// ============================================================================
// Client
// ============================================================================

/// HTTP client for the model server.
pub struct BackendClient {
    http: reqwest::Client,
    base_url: String,
}

impl BackendClient {
    /// Create a client for the given base URL (trailing slashes stripped).
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    /// The server address this client talks to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// List the models installed on the server.
    pub async fn list_models(&self) -> Result<Vec<ModelDescriptor>, BackendError> {
        let url = format!("{}/api/tags", self.base_url);
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(BackendError::Backend(backend_message(status, &body)));
        }

        let tags: TagsResponse = response
            .json()
            .await
            .map_err(|e| BackendError::Backend(format!("unexpected catalog response: {e}")))?;

        tracing::debug!("catalog fetched: {} models", tags.models.len());
        Ok(tags.models.into_iter().map(ModelDescriptor::from).collect())
    }

    /// Request a single-turn completion and wait for the full text.
    ///
    /// Blank model or prompt fails fast without touching the network.
    pub async fn complete(&self, model: &str, prompt: &str) -> Result<String, BackendError> {
        if model.trim().is_empty() || prompt.trim().is_empty() {
            return Err(BackendError::InvalidRequest);
        }

        let request = ChatRequest::single_turn(model, prompt);
        let url = format!("{}/api/chat", self.base_url);
        let response = self
            .http
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(classify_chat_failure(model, status, &body));
        }

        let completion: ChatResponse = response
            .json()
            .await
            .map_err(|e| BackendError::Backend(format!("unexpected chat response: {e}")))?;

        Ok(completion.message.content)
    }

    fn transport_error(&self, source: reqwest::Error) -> BackendError {
        if source.is_connect() {
            BackendError::Unreachable {
                url: self.base_url.clone(),
                reason: source.to_string(),
            }
        } else {
            BackendError::Backend(source.to_string())
        }
    }
}

/// Classify a failed `/api/chat` response.
///
/// A 404 status is the structured signal for an unknown model; the
/// "not found" substring match is kept as a fallback for servers that
/// report it with a generic status. The requested model name is carried
/// into the error so the message can echo it.
fn classify_chat_failure(model: &str, status: StatusCode, body: &str) -> BackendError {
    let message = backend_message(status, body);
    if status == StatusCode::NOT_FOUND || message.contains("not found") {
        BackendError::ModelNotFound {
            model: model.to_string(),
            reason: message,
        }
    } else {
        BackendError::Backend(message)
    }
}

/// Pull the message out of an `{ "error": … }` body, falling back to the
/// raw text, falling back to the status line.
fn backend_message(status: StatusCode, body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .map(|parsed| parsed.error)
        .unwrap_or_else(|_| {
            let trimmed = body.trim();
            if trimmed.is_empty() {
                format!("model server returned HTTP {status}")
            } else {
                trimmed.to_string()
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    // Nothing listens on this port; connect attempts fail immediately.
    const DEAD_URL: &str = "http://127.0.0.1:1";

    #[test]
    fn test_chat_request_body_shape() {
        let request = ChatRequest::single_turn("llama3.2", "why is the sky blue?");
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "model": "llama3.2",
                "messages": [{ "role": "user", "content": "why is the sky blue?" }]
            })
        );
    }

    #[test]
    fn test_base_url_is_normalized() {
        let client = BackendClient::new("http://localhost:11434/");
        assert_eq!(client.base_url(), "http://localhost:11434");
    }

    #[test]
    fn test_classify_not_found_by_status() {
        let err = classify_chat_failure(
            "missing-model",
            StatusCode::NOT_FOUND,
            r#"{ "error": "model \"missing-model\" not found, try pulling it first" }"#,
        );
        match &err {
            BackendError::ModelNotFound { model, .. } => assert_eq!(model, "missing-model"),
            other => panic!("expected ModelNotFound, got {other:?}"),
        }
        assert!(err.to_string().contains("missing-model"));
    }

    #[test]
    fn test_classify_not_found_by_substring() {
        let err = classify_chat_failure(
            "missing-model",
            StatusCode::INTERNAL_SERVER_ERROR,
            r#"{ "error": "model not found" }"#,
        );
        assert!(matches!(err, BackendError::ModelNotFound { .. }));
    }

    #[test]
    fn test_classify_other_errors_pass_through() {
        let err = classify_chat_failure(
            "llama3.2",
            StatusCode::INTERNAL_SERVER_ERROR,
            r#"{ "error": "model requires more system memory" }"#,
        );
        match err {
            BackendError::Backend(message) => {
                assert_eq!(message, "model requires more system memory")
            }
            other => panic!("expected Backend, got {other:?}"),
        }
    }

    #[test]
    fn test_backend_message_falls_back_to_raw_text() {
        let message = backend_message(StatusCode::BAD_GATEWAY, "upstream exploded");
        assert_eq!(message, "upstream exploded");

        let empty = backend_message(StatusCode::BAD_GATEWAY, "");
        assert!(empty.contains("502"));
    }

    #[test]
    fn test_tag_entry_mapping() {
        let json = r#"{
            "models": [{
                "name": "llama3.2:latest",
                "size": 2147483648,
                "modified_at": "2024-11-02T14:32:10.000000Z",
                "details": { "parameter_size": "3B", "quantization_level": "Q4_K_M" }
            }]
        }"#;
        let tags: TagsResponse = serde_json::from_str(json).unwrap();
        let descriptors: Vec<ModelDescriptor> =
            tags.models.into_iter().map(ModelDescriptor::from).collect();

        assert_eq!(descriptors.len(), 1);
        assert_eq!(descriptors[0].name, "llama3.2:latest");
        assert_eq!(descriptors[0].size, "2.00 GB");
        assert_eq!(descriptors[0].description.as_deref(), Some("3B Q4_K_M"));
    }

    #[test]
    fn test_tag_entry_without_details() {
        let json = r#"{ "models": [{ "name": "m", "size": 1, "modified_at": "x" }] }"#;
        let tags: TagsResponse = serde_json::from_str(json).unwrap();
        let descriptor = ModelDescriptor::from(tags.models.into_iter().next().unwrap());
        assert!(descriptor.description.is_none());
    }

    #[tokio::test]
    async fn test_blank_prompt_skips_the_network() {
        // The client points at a dead address: if a request were issued
        // this would classify as Unreachable instead of InvalidRequest.
        let client = BackendClient::new(DEAD_URL);
        let err = client.complete("llama3.2", "   \n ").await.unwrap_err();
        assert!(matches!(err, BackendError::InvalidRequest));

        let err = client.complete("", "hello").await.unwrap_err();
        assert!(matches!(err, BackendError::InvalidRequest));
    }

    #[tokio::test]
    async fn test_connection_refused_classifies_as_unreachable() {
        let client = BackendClient::new(DEAD_URL);
        let err = client.complete("llama3.2", "hello").await.unwrap_err();
        match &err {
            BackendError::Unreachable { url, .. } => assert_eq!(url, DEAD_URL),
            other => panic!("expected Unreachable, got {other:?}"),
        }
        assert!(err.to_string().contains("running"));
    }

    #[tokio::test]
    async fn test_catalog_fetch_fails_when_unreachable() {
        let client = BackendClient::new(DEAD_URL);
        let err = client.list_models().await.unwrap_err();
        assert!(matches!(err, BackendError::Unreachable { .. }));
    }
}
