//! Backend errors
//!
//! Classified failures from the model server, rendered to the user as
//! inline conversation messages.

use thiserror::Error;

/// Backend errors
#[derive(Debug, Error)]
pub enum BackendError {
    /// A required field was missing; no request was made.
    #[error("model and prompt are required")]
    InvalidRequest,
    /// The server could not be reached at all.
    #[error("cannot reach the model server at {url}. Check that Ollama is running ({reason})")]
    Unreachable { url: String, reason: String },
    /// The server does not know the requested model.
    #[error("model \"{model}\" was not found on the server ({reason})")]
    ModelNotFound { model: String, reason: String },
    /// Anything else the server reported, passed through verbatim.
    #[error("{0}")]
    Backend(String),
}
