//! Ollama backend access
//!
//! This module handles all interaction with the model server: listing
//! installed models and requesting single-turn completions.

pub mod client;
pub mod error;

pub use client::BackendClient;
pub use error::BackendError;
