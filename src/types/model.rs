//! Model types
//!
//! Catalog entries reported by the model server.

use serde::{Deserialize, Serialize};

/// One model installed on the server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelDescriptor {
    /// Model identifier, e.g. "llama3.2:latest"
    pub name: String,
    /// On-disk size rendered as a gigabyte string, e.g. "2.00 GB"
    pub size: String,
    /// Last-modified timestamp as reported by the server
    pub modified_at: String,
    /// Short description derived from the server's model details, if any
    pub description: Option<String>,
}

/// Render a byte count as a gigabyte string with two decimals.
pub fn format_gigabytes(bytes: u64) -> String {
    const BYTES_PER_GB: f64 = 1024.0 * 1024.0 * 1024.0;
    format!("{:.2} GB", bytes as f64 / BYTES_PER_GB)
}
