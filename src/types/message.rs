//! Message types
//!
//! Defines chat message structures and sender tags.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Who authored a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sender {
    /// Typed by the user
    User,
    /// Produced by the model (also used for inline error messages)
    Model,
}

/// A single entry in the conversation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Unique id, used as the render key
    pub id: Uuid,
    /// The sender tag
    pub sender: Sender,
    /// The text body
    pub content: String,
    /// When the message was created
    pub created_at: DateTime<Utc>,
}

impl ChatMessage {
    /// Create a new message
    pub fn new(sender: Sender, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            sender,
            content: content.into(),
            created_at: Utc::now(),
        }
    }

    /// A message authored by the user
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Sender::User, content)
    }

    /// A message authored by the model
    pub fn model(content: impl Into<String>) -> Self {
        Self::new(Sender::Model, content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_creation() {
        let msg = ChatMessage::user("Hello, world!");
        assert_eq!(msg.sender, Sender::User);
        assert_eq!(msg.content, "Hello, world!");
    }

    #[test]
    fn test_sender_tags() {
        assert_eq!(ChatMessage::user("a").sender, Sender::User);
        assert_eq!(ChatMessage::model("b").sender, Sender::Model);
    }

    #[test]
    fn test_ids_are_unique() {
        let a = ChatMessage::user("same text");
        let b = ChatMessage::user("same text");
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_creation_order() {
        let first = ChatMessage::user("first");
        let second = ChatMessage::model("second");
        assert!(first.created_at <= second.created_at);
    }
}
