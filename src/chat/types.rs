//! Chat wire types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Prefix marking a client-synthesized message id awaiting server confirmation
pub(crate) const TEMP_ID_PREFIX: &str = "temp-";

/// Who authored a chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SenderRole {
    User,
    Admin,
    Ai,
    System,
}

/// A chat message as returned by the server
///
/// Messages come in two provenances: authoritative records returned by the
/// server, and optimistic records synthesized locally while a send is in
/// flight. The latter are identified by [`ChatMessage::is_pending`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    /// The message ID; the backend serves this as either `id` or `_id`
    #[serde(alias = "_id")]
    pub id: String,

    pub conversation_id: String,

    pub sender_id: String,

    pub sender_username: String,

    pub sender_role: SenderRole,

    pub content: String,

    pub timestamp: DateTime<Utc>,

    /// Optional path of an attached image in the media repository
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_repo_path: Option<String>,
}

impl ChatMessage {
    /// Whether this is an optimistic record not yet confirmed by the server
    pub fn is_pending(&self) -> bool {
        self.id.starts_with(TEMP_ID_PREFIX)
    }
}

/// Payload for creating a new chat message
#[derive(Debug, Clone, Serialize)]
pub struct ChatMessageCreate {
    pub conversation_id: String,

    pub content: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_repo_path: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_accepts_underscore_id() {
        let raw = serde_json::json!({
            "_id": "svr-1",
            "conversation_id": "conv-1",
            "sender_id": "u-1",
            "sender_username": "ivy",
            "sender_role": "admin",
            "content": "Hello!",
            "timestamp": "2025-09-28T23:15:00Z"
        });

        let message: ChatMessage = serde_json::from_value(raw).unwrap();
        assert_eq!(message.id, "svr-1");
        assert_eq!(message.sender_role, SenderRole::Admin);
        assert!(!message.is_pending());
    }

    #[test]
    fn temp_ids_are_pending() {
        let raw = serde_json::json!({
            "id": "temp-1234",
            "conversation_id": "conv-1",
            "sender_id": "u-1",
            "sender_username": "veronica",
            "sender_role": "user",
            "content": "Hi",
            "timestamp": "2025-09-28T23:16:00Z"
        });

        let message: ChatMessage = serde_json::from_value(raw).unwrap();
        assert!(message.is_pending());
    }
}
