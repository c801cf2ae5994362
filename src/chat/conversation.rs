//! Optimistic send pipeline for a single conversation
//!
//! Each outgoing message moves through Composed, Optimistically-Displayed
//! and then either Confirmed or Rolled-back. The local list shows the
//! optimistic record immediately; the server round-trip decides its fate.

use chrono::Utc;
use std::sync::Mutex;
use uuid::Uuid;

use super::types::{ChatMessage, ChatMessageCreate, SenderRole, TEMP_ID_PREFIX};
use super::ChatClient;
use crate::auth::UserRole;
use crate::error::Error;

/// Outcome of a send attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendStatus {
    /// The message was accepted and the history re-synced
    Sent,
    /// Nothing was done: the draft was empty or a send was already in flight
    Skipped,
}

struct ConversationState {
    messages: Vec<ChatMessage>,
    draft: String,
    in_flight: bool,
}

/// In-memory view of one conversation plus a draft input buffer
pub struct Conversation {
    client: ChatClient,
    conversation_id: String,
    state: Mutex<ConversationState>,
}

impl Conversation {
    pub(crate) fn new(client: ChatClient, conversation_id: &str) -> Self {
        Self {
            client,
            conversation_id: conversation_id.to_string(),
            state: Mutex::new(ConversationState {
                messages: Vec::new(),
                draft: String::new(),
                in_flight: false,
            }),
        }
    }

    /// Replace the local list with the authoritative server history
    pub async fn load(&self) -> Result<(), Error> {
        let history = self.client.history(&self.conversation_id).await?;
        self.state.lock().unwrap().messages = history;
        Ok(())
    }

    /// Snapshot of the current message list
    pub fn messages(&self) -> Vec<ChatMessage> {
        self.state.lock().unwrap().messages.clone()
    }

    /// The current draft input
    pub fn draft(&self) -> String {
        self.state.lock().unwrap().draft.clone()
    }

    /// Replace the draft input
    pub fn set_draft(&self, text: &str) {
        self.state.lock().unwrap().draft = text.to_string();
    }

    /// Whether a send is currently in flight
    pub fn is_sending(&self) -> bool {
        self.state.lock().unwrap().in_flight
    }

    /// Send the current draft
    ///
    /// Appends an optimistic record and clears the draft before the network
    /// round-trip so the UI feels responsive. On success the whole history is
    /// refetched and replaces the list, which picks up server-assigned ids,
    /// server ordering and any server-side appends such as an AI auto-reply.
    /// On failure the optimistic record is removed and the draft restored to
    /// the failed content so the user can retry.
    ///
    /// A send with an empty (after trimming) draft, or while another send is
    /// in flight, is a no-op. The in-flight check happens before the first
    /// await, so overlapping calls are detected deterministically.
    pub async fn send_draft(&self) -> Result<SendStatus, Error> {
        let sender = self
            .client
            .auth
            .current_user()
            .ok_or_else(|| Error::auth("not logged in"))?;

        let (content, temp_id) = {
            let mut state = self.state.lock().unwrap();
            let content = state.draft.trim().to_string();
            if content.is_empty() || state.in_flight {
                return Ok(SendStatus::Skipped);
            }

            state.in_flight = true;
            state.draft.clear();

            let temp_id = format!("{}{}", TEMP_ID_PREFIX, Uuid::new_v4());
            state.messages.push(ChatMessage {
                id: temp_id.clone(),
                conversation_id: self.conversation_id.clone(),
                sender_id: sender.id.clone(),
                sender_username: sender.username.clone(),
                sender_role: match sender.role {
                    UserRole::Admin => SenderRole::Admin,
                    UserRole::User => SenderRole::User,
                },
                content: content.clone(),
                timestamp: Utc::now(),
                image_repo_path: None,
            });

            (content, temp_id)
        };

        let outcome = self.round_trip(&content).await;

        let mut state = self.state.lock().unwrap();
        state.in_flight = false;

        match outcome {
            Ok(history) => {
                // Wholesale replacement: every id is now server-issued
                state.messages = history;
                Ok(SendStatus::Sent)
            }
            Err(err) => {
                state.messages.retain(|message| message.id != temp_id);
                state.draft = content;
                Err(err)
            }
        }
    }

    async fn round_trip(&self, content: &str) -> Result<Vec<ChatMessage>, Error> {
        let payload = ChatMessageCreate {
            conversation_id: self.conversation_id.clone(),
            content: content.to_string(),
            image_repo_path: None,
        };

        self.client.send(&payload).await?;
        self.client.history(&self.conversation_id).await
    }
}
