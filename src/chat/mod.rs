//! Support chat: history fetches and message sending

mod conversation;
mod types;

use reqwest::Client;
use std::sync::Arc;

use crate::auth::Auth;
use crate::error::Error;
use crate::fetch::Fetch;

pub use conversation::{Conversation, SendStatus};
pub use types::{ChatMessage, ChatMessageCreate, SenderRole};

/// Client for the chat endpoints
#[derive(Clone)]
pub struct ChatClient {
    url: String,
    client: Client,
    auth: Arc<Auth>,
}

impl ChatClient {
    /// Create a new chat client
    pub(crate) fn new(url: &str, client: Client, auth: Arc<Auth>) -> Self {
        Self {
            url: url.to_string(),
            client,
            auth,
        }
    }

    fn bearer(&self) -> Result<String, Error> {
        self.auth
            .access_token()
            .ok_or_else(|| Error::auth("not logged in"))
    }

    /// Fetch the full message history for a conversation
    pub async fn history(&self, conversation_id: &str) -> Result<Vec<ChatMessage>, Error> {
        let url = format!("{}/chat/history/{}", self.url, conversation_id);

        Fetch::get(&self.client, &url)
            .bearer_auth(&self.bearer()?)
            .execute()
            .await
    }

    /// Append a message to a conversation
    pub async fn send(&self, message: &ChatMessageCreate) -> Result<(), Error> {
        let url = format!("{}/chat/send_message", self.url);

        Fetch::post(&self.client, &url)
            .bearer_auth(&self.bearer()?)
            .json(message)?
            .execute_empty()
            .await
    }

    /// Open an in-memory view of a conversation with optimistic sending
    pub fn conversation(&self, conversation_id: &str) -> Conversation {
        Conversation::new(self.clone(), conversation_id)
    }
}
