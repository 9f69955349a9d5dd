//! Habitica group chat client
//!
//! Reads and writes the chat of a single party or guild through the v3 API.

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, info};

use crate::core::config::AppConfig;
use crate::core::models::{ChatMessage, HabiticaEnvelope, PostOutcome};
use crate::errors::RelayError;
use crate::features::sync::ChatSource;

/// Sender name whose messages are never forwarded, to prevent relay loops.
pub const RESERVED_BOT_USER: &str = "slackbot";

#[derive(Serialize)]
struct ChatForm<'a> {
    message: &'a str,
    #[serde(rename = "groupId")]
    group_id: &'a str,
}

/// Prefixes relayed text with its Slack author, e.g. `[Joe says] Hello!`.
#[must_use]
pub fn format_relayed_message(user: &str, text: &str) -> String {
    format!("[{user} says] {text}")
}

#[derive(Debug, Clone)]
pub struct HabiticaClient {
    http: Client,
    base_url: String,
    api_user: String,
    api_key: String,
    group_id: String,
}

impl HabiticaClient {
    pub fn new(
        http: Client,
        base_url: impl Into<String>,
        api_user: impl Into<String>,
        api_key: impl Into<String>,
        group_id: impl Into<String>,
    ) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_user: api_user.into(),
            api_key: api_key.into(),
            group_id: group_id.into(),
        }
    }

    #[must_use]
    pub fn from_config(http: Client, config: &AppConfig) -> Self {
        Self::new(
            http,
            config.habitica_base_url.clone(),
            config.habitica_api_user.clone(),
            config.habitica_api_key.clone(),
            config.habitica_group_id.clone(),
        )
    }

    #[must_use]
    pub fn chat_url(&self) -> String {
        format!("{}/api/v3/groups/{}/chat", self.base_url, self.group_id)
    }

    /// Posts `[<user> says] <text>` to the group chat.
    ///
    /// Messages from [`RESERVED_BOT_USER`] are skipped without any HTTP call.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or Habitica answers with a
    /// non-success status.
    pub async fn post_message(&self, user: &str, text: &str) -> Result<PostOutcome, RelayError> {
        if user == RESERVED_BOT_USER {
            debug!("Skipping message from reserved bot user");
            return Ok(PostOutcome::Skipped);
        }

        let message = format_relayed_message(user, text);
        let form = ChatForm {
            message: &message,
            group_id: &self.group_id,
        };

        let response = self
            .http
            .post(self.chat_url())
            .header("x-api-user", &self.api_user)
            .header("x-api-key", &self.api_key)
            .form(&form)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(RelayError::ApiError { status, body });
        }

        info!(group_id = %self.group_id, "Relayed message to Habitica");
        Ok(PostOutcome::Sent)
    }

    /// Fetches the group chat and returns the `data` field of the response.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, non-success status, or when the
    /// body does not carry a `data` field of type `T`.
    pub async fn fetch_chat_data<T: DeserializeOwned>(&self) -> Result<T, RelayError> {
        let response = self
            .http
            .get(self.chat_url())
            .header("x-api-user", &self.api_user)
            .header("x-api-key", &self.api_key)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(RelayError::ApiError { status, body });
        }

        let body = response.text().await?;
        let envelope: HabiticaEnvelope<T> = serde_json::from_str(&body)
            .map_err(|e| RelayError::ParseError(format!("Invalid Habitica chat response: {e}")))?;
        Ok(envelope.data)
    }

    /// Fetches all chat messages currently held by Habitica for the group.
    ///
    /// # Errors
    ///
    /// See [`HabiticaClient::fetch_chat_data`].
    pub async fn fetch_messages(&self) -> Result<Vec<ChatMessage>, RelayError> {
        let messages: Vec<ChatMessage> = self.fetch_chat_data().await?;
        debug!(count = messages.len(), "Fetched Habitica chat");
        Ok(messages)
    }
}

#[async_trait]
impl ChatSource for HabiticaClient {
    async fn fetch_messages(&self) -> Result<Vec<ChatMessage>, RelayError> {
        HabiticaClient::fetch_messages(self).await
    }
}
