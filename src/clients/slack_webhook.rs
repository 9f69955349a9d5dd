//! Slack incoming-webhook client
//!
//! Each call posts exactly one attachment; there is no batching and no retry.

use reqwest::Client;
use tracing::debug;

use crate::core::models::{SlackAttachment, WebhookPayload};
use crate::errors::RelayError;

#[derive(Debug, Clone)]
pub struct SlackWebhookClient {
    http: Client,
    webhook_url: String,
}

impl SlackWebhookClient {
    pub fn new(http: Client, webhook_url: impl Into<String>) -> Self {
        Self {
            http,
            webhook_url: webhook_url.into(),
        }
    }

    /// Posts `{"attachments": [attachment]}` to the webhook.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or Slack answers with a
    /// non-success status.
    pub async fn post_attachment(&self, attachment: &SlackAttachment) -> Result<(), RelayError> {
        let payload = WebhookPayload {
            attachments: [attachment],
        };

        let response = self
            .http
            .post(&self.webhook_url)
            .json(&payload)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(RelayError::ApiError { status, body });
        }

        debug!(fallback = %attachment.fallback, "Posted attachment to Slack");
        Ok(())
    }
}
