use async_trait::async_trait;
use tracing::debug;

use super::message_formatter::{format_message, is_relay_echo, select_new_messages};
use crate::clients::SlackWebhookClient;
use crate::core::models::{ChatMessage, PublishReport};
use crate::errors::RelayError;
use crate::features::sync::MessagePublisher;

/// Posts new Habitica messages to Slack, one webhook call per message.
#[derive(Debug, Clone)]
pub struct SlackPublisher {
    webhook: SlackWebhookClient,
}

impl SlackPublisher {
    #[must_use]
    pub fn new(webhook: SlackWebhookClient) -> Self {
        Self { webhook }
    }
}

#[async_trait]
impl MessagePublisher for SlackPublisher {
    async fn publish(
        &self,
        messages: &[ChatMessage],
        watermark: i64,
    ) -> Result<PublishReport, RelayError> {
        let mut report = PublishReport::default();

        // Echoes are never posted, but still count as handled for the watermark.
        for echo in messages
            .iter()
            .filter(|m| m.timestamp > watermark && is_relay_echo(m))
        {
            debug!(timestamp = echo.timestamp, "Skipping relayed Slack message");
            report.newest = Some(report.newest.map_or(echo.timestamp, |n| n.max(echo.timestamp)));
        }

        for message in select_new_messages(messages, watermark) {
            self.webhook.post_attachment(&format_message(message)).await?;

            report.posted += 1;
            report.newest = Some(
                report
                    .newest
                    .map_or(message.timestamp, |n| n.max(message.timestamp)),
            );
        }

        Ok(report)
    }
}
