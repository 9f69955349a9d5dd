use serde::{Deserialize, Serialize};

/// A single entry of a Habitica group chat.
///
/// `user` is absent for system and admin posts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub timestamp: i64,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
}

impl ChatMessage {
    /// The display name of the sender, if the message is attributed.
    #[must_use]
    pub fn sender(&self) -> Option<&str> {
        self.user.as_deref().filter(|u| !u.is_empty())
    }
}

/// Habitica wraps every successful response in a `data` envelope.
#[derive(Debug, Deserialize)]
pub struct HabiticaEnvelope<T> {
    pub data: T,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttachmentColor {
    Good,
    Danger,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachmentField {
    pub title: Option<String>,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlackAttachment {
    pub color: AttachmentColor,
    pub fields: Vec<AttachmentField>,
    pub fallback: String,
}

#[derive(Debug, Serialize)]
pub struct WebhookPayload<'a> {
    pub attachments: [&'a SlackAttachment; 1],
}

/// Result of relaying a message to Habitica.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostOutcome {
    Sent,
    /// The sender is the reserved bot identity; nothing was sent.
    Skipped,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PublishReport {
    pub posted: usize,
    pub newest: Option<i64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SyncReport {
    pub posted: usize,
    pub watermark: i64,
}
