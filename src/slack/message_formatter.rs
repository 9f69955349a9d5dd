//! Turns Habitica chat messages into Slack attachments.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::core::models::{AttachmentColor, AttachmentField, ChatMessage, SlackAttachment};

/// Splits a relayed `[name says] text` message into its sender and body.
///
/// Returns `None` when the text carries no such prefix.
#[must_use]
pub fn parse_sender_prefix(text: &str) -> Option<(&str, &str)> {
    static PREFIX_RE: Lazy<Regex> = Lazy::new(|| {
        Regex::new(r"(?s)^\[(?P<name>[^\]]+) says\] (?P<body>.*)$").expect("static regex compile")
    });

    let caps = PREFIX_RE.captures(text)?;
    let name = caps.name("name")?.as_str();
    let body = caps.name("body")?.as_str();
    Some((name, body))
}

/// Builds the attachment for a single message.
///
/// Attributed messages are green with the sender as field title. Messages
/// without a sender are red and untitled, with the raw text as value.
#[must_use]
pub fn format_message(message: &ChatMessage) -> SlackAttachment {
    match message.sender() {
        Some(user) => SlackAttachment {
            color: AttachmentColor::Good,
            fields: vec![AttachmentField {
                title: Some(user.to_string()),
                value: message.text.clone(),
            }],
            fallback: format!("{}: {}", user, message.text),
        },
        None => SlackAttachment {
            color: AttachmentColor::Danger,
            fields: vec![AttachmentField {
                title: None,
                value: message.text.clone(),
            }],
            fallback: message.text.clone(),
        },
    }
}

/// An unattributed `[name says] ...` message is the Habitica copy of a
/// message that was relayed from Slack.
#[must_use]
pub fn is_relay_echo(message: &ChatMessage) -> bool {
    message.sender().is_none() && parse_sender_prefix(&message.text).is_some()
}

/// Keeps messages strictly newer than `watermark`, newest first, dropping
/// relay echoes so Slack never sees its own messages twice.
#[must_use]
pub fn select_new_messages(messages: &[ChatMessage], watermark: i64) -> Vec<&ChatMessage> {
    let mut fresh: Vec<&ChatMessage> = messages
        .iter()
        .filter(|m| m.timestamp > watermark && !is_relay_echo(m))
        .collect();
    fresh.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    fresh
}
