//! All Slack-specific functionality

pub mod message_formatter;
pub mod publisher;

// Re-export main types for convenience
pub use message_formatter::{format_message, is_relay_echo, parse_sender_prefix, select_new_messages};
pub use publisher::SlackPublisher;
