//! Client modules for external API interactions

pub mod habitica_client;
pub mod slack_webhook;

pub use habitica_client::HabiticaClient;
pub use slack_webhook::SlackWebhookClient;
