//! Habitica ⇄ Slack chat relay.
//!
//! This crate relays messages between one Slack channel and one Habitica
//! party or guild chat:
//! 1. An API Lambda that receives Slack slash commands / outgoing webhooks
//!    and posts them to Habitica as `[<user> says] <text>`
//! 2. A Worker Lambda, run on a schedule, that posts Habitica messages newer
//!    than the stored watermark to a Slack incoming webhook
//!
//! # Architecture
//!
//! The system uses:
//! - AWS Lambda for serverless execution
//! - SSM Parameter Store (or a local file) for the sync watermark
//! - reqwest for the Habitica and Slack HTTP calls
//! - Tokio for async runtime
//!
//! # Example
//!
//! ```no_run
//! use habitica_slack::bot::RelayBot;
//! use habitica_slack::core::config::AppConfig;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     habitica_slack::setup_logging();
//!
//!     let config = AppConfig::from_env()?;
//!     let bot = RelayBot::from_config(&config).await?;
//!
//!     bot.relay("Joe", "Hello!").await?;
//!     let report = bot.sync().await?;
//!     println!("Posted {} messages, watermark {}", report.posted, report.watermark);
//!
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod bot;
pub mod clients;
pub mod core;
pub mod errors;
pub mod features;
pub mod slack;
pub mod worker;

pub use bot::RelayBot;
pub use errors::RelayError;

/// Configure structured logging with JSON format for AWS Lambda environments.
///
/// This function sets up tracing-subscriber with a JSON formatter suitable for
/// `CloudWatch` Logs integration. It should be called once at startup.
///
/// # Example
///
/// ```
/// habitica_slack::setup_logging();
/// ```
pub fn setup_logging() {
    use tracing_subscriber::prelude::*;
    let fmt_layer = tracing_subscriber::fmt::layer().json().with_target(true);

    let _ = tracing_subscriber::registry().with(fmt_layer).try_init();
}
