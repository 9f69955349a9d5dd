//! API Lambda handler - thin router for the two relay endpoints.
//!
//! - `/sync_message_to_habitica`: Slack slash command or outgoing webhook,
//!   relayed to the Habitica group chat
//! - `/sync_messages_to_slack`: runs one Habitica → Slack sync cycle

use lambda_runtime::{Error, LambdaEvent};
use serde::Serialize;
use serde_json::{Value, json};
use tracing::{error, info, warn};

use super::{helpers, parsing, signature};
use crate::bot::RelayBot;
use crate::core::config::AppConfig;
use crate::core::models::PostOutcome;

pub use self::function_handler as handler;

pub const RELAY_PATH: &str = "/sync_message_to_habitica";
pub const SYNC_PATH: &str = "/sync_messages_to_slack";

/// Lambda handler for the API entrypoint.
///
/// # Errors
///
/// Fails the invocation only when configuration is missing or the bot
/// cannot be built; request-level problems become HTTP error responses.
#[tracing::instrument(level = "info", skip(event))]
pub async fn function_handler(event: LambdaEvent<Value>) -> Result<impl Serialize, Error> {
    let config = AppConfig::from_env().inspect_err(|e| error!("{}", e))?;
    let bot = RelayBot::from_config(&config).await?;

    Ok(route_request(&config, &bot, &event.payload).await)
}

/// Routes a Lambda proxy payload to the relay or sync flow.
pub async fn route_request(config: &AppConfig, bot: &RelayBot, payload: &Value) -> Value {
    let Some(path) = parsing::request_path(payload) else {
        error!("Request missing path");
        return helpers::err_response(400, "Missing path");
    };
    info!(raw_path = %path, "Request path");

    if path.ends_with(RELAY_PATH) {
        return handle_relay(config, bot, payload).await;
    }

    if path.ends_with(SYNC_PATH) {
        return handle_sync(bot).await;
    }

    helpers::err_response(404, "Not found")
}

// ============================================================================
// Slack → Habitica
// ============================================================================

async fn handle_relay(config: &AppConfig, bot: &RelayBot, payload: &Value) -> Value {
    let body = match parsing::extract_body(payload) {
        Ok(b) => b,
        Err(e) => {
            error!("Invalid relay request body: {}", e);
            return helpers::err_response(400, &e.to_string());
        }
    };

    if let Some(secret) = &config.slack_signing_secret {
        if let Err(response) = verify_signature(&body, payload, secret) {
            return response;
        }
    }

    let inbound = match parsing::parse_form_data(&body) {
        Ok(p) => p,
        Err(e) => {
            error!("Failed to parse Slack payload: {}", e);
            return helpers::err_response(400, &format!("Parse Error: {e}"));
        }
    };

    // Trigger-word-only webhooks arrive with empty text and are still relayed.
    if inbound.user_name.is_empty() {
        return helpers::err_response(400, "Missing user_name");
    }

    match bot.relay(&inbound.user_name, &inbound.text).await {
        Ok(PostOutcome::Sent) => info!(channel = %inbound.channel_name, "Message relayed"),
        Ok(PostOutcome::Skipped) => info!("Ignored message from reserved bot user"),
        // Best-effort delivery: Slack is not asked to retry.
        Err(e) => warn!("Failed to relay message to Habitica: {}", e),
    }

    helpers::ok_empty()
}

fn verify_signature(body: &str, payload: &Value, secret: &str) -> Result<(), Value> {
    let headers = payload.get("headers").unwrap_or(&Value::Null);

    let Some(sig) = parsing::get_header_value(headers, "X-Slack-Signature") else {
        error!("Missing X-Slack-Signature header");
        return Err(helpers::err_response(401, "Missing X-Slack-Signature header"));
    };

    let Some(timestamp) = parsing::get_header_value(headers, "X-Slack-Request-Timestamp") else {
        error!("Missing X-Slack-Request-Timestamp header");
        return Err(helpers::err_response(
            401,
            "Missing X-Slack-Request-Timestamp header",
        ));
    };

    if !signature::verify_slack_signature(body, timestamp, sig, secret) {
        return Err(helpers::err_response(401, "Invalid Slack signature"));
    }

    Ok(())
}

// ============================================================================
// Habitica → Slack
// ============================================================================

async fn handle_sync(bot: &RelayBot) -> Value {
    match bot.sync().await {
        Ok(report) => helpers::ok_json(&json!({
            "posted": report.posted,
            "watermark": report.watermark,
        })),
        Err(e) => {
            error!("Sync failed: {}", e);
            helpers::err_response(502, &e.to_string())
        }
    }
}
