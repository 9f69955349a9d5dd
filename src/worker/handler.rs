use lambda_runtime::{Error, LambdaEvent};
use serde_json::Value;
use tracing::{Instrument, error, info, info_span};
use uuid::Uuid;

use crate::bot::RelayBot;
use crate::core::config::AppConfig;

/// Lambda handler for the scheduled worker. Runs one Habitica → Slack sync.
pub async fn function_handler(event: LambdaEvent<Value>) -> Result<Value, Error> {
    let config = AppConfig::from_env().inspect_err(|e| error!("{}", e))?;
    let run_id = Uuid::new_v4().to_string();
    info!(run_id = %run_id, "Worker Lambda received scheduled event: {:?}", event.payload);

    let bot = RelayBot::from_config(&config)
        .await
        .map_err(|e| Error::from(format!("Failed to initialize bot: {}", e)))?;

    let report = bot
        .sync()
        .instrument(info_span!("sync", run_id = %run_id))
        .await
        .map_err(|e| {
            error!(run_id = %run_id, "Sync failed: {}", e);
            Error::from(format!("Sync error: {}", e))
        })?;

    info!(
        run_id = %run_id,
        posted = report.posted,
        watermark = report.watermark,
        "Worker sync complete"
    );
    Ok(serde_json::json!({ "posted": report.posted, "watermark": report.watermark }))
}

pub use self::function_handler as handler;
