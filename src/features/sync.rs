//! Habitica → Slack synchronisation.
//!
//! A run reads the watermark, fetches the whole group chat, publishes what
//! is newer than the watermark, and then advances the watermark to the
//! newest handled timestamp (posted or echo-skipped). When nothing was
//! handled the watermark is left untouched.

use async_trait::async_trait;
use tracing::{info, instrument};

use crate::core::models::{ChatMessage, PublishReport, SyncReport};
use crate::core::watermark::WatermarkStore;
use crate::errors::RelayError;

#[async_trait]
pub trait ChatSource: Send + Sync {
    async fn fetch_messages(&self) -> Result<Vec<ChatMessage>, RelayError>;
}

#[async_trait]
pub trait MessagePublisher: Send + Sync {
    /// Publishes every message newer than `watermark`.
    ///
    /// Implementations stop at the first failed delivery.
    async fn publish(
        &self,
        messages: &[ChatMessage],
        watermark: i64,
    ) -> Result<PublishReport, RelayError>;
}

/// Runs one sync cycle.
///
/// # Errors
///
/// Returns the first store, fetch or publish error. A publish error leaves
/// the watermark unchanged, so the next run may repost but never skips.
#[instrument(level = "info", skip_all)]
pub async fn sync_messages_to_slack(
    store: &dyn WatermarkStore,
    source: &dyn ChatSource,
    publisher: &dyn MessagePublisher,
) -> Result<SyncReport, RelayError> {
    let watermark = store.get().await?;
    let messages = source.fetch_messages().await?;
    info!(watermark, fetched = messages.len(), "Fetched Habitica chat");

    let report = publisher.publish(&messages, watermark).await?;

    let watermark = match report.newest {
        Some(newest) if newest > watermark => {
            store.set(newest).await?;
            newest
        }
        _ => watermark,
    };

    info!(posted = report.posted, watermark, "Sync finished");
    Ok(SyncReport {
        posted: report.posted,
        watermark,
    })
}
