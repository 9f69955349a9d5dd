use tracing::info;

use crate::clients::{HabiticaClient, SlackWebhookClient};
use crate::core::config::AppConfig;
use crate::core::models::{PostOutcome, SyncReport};
use crate::core::watermark::{WatermarkStore, store_from_config};
use crate::errors::RelayError;
use crate::features::{relay_to_habitica, sync_messages_to_slack};
use crate::slack::SlackPublisher;

/// Everything one invocation needs to relay in either direction.
pub struct RelayBot {
    habitica: HabiticaClient,
    publisher: SlackPublisher,
    store: Box<dyn WatermarkStore>,
}

impl RelayBot {
    #[must_use]
    pub fn new(
        habitica: HabiticaClient,
        publisher: SlackPublisher,
        store: Box<dyn WatermarkStore>,
    ) -> Self {
        Self {
            habitica,
            publisher,
            store,
        }
    }

    /// Wires the clients and watermark backend described by `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub async fn from_config(config: &AppConfig) -> Result<Self, RelayError> {
        let http = config.http_client()?;
        let habitica = HabiticaClient::from_config(http.clone(), config);
        let publisher =
            SlackPublisher::new(SlackWebhookClient::new(http, config.slack_webhook_url.clone()));
        let store = store_from_config(config).await;
        info!(group_id = %config.habitica_group_id, "Relay bot initialised");
        Ok(Self::new(habitica, publisher, store))
    }

    #[must_use]
    pub fn store(&self) -> &dyn WatermarkStore {
        self.store.as_ref()
    }

    /// Slack → Habitica.
    ///
    /// # Errors
    ///
    /// See [`relay_to_habitica`].
    pub async fn relay(&self, user: &str, text: &str) -> Result<PostOutcome, RelayError> {
        relay_to_habitica(&self.habitica, user, text).await
    }

    /// Habitica → Slack.
    ///
    /// # Errors
    ///
    /// See [`sync_messages_to_slack`].
    pub async fn sync(&self) -> Result<SyncReport, RelayError> {
        sync_messages_to_slack(self.store.as_ref(), &self.habitica, &self.publisher).await
    }
}
