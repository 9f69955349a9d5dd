//! Persistence of the last-synced Habitica message timestamp.
//!
//! The sync job reads the watermark before fetching, and overwrites it with
//! the newest posted timestamp afterwards. Stores do not enforce
//! monotonicity; last writer wins.

use async_trait::async_trait;
use aws_sdk_ssm::{Client as SsmClient, types::ParameterType};
use std::path::PathBuf;
use tokio::sync::RwLock;
use tracing::debug;

use super::config::AppConfig;
use crate::errors::RelayError;

/// One day, in milliseconds.
pub const DEFAULT_LOOKBACK_MS: i64 = 86_400_000;

/// Watermark used when nothing has been persisted yet.
#[must_use]
pub fn default_watermark(now_ms: i64) -> i64 {
    now_ms - DEFAULT_LOOKBACK_MS
}

#[must_use]
pub fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

#[async_trait]
pub trait WatermarkStore: Send + Sync {
    /// Returns the persisted value, if any.
    async fn load(&self) -> Result<Option<i64>, RelayError>;

    /// Persists `timestamp`, overwriting any prior value.
    async fn set(&self, timestamp: i64) -> Result<(), RelayError>;

    /// Returns the persisted watermark, or one day ago when absent.
    ///
    /// The default is not written back.
    async fn get(&self) -> Result<i64, RelayError> {
        Ok(self
            .load()
            .await?
            .unwrap_or_else(|| default_watermark(now_ms())))
    }
}

#[derive(Debug, Default)]
pub struct MemoryWatermarkStore {
    value: RwLock<Option<i64>>,
}

impl MemoryWatermarkStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_value(timestamp: i64) -> Self {
        Self {
            value: RwLock::new(Some(timestamp)),
        }
    }
}

#[async_trait]
impl WatermarkStore for MemoryWatermarkStore {
    async fn load(&self) -> Result<Option<i64>, RelayError> {
        Ok(*self.value.read().await)
    }

    async fn set(&self, timestamp: i64) -> Result<(), RelayError> {
        *self.value.write().await = Some(timestamp);
        Ok(())
    }
}

/// Keeps the watermark as a decimal integer in a single text file.
#[derive(Debug, Clone)]
pub struct FileWatermarkStore {
    path: PathBuf,
}

impl FileWatermarkStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl WatermarkStore for FileWatermarkStore {
    async fn load(&self) -> Result<Option<i64>, RelayError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw.trim().parse::<i64>().map(Some).map_err(|e| {
                RelayError::StoreError(format!(
                    "invalid watermark in {}: {e}",
                    self.path.display()
                ))
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn set(&self, timestamp: i64) -> Result<(), RelayError> {
        tokio::fs::write(&self.path, timestamp.to_string()).await?;
        debug!(path = %self.path.display(), timestamp, "Watermark written");
        Ok(())
    }
}

/// Keeps the watermark in an SSM parameter so it survives cold starts.
pub struct SsmWatermarkStore {
    client: SsmClient,
    name: String,
}

impl SsmWatermarkStore {
    pub fn new(client: SsmClient, name: impl Into<String>) -> Self {
        Self {
            client,
            name: name.into(),
        }
    }

    pub async fn from_env(name: impl Into<String>) -> Self {
        let shared = aws_config::from_env().load().await;
        Self::new(SsmClient::new(&shared), name)
    }
}

#[async_trait]
impl WatermarkStore for SsmWatermarkStore {
    async fn load(&self) -> Result<Option<i64>, RelayError> {
        match self.client.get_parameter().name(&self.name).send().await {
            Ok(resp) => {
                let Some(value) = resp.parameter.as_ref().and_then(|p| p.value()) else {
                    return Ok(None);
                };
                value.trim().parse::<i64>().map(Some).map_err(|e| {
                    RelayError::StoreError(format!("invalid watermark in {}: {e}", self.name))
                })
            }
            Err(e)
                if e.as_service_error()
                    .is_some_and(|se| se.is_parameter_not_found()) =>
            {
                Ok(None)
            }
            Err(e) => Err(RelayError::AwsError(format!("ssm get_parameter: {e}"))),
        }
    }

    async fn set(&self, timestamp: i64) -> Result<(), RelayError> {
        self.client
            .put_parameter()
            .name(&self.name)
            .value(timestamp.to_string())
            .r#type(ParameterType::String)
            .overwrite(true)
            .send()
            .await
            .map_err(|e| RelayError::AwsError(format!("ssm put_parameter: {e}")))?;
        Ok(())
    }
}

/// Picks the SSM backend when a parameter name is configured, otherwise the file backend.
pub async fn store_from_config(config: &AppConfig) -> Box<dyn WatermarkStore> {
    match &config.watermark_ssm_parameter {
        Some(name) => Box::new(SsmWatermarkStore::from_env(name.clone()).await),
        None => Box::new(FileWatermarkStore::new(&config.watermark_file)),
    }
}
