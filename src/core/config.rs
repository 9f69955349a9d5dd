use std::env;
use std::time::Duration;

use crate::errors::RelayError;

pub const DEFAULT_HABITICA_BASE_URL: &str = "https://habitica.com";
pub const DEFAULT_WATERMARK_FILE: &str = "/tmp/habitica-slack-lastpost";
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub habitica_api_user: String,
    pub habitica_api_key: String,
    pub habitica_group_id: String,
    pub habitica_base_url: String,
    pub slack_webhook_url: String,
    pub slack_signing_secret: Option<String>,
    pub watermark_ssm_parameter: Option<String>,
    pub watermark_file: String,
    pub http_timeout: Duration,
}

fn required(name: &str) -> Result<String, RelayError> {
    env::var(name).map_err(|e| RelayError::ConfigError(format!("{name}: {e}")))
}

impl AppConfig {
    /// Reads the relay configuration from the environment.
    ///
    /// # Errors
    ///
    /// Returns [`RelayError::ConfigError`] naming the first missing or
    /// malformed variable.
    pub fn from_env() -> Result<Self, RelayError> {
        let http_timeout_secs = match env::var("HTTP_TIMEOUT_SECS") {
            Ok(raw) => raw
                .parse::<u64>()
                .map_err(|e| RelayError::ConfigError(format!("HTTP_TIMEOUT_SECS: {}", e)))?,
            Err(_) => DEFAULT_HTTP_TIMEOUT_SECS,
        };

        Ok(Self {
            habitica_api_user: required("HABITICA_APIUSER")?,
            habitica_api_key: required("HABITICA_APIKEY")?,
            habitica_group_id: required("HABITICA_GROUPID")?,
            habitica_base_url: env::var("HABITICA_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_HABITICA_BASE_URL.to_string()),
            slack_webhook_url: required("SLACK_WEBHOOK")?,
            slack_signing_secret: env::var("SLACK_SIGNING_SECRET").ok(),
            watermark_ssm_parameter: env::var("WATERMARK_SSM_PARAMETER").ok(),
            watermark_file: env::var("WATERMARK_FILE")
                .unwrap_or_else(|_| DEFAULT_WATERMARK_FILE.to_string()),
            http_timeout: Duration::from_secs(http_timeout_secs),
        })
    }

    /// Builds the shared outbound HTTP client with the configured timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if the TLS backend cannot be initialised.
    pub fn http_client(&self) -> Result<reqwest::Client, reqwest::Error> {
        reqwest::Client::builder().timeout(self.http_timeout).build()
    }
}
