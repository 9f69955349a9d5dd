use thiserror::Error;

#[derive(Debug, Error)]
pub enum RelayError {
    #[error("Missing or invalid configuration: {0}")]
    ConfigError(String),

    #[error("Failed to send HTTP request: {0}")]
    HttpError(String),

    #[error("Remote API returned {status}: {body}")]
    ApiError { status: u16, body: String },

    #[error("Failed to parse payload: {0}")]
    ParseError(String),

    #[error("Failed to access watermark store: {0}")]
    StoreError(String),

    #[error("Failed to interact with AWS services: {0}")]
    AwsError(String),
}

impl From<reqwest::Error> for RelayError {
    fn from(error: reqwest::Error) -> Self {
        RelayError::HttpError(error.to_string())
    }
}

impl From<serde_json::Error> for RelayError {
    fn from(error: serde_json::Error) -> Self {
        RelayError::ParseError(error.to_string())
    }
}

impl From<std::io::Error> for RelayError {
    fn from(error: std::io::Error) -> Self {
        RelayError::StoreError(error.to_string())
    }
}
