// src/error.rs
use serde_json::Value;

/// Message shown when a failed request carries no usable server detail.
pub const FALLBACK_ERROR_MESSAGE: &str = "An error occurred. Please try again.";

#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Backend returned {status}{}", detail_suffix(.detail))]
    Status { status: u16, detail: Option<String> },

    #[error("Malformed response payload: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid endpoint URL: {0}")]
    InvalidUrl(String),
}

impl BackendError {
    /// Build a status error from a non-2xx response body.
    ///
    /// Only a non-empty string `detail` field counts; anything else
    /// (validation arrays, HTML error pages, empty bodies) is dropped.
    pub fn from_status(status: u16, body: &str) -> Self {
        BackendError::Status {
            status,
            detail: extract_detail(body),
        }
    }

    /// The text the user sees for this failure.
    pub fn user_message(&self) -> String {
        match self {
            BackendError::Status {
                detail: Some(detail),
                ..
            } => detail.clone(),
            _ => FALLBACK_ERROR_MESSAGE.to_string(),
        }
    }

    pub fn code_str(&self) -> &'static str {
        match self {
            BackendError::Http(_) => "transport",
            BackendError::Status { .. } => "status",
            BackendError::Decode(_) => "decode",
            BackendError::InvalidUrl(_) => "invalid_url",
        }
    }
}

fn detail_suffix(detail: &Option<String>) -> String {
    detail
        .as_deref()
        .map(|d| format!(": {}", d))
        .unwrap_or_default()
}

fn extract_detail(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    value
        .get("detail")
        .and_then(|v| v.as_str())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Config serialization error: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}
