//! Error taxonomy for verification provider calls. Failures are terminal at
//! the flow boundary; they surface through the notification channel and are
//! never re-thrown to the caller.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Name and message carried by structured provider errors.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum VerifyError {
    Config(String),
    Network(String),
    Timeout(String),
    Http { status: u16, message: String },
    Parse(String),
    Serialization(String),
    Provider(ErrorInfo),
}

impl VerifyError {
    /// Short label for this error, used as the notification title.
    pub fn name(&self) -> &str {
        match self {
            VerifyError::Config(_) => "Config error",
            VerifyError::Network(_) => "Network error",
            VerifyError::Timeout(_) => "Timeout",
            VerifyError::Http { .. } => "Request failed",
            VerifyError::Parse(_) => "Response error",
            VerifyError::Serialization(_) => "Request error",
            VerifyError::Provider(info) => info.name.as_deref().unwrap_or("Verify Error"),
        }
    }

    /// Converts into the name/message pair carried by provider outcomes.
    pub fn to_error_info(&self) -> ErrorInfo {
        match self {
            VerifyError::Provider(info) => info.clone(),
            VerifyError::Http { status, message } => ErrorInfo {
                name: Some(self.name().to_string()),
                message: Some(format!("Request failed ({status}): {message}")),
            },
            VerifyError::Config(message)
            | VerifyError::Network(message)
            | VerifyError::Timeout(message)
            | VerifyError::Parse(message)
            | VerifyError::Serialization(message) => ErrorInfo {
                name: Some(self.name().to_string()),
                message: Some(message.clone()),
            },
        }
    }
}

impl fmt::Display for VerifyError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VerifyError::Config(message) => write!(formatter, "Config error: {message}"),
            VerifyError::Network(message) => write!(formatter, "Network error: {message}"),
            VerifyError::Timeout(message) => write!(formatter, "Timeout: {message}"),
            VerifyError::Http { status, message } => {
                write!(formatter, "Request failed ({status}): {message}")
            }
            VerifyError::Parse(message) => write!(formatter, "Response error: {message}"),
            VerifyError::Serialization(message) => {
                write!(formatter, "Request error: {message}")
            }
            VerifyError::Provider(info) => {
                let name = info.name.as_deref().unwrap_or("Verify Error");
                let message = info.message.as_deref().unwrap_or("Error while verifying");
                write!(formatter, "{name}: {message}")
            }
        }
    }
}

impl std::error::Error for VerifyError {}
