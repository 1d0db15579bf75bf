//! HTTP binding to a remote verification provider. Centralizes the endpoint,
//! headers, timeout policy, and error mapping so host code does not
//! duplicate request setup. Verification payloads may carry codes or tokens
//! and are never logged.

use crate::errors::VerifyError;
use crate::provider::{AuthProvider, VerificationOutcome};
use crate::APP_USER_AGENT;
use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::Serialize;
use std::env;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Default request timeout applied to provider calls.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
/// Maximum number of error body characters surfaced to callers.
const MAX_ERROR_CHARS: usize = 200;

/// Environment variable naming the provider base URL.
pub const ENV_BASE_URL: &str = "KONFIRMI_API_BASE_URL";
/// Environment variable overriding the verify path.
pub const ENV_VERIFY_PATH: &str = "KONFIRMI_VERIFY_PATH";
/// Environment variable carrying the optional admission token header value.
pub const ENV_ADMISSION_TOKEN: &str = "KONFIRMI_ADMISSION_TOKEN";

const DEFAULT_VERIFY_PATH: &str = "/v1/auth/verify";
const ADMISSION_HEADER: &str = "X-Konfirmi-Admission-Token";

/// Connection settings for the HTTP provider binding. Values are public
/// endpoints and header material; do not store secrets beyond the admission
/// token the server already issued.
#[derive(Clone, Debug)]
pub struct HttpProviderConfig {
    pub base_url: String,
    pub verify_path: String,
    pub admission_token: Option<String>,
    pub timeout: Duration,
}

impl HttpProviderConfig {
    /// Config for the given base URL with the default path and timeout.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            verify_path: DEFAULT_VERIFY_PATH.to_string(),
            admission_token: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Loads the config from environment variables. Values are trimmed and
    /// empty counts as unset; a missing base URL is a config error.
    pub fn from_env() -> Result<Self, VerifyError> {
        let base_url = read_env(ENV_BASE_URL).ok_or_else(|| {
            VerifyError::Config("Verify endpoint base URL is not configured.".to_string())
        })?;

        Ok(Self {
            base_url,
            verify_path: read_env(ENV_VERIFY_PATH)
                .unwrap_or_else(|| DEFAULT_VERIFY_PATH.to_string()),
            admission_token: read_env(ENV_ADMISSION_TOKEN),
            timeout: DEFAULT_TIMEOUT,
        })
    }

    /// Joins the base URL and verify path into the endpoint URL.
    fn endpoint(&self) -> Result<Url, VerifyError> {
        let base = self.base_url.trim().trim_end_matches('/');
        let path = self.verify_path.trim();
        let joined = format!("{}/{}", base, path.trim_start_matches('/'));
        Url::parse(&joined)
            .map_err(|err| VerifyError::Config(format!("Invalid verify endpoint: {err}")))
    }
}

fn read_env(name: &str) -> Option<String> {
    env::var(name).ok().and_then(|value| normalize_env_value(&value))
}

fn normalize_env_value(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Modern provider contract over HTTP: posts the serialized variables to the
/// verify endpoint and decodes a `VerificationOutcome`. A `204 No Content`
/// answer counts as a plain success.
#[derive(Clone, Debug)]
pub struct HttpVerifyProvider {
    client: Client,
    config: HttpProviderConfig,
}

impl HttpVerifyProvider {
    pub fn new(config: HttpProviderConfig) -> Result<Self, VerifyError> {
        let client = Client::builder()
            .user_agent(APP_USER_AGENT)
            .timeout(config.timeout)
            .build()
            .map_err(|err| VerifyError::Config(format!("Failed to build HTTP client: {err}")))?;
        Ok(Self { client, config })
    }

    pub fn from_env() -> Result<Self, VerifyError> {
        Self::new(HttpProviderConfig::from_env()?)
    }
}

#[async_trait]
impl<V> AuthProvider<V> for HttpVerifyProvider
where
    V: Serialize + Send + 'static,
{
    async fn verify(&self, variables: V) -> Result<VerificationOutcome, VerifyError> {
        let endpoint = self.config.endpoint()?;
        let mut request = self.client.post(endpoint.clone()).json(&variables);
        if let Some(token) = &self.config.admission_token {
            request = request.header(ADMISSION_HEADER, token);
        }

        debug!(endpoint = %endpoint, "posting verification request");
        let response = request.send().await.map_err(map_request_error)?;
        handle_outcome_response(response).await
    }
}

/// Maps transport failures into `VerifyError` variants with timeout detection.
fn map_request_error(err: reqwest::Error) -> VerifyError {
    if err.is_timeout() {
        VerifyError::Timeout("Request timed out. Please try again.".to_string())
    } else {
        VerifyError::Network(format!("Unable to reach the server: {err}"))
    }
}

/// Decodes the outcome wire form and surfaces HTTP errors with sanitized bodies.
async fn handle_outcome_response(response: Response) -> Result<VerificationOutcome, VerifyError> {
    let status = response.status();
    if status.is_success() {
        if status == StatusCode::NO_CONTENT {
            return Ok(VerificationOutcome::success());
        }
        response
            .json::<VerificationOutcome>()
            .await
            .map_err(|err| VerifyError::Parse(format!("Failed to decode response: {err}")))
    } else {
        let body = response.text().await.unwrap_or_default();
        Err(VerifyError::Http {
            status: status.as_u16(),
            message: sanitize_body(body),
        })
    }
}

/// Sanitizes HTTP error bodies for user-facing messages by trimming and truncating.
fn sanitize_body(body: String) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        "Request failed.".to_string()
    } else {
        trimmed.chars().take(MAX_ERROR_CHARS).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_from_env_requires_base_url() {
        temp_env::with_vars(
            [
                (ENV_BASE_URL, None::<&str>),
                (ENV_VERIFY_PATH, None),
                (ENV_ADMISSION_TOKEN, None),
            ],
            || {
                let error = HttpProviderConfig::from_env().expect_err("base URL must be required");
                assert!(matches!(error, VerifyError::Config(_)));
            },
        );
    }

    #[test]
    fn config_from_env_trims_and_defaults() {
        temp_env::with_vars(
            [
                (ENV_BASE_URL, Some("  https://api.konfirmi.dev ")),
                (ENV_VERIFY_PATH, Some("   ")),
                (ENV_ADMISSION_TOKEN, Some("zero-token")),
            ],
            || {
                let config = HttpProviderConfig::from_env().expect("config should load");
                assert_eq!(config.base_url, "https://api.konfirmi.dev");
                assert_eq!(config.verify_path, "/v1/auth/verify");
                assert_eq!(config.admission_token, Some("zero-token".to_string()));
                assert_eq!(config.timeout, Duration::from_secs(10));
            },
        );
    }

    #[test]
    fn endpoint_joins_base_and_path() {
        let mut config = HttpProviderConfig::new("https://api.konfirmi.dev/");
        config.verify_path = "v1/auth/verify".to_string();
        let endpoint = config.endpoint().expect("endpoint should parse");
        assert_eq!(endpoint.as_str(), "https://api.konfirmi.dev/v1/auth/verify");
    }

    #[test]
    fn endpoint_rejects_invalid_base() {
        let config = HttpProviderConfig::new("not a url");
        assert!(matches!(
            config.endpoint(),
            Err(VerifyError::Config(_))
        ));
    }

    #[test]
    fn sanitize_body_trims_and_truncates() {
        assert_eq!(sanitize_body("   ".to_string()), "Request failed.");
        assert_eq!(sanitize_body(" oops \n".to_string()), "oops");

        let long = "x".repeat(MAX_ERROR_CHARS + 50);
        assert_eq!(sanitize_body(long).len(), MAX_ERROR_CHARS);
    }
}
