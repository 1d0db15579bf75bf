//! Provider contracts for verification. A deployment configures exactly one
//! of the two: the modern contract reports a structured outcome, the legacy
//! contract answers with a redirect instruction and signals failure only by
//! rejecting.

pub mod http;

use crate::errors::{ErrorInfo, VerifyError};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Structured result of a modern verification call.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationOutcome {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redirect_to: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorInfo>,
}

impl VerificationOutcome {
    /// Successful outcome with no provider-driven redirect.
    pub fn success() -> Self {
        Self {
            success: true,
            redirect_to: None,
            error: None,
        }
    }

    /// Successful outcome redirecting to the given path.
    pub fn success_with_redirect(redirect_to: impl Into<String>) -> Self {
        Self {
            success: true,
            redirect_to: Some(redirect_to.into()),
            error: None,
        }
    }

    /// Failed outcome carrying the provider error detail.
    pub fn failure(error: ErrorInfo) -> Self {
        Self {
            success: false,
            redirect_to: None,
            error: Some(error),
        }
    }
}

/// Redirect instruction returned by legacy verify providers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LegacyRedirect {
    /// Navigate to the given path.
    To(String),
    /// Navigate to the application root.
    Root,
    /// Stay on the current page.
    None,
}

#[async_trait]
pub trait AuthProvider<V>: Send + Sync
where
    V: Send + 'static,
{
    async fn verify(&self, variables: V) -> Result<VerificationOutcome, VerifyError>;
}

#[async_trait]
pub trait LegacyAuthProvider<V>: Send + Sync
where
    V: Send + 'static,
{
    async fn verify(&self, variables: V) -> Result<LegacyRedirect, VerifyError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_wire_form() {
        let json = r#"{"success":false,"error":{"name":"E1","message":"bad code"}}"#;
        let outcome: VerificationOutcome =
            serde_json::from_str(json).expect("Failed to deserialize");
        assert!(!outcome.success);
        assert_eq!(outcome.redirect_to, None);
        assert_eq!(
            outcome.error,
            Some(ErrorInfo {
                name: Some("E1".to_string()),
                message: Some("bad code".to_string()),
            })
        );

        let success = VerificationOutcome::success_with_redirect("/next");
        let json = serde_json::to_string(&success).expect("Failed to serialize");
        assert!(json.contains("/next"));
        assert!(!json.contains("error"));
    }
}
