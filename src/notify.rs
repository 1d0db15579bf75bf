//! Notification surface for verification outcomes. The flow reports
//! user-visible state only through this channel; hosts without a
//! notification system plug in the no-op implementation instead of the flow
//! checking for presence at runtime.

use crate::errors::ErrorInfo;
use serde::{Deserialize, Serialize};

/// Notification key shared by the open and close calls of the verify flow.
pub const VERIFY_ERROR_KEY: &str = "verify-error";

const FALLBACK_MESSAGE: &str = "Verify Error";
const FALLBACK_DESCRIPTION: &str = "Error while verifying";

/// Supported notification styles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Error,
    Success,
    Info,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub message: String,
    pub description: String,
    pub key: String,
    pub kind: NotificationKind,
}

pub trait Notifier: Send + Sync {
    fn open(&self, notification: Notification);
    fn close(&self, key: &str);
}

#[derive(Clone, Debug)]
pub struct NoopNotifier;

impl Notifier for NoopNotifier {
    fn open(&self, _notification: Notification) {}

    fn close(&self, _key: &str) {}
}

/// Builds the error notification shown when verification fails. Blank error
/// fields fall back to the generic title and description.
pub fn verify_error_notification(error: Option<&ErrorInfo>) -> Notification {
    Notification {
        message: non_blank(error.and_then(|info| info.name.as_deref()))
            .unwrap_or_else(|| FALLBACK_MESSAGE.to_string()),
        description: non_blank(error.and_then(|info| info.message.as_deref()))
            .unwrap_or_else(|| FALLBACK_DESCRIPTION.to_string()),
        key: VERIFY_ERROR_KEY.to_string(),
        kind: NotificationKind::Error,
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_uses_error_fields() {
        let info = ErrorInfo {
            name: Some("E1".to_string()),
            message: Some("bad code".to_string()),
        };
        let notification = verify_error_notification(Some(&info));
        assert_eq!(
            notification,
            Notification {
                message: "E1".to_string(),
                description: "bad code".to_string(),
                key: VERIFY_ERROR_KEY.to_string(),
                kind: NotificationKind::Error,
            }
        );
    }

    #[test]
    fn builder_falls_back_when_absent() {
        let notification = verify_error_notification(None);
        assert_eq!(notification.message, "Verify Error");
        assert_eq!(notification.description, "Error while verifying");
        assert_eq!(notification.key, VERIFY_ERROR_KEY);
    }

    #[test]
    fn builder_falls_back_on_blank_fields() {
        let info = ErrorInfo {
            name: Some("  ".to_string()),
            message: Some(String::new()),
        };
        let notification = verify_error_notification(Some(&info));
        assert_eq!(notification.message, "Verify Error");
        assert_eq!(notification.description, "Error while verifying");
    }

    #[test]
    fn noop_notifier_accepts_calls() {
        let notifier = NoopNotifier;
        notifier.open(verify_error_notification(None));
        notifier.close(VERIFY_ERROR_KEY);
    }
}
