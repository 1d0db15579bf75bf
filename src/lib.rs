//! # Konfirmi (verification flow controller)
//!
//! `konfirmi` coordinates the client side of an authentication verification
//! step: it fires the verify request against a provider, surfaces the
//! outcome as a notification, invalidates cached auth state, and redirects
//! based on the provider response or a `to` URL parameter.
//!
//! ## Collaborators
//!
//! The host application injects every capability the flow touches: a
//! [`Navigator`] for the active routing dialect, a [`Notifier`] (or
//! [`NoopNotifier`] when the host renders nothing), an
//! [`AuthStoreInvalidator`] for its data cache, a [`RouteSnapshotProvider`]
//! for the current URL state, and a [`MutationRunner`] that owns scheduling
//! across overlapping calls. The flow itself performs no I/O.
//!
//! ## Providers
//!
//! Exactly one provider contract is configured per deployment:
//!
//! - **Modern** ([`AuthProvider`]): resolves a structured
//!   [`VerificationOutcome`] with `success`, an optional `redirect_to`, and
//!   an optional error detail.
//! - **Legacy** ([`LegacyAuthProvider`]): resolves a [`LegacyRedirect`]
//!   instruction and signals failure only by rejecting.
//!
//! [`HttpVerifyProvider`](provider::http::HttpVerifyProvider) is a
//! ready-made modern binding over HTTP for hosts that talk to a remote
//! verify endpoint.
//!
//! ## Ordering
//!
//! Within one invocation: notification handling first, then auth store
//! invalidation (awaited), then the redirect decision. Failures are
//! terminal at the flow boundary; nothing is re-thrown to the caller.

pub mod errors;
pub mod flow;
pub mod notify;
pub mod provider;
pub mod router;
pub mod runner;
pub mod store;

pub use errors::{ErrorInfo, VerifyError};
pub use flow::{
    keys::MutationKey, VerificationFlow, VerificationFlowBuilder, VerifyCallbacks, VerifyOutcome,
};
pub use notify::{
    verify_error_notification, NoopNotifier, Notification, NotificationKind, Notifier,
    VERIFY_ERROR_KEY,
};
pub use provider::{AuthProvider, LegacyAuthProvider, LegacyRedirect, VerificationOutcome};
pub use router::{
    GoOperation, NavigationKind, Navigator, RouteSnapshot, RouteSnapshotProvider, RouterKind,
    StaticRouteProvider,
};
pub use runner::{MutationFuture, MutationHandle, MutationRunner, TokioMutationRunner};
pub use store::{AuthStoreInvalidator, NoopInvalidator};

pub const APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_user_agent_format() {
        assert!(APP_USER_AGENT.starts_with(env!("CARGO_PKG_NAME")));
        assert!(APP_USER_AGENT.contains(env!("CARGO_PKG_VERSION")));
    }
}
