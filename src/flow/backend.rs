//! Provider bindings and completion behavior. The binding is selected once
//! at construction; each variant owns the full completion path for its
//! contract. Within one invocation notifications come first, invalidation is
//! awaited next, and only then is the redirect decided.

use crate::errors::VerifyError;
use crate::notify::{verify_error_notification, Notifier, VERIFY_ERROR_KEY};
use crate::provider::{AuthProvider, LegacyAuthProvider, LegacyRedirect, VerificationOutcome};
use crate::router::{GoOperation, NavigationKind, Navigator, RouterKind};
use crate::runner::MutationFuture;
use crate::store::AuthStoreInvalidator;
use std::sync::Arc;
use tracing::{debug, error};

const ROOT_PATH: &str = "/";

/// Side-effecting collaborators shared by the completion paths.
pub(crate) struct FlowEffects {
    pub router: RouterKind,
    pub navigator: Arc<dyn Navigator>,
    pub notifier: Arc<dyn Notifier>,
    pub invalidator: Arc<dyn AuthStoreInvalidator>,
}

/// Settled provider result handed to a caller-supplied success hook.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum VerifyOutcome {
    Modern(VerificationOutcome),
    Legacy(LegacyRedirect),
}

pub type SuccessHook = Arc<dyn Fn(VerifyOutcome) + Send + Sync>;
pub type ErrorHook = Arc<dyn Fn(VerifyError) + Send + Sync>;

/// Caller lifecycle overrides. A configured hook takes precedence over the
/// built-in handler for that event; the other event keeps its built-in.
#[derive(Clone, Default)]
pub struct VerifyCallbacks {
    pub on_success: Option<SuccessHook>,
    pub on_error: Option<ErrorHook>,
}

/// Two-variant binding over the configured provider, resolved once.
pub(crate) enum ProviderBinding<V>
where
    V: Send + 'static,
{
    Modern(Arc<dyn AuthProvider<V>>),
    Legacy(Arc<dyn LegacyAuthProvider<V>>),
}

impl<V> ProviderBinding<V>
where
    V: Send + 'static,
{
    pub(crate) fn is_legacy(&self) -> bool {
        matches!(self, ProviderBinding::Legacy(_))
    }

    /// Builds the continuation executed by the mutation runner. Exactly one
    /// of the success/error paths runs per invocation.
    pub(crate) fn run_verification(
        &self,
        variables: V,
        to: Option<String>,
        effects: FlowEffects,
        callbacks: VerifyCallbacks,
    ) -> MutationFuture {
        match self {
            ProviderBinding::Modern(provider) => {
                let provider = Arc::clone(provider);
                Box::pin(async move {
                    match provider.verify(variables).await {
                        Ok(outcome) => {
                            if let Some(hook) = &callbacks.on_success {
                                hook(VerifyOutcome::Modern(outcome));
                            } else {
                                complete_modern(outcome, to, &effects).await;
                            }
                        }
                        Err(err) => dispatch_error(err, &effects, &callbacks),
                    }
                })
            }
            ProviderBinding::Legacy(provider) => {
                let provider = Arc::clone(provider);
                Box::pin(async move {
                    match provider.verify(variables).await {
                        Ok(result) => {
                            if let Some(hook) = &callbacks.on_success {
                                hook(VerifyOutcome::Legacy(result));
                            } else {
                                complete_legacy(result, to, &effects).await;
                            }
                        }
                        Err(err) => dispatch_error(err, &effects, &callbacks),
                    }
                })
            }
        }
    }
}

/// Completion for the modern contract. Redirect priority: URL `to` on
/// success, then the provider's `redirect_to`, then the root path under the
/// legacy routing dialect only.
async fn complete_modern(outcome: VerificationOutcome, to: Option<String>, effects: &FlowEffects) {
    let VerificationOutcome {
        success,
        redirect_to,
        error,
    } = outcome;

    if success {
        effects.notifier.close(VERIFY_ERROR_KEY);
    }
    if error.is_some() || !success {
        effects.notifier.open(verify_error_notification(error.as_ref()));
    }

    effects.invalidator.invalidate().await;

    if success {
        if let Some(target) = to {
            redirect(effects, &target);
            return;
        }
    }
    if let Some(target) = redirect_to {
        redirect(effects, &target);
    } else if effects.router == RouterKind::Legacy {
        effects.navigator.replace(ROOT_PATH);
    }
}

/// Completion for the legacy contract. The URL `to` override always wins and
/// uses a direct replace; the error banner is closed unconditionally because
/// legacy providers signal failure only by rejecting.
async fn complete_legacy(result: LegacyRedirect, to: Option<String>, effects: &FlowEffects) {
    effects.invalidator.invalidate().await;

    if let Some(target) = &to {
        effects.navigator.replace(target);
    }

    if to.is_none() {
        match result {
            LegacyRedirect::To(path) => redirect(effects, &path),
            LegacyRedirect::Root => redirect(effects, ROOT_PATH),
            LegacyRedirect::None => {}
        }
    }

    effects.notifier.close(VERIFY_ERROR_KEY);
}

/// Provider rejection: surface a notification, skip invalidation and
/// redirect.
fn dispatch_error(err: VerifyError, effects: &FlowEffects, callbacks: &VerifyCallbacks) {
    error!("Verification failed: {err}");
    if let Some(hook) = &callbacks.on_error {
        hook(err);
    } else {
        effects
            .notifier
            .open(verify_error_notification(Some(&err.to_error_info())));
    }
}

/// Navigates with the mechanism of the active routing dialect.
fn redirect(effects: &FlowEffects, target: &str) {
    debug!(target, "redirecting after verification");
    match effects.router {
        RouterKind::Legacy => effects.navigator.replace(target),
        RouterKind::Modern => effects.navigator.go(GoOperation {
            to: target.to_string(),
            kind: NavigationKind::Replace,
        }),
    }
}
