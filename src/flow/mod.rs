//! The verification flow controller. `VerificationFlow` wires the injected
//! collaborators around one provider binding: `verify()` fires the request
//! and returns immediately; the settled result drives notifications, auth
//! store invalidation, and the redirect, in that order.

pub mod keys;
pub mod redirect;

mod backend;

pub use backend::{ErrorHook, SuccessHook, VerifyCallbacks, VerifyOutcome};

use crate::errors::VerifyError;
use crate::notify::{NoopNotifier, Notifier};
use crate::provider::{AuthProvider, LegacyAuthProvider};
use crate::router::{Navigator, RouteSnapshotProvider, RouterKind, StaticRouteProvider};
use crate::runner::{MutationHandle, MutationRunner, TokioMutationRunner};
use crate::store::{AuthStoreInvalidator, NoopInvalidator};
use backend::{FlowEffects, ProviderBinding};
use keys::MutationKey;
use redirect::RedirectResolver;
use std::sync::Arc;

/// Client-side verification flow controller.
///
/// Generic over the caller-defined verification payload `V` (a code, a
/// token, whatever the provider expects). All completion behavior runs
/// through the injected collaborators; the controller performs no I/O of
/// its own.
pub struct VerificationFlow<V>
where
    V: Send + 'static,
{
    binding: ProviderBinding<V>,
    router: RouterKind,
    navigator: Arc<dyn Navigator>,
    notifier: Arc<dyn Notifier>,
    invalidator: Arc<dyn AuthStoreInvalidator>,
    routes: Arc<dyn RouteSnapshotProvider>,
    runner: Arc<dyn MutationRunner>,
    resolver: RedirectResolver,
    callbacks: VerifyCallbacks,
    prefer_legacy_keys: bool,
}

impl<V> VerificationFlow<V>
where
    V: Send + 'static,
{
    pub fn builder() -> VerificationFlowBuilder<V> {
        VerificationFlowBuilder::new()
    }

    /// Fires the verification request. Completion is observed through the
    /// injected collaborators, never through a return value; the handle only
    /// lets callers await settlement.
    pub fn verify(&self, variables: V) -> MutationHandle {
        let snapshot = self.routes.snapshot();
        let to = self.resolver.resolve(self.router, &snapshot);
        let effects = FlowEffects {
            router: self.router,
            navigator: Arc::clone(&self.navigator),
            notifier: Arc::clone(&self.notifier),
            invalidator: Arc::clone(&self.invalidator),
        };
        let operation = self
            .binding
            .run_verification(variables, to, effects, self.callbacks.clone());
        self.runner.run(self.mutation_key(), operation)
    }

    /// Identity key for this flow's verify mutation.
    pub fn mutation_key(&self) -> MutationKey {
        let key = MutationKey::verify(self.prefer_legacy_keys);
        if self.binding.is_legacy() {
            key.legacy_scoped()
        } else {
            key
        }
    }
}

/// Builder wiring the collaborators. A provider and a navigator are
/// required; the notifier, invalidator, route source, and runner default to
/// their null or tokio implementations.
pub struct VerificationFlowBuilder<V>
where
    V: Send + 'static,
{
    modern: Option<Arc<dyn AuthProvider<V>>>,
    legacy: Option<Arc<dyn LegacyAuthProvider<V>>>,
    router: RouterKind,
    navigator: Option<Arc<dyn Navigator>>,
    notifier: Arc<dyn Notifier>,
    invalidator: Arc<dyn AuthStoreInvalidator>,
    routes: Option<Arc<dyn RouteSnapshotProvider>>,
    runner: Arc<dyn MutationRunner>,
    callbacks: VerifyCallbacks,
    prefer_legacy_keys: bool,
}

impl<V> VerificationFlowBuilder<V>
where
    V: Send + 'static,
{
    fn new() -> Self {
        Self {
            modern: None,
            legacy: None,
            router: RouterKind::Modern,
            navigator: None,
            notifier: Arc::new(NoopNotifier),
            invalidator: Arc::new(NoopInvalidator),
            routes: None,
            runner: Arc::new(TokioMutationRunner),
            callbacks: VerifyCallbacks::default(),
            prefer_legacy_keys: false,
        }
    }

    pub fn provider(mut self, provider: Arc<dyn AuthProvider<V>>) -> Self {
        self.modern = Some(provider);
        self
    }

    pub fn legacy_provider(mut self, provider: Arc<dyn LegacyAuthProvider<V>>) -> Self {
        self.legacy = Some(provider);
        self
    }

    pub fn router(mut self, router: RouterKind) -> Self {
        self.router = router;
        self
    }

    pub fn navigator(mut self, navigator: Arc<dyn Navigator>) -> Self {
        self.navigator = Some(navigator);
        self
    }

    pub fn notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    pub fn invalidator(mut self, invalidator: Arc<dyn AuthStoreInvalidator>) -> Self {
        self.invalidator = invalidator;
        self
    }

    pub fn routes(mut self, routes: Arc<dyn RouteSnapshotProvider>) -> Self {
        self.routes = Some(routes);
        self
    }

    pub fn runner(mut self, runner: Arc<dyn MutationRunner>) -> Self {
        self.runner = runner;
        self
    }

    /// Replaces the built-in completion handling for settled results.
    pub fn on_success(mut self, hook: impl Fn(VerifyOutcome) + Send + Sync + 'static) -> Self {
        self.callbacks.on_success = Some(Arc::new(hook));
        self
    }

    /// Replaces the built-in notification on provider rejection.
    pub fn on_error(mut self, hook: impl Fn(VerifyError) + Send + Sync + 'static) -> Self {
        self.callbacks.on_error = Some(Arc::new(hook));
        self
    }

    pub fn prefer_legacy_keys(mut self, prefer: bool) -> Self {
        self.prefer_legacy_keys = prefer;
        self
    }

    /// Selects the provider binding and wires the flow. A configured legacy
    /// provider takes the legacy path even when a modern one is present.
    pub fn build(self) -> Result<VerificationFlow<V>, VerifyError> {
        let binding = match (self.legacy, self.modern) {
            (Some(legacy), _) => ProviderBinding::Legacy(legacy),
            (None, Some(modern)) => ProviderBinding::Modern(modern),
            (None, None) => {
                return Err(VerifyError::Config(
                    "No verify provider is configured.".to_string(),
                ))
            }
        };
        let navigator = self.navigator.ok_or_else(|| {
            VerifyError::Config("No navigator is configured.".to_string())
        })?;
        let routes = self
            .routes
            .unwrap_or_else(|| Arc::new(StaticRouteProvider::default()));

        Ok(VerificationFlow {
            binding,
            router: self.router,
            navigator,
            notifier: self.notifier,
            invalidator: self.invalidator,
            routes,
            runner: self.runner,
            resolver: RedirectResolver::new(),
            callbacks: self.callbacks,
            prefer_legacy_keys: self.prefer_legacy_keys,
        })
    }
}
