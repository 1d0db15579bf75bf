//! Mutation execution. The flow prepares a verification continuation and
//! hands it to the runner; the runner's own policy governs scheduling and
//! any de-duplication or cancellation across overlapping calls.

use crate::flow::keys::MutationKey;
use futures::future::BoxFuture;
use tokio::sync::oneshot;
use tracing::debug;

/// A prepared verification continuation, executed exactly once.
pub type MutationFuture = BoxFuture<'static, ()>;

pub trait MutationRunner: Send + Sync {
    fn run(&self, key: MutationKey, operation: MutationFuture) -> MutationHandle;
}

/// Lets callers await settlement of a fire-and-forget mutation. Dropping the
/// handle does not cancel the mutation.
#[derive(Debug)]
pub struct MutationHandle {
    settled: oneshot::Receiver<()>,
}

impl MutationHandle {
    pub fn new(settled: oneshot::Receiver<()>) -> Self {
        Self { settled }
    }

    /// Resolves once the mutation and its completion handling finish.
    pub async fn settled(self) {
        let _ = self.settled.await;
    }
}

/// Default runner: spawns the continuation onto the tokio runtime. Must be
/// used from within a running runtime.
#[derive(Clone, Debug, Default)]
pub struct TokioMutationRunner;

impl MutationRunner for TokioMutationRunner {
    fn run(&self, key: MutationKey, operation: MutationFuture) -> MutationHandle {
        let (sender, receiver) = oneshot::channel();
        debug!(key = %key, "running verify mutation");
        tokio::spawn(async move {
            operation.await;
            let _ = sender.send(());
        });
        MutationHandle::new(receiver)
    }
}
