//! Cached auth state invalidation. After a verification settles, previously
//! fetched identity data is stale and the host must refetch it before any
//! redirect lands on a page that reads it.

use async_trait::async_trait;

#[async_trait]
pub trait AuthStoreInvalidator: Send + Sync {
    /// Marks cached identity/session data stale so the host refetches it.
    async fn invalidate(&self);
}

/// Null capability for hosts without a cached auth store.
#[derive(Clone, Debug)]
pub struct NoopInvalidator;

#[async_trait]
impl AuthStoreInvalidator for NoopInvalidator {
    async fn invalidate(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn noop_invalidator_resolves() {
        let invalidator = NoopInvalidator;
        invalidator.invalidate().await;
    }
}
