//! Routing surface consumed by the verification flow. The host supports one
//! of two navigation dialects; the flow must work against either without
//! assuming which is active.

use std::collections::BTreeMap;

/// The navigation dialect the host router speaks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RouterKind {
    Legacy,
    Modern,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavigationKind {
    Push,
    Replace,
}

/// Typed navigation request for the modern dialect.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GoOperation {
    pub to: String,
    pub kind: NavigationKind,
}

pub trait Navigator: Send + Sync {
    /// Direct path replacement, the legacy dialect.
    fn replace(&self, path: &str);

    /// Typed navigation, the modern dialect.
    fn go(&self, operation: GoOperation);
}

/// Route state the redirect resolver reads: parsed params for the modern
/// dialect, the raw query string for the legacy one.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RouteSnapshot {
    pub params: BTreeMap<String, String>,
    pub raw_query: String,
}

impl RouteSnapshot {
    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }

    pub fn with_raw_query(mut self, raw_query: impl Into<String>) -> Self {
        self.raw_query = raw_query.into();
        self
    }
}

pub trait RouteSnapshotProvider: Send + Sync {
    fn snapshot(&self) -> RouteSnapshot;
}

/// Fixed route state, for hosts without live routing and for tests.
#[derive(Clone, Debug, Default)]
pub struct StaticRouteProvider {
    snapshot: RouteSnapshot,
}

impl StaticRouteProvider {
    pub fn new(snapshot: RouteSnapshot) -> Self {
        Self { snapshot }
    }
}

impl RouteSnapshotProvider for StaticRouteProvider {
    fn snapshot(&self) -> RouteSnapshot {
        self.snapshot.clone()
    }
}
