//! Redirect-target resolution. The `to` override comes from the URL: parsed
//! route params under the modern dialect, the raw query string under the
//! legacy one. Resolution is cached on its inputs and recomputed only when
//! they change.

use crate::router::{RouteSnapshot, RouterKind};
use std::collections::BTreeMap;
use std::sync::Mutex;
use url::form_urlencoded;

/// URL field carrying the override redirect destination.
const REDIRECT_PARAM: &str = "to";

#[derive(Clone, Debug, PartialEq, Eq)]
struct ResolverInputs {
    router: RouterKind,
    params: BTreeMap<String, String>,
    raw_query: String,
}

#[derive(Debug, Default)]
pub struct RedirectResolver {
    cached: Mutex<Option<(ResolverInputs, Option<String>)>>,
}

impl RedirectResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the `to` target for the current route state.
    pub fn resolve(&self, router: RouterKind, snapshot: &RouteSnapshot) -> Option<String> {
        let inputs = ResolverInputs {
            router,
            params: snapshot.params.clone(),
            raw_query: snapshot.raw_query.clone(),
        };

        let mut cached = match self.cached.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        if let Some((cached_inputs, target)) = cached.as_ref() {
            if *cached_inputs == inputs {
                return target.clone();
            }
        }

        let target = compute(&inputs);
        *cached = Some((inputs, target.clone()));
        target
    }
}

fn compute(inputs: &ResolverInputs) -> Option<String> {
    match inputs.router {
        RouterKind::Legacy => parse_query_param(&inputs.raw_query, REDIRECT_PARAM),
        RouterKind::Modern => inputs
            .params
            .get(REDIRECT_PARAM)
            .filter(|value| !value.is_empty())
            .cloned(),
    }
}

/// Reads a single field from a raw query string, ignoring a leading `?`.
/// Blank values count as absent.
fn parse_query_param(raw_query: &str, name: &str) -> Option<String> {
    let trimmed = raw_query.trim_start_matches('?');
    if trimmed.is_empty() {
        return None;
    }

    for (key, value) in form_urlencoded::parse(trimmed.as_bytes()) {
        if key == name && !value.is_empty() {
            return Some(value.into_owned());
        }
    }
    None
}
