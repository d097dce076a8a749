//! Resolution Orchestrator: one deterministic action per query.
//!
//! Composes the record lookup, the authority interpreter, the registry
//! fallback and the search fallback into a single decision. The state
//! machine is LOOKUP_ZONE → INTERPRET → (REGISTRY_FALLBACK |
//! SEARCH_FALLBACK) → DONE; the registry path and the
//! zone-present-but-inert path are mutually exclusive.
//!
//! This is the only boundary that turns internal failures into a final
//! [`Action`]: backend failures degrade to the search fallback before a
//! hard error surfaces, except when the degrade itself fails for lack of a
//! search preference.

use std::sync::Arc;

use tokio::time::timeout;
use tracing::{debug, info, warn};

use crate::cache::ActionCache;
use crate::config::ResolverConfig;
use crate::error::ResolveError;
use crate::interpreter;
use crate::registry::{self, RegistryClient};
use crate::search;
use crate::zone::{LookupOutcome, RecordLookup, Zone};

/// Which informational page a registry state maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InfoKind {
    Transfer,
    Bid,
}

/// The pipeline's only output type. Exactly one is produced per query.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Redirect to a resolved target (A record or TXT directive).
    Redirect(String),
    /// Informational page about the name's ownership state.
    InfoPage { kind: InfoKind, subject: String },
    /// Redirect to the explorer entry for the (still sigiled) subject.
    ExplorerRedirect(String),
    /// Redirect to the caller's chosen search engine.
    SearchRedirect(String),
    /// JSON echo of a zone that resolved but is explicitly empty.
    RawZone(Zone),
    /// Terminal failure. Only produced when every fallback stage failed too.
    Error(ResolveError),
}

impl Action {
    /// Whether this action depends only on backend state. Preference-derived
    /// outcomes are keyed by more than the query and must not be cached.
    /// Actions born from a backend failure rather than a backend answer are
    /// excluded separately, at the call site that knows the difference.
    fn cacheable(&self) -> bool {
        !matches!(self, Action::SearchRedirect(_) | Action::Error(_))
    }
}

/// The resolution pipeline.
///
/// Holds no per-query state; decision logic is pure given its inputs, so a
/// single instance can serve any number of parallel workers. The only
/// shared mutable state is the optional action cache.
pub struct Resolver {
    lookup: Arc<dyn RecordLookup>,
    registry: Arc<dyn RegistryClient>,
    config: ResolverConfig,
    cache: Option<ActionCache>,
}

impl Resolver {
    /// Create a resolver over the two backend collaborators.
    pub fn new(
        lookup: Arc<dyn RecordLookup>,
        registry: Arc<dyn RegistryClient>,
        config: ResolverConfig,
    ) -> Self {
        let cache = config
            .enable_cache
            .then(|| ActionCache::new(config.cache_size, config.cache_ttl));
        Self {
            lookup,
            registry,
            config,
            cache,
        }
    }

    /// Resolve a query into exactly one action.
    ///
    /// `preference` is the caller's search template, supplied out-of-band
    /// (for the proxy, a session cookie); it is only consulted by the
    /// search-fallback stage.
    pub async fn resolve(&self, query: &str, preference: Option<&str>) -> Action {
        if let Some(cache) = &self.cache {
            if let Some(action) = cache.get(query).await {
                debug!(space = %query, "action served from cache");
                return action;
            }
        }

        let (action, settled) = self.resolve_uncached(query, preference).await;

        if let Some(cache) = &self.cache {
            if settled && action.cacheable() {
                cache.put(query, action.clone()).await;
            }
        }
        action
    }

    /// Snapshot of the action-cache counters, if caching is enabled.
    pub async fn cache_metrics(&self) -> Option<crate::cache::CacheMetrics> {
        match &self.cache {
            Some(cache) => Some(cache.metrics().await),
            None => None,
        }
    }

    /// Run the pipeline. The second element is false when the action was
    /// born from a backend failure rather than a backend answer; such
    /// actions must not outlive the failure in the cache.
    async fn resolve_uncached(&self, query: &str, preference: Option<&str>) -> (Action, bool) {
        // LOOKUP_ZONE
        let outcome = match timeout(self.config.lookup_timeout, self.lookup.lookup(query)).await {
            Ok(Ok(outcome)) => outcome,
            Ok(Err(err)) => return (self.degrade_to_search(query, preference, err), false),
            Err(_) => {
                let err = ResolveError::BackendUnavailable(format!(
                    "record lookup timed out after {:?}",
                    self.config.lookup_timeout
                ));
                return (self.degrade_to_search(query, preference, err), false);
            }
        };

        match outcome {
            // A missing zone is distinct from a zone with no directives;
            // only this branch ever consults the registry.
            LookupOutcome::NotFound => {
                info!(space = %query, "no zone found, consulting registry");
                self.registry_fallback(query).await
            }
            LookupOutcome::Zone(zone) => {
                // INTERPRET
                if let Some(target) = interpreter::interpret(&zone) {
                    info!(space = %query, target = %target, "redirecting");
                    return (Action::Redirect(target), true);
                }
                if zone.authorities.is_empty() {
                    debug!(space = %query, "zone present but explicitly empty, echoing it");
                    return (Action::RawZone(zone), true);
                }
                // SEARCH_FALLBACK
                info!(space = %query, "zone carries no actionable directive, falling back to search");
                (self.search_fallback(query, preference), true)
            }
        }
    }

    /// REGISTRY_FALLBACK: one registry call, terminal whichever branch fires.
    /// An explorer redirect that only stands in for a failed consultation is
    /// flagged unsettled so a transient outage is retried on the next query
    /// instead of being pinned for the cache TTL.
    async fn registry_fallback(&self, query: &str) -> (Action, bool) {
        let state = match timeout(
            self.config.registry_timeout,
            self.registry.get_state(query),
        )
        .await
        {
            Ok(state) => state,
            Err(_) => Err(ResolveError::BackendUnavailable(format!(
                "registry lookup timed out after {:?}",
                self.config.registry_timeout
            ))),
        };
        let settled = state.is_ok();
        (registry::fallback_action(query, state), settled)
    }

    /// SEARCH_FALLBACK: terminal; a missing preference surfaces as an error.
    fn search_fallback(&self, query: &str, preference: Option<&str>) -> Action {
        match search::build_search_redirect(query, preference) {
            Ok(url) => {
                info!(space = %query, url = %url, "redirecting to web search");
                Action::SearchRedirect(url)
            }
            Err(err) => Action::Error(err),
        }
    }

    /// Convert a pipeline failure into a search-fallback attempt before
    /// surfacing a hard error. When the degrade fails for lack of a
    /// preference, that condition is what surfaces, so the caller knows to
    /// re-prompt.
    fn degrade_to_search(
        &self,
        query: &str,
        preference: Option<&str>,
        err: ResolveError,
    ) -> Action {
        warn!(space = %query, error = %err, "record lookup failed, degrading to web search");
        self.search_fallback(query, preference)
    }
}
