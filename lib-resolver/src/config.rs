//! Resolver configuration.

use std::time::Duration;

/// Tuning for the resolution pipeline.
#[derive(Debug, Clone)]
pub struct ResolverConfig {
    /// Bound on one record-lookup call. A timeout routes like a backend
    /// failure.
    pub lookup_timeout: Duration,
    /// Bound on one registry call.
    pub registry_timeout: Duration,
    /// Enable the per-query action cache.
    pub enable_cache: bool,
    /// Maximum number of cached queries.
    pub cache_size: usize,
    /// How long a cached action stays valid.
    pub cache_ttl: Duration,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            lookup_timeout: Duration::from_secs(10),
            registry_timeout: Duration::from_secs(10),
            enable_cache: true,
            cache_size: 1024,
            cache_ttl: Duration::from_secs(300),
        }
    }
}

impl ResolverConfig {
    /// Config for local development and tests: short timeouts, tiny cache.
    pub fn localhost() -> Self {
        Self {
            lookup_timeout: Duration::from_secs(2),
            registry_timeout: Duration::from_secs(2),
            enable_cache: true,
            cache_size: 16,
            cache_ttl: Duration::from_secs(30),
        }
    }

    /// Run every query through the full pipeline.
    pub fn without_cache(mut self) -> Self {
        self.enable_cache = false;
        self
    }
}
