//! Space-name resolution pipeline.
//!
//! Resolves a human-readable space name into exactly one HTTP-level action:
//! a redirect to a hosted site or content path, an informational page about
//! the name's ownership state, a fallback web search, or a JSON echo of an
//! empty zone.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────┐     ┌──────────────────┐     ┌──────────────────┐
//! │  Web layer       │────▶│    Resolver      │────▶│  RecordLookup    │
//! │  (sep binary)    │     │  (orchestrator)  │     │  (zone backend)  │
//! └──────────────────┘     └────────┬─────────┘     └──────────────────┘
//!                                   │ no zone
//!                                   ▼
//!                          ┌──────────────────┐
//!                          │  RegistryClient  │
//!                          │  (ownership)     │
//!                          └──────────────────┘
//! ```
//!
//! The decision logic is pure given its inputs; the two backend calls are
//! sequential per query (the registry is only consulted after a
//! zone-lookup miss) and each is bounded by an explicit timeout.
//!
//! # Usage
//!
//! ```ignore
//! let resolver = Resolver::new(lookup, registry, ResolverConfig::default());
//! let action = resolver.resolve("@example", Some("https://duckduckgo.com/?q=%s")).await;
//! ```

pub mod cache;
pub mod config;
pub mod error;
pub mod interpreter;
pub mod orchestrator;
pub mod registry;
pub mod search;
pub mod zone;

pub use cache::{ActionCache, CacheMetrics};
pub use config::ResolverConfig;
pub use error::{ResolveError, ResolveResult};
pub use orchestrator::{Action, InfoKind, Resolver};
pub use registry::{RegistryClient, RegistryState};
pub use zone::{strip_sigil, AuthorityRecord, LookupOutcome, RecordLookup, TxtEntry, Zone};
