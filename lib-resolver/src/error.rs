//! Structured error types for the resolution pipeline.
//!
//! Inner components never produce partial or ambiguous results: every call
//! returns either a well-formed value or one of these kinds. The
//! orchestrator is the only boundary that turns them into a final
//! [`Action`](crate::Action).

use thiserror::Error;

/// Failures the resolution pipeline can produce.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// Record-lookup or registry transport failure, including timeouts.
    /// Recovered locally by degrading to the next fallback stage; only
    /// surfaced if every fallback stage also fails.
    #[error("backend unavailable: {0}")]
    BackendUnavailable(String),

    /// A record's content failed to decode.
    #[error("malformed record: {0}")]
    MalformedRecord(String),

    /// No search template available when the search fallback needs one.
    /// Surfaced to the caller so the user can be prompted for a preference;
    /// never silently replaced with a hardcoded engine.
    #[error("no search engine preference available")]
    MissingPreference,
}

/// Result type for resolution operations.
pub type ResolveResult<T> = Result<T, ResolveError>;
