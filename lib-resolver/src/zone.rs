//! Decoded zone data model and the record-lookup collaborator contract.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::ResolveResult;

/// Leading sigil marking a space reference (`@example`).
pub const SPACE_SIGIL: char = '@';

/// Strip one leading sigil from a query, if present.
///
/// The sigiled form is preserved for record lookups; the stripped form is
/// used as a search term or as a path component in explorer URLs.
pub fn strip_sigil(query: &str) -> &str {
    query.strip_prefix(SPACE_SIGIL).unwrap_or(query)
}

/// One decoded TXT entry.
///
/// Only text entries can carry directives. Anything else the decoder hands
/// us stays representable for the JSON echo but is never acted on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TxtEntry {
    Text(String),
    Other(serde_json::Value),
}

/// One authority record of a decoded zone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum AuthorityRecord {
    /// Address record pointing at a host or IP.
    A {
        name: String,
        #[serde(rename = "data")]
        address: String,
    },
    /// Text record with ordered entries.
    #[serde(rename = "TXT")]
    Txt {
        name: String,
        #[serde(rename = "data")]
        entries: Vec<TxtEntry>,
    },
}

/// The decoded result of a record lookup for one query.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Zone {
    /// Authority records in priority order. Earlier wins.
    #[serde(default)]
    pub authorities: Vec<AuthorityRecord>,
}

/// Outcome of a record lookup: a zone (possibly empty) or no zone at all.
///
/// `NotFound` is distinct from a present-but-empty zone; the two route to
/// different fallbacks and are never both consulted for one query.
#[derive(Debug, Clone, PartialEq)]
pub enum LookupOutcome {
    Zone(Zone),
    NotFound,
}

/// Record-decoder collaborator: resolves a space name into a decoded zone.
///
/// Implementations own transport and wire-format concerns; the pipeline
/// consumes the already-decoded structure.
#[async_trait]
pub trait RecordLookup: Send + Sync {
    async fn lookup(&self, name: &str) -> ResolveResult<LookupOutcome>;
}
