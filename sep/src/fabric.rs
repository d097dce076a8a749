//! Record-decoder adapter over the fabric event service.
//!
//! The service resolves a space and decodes its published zone; this client
//! only fetches the latest zone event and consumes the already-decoded JSON
//! structure. Wire-format and trust-anchor concerns live on the service
//! side.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use tracing::debug;

use lib_resolver::{LookupOutcome, RecordLookup, ResolveError, ResolveResult, Zone};

/// Event kind under which a space's DNS zone payload is published.
pub const DNS_EVENT_KIND: u32 = 871_222;

/// HTTP client for the fabric event service.
pub struct FabricClient {
    http: reqwest::Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct EventResponse {
    event: Option<EventEnvelope>,
}

#[derive(Debug, Deserialize)]
struct EventEnvelope {
    content: serde_json::Value,
}

impl FabricClient {
    /// Create a client against `base_url` with a per-request timeout.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build fabric HTTP client")?;
        Ok(Self {
            http,
            base_url: base_url.into(),
        })
    }

    fn event_url(&self, name: &str) -> String {
        format!(
            "{}/events/{}/latest?kind={}",
            self.base_url.trim_end_matches('/'),
            urlencoding::encode(name),
            DNS_EVENT_KIND
        )
    }
}

#[async_trait]
impl RecordLookup for FabricClient {
    async fn lookup(&self, name: &str) -> ResolveResult<LookupOutcome> {
        let url = self.event_url(name);
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| ResolveError::BackendUnavailable(format!("fabric request failed: {e}")))?;

        if response.status() == StatusCode::NOT_FOUND {
            debug!(space = %name, "fabric has no zone for space");
            return Ok(LookupOutcome::NotFound);
        }
        if !response.status().is_success() {
            return Err(ResolveError::BackendUnavailable(format!(
                "fabric returned HTTP {}",
                response.status()
            )));
        }

        let body: EventResponse = response
            .json()
            .await
            .map_err(|e| ResolveError::MalformedRecord(format!("undecodable fabric event: {e}")))?;

        let Some(event) = body.event else {
            debug!(space = %name, "no zone event published for space");
            return Ok(LookupOutcome::NotFound);
        };

        let zone: Zone = serde_json::from_value(event.content)
            .map_err(|e| ResolveError::MalformedRecord(format!("undecodable zone payload: {e}")))?;
        Ok(LookupOutcome::Zone(zone))
    }
}
