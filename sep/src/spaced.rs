//! JSON-RPC client for the spaced registry.
//!
//! Implements the registry collaborator with a single `getspace` call; the
//! result's covenant type classifies the name's lifecycle state.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use lib_resolver::{RegistryClient, RegistryState, ResolveError, ResolveResult};

/// State reported when the registry answers but has no covenant info.
const STATE_UNKNOWN: &str = "unknown";

/// JSON-RPC client for a spaced node.
pub struct SpacedClient {
    http: reqwest::Client,
    url: String,
}

#[derive(Debug, Deserialize)]
struct RpcResponse {
    result: Option<serde_json::Value>,
    error: Option<RpcError>,
}

#[derive(Debug, Deserialize)]
struct RpcError {
    code: i64,
    message: String,
}

impl SpacedClient {
    /// Create a client against the registry endpoint with a per-request
    /// timeout.
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build spaced HTTP client")?;
        Ok(Self {
            http,
            url: url.into(),
        })
    }
}

/// Map a `getspace` result to the name's lifecycle state.
///
/// A missing result or covenant means the registry has no information;
/// that routes like any other non-transfer, non-bid state but keeps its
/// own label for logging.
fn covenant_state(result: Option<&serde_json::Value>) -> RegistryState {
    let kind = result
        .and_then(|r| r.get("covenant"))
        .and_then(|c| c.get("type"))
        .and_then(|t| t.as_str());

    match kind {
        Some("transfer") => RegistryState::Transfer,
        Some("bid") => RegistryState::Bid,
        Some(other) => RegistryState::Other(other.to_string()),
        None => RegistryState::Other(STATE_UNKNOWN.to_string()),
    }
}

#[async_trait]
impl RegistryClient for SpacedClient {
    async fn get_state(&self, name: &str) -> ResolveResult<RegistryState> {
        let body = json!({
            "jsonrpc": "2.0",
            "id": "1",
            "method": "getspace",
            "params": [name],
        });

        let response = self
            .http
            .post(&self.url)
            .json(&body)
            .send()
            .await
            .map_err(|e| ResolveError::BackendUnavailable(format!("spaced request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(ResolveError::BackendUnavailable(format!(
                "spaced returned HTTP {}",
                response.status()
            )));
        }

        let rpc: RpcResponse = response
            .json()
            .await
            .map_err(|e| ResolveError::BackendUnavailable(format!("invalid spaced response: {e}")))?;

        if let Some(err) = rpc.error {
            return Err(ResolveError::BackendUnavailable(format!(
                "spaced RPC error {}: {}",
                err.code, err.message
            )));
        }

        let state = covenant_state(rpc.result.as_ref());
        debug!(space = %name, state = ?state, "registry state");
        Ok(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transfer_covenant_maps_to_transfer() {
        let result = json!({"covenant": {"type": "transfer"}});
        assert_eq!(covenant_state(Some(&result)), RegistryState::Transfer);
    }

    #[test]
    fn bid_covenant_maps_to_bid() {
        let result = json!({"covenant": {"type": "bid"}});
        assert_eq!(covenant_state(Some(&result)), RegistryState::Bid);
    }

    #[test]
    fn other_covenant_keeps_its_name() {
        let result = json!({"covenant": {"type": "reserved"}});
        assert_eq!(
            covenant_state(Some(&result)),
            RegistryState::Other("reserved".to_string())
        );
    }

    #[test]
    fn missing_covenant_is_unknown() {
        let result = json!({"name": "@x"});
        assert_eq!(
            covenant_state(Some(&result)),
            RegistryState::Other(STATE_UNKNOWN.to_string())
        );
        assert_eq!(
            covenant_state(None),
            RegistryState::Other(STATE_UNKNOWN.to_string())
        );
    }

    #[test]
    fn rpc_error_decodes() {
        let rpc: RpcResponse =
            serde_json::from_str(r#"{"error": {"code": -32000, "message": "not found"}}"#).unwrap();
        let err = rpc.error.unwrap();
        assert_eq!(err.code, -32000);
        assert_eq!(err.message, "not found");
    }
}
