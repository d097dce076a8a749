//! Best-effort discovery of the proxy's public IPv4 address.
//!
//! Used only to render a reachable example URL on the usage page; failure
//! is logged and the proxy keeps its configured host.

use std::net::Ipv4Addr;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::{info, warn};

const CHECKIP_URL: &str = "http://checkip.dyndns.org/";
const CHECKIP_TIMEOUT: Duration = Duration::from_secs(60);

/// Fetch the public IPv4 address as seen from the outside.
pub async fn discover() -> Result<String> {
    let http = reqwest::Client::builder()
        .timeout(CHECKIP_TIMEOUT)
        .build()
        .context("failed to build checkip HTTP client")?;

    let body = http
        .get(CHECKIP_URL)
        .send()
        .await
        .context("checkip request failed")?
        .text()
        .await
        .context("checkip response was not readable")?;

    extract_ipv4(&body).context("checkip response contained no IPv4 address")
}

/// Spawn discovery in the background and store the result in `slot`.
pub fn spawn_discovery(slot: std::sync::Arc<tokio::sync::RwLock<Option<String>>>) {
    tokio::spawn(async move {
        match discover().await {
            Ok(addr) => {
                info!(address = %addr, "discovered external address");
                *slot.write().await = Some(addr);
            }
            Err(err) => {
                warn!(error = %err, "external address discovery failed");
            }
        }
    });
}

/// Pull the first IPv4 address out of a checkip HTML body.
fn extract_ipv4(body: &str) -> Option<String> {
    body.split(|c: char| !(c.is_ascii_digit() || c == '.'))
        .find(|token| token.parse::<Ipv4Addr>().is_ok())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_the_address_from_checkip_html() {
        let body = "<html><head><title>Current IP Check</title></head>\
                    <body>Current IP Address: 203.0.113.9</body></html>";
        assert_eq!(extract_ipv4(body).as_deref(), Some("203.0.113.9"));
    }

    #[test]
    fn ignores_digit_runs_that_are_not_addresses() {
        assert_eq!(extract_ipv4("build 12345 done"), None);
        assert_eq!(extract_ipv4("version 1.2.3.4.5"), None);
        assert_eq!(extract_ipv4("no numbers here"), None);
    }
}
