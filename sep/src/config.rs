//! Process configuration from environment variables.
//!
//! Every knob has a usable default; unset core variables are warned about
//! at startup so a bare `sep` still comes up against local backends.

use std::net::{Ipv4Addr, SocketAddr};

use tracing::warn;

/// Listen host env var (display only; the listener binds all interfaces).
const ENV_SEP_HOST: &str = "SPACES_SEP_HOST";
const ENV_SEP_PORT: &str = "SPACES_SEP_PORT";
const ENV_SPACED_HOST: &str = "SPACED_HOST";
const ENV_SPACED_PORT: &str = "SPACED_PORT";
const ENV_FABRIC_URL: &str = "SPACES_FABRIC_URL";
const ENV_EXPLORER_URL: &str = "SPACES_EXPLORER_URL";
const ENV_PINNING_URL: &str = "SPACES_PINNING_URL";

const DEFAULT_SEP_HOST: &str = "127.0.0.1";
const DEFAULT_SEP_PORT: u16 = 3000;
const DEFAULT_SPACED_HOST: &str = "127.0.0.1";
const DEFAULT_SPACED_PORT: u16 = 7225;
const DEFAULT_EXPLORER_URL: &str = "https://explorer.spacesprotocol.org/space/";
const DEFAULT_PINNING_URL: &str = "http://70.251.209.207/pin/";

const DEFAULT_GOOGLE: &str = "{google:baseURL}search?q=%s&{google:RLZ}{google:originalQueryForSuggestion}{google:assistedQueryStats}{google:searchFieldtrialParameter}{google:language}{google:prefetchSource}{google:searchClient}{google:sourceId}{google:contextualSearchVersion}ie={inputEncoding}";
const DEFAULT_DUCKDUCKGO: &str = "https://duckduckgo.com/?q=%s";
const DEFAULT_BING: &str = "https://www.bing.com/search?q=%s";
const DEFAULT_YAHOO: &str = "https://search.yahoo.com/search{google:pathWildcard}?ei={inputEncoding}&fr=crmas_sfp&p=%s";
const DEFAULT_YANDEX: &str = "https://yandex.com/{yandex:searchPath}?text=%s";

/// Search-engine URL templates offered on the preference form.
///
/// Each template carries a `%s` placeholder for the query term.
#[derive(Debug, Clone)]
pub struct SearchEngines {
    pub google: String,
    pub duckduckgo: String,
    pub bing: String,
    pub yahoo: String,
    pub yandex: String,
}

/// Proxy process configuration.
#[derive(Debug, Clone)]
pub struct SepConfig {
    /// Host name shown in example URLs.
    pub listen_host: String,
    /// Port the proxy listens on.
    pub listen_port: u16,
    /// Registry (spaced) JSON-RPC host.
    pub spaced_host: String,
    /// Registry (spaced) JSON-RPC port.
    pub spaced_port: u16,
    /// Record-lookup service base URL; defaults to the spaced endpoint.
    pub fabric_url: Option<String>,
    /// Explorer base URL; the unsigiled space name is appended.
    pub explorer_url: String,
    /// Pinning-service URL linked from the informational pages.
    pub pinning_url: String,
    /// Engine templates offered on the preference form.
    pub engines: SearchEngines,
}

impl SepConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an injectable variable lookup.
    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Self {
        let listen_host = warned_default(&get, ENV_SEP_HOST, DEFAULT_SEP_HOST.to_string());
        let listen_port = warned_port(&get, ENV_SEP_PORT, DEFAULT_SEP_PORT);
        let spaced_host = warned_default(&get, ENV_SPACED_HOST, DEFAULT_SPACED_HOST.to_string());
        let spaced_port = warned_port(&get, ENV_SPACED_PORT, DEFAULT_SPACED_PORT);

        Self {
            listen_host,
            listen_port,
            spaced_host,
            spaced_port,
            fabric_url: get(ENV_FABRIC_URL),
            explorer_url: get(ENV_EXPLORER_URL).unwrap_or_else(|| DEFAULT_EXPLORER_URL.to_string()),
            pinning_url: get(ENV_PINNING_URL).unwrap_or_else(|| DEFAULT_PINNING_URL.to_string()),
            engines: SearchEngines {
                google: get("SPACES_SEP_GOOGLE").unwrap_or_else(|| DEFAULT_GOOGLE.to_string()),
                duckduckgo: get("SPACES_SEP_DUCKDUCKGO")
                    .unwrap_or_else(|| DEFAULT_DUCKDUCKGO.to_string()),
                bing: get("SPACES_SEP_BING").unwrap_or_else(|| DEFAULT_BING.to_string()),
                yahoo: get("SPACES_SEP_YAHOO").unwrap_or_else(|| DEFAULT_YAHOO.to_string()),
                yandex: get("SPACES_SEP_YANDEX").unwrap_or_else(|| DEFAULT_YANDEX.to_string()),
            },
        }
    }

    /// Address the listener binds (all interfaces; `listen_host` is for
    /// display).
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::from((Ipv4Addr::UNSPECIFIED, self.listen_port))
    }

    /// Registry JSON-RPC endpoint.
    pub fn spaced_url(&self) -> String {
        format!("http://{}:{}", self.spaced_host, self.spaced_port)
    }

    /// Record-lookup service base URL.
    pub fn fabric_url(&self) -> String {
        self.fabric_url.clone().unwrap_or_else(|| self.spaced_url())
    }

    /// The proxy's own URL for one example query, shown on the usage page.
    pub fn example_url(&self, external_address: Option<&str>) -> String {
        match external_address {
            Some(addr) => format!("http://{addr}/?q=@space"),
            None => format!("http://{}:{}/?q=@space", self.listen_host, self.listen_port),
        }
    }
}

fn warned_default(get: impl Fn(&str) -> Option<String>, key: &str, default: String) -> String {
    match get(key) {
        Some(value) => value,
        None => {
            warn!("{key} environment variable not set, using default: {default}");
            default
        }
    }
}

fn warned_port(get: impl Fn(&str) -> Option<String>, key: &str, default: u16) -> u16 {
    match get(key) {
        Some(value) => match value.parse() {
            Ok(port) => port,
            Err(_) => {
                warn!("{key} is not a valid port ({value}), using default: {default}");
                default
            }
        },
        None => {
            warn!("{key} environment variable not set, using default: {default}");
            default
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> SepConfig {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        SepConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn defaults_match_local_backends() {
        let config = config_from(&[]);
        assert_eq!(config.listen_port, 3000);
        assert_eq!(config.spaced_url(), "http://127.0.0.1:7225");
        assert_eq!(config.fabric_url(), "http://127.0.0.1:7225");
        assert_eq!(config.explorer_url, DEFAULT_EXPLORER_URL);
        assert!(config.engines.duckduckgo.contains("%s"));
    }

    #[test]
    fn env_overrides_are_applied() {
        let config = config_from(&[
            ("SPACES_SEP_PORT", "8080"),
            ("SPACED_HOST", "192.168.1.87"),
            ("SPACES_FABRIC_URL", "http://fabric.internal:7000"),
            ("SPACES_SEP_DUCKDUCKGO", "https://ddg.test/?q=%s"),
        ]);
        assert_eq!(config.listen_port, 8080);
        assert_eq!(config.spaced_url(), "http://192.168.1.87:7225");
        assert_eq!(config.fabric_url(), "http://fabric.internal:7000");
        assert_eq!(config.engines.duckduckgo, "https://ddg.test/?q=%s");
    }

    #[test]
    fn invalid_port_falls_back_to_default() {
        let config = config_from(&[("SPACES_SEP_PORT", "not-a-port")]);
        assert_eq!(config.listen_port, 3000);
    }

    #[test]
    fn example_url_prefers_external_address() {
        let config = config_from(&[]);
        assert_eq!(config.example_url(Some("203.0.113.9")), "http://203.0.113.9/?q=@space");
        assert_eq!(config.example_url(None), "http://127.0.0.1:3000/?q=@space");
    }
}
