//! Spaces Search-Engine Proxy.
//!
//! Web layer around the [`lib_resolver`] pipeline: an axum server that
//! accepts browser search queries, resolves space references (`@name`)
//! through the record backend and the registry, and answers everything else
//! with the user's cookie-backed search-engine preference.
//!
//! ## Layout
//!
//! - `config` — env-derived process configuration
//! - `fabric` / `spaced` — concrete backend clients for the pipeline's
//!   collaborator traits
//! - `handlers` / `pages` / `cookie` — HTTP surface
//! - `external_ip` — best-effort public address discovery
//! - `server` — router assembly and serving

pub mod config;
pub mod cookie;
pub mod external_ip;
pub mod fabric;
pub mod handlers;
pub mod pages;
pub mod server;
pub mod spaced;

pub use config::SepConfig;
pub use handlers::AppState;

/// Proxy version, surfaced by the `/info` endpoint.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
