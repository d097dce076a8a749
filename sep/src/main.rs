use std::sync::Arc;

use anyhow::Result;
use tokio::sync::RwLock;
use tracing::info;
use tracing_subscriber::EnvFilter;

use lib_resolver::{Resolver, ResolverConfig};
use sep::config::SepConfig;
use sep::fabric::FabricClient;
use sep::handlers::AppState;
use sep::spaced::SpacedClient;
use sep::{external_ip, server};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Arc::new(SepConfig::from_env());
    let resolver_config = ResolverConfig::default();

    let lookup = FabricClient::new(config.fabric_url(), resolver_config.lookup_timeout)?;
    let registry = SpacedClient::new(config.spaced_url(), resolver_config.registry_timeout)?;
    let resolver = Arc::new(Resolver::new(
        Arc::new(lookup),
        Arc::new(registry),
        resolver_config,
    ));

    info!(
        version = sep::VERSION,
        spaced = %config.spaced_url(),
        fabric = %config.fabric_url(),
        "starting spaces search engine proxy"
    );

    let external_address = Arc::new(RwLock::new(None));
    external_ip::spawn_discovery(external_address.clone());

    server::serve(AppState {
        resolver,
        config,
        external_address,
    })
    .await
}
