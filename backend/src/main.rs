//! Service entry-point: loads settings, opens the user store and serves HTTP.

mod server;

use std::io;
use std::sync::Arc;

use actix_web::web;
use ortho_config::OrthoConfig;
use prometheus::Registry;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use server::{ServerConfig, create_server};
use user_api::config::ServiceSettings;
use user_api::domain::UserService;
use user_api::inbound::http::health::HealthState;
use user_api::outbound::metrics::{PrometheusUserMetrics, register_process_collector};
use user_api::outbound::persistence::{PoolConfig, StoreShutdown, UserStoreHandle};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = ServiceSettings::load_from_iter(std::env::args_os())
        .map_err(|e| io::Error::other(format!("failed to load configuration: {e}")))?;
    let bind_addr = settings.bind_addr().map_err(io::Error::other)?;
    let store_timeout = settings.store_timeout().map_err(io::Error::other)?;

    let registry = Registry::new();
    let metrics = PrometheusUserMetrics::new(&registry)
        .map_err(|e| io::Error::other(format!("user metrics registration failed: {e}")))?;
    register_process_collector(&registry)
        .map_err(|e| io::Error::other(format!("process metrics registration failed: {e}")))?;

    let pool_config = settings
        .store_url()
        .map(|url| PoolConfig::new(url).with_connection_timeout(store_timeout));
    if pool_config.is_none() {
        warn!("no store_url configured; users are kept in memory and lost on restart");
    }
    let store = UserStoreHandle::open(pool_config)
        .await
        .map_err(|e| io::Error::other(format!("failed to open user store: {e}")))?;

    let users =
        UserService::new(store.port(), Arc::new(metrics)).with_store_timeout(store_timeout);
    let config = ServerConfig::new(bind_addr, users).with_registry(&registry);

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), config)?;
    info!(%bind_addr, "listening");

    let result = server.await;
    health_state.mark_unhealthy();

    let backend = store.backend();
    match store.close() {
        StoreShutdown::Closed => info!(backend, "user store closed"),
        StoreShutdown::Discarded => info!(backend, "in-memory user store discarded"),
        StoreShutdown::StillReferenced => {
            warn!(backend, "user store still referenced at shutdown; released with its last owner");
        }
    }
    result
}
