use std::{future::Future, io, net::SocketAddr};

use axum::Router;
use configs::AppConfig;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::routes::{self, AppState};
use service::runtime;

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Load `config.toml` (or `CONFIG_PATH`), falling back to env vars when the
/// file is absent.
pub fn load_config() -> anyhow::Result<AppConfig> {
    let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
    load_config_from(&path)
}

/// Only a missing file falls back to the environment; a file that fails to
/// parse or validate is an error.
pub fn load_config_from(path: &str) -> anyhow::Result<AppConfig> {
    let mut cfg = match configs::load_from_file(path) {
        Ok(cfg) => cfg,
        Err(e) if is_missing_file(&e) => {
            warn!(%path, "config file not found; using environment");
            AppConfig::from_env()
        }
        Err(e) => return Err(e.context(format!("invalid config file {path}"))),
    };
    cfg.normalize_and_validate()
        .map_err(|e| e.context(format!("invalid configuration from {path}")))?;
    Ok(cfg)
}

fn is_missing_file(err: &anyhow::Error) -> bool {
    err.downcast_ref::<io::Error>()
        .is_some_and(|e| e.kind() == io::ErrorKind::NotFound)
}

/// Open the collections and build the router for `cfg`.
pub async fn build_app(cfg: &AppConfig) -> anyhow::Result<Router> {
    let services = runtime::open_services(&cfg.storage, &cfg.catalog).await?;
    Ok(routes::build_router(AppState::from(services), build_cors()))
}

/// Serve until `shutdown` resolves.
pub async fn run_with_shutdown<F>(cfg: AppConfig, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let app = build_app(&cfg).await?;
    let addr: SocketAddr = cfg.server.bind_addr().parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "shop api listening");
    axum::serve(listener, app).with_graceful_shutdown(shutdown).await?;
    info!("shop api stopped");
    Ok(())
}
