//! ITC HTTP Server Binary
//!
//! This is the main entry point for the ITC API server. It initializes the
//! cache store and legacy bridge, aligns the cache with the upstream data
//! version, sets up the HTTP router, and starts serving requests.
//!
//! # Usage
//!
//! ```bash
//! # Run with the in-memory cache store (default)
//! ITC_LEGACY_URL=http://localhost:9080 cargo run --bin itc-server
//!
//! # Run against a Redis cache store
//! ITC_LEGACY_URL=http://localhost:9080 ITC_CACHE_URL=redis://localhost:6379 \
//!   cargo run --bin itc-server --features redis-store
//! ```
//!
//! # Environment Variables
//!
//! - `ITC_LEGACY_URL`: Base URL of the legacy calculator (required)
//! - `ITC_CACHE_URL`: Cache store URL (optional)
//! - `HOST`: Server host (default: 0.0.0.0)
//! - `PORT`: Server port (default: 8080)
//! - `RUST_LOG`: Log level (default: info)

use std::env;
use std::net::SocketAddr;
use std::sync::Arc;

use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use itc_rust::cache::{ResultCache, StoreFactory};
use itc_rust::config::ItcConfig;
use itc_rust::http::{create_router, AppState};
use itc_rust::legacy::{HttpLegacyCalculator, LegacyCalculator};
use itc_rust::services::ItcService;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    FmtSubscriber::builder()
        .with_max_level(
            env::var("RUST_LOG")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(Level::INFO),
        )
        .with_target(true)
        .init();

    info!("Starting ITC HTTP Server");

    // Configuration is read once; a missing legacy URL is fatal.
    let config = ItcConfig::from_env()
        .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))?;

    let bridge: Arc<dyn LegacyCalculator> =
        Arc::new(HttpLegacyCalculator::new(config.legacy_url.clone()));

    let store = StoreFactory::from_cache_url(config.cache_url.as_deref())
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create cache store: {}", e))?;
    info!(
        cache = config.cache_url.as_deref().unwrap_or("in-memory"),
        "Cache store initialized"
    );

    // Align the cache with the upstream data version before serving. An
    // unreachable upstream is not fatal here; the orchestrator re-checks on
    // every request.
    match bridge.data_version().await {
        Ok(version) => {
            let cache = ResultCache::new(store.clone());
            match cache.align_data_version(&version).await {
                Ok(flushed) if flushed => info!(%version, "Cache flushed for new data version"),
                Ok(_) => info!(%version, "Cache already aligned with data version"),
                Err(e) => warn!(error = %e, "Could not align cache with data version"),
            }
        }
        Err(e) => warn!(error = %e, "Upstream data version unavailable at startup"),
    }

    let service = Arc::new(ItcService::new(bridge, store));
    let state = AppState::new(service);
    let app = create_router(state);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
