//! Property Cache - property listings backend
//!
//! # Startup Sequence
//! 1. Initialize tracing subscriber for logging
//! 2. Load configuration from environment variables
//! 3. Select the cache store (Redis when `REDIS_URL` is set, otherwise in-memory)
//! 4. Build application state and optionally seed sample listings
//! 5. Start background TTL cleanup task
//! 6. Serve HTTP until SIGINT/SIGTERM

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use property_cache::cache::{CacheBackend, MemoryBackend, RedisBackend};
use property_cache::seed::seed_sample_properties;
use property_cache::store::MemoryRepository;
use property_cache::{create_router, spawn_cleanup_task, AppState, Config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "property_cache=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting property listings service");

    let config = Config::from_env();
    info!(
        "Configuration loaded: port={}, data_cache_ttl={}s, response_cache_ttl={}s, redis={}",
        config.server_port,
        config.data_cache_ttl,
        config.response_cache_ttl,
        config.redis_url.is_some()
    );

    let mut memory_store = None;
    let cache: Arc<dyn CacheBackend> = match &config.redis_url {
        Some(url) => {
            let backend = RedisBackend::new(url).context("invalid REDIS_URL")?;
            info!("Using Redis cache store");
            Arc::new(backend)
        }
        None => {
            let backend = MemoryBackend::new(config.max_entries);
            memory_store = Some(backend.store());
            info!(max_entries = config.max_entries, "Using in-memory cache store");
            Arc::new(backend)
        }
    };

    let state = AppState::new(Arc::new(MemoryRepository::new()), cache, &config);

    if config.seed_sample_data {
        seed_sample_properties(&state.properties)
            .await
            .context("failed to seed sample properties")?;
    }

    let cleanup_handle = spawn_cleanup_task(
        memory_store,
        state.responses.clone(),
        config.cleanup_interval,
    );
    info!("Background cleanup task started");

    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(cleanup_handle))
        .await
        .context("server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM), then aborts the cleanup task.
async fn shutdown_signal(cleanup_handle: tokio::task::JoinHandle<()>) {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            warn!(error = %err, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                warn!(error = %err, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }

    cleanup_handle.abort();
    warn!("Cleanup task aborted");
}
