//! Order Resolver - customer orders over key-value tables
//!
//! Serves the `orders` resolver over HTTP with a shared product cache.

use std::net::SocketAddr;

use anyhow::Context;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use order_resolver::api::{create_router, AppState};
use order_resolver::seed::populate_tables;
use order_resolver::Config;

/// Main entry point for the resolver server.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Create tables and the product cache
/// 4. Seed the tables if configured to
/// 5. Start HTTP server on configured port
/// 6. Handle graceful shutdown on SIGINT/SIGTERM
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "order_resolver=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Order Resolver");

    let config = Config::from_env();
    if config.cache_capacity == 0 {
        warn!("CACHE_CAPACITY is 0, using a capacity of 1");
    }
    info!(
        "Configuration loaded: cache_capacity={}, cache_ttl={}ms, port={}, tables=[{}, {}, {}]",
        config.cache_capacity,
        config.cache_ttl_ms,
        config.server_port,
        config.customer_table,
        config.order_table,
        config.product_table
    );

    let state = AppState::from_config(&config);

    if config.populate_on_start {
        let response = populate_tables(&state.tables)
            .await
            .context("failed to populate tables")?;
        info!(
            "Tables populated: {} customers, {} products, {} order lines",
            response.customers, response.products, response.order_lines
        );
    }

    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
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
}
