//! MCP Query Tool - Local Web UI
//!
//! Serves a query form on a local port, retrieves relevant transcript
//! chunks from the deployed MCP server and renders them with the query
//! terms highlighted.
//!
//! Usage:
//!   cargo run
//!
//! Environment:
//!   BWAI_MCP_SERVER_URL - MCP server base URL (required, .env supported)
//!   BWAI_UI_HOST        - Listen host (default: 127.0.0.1)
//!   BWAI_UI_PORT / PORT - Listen port (default: 5001)
//!   RUST_LOG            - Log level (default: info)

use mcp_query::api::{create_router, handlers::AppState};
use mcp_query::models::config::AppConfig;
use mcp_query::providers::mcp::McpClient;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // A local .env file supplies variables that are not already set
    let dotenv_path = dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .compact()
        .init();

    if let Some(path) = dotenv_path {
        debug!("Loaded environment from {}", path.display());
    }

    // Load configuration; a missing server URL is a startup error
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {}", e);
            eprintln!("   Set it in the environment or a local .env file, e.g.:");
            eprintln!("   BWAI_MCP_SERVER_URL=https://your-mcp-server.example.com");
            std::process::exit(1);
        }
    };

    info!("🔗 MCP server: {}", config.server_url);

    let mcp = McpClient::new(&config)?;
    let state = Arc::new(AppState::new(config, mcp));
    let stats_for_shutdown = state.stats.clone();

    // Startup probe; a down server is reported but not fatal, queries will
    // fall back to placeholder data
    let probe = state.mcp.health_check().await;
    if probe.reachable {
        info!("✅ MCP server health check passed");
    } else {
        warn!("⚠️ MCP server health check failed: {}", probe.detail);
        warn!("   Queries will be answered with placeholder data until it recovers");
    }

    // Create router
    let app = create_router(state.clone());

    let addr: SocketAddr = state.config.bind_addr().parse()?;
    let listener = TcpListener::bind(addr).await?;
    let local_addr = listener.local_addr()?;

    info!("🚀 {} listening on http://{}", env!("CARGO_PKG_NAME"), local_addr);
    info!("");
    info!("Endpoints:");
    info!("  GET  /        - Query form");
    info!("  POST /query   - Submit a query");
    info!("  GET  /health  - Health check (proxies the MCP server)");
    info!("  GET  /stats   - Query statistics");
    info!("");
    info!("Press Ctrl+C for graceful shutdown");

    // The line the user is waiting for
    println!("Open {} in your browser", state.config.display_url());

    // Create shutdown signal handler
    let shutdown_signal = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    // Run server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal)
        .await?;

    info!("");
    info!("🛑 Shutdown signal received");

    let snapshot = stats_for_shutdown.snapshot();
    info!("   Queries served: {}", snapshot.queries_served);
    info!("   Fallbacks served: {}", snapshot.fallbacks_served);
    info!("   Avg latency: {:.2}ms", snapshot.avg_latency_ms);
    info!("👋 Shutdown complete");

    Ok(())
}
