//! API Request Handlers

use axum::{
    extract::{Form, Json, State},
    http::StatusCode,
    response::Html,
};
use std::sync::Arc;
use std::time::Instant;
use tracing::info;

use super::pages;
use super::types::*;
use crate::models::config::AppConfig;
use crate::models::errors::AppError;
use crate::models::types::QueryForm;
use crate::providers::mcp::McpClient;
use crate::utils::constants::{DEFAULT_TOP_K, MAX_TOP_K, MIN_TOP_K};
use crate::utils::stats::StatsCollector;

/// Shared application state
pub struct AppState {
    pub config: AppConfig,
    pub mcp: McpClient,
    pub stats: Arc<StatsCollector>,
    pub start_time: Instant,
}

impl AppState {
    pub fn new(config: AppConfig, mcp: McpClient) -> Self {
        Self {
            config,
            mcp,
            stats: Arc::new(StatsCollector::new()),
            start_time: Instant::now(),
        }
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}

// ============================================
// Query UI
// ============================================

/// Main page with query form and empty results area
pub async fn index() -> Html<String> {
    Html(pages::render_page("", DEFAULT_TOP_K, None))
}

/// Handle query submission: retrieve chunks (with fallback) and re-render
/// the page with result cards
pub async fn query(
    State(state): State<Arc<AppState>>,
    Form(form): Form<QueryForm>,
) -> Result<Html<String>, (StatusCode, Json<ApiResponse<()>>)> {
    let start = Instant::now();

    let question = form.question.trim().to_string();
    if question.is_empty() {
        let err = AppError::bad_request("question must not be empty");
        return Err((
            StatusCode::from_u16(err.code.http_status()).unwrap_or(StatusCode::BAD_REQUEST),
            Json(ApiResponse::error(
                ApiError::from_app(&err),
                start.elapsed().as_secs_f64() * 1000.0,
            )),
        ));
    }

    let top_k = form.top_k.clamp(MIN_TOP_K, MAX_TOP_K);

    let (chunks, fell_back) = state.mcp.get_chunks_with_fallback(&question, top_k).await;

    let latency_ms = start.elapsed().as_millis() as u64;
    state.stats.record_query(latency_ms, fell_back);
    info!(
        top_k = top_k,
        results = chunks.len(),
        fallback = fell_back,
        latency_ms = latency_ms,
        "Query handled"
    );

    Ok(Html(pages::render_page(&question, top_k, Some(&chunks))))
}

// ============================================
// Health Check
// ============================================

/// Health of the UI itself plus a proxied probe of the MCP server
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<ApiResponse<HealthData>> {
    let start = Instant::now();

    state.stats.record_health_check();
    let mcp_server = state.mcp.health_check().await;

    let data = HealthData {
        status: if mcp_server.reachable {
            "healthy".to_string()
        } else {
            "degraded".to_string()
        },
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.uptime_seconds(),
        mcp_server,
    };

    Json(ApiResponse::success(
        data,
        start.elapsed().as_secs_f64() * 1000.0,
    ))
}

// ============================================
// Stats
// ============================================

pub async fn get_stats(State(state): State<Arc<AppState>>) -> Json<ApiResponse<StatsData>> {
    let start = Instant::now();

    let data = StatsData {
        counters: state.stats.snapshot(),
        uptime_seconds: state.uptime_seconds(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    Json(ApiResponse::success(
        data,
        start.elapsed().as_secs_f64() * 1000.0,
    ))
}
