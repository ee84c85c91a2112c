//! MCP Client - Chunk Retrieval over Streamable HTTP
//!
//! Talks JSON-RPC 2.0 to the deployed MCP server:
//! 1. `initialize` request, capturing the `mcp-session-id` response header
//!    when the server issues one
//! 2. `notifications/initialized` notification
//! 3. `tools/call` for `get_relevant_chunks`
//!
//! Responses arrive either as plain JSON or as a single-message SSE body,
//! depending on the server; both shapes are accepted. Retrieval failures
//! never propagate to the page: `get_chunks_with_fallback` substitutes
//! placeholder cards so the UI stays usable while the server is down.

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE, USER_AGENT};
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, info, warn};

use crate::models::config::AppConfig;
use crate::models::errors::{AppError, AppResult};
use crate::models::types::{ChunkEnvelope, McpHealth, RetrievedChunk};
use crate::utils::constants::{
    APP_NAME, APP_VERSION, CHUNK_TOOL_NAME, MCP_PROTOCOL_VERSION, USER_AGENT as USER_AGENT_CONST,
};

/// Session header used by streamable HTTP servers
const SESSION_HEADER: &str = "mcp-session-id";

/// JSON-RPC response envelope
#[derive(Debug, Deserialize)]
struct RpcResponse {
    #[allow(dead_code)]
    jsonrpc: String,
    result: Option<serde_json::Value>,
    error: Option<RpcError>,
}

/// JSON-RPC error object
#[derive(Debug, Deserialize)]
struct RpcError {
    code: i64,
    message: String,
}

/// Client for the deployed MCP server
pub struct McpClient {
    client: reqwest::Client,
    mcp_endpoint: String,
    health_endpoint: String,
}

impl McpClient {
    pub fn new(config: &AppConfig) -> AppResult<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_CONST));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        // Streamable HTTP servers require both media types to be accepted
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/json, text/event-stream"),
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.http_timeout)
            .gzip(true)
            .build()
            .map_err(|e| AppError::internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            mcp_endpoint: config.mcp_endpoint(),
            health_endpoint: config.health_endpoint(),
        })
    }

    /// Probe the server's health endpoint.
    ///
    /// Never fails hard; an unreachable server is reported in the result so
    /// callers can surface it without aborting.
    pub async fn health_check(&self) -> McpHealth {
        match self.client.get(&self.health_endpoint).send().await {
            Ok(response) if response.status().is_success() => match response.json().await {
                Ok(detail) => McpHealth {
                    reachable: true,
                    detail,
                },
                Err(e) => {
                    warn!("Health check returned invalid JSON: {}", e);
                    McpHealth {
                        reachable: false,
                        detail: json!({ "error": e.to_string() }),
                    }
                }
            },
            Ok(response) => {
                warn!("Health check failed: HTTP {}", response.status());
                McpHealth {
                    reachable: false,
                    detail: json!({ "error": format!("HTTP {}", response.status()) }),
                }
            }
            Err(e) => {
                warn!("Health check failed: {}", e);
                McpHealth {
                    reachable: false,
                    detail: json!({ "error": e.to_string() }),
                }
            }
        }
    }

    /// Retrieve relevant chunks for a question, normalized for display
    pub async fn get_chunks(
        &self,
        question: &str,
        top_k: usize,
    ) -> AppResult<Vec<RetrievedChunk>> {
        info!("🔍 Retrieving chunks (top_k: {})", top_k);

        let session = self.initialize().await?;
        self.notify_initialized(session.as_deref()).await;

        let result = self
            .call_tool(
                CHUNK_TOOL_NAME,
                json!({ "question": question, "top_k": top_k }),
                session.as_deref(),
            )
            .await?;

        let payload = Self::tool_payload(&result)?;
        let envelope: ChunkEnvelope = serde_json::from_value(payload)?;

        let chunks: Vec<RetrievedChunk> = envelope
            .chunks
            .iter()
            .map(RetrievedChunk::from_value)
            .collect();

        info!("📊 Retrieved {} chunks", chunks.len());
        Ok(chunks)
    }

    /// Retrieve chunks, substituting placeholder cards on failure.
    ///
    /// Returns the chunks plus whether the fallback path was taken.
    pub async fn get_chunks_with_fallback(
        &self,
        question: &str,
        top_k: usize,
    ) -> (Vec<RetrievedChunk>, bool) {
        match self.get_chunks(question, top_k).await {
            Ok(chunks) => (chunks, false),
            Err(e) => {
                warn!("⚠️ Chunk retrieval failed, serving fallback data: {}", e);
                (placeholder_chunks(question, top_k, &e), true)
            }
        }
    }

    /// Perform the initialize handshake, returning the session id when the
    /// server issues one
    async fn initialize(&self) -> AppResult<Option<String>> {
        let payload = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": "initialize",
            "params": {
                "protocolVersion": MCP_PROTOCOL_VERSION,
                "capabilities": {},
                "clientInfo": { "name": APP_NAME, "version": APP_VERSION }
            }
        });

        let response = self
            .client
            .post(&self.mcp_endpoint)
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::http_status(status));
        }

        let session = response
            .headers()
            .get(SESSION_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(String::from);
        if let Some(ref sid) = session {
            debug!("MCP session established: {}", sid);
        }

        let content_type = Self::content_type(response.headers());
        let body = response.text().await?;
        let rpc = Self::parse_rpc(&content_type, &body)?;
        if let Some(err) = rpc.error {
            return Err(AppError::tool_error(format!(
                "initialize failed: {} (code: {})",
                err.message, err.code
            )));
        }

        Ok(session)
    }

    /// Fire-and-forget `notifications/initialized`. Servers acknowledge
    /// with 202 and no body; failures here are logged, not fatal.
    async fn notify_initialized(&self, session: Option<&str>) {
        let payload = json!({
            "jsonrpc": "2.0",
            "method": "notifications/initialized"
        });

        let mut request = self.client.post(&self.mcp_endpoint).json(&payload);
        if let Some(sid) = session {
            request = request.header(SESSION_HEADER, sid);
        }

        match request.send().await {
            Ok(response) if !response.status().is_success() => {
                debug!(
                    "initialized notification rejected: HTTP {}",
                    response.status()
                );
            }
            Ok(_) => {}
            Err(e) => debug!("initialized notification failed: {}", e),
        }
    }

    /// Execute a `tools/call` request and return its result object
    async fn call_tool(
        &self,
        name: &str,
        arguments: serde_json::Value,
        session: Option<&str>,
    ) -> AppResult<serde_json::Value> {
        let payload = json!({
            "jsonrpc": "2.0",
            "id": 2,
            "method": "tools/call",
            "params": { "name": name, "arguments": arguments }
        });

        let mut request = self.client.post(&self.mcp_endpoint).json(&payload);
        if let Some(sid) = session {
            request = request.header(SESSION_HEADER, sid);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(AppError::http_status(status));
        }

        let content_type = Self::content_type(response.headers());
        let body = response.text().await?;
        let rpc = Self::parse_rpc(&content_type, &body)?;

        if let Some(err) = rpc.error {
            return Err(AppError::tool_error(format!(
                "{} (code: {})",
                err.message, err.code
            )));
        }

        rpc.result
            .ok_or_else(|| AppError::invalid_response("No result in MCP response"))
    }

    fn content_type(headers: &HeaderMap) -> String {
        headers
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string()
    }

    /// Parse a JSON-RPC response from either a plain JSON body or a
    /// single-message SSE body
    fn parse_rpc(content_type: &str, body: &str) -> AppResult<RpcResponse> {
        let raw = if content_type.starts_with("text/event-stream") {
            Self::last_sse_data(body)
                .ok_or_else(|| AppError::invalid_response("Empty event stream"))?
        } else {
            body.to_string()
        };

        serde_json::from_str(&raw)
            .map_err(|e| AppError::invalid_response(format!("Failed to parse response: {}", e)))
    }

    /// Last `data:` payload of an SSE body. Streamable HTTP responses to a
    /// single request carry exactly one message, but interleaved keepalives
    /// make "last" the safe pick.
    fn last_sse_data(body: &str) -> Option<String> {
        body.lines()
            .filter_map(|line| line.strip_prefix("data:"))
            .map(|data| data.trim().to_string())
            .filter(|data| !data.is_empty())
            .last()
    }

    /// Extract the tool payload from a `tools/call` result.
    ///
    /// Prefers `structuredContent`; falls back to parsing the first text
    /// content item as JSON.
    fn tool_payload(result: &serde_json::Value) -> AppResult<serde_json::Value> {
        if result
            .get("isError")
            .and_then(|v| v.as_bool())
            .unwrap_or(false)
        {
            let detail = Self::first_text_content(result).unwrap_or("tool reported an error");
            return Err(AppError::tool_error(detail));
        }

        if let Some(structured) = result.get("structuredContent") {
            return Ok(structured.clone());
        }

        let text = Self::first_text_content(result)
            .ok_or_else(|| AppError::invalid_response("No content in tool result"))?;
        serde_json::from_str(text)
            .map_err(|e| AppError::invalid_response(format!("Tool result is not JSON: {}", e)))
    }

    fn first_text_content(result: &serde_json::Value) -> Option<&str> {
        result
            .get("content")
            .and_then(|c| c.as_array())
            .and_then(|items| {
                items
                    .iter()
                    .find_map(|item| item.get("text").and_then(|t| t.as_str()))
            })
    }
}

/// Placeholder cards served when the MCP server cannot be reached
pub fn placeholder_chunks(question: &str, top_k: usize, error: &AppError) -> Vec<RetrievedChunk> {
    let mut chunks = vec![
        RetrievedChunk {
            content: format!(
                "[MCP Server Unavailable] This is a placeholder result for the query: '{}'. \
                 The MCP server could not be reached.",
                question
            ),
            source: "fallback_placeholder.txt".to_string(),
            score: 0.0,
            speaker: "System".to_string(),
        },
        RetrievedChunk {
            content: "[Error Response] Unable to retrieve real chunks from the MCP server. \
                      Please check server connectivity and try again."
                .to_string(),
            source: "error_fallback.txt".to_string(),
            score: 0.0,
            speaker: "System".to_string(),
        },
        RetrievedChunk {
            content: format!(
                "[Debug Info] Original query: '{}', Requested top_k: {}. Error: {}",
                question, top_k, error
            ),
            source: "debug_info.txt".to_string(),
            score: 0.0,
            speaker: "System".to_string(),
        },
    ];
    chunks.truncate(top_k);
    chunks
}
