//! Wire shapes and view types
//!
//! The MCP server's tool payload looks like:
//!
//! ```json
//! {
//!   "chunks": [
//!     {
//!       "id": "WS6_e09bae45-...",
//!       "text": "The actual content text of the chunk...",
//!       "workshop": "WS6",
//!       "timestamp": "Chunk 5",
//!       "speaker": "Unknown",
//!       "position": 4,
//!       "relevance": 1.0
//!     }
//!   ],
//!   "total_chunks": 3
//! }
//! ```
//!
//! `RetrievedChunk` is the normalized display form the UI renders.

use serde::{Deserialize, Serialize};

/// Form body submitted by the query page
#[derive(Debug, Clone, Deserialize)]
pub struct QueryForm {
    pub question: String,
    #[serde(default = "default_top_k")]
    pub top_k: usize,
}

fn default_top_k() -> usize {
    crate::utils::constants::DEFAULT_TOP_K
}

/// Tool payload envelope returned by `get_relevant_chunks`
#[derive(Debug, Clone, Deserialize)]
pub struct ChunkEnvelope {
    #[serde(default)]
    pub chunks: Vec<serde_json::Value>,
    #[serde(default)]
    pub total_chunks: u64,
}

/// A chunk normalized for display
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RetrievedChunk {
    /// Chunk body text
    pub content: String,
    /// Combined workshop and timestamp, e.g. "WS6 - Chunk 5"
    pub source: String,
    /// Relevance score reported by the server
    pub score: f64,
    /// Speaker attribution
    pub speaker: String,
}

impl RetrievedChunk {
    /// Map a raw chunk value onto the display shape.
    ///
    /// Missing workshop/timestamp/speaker fields become "Unknown" and a
    /// missing relevance becomes 0.0. Non-object chunks are stringified
    /// wholesale so a misbehaving server still renders something.
    pub fn from_value(value: &serde_json::Value) -> Self {
        let Some(obj) = value.as_object() else {
            let content = value
                .as_str()
                .map(str::to_string)
                .unwrap_or_else(|| value.to_string());
            return Self {
                content,
                source: "unknown".to_string(),
                score: 0.0,
                speaker: "Unknown".to_string(),
            };
        };

        let str_or = |key: &str, fallback: &str| -> String {
            obj.get(key)
                .and_then(|v| v.as_str())
                .unwrap_or(fallback)
                .to_string()
        };

        Self {
            content: str_or("text", ""),
            source: format!(
                "{} - {}",
                str_or("workshop", "Unknown"),
                str_or("timestamp", "Unknown")
            ),
            score: obj.get("relevance").and_then(|v| v.as_f64()).unwrap_or(0.0),
            speaker: str_or("speaker", "Unknown"),
        }
    }
}

/// Result of probing the remote server's health endpoint
#[derive(Debug, Clone, Serialize)]
pub struct McpHealth {
    /// Whether the endpoint answered with a success status and valid JSON
    pub reachable: bool,
    /// Raw response payload, or an error description
    pub detail: serde_json::Value,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_normalize_full_chunk() {
        let raw = json!({
            "id": "WS6_e09bae45-b2aa-4ae1-8119-843fb6a5b46b",
            "text": "The actual content text of the chunk...",
            "workshop": "WS6",
            "timestamp": "Chunk 5",
            "speaker": "Alice",
            "position": 4,
            "relevance": 0.92
        });

        let chunk = RetrievedChunk::from_value(&raw);
        assert_eq!(chunk.content, "The actual content text of the chunk...");
        assert_eq!(chunk.source, "WS6 - Chunk 5");
        assert_eq!(chunk.speaker, "Alice");
        assert!((chunk.score - 0.92).abs() < f64::EPSILON);
    }

    #[test]
    fn test_normalize_missing_fields() {
        let raw = json!({ "text": "bare chunk" });
        let chunk = RetrievedChunk::from_value(&raw);
        assert_eq!(chunk.source, "Unknown - Unknown");
        assert_eq!(chunk.speaker, "Unknown");
        assert_eq!(chunk.score, 0.0);
    }

    #[test]
    fn test_normalize_non_object_chunk() {
        let raw = json!("just a string");
        let chunk = RetrievedChunk::from_value(&raw);
        assert_eq!(chunk.content, "just a string");
        assert_eq!(chunk.source, "unknown");
        assert_eq!(chunk.score, 0.0);
    }

    #[test]
    fn test_envelope_tolerates_missing_counts() {
        let envelope: ChunkEnvelope = serde_json::from_value(json!({
            "chunks": [{ "text": "a" }]
        }))
        .unwrap();
        assert_eq!(envelope.chunks.len(), 1);
        assert_eq!(envelope.total_chunks, 0);
    }
}
