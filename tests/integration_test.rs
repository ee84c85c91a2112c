//! Integration tests for the MCP Query Tool

use mcp_query::api::pages;
use mcp_query::core::highlight::{extract_query_words, highlight_query_terms};
use mcp_query::providers::mcp::placeholder_chunks;
use mcp_query::{AppError, RetrievedChunk, StatsCollector};
use serde_json::json;

#[test]
fn test_chunk_normalization_pipeline() {
    let payload = json!({
        "chunks": [
            {
                "id": "WS6_e09bae45-b2aa-4ae1-8119-843fb6a5b46b",
                "text": "Agents can use tools to act on their environment.",
                "workshop": "WS6",
                "timestamp": "Chunk 5",
                "speaker": "Unknown",
                "position": 4,
                "relevance": 1.0
            },
            { "text": "A chunk with everything else missing" }
        ],
        "total_chunks": 2
    });

    let chunks: Vec<RetrievedChunk> = payload["chunks"]
        .as_array()
        .unwrap()
        .iter()
        .map(RetrievedChunk::from_value)
        .collect();

    assert_eq!(chunks.len(), 2);
    assert_eq!(chunks[0].source, "WS6 - Chunk 5", "workshop and timestamp combine");
    assert_eq!(chunks[0].score, 1.0);
    assert_eq!(chunks[1].source, "Unknown - Unknown", "missing fields default to Unknown");
}

#[test]
fn test_query_words_match_documented_examples() {
    assert_eq!(extract_query_words("What is an agent?"), vec!["agent"]);
    assert_eq!(extract_query_words("fine-tuning"), vec!["fine", "tuning"]);
}

#[test]
fn test_highlighting_end_to_end() {
    let out = highlight_query_terms("The agent performs tasks", "agent task");
    assert!(
        out.contains("<mark class=\"highlight\">agent</mark>"),
        "query word should be marked: {}",
        out
    );
    assert!(
        !out.contains("<mark class=\"highlight\">tasks</mark>"),
        "matching is whole-word, 'task' must not mark 'tasks': {}",
        out
    );
}

#[test]
fn test_fallback_cards_shape() {
    let err = AppError::connection_failed("Connection failed");
    let cards = placeholder_chunks("what is an agent", 3, &err);

    assert_eq!(cards.len(), 3);
    assert!(cards[0].content.starts_with("[MCP Server Unavailable]"));
    assert!(cards[1].content.starts_with("[Error Response]"));
    assert!(cards[2].content.starts_with("[Debug Info]"));
    assert!(
        cards.iter().all(|c| c.speaker == "System" && c.score == 0.0),
        "fallback cards are attributed to System with zero score"
    );
}

#[test]
fn test_fallback_respects_top_k() {
    let err = AppError::timeout("Request timeout");
    assert_eq!(placeholder_chunks("q", 1, &err).len(), 1);
    assert_eq!(placeholder_chunks("q", 10, &err).len(), 3, "only three cards exist");
}

#[test]
fn test_rendered_page_highlights_retrieved_content() {
    let chunks = vec![RetrievedChunk {
        content: "An agent observes, decides and acts.".to_string(),
        source: "WS2 - Chunk 1".to_string(),
        score: 0.91,
        speaker: "Instructor".to_string(),
    }];

    let page = pages::render_page("agent", 3, Some(&chunks));

    assert!(page.contains("<mark class=\"highlight\">agent</mark>"));
    assert!(page.contains("WS2 - Chunk 1"));
    assert!(page.contains("Speaker: Instructor"));
    assert!(page.contains("Score: 0.91"));
}

#[test]
fn test_rendered_page_neutralizes_markup_in_chunks() {
    let chunks = vec![RetrievedChunk {
        content: "<img src=x onerror=alert(1)> agent".to_string(),
        source: "WS1 - Chunk 1".to_string(),
        score: 0.5,
        speaker: "Unknown".to_string(),
    }];

    let page = pages::render_page("agent", 1, Some(&chunks));
    assert!(!page.contains("<img"), "chunk markup must be escaped");
    assert!(page.contains("&lt;img"));
}

#[test]
fn test_stats_counters_accumulate() {
    let stats = StatsCollector::new();
    stats.record_query(40, false);
    stats.record_query(60, true);

    let snap = stats.snapshot();
    assert_eq!(snap.queries_served, 2);
    assert_eq!(snap.fallbacks_served, 1);
    assert!((snap.avg_latency_ms - 50.0).abs() < f64::EPSILON);
}
