//! HTML rendering for the query UI
//!
//! The whole UI is two states of one page: the empty form, and the form
//! with result cards underneath. Markup is assembled with `format!` against
//! the snippets below; no template engine.

use crate::core::highlight::highlight_query_terms;
use crate::models::types::RetrievedChunk;
use crate::utils::constants::{APP_NAME, MAX_TOP_K, MIN_TOP_K};

/// Shared page chrome
const STYLE: &str = r#"
        body { font-family: Arial, sans-serif; line-height: 1.6; color: #333; background-color: #f5f5f5; min-height: 100vh; padding: 20px; margin: 0; }
        h1 { text-align: center; color: #333; margin-bottom: 30px; }
        .panel { max-width: 800px; margin: 0 auto; padding: 20px; }
        input[name=question] { width: 100%; padding: 10px; margin: 10px 0; border: 1px solid #ddd; border-radius: 4px; box-sizing: border-box; }
        input[name=top_k] { width: 80px; padding: 5px; margin: 5px; border: 1px solid #ddd; border-radius: 4px; }
        label { margin-left: 5px; color: #666; }
        button { background-color: #007bff; color: white; padding: 10px 20px; border: none; border-radius: 4px; cursor: pointer; margin-top: 10px; }
        button:hover { background-color: #0056b3; }
        .results-empty { color: #666; font-style: italic; text-align: center; padding: 40px; border: 1px solid #eee; border-radius: 4px; background-color: #f9f9f9; min-height: 200px; box-sizing: border-box; }
        .query-echo { color: #666; margin-bottom: 20px; font-style: italic; }
        .card { border: 1px solid #ddd; border-radius: 4px; padding: 15px; margin: 10px 0; background-color: white; box-shadow: 0 2px 4px rgba(0,0,0,0.1); }
        .card h4 { margin: 0 0 10px 0; color: #333; }
        .card p { margin: 10px 0; line-height: 1.6; }
        .card-meta { font-size: 0.9em; color: #555; margin-top: 10px; padding-top: 10px; border-top: 1px solid #eee; }
        .card-meta .score { color: #666; margin-left: 10px; }
        mark.highlight { background-color: #fff3cd; padding: 0 2px; border-radius: 2px; }
"#;

/// Escape text for safe interpolation into HTML
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Render the full page. `results` is `None` on first load and `Some` after
/// a query, even when the list is empty.
pub fn render_page(question: &str, top_k: usize, results: Option<&[RetrievedChunk]>) -> String {
    let form = render_form(question, top_k);
    let results_area = match results {
        Some(chunks) => render_results(question, top_k, chunks),
        None => r#"<div class="results-empty"><p>Submit a query above to see results here...</p></div>"#
            .to_string(),
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>{title}</title>
    <style>{style}</style>
</head>
<body>
    <h1>{title}</h1>
    {form}
    <div class="panel" id="results">
        <h3>Results</h3>
        {results_area}
    </div>
</body>
</html>"#,
        title = APP_NAME,
        style = STYLE,
        form = form,
        results_area = results_area,
    )
}

fn render_form(question: &str, top_k: usize) -> String {
    format!(
        r#"<form class="panel" method="post" action="/query">
        <h2>Enter your question to retrieve relevant chunks from the MCP server</h2>
        <div>
            <input name="question" value="{question}" placeholder="What is the definition of an agent?">
            <br>
            <input name="top_k" type="number" value="{top_k}" min="{min}" max="{max}">
            <label>Results</label>
            <br>
            <button type="submit">Submit Query</button>
        </div>
    </form>"#,
        question = escape_html(question),
        top_k = top_k,
        min = MIN_TOP_K,
        max = MAX_TOP_K,
    )
}

fn render_results(question: &str, top_k: usize, chunks: &[RetrievedChunk]) -> String {
    if chunks.is_empty() {
        return r#"<div class="results-empty"><p>No relevant chunks found.</p></div>"#.to_string();
    }

    let cards: String = chunks
        .iter()
        .enumerate()
        .map(|(i, chunk)| render_card(i + 1, question, chunk))
        .collect();

    format!(
        r#"<p class="query-echo">Query: "{question}" (Top {top_k} results)</p>
        {cards}"#,
        question = escape_html(question),
        top_k = top_k,
        cards = cards,
    )
}

fn render_card(index: usize, question: &str, chunk: &RetrievedChunk) -> String {
    // Escape first, then highlight: the mark tags must survive, the chunk
    // text must not be interpreted as markup
    let content = highlight_query_terms(&escape_html(&chunk.content), question);

    format!(
        r#"<div class="card">
            <h4>Result {index}</h4>
            <p>{content}</p>
            <div class="card-meta">
                <strong>Source: </strong>{source}
                <span class="score"> | Speaker: {speaker} | Score: {score:.2}</span>
            </div>
        </div>"#,
        index = index,
        content = content,
        source = escape_html(&chunk.source),
        speaker = escape_html(&chunk.speaker),
        score = chunk.score,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunk(content: &str) -> RetrievedChunk {
        RetrievedChunk {
            content: content.to_string(),
            source: "WS6 - Chunk 5".to_string(),
            score: 0.87,
            speaker: "Alice".to_string(),
        }
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<script>"x" & 'y'</script>"#),
            "&lt;script&gt;&quot;x&quot; &amp; &#39;y&#39;&lt;/script&gt;"
        );
    }

    #[test]
    fn test_initial_page_has_form_and_placeholder() {
        let page = render_page("", crate::utils::constants::DEFAULT_TOP_K, None);
        assert!(page.contains(r#"action="/query""#));
        assert!(page.contains("Submit a query above"));
        assert!(page.contains(r#"value="3""#));
    }

    #[test]
    fn test_results_page_echoes_query_and_cards() {
        let chunks = vec![chunk("The agent performs tasks")];
        let page = render_page("agent", 3, Some(&chunks));
        assert!(page.contains("Result 1"));
        assert!(page.contains("Query: &quot;agent&quot;") || page.contains(r#"Query: "agent""#));
        assert!(page.contains("<mark class=\"highlight\">agent</mark>"));
        assert!(page.contains("WS6 - Chunk 5"));
        assert!(page.contains("Score: 0.87"));
    }

    #[test]
    fn test_chunk_markup_is_escaped() {
        let chunks = vec![chunk("<b>bold</b> agent")];
        let page = render_page("agent", 1, Some(&chunks));
        assert!(page.contains("&lt;b&gt;bold&lt;/b&gt;"));
        assert!(!page.contains("<b>bold</b>"));
    }

    #[test]
    fn test_question_refilled_in_form_is_escaped() {
        let page = render_page(r#""quoted" question"#, 3, Some(&[]));
        assert!(page.contains("&quot;quoted&quot; question"));
    }

    #[test]
    fn test_empty_result_set_renders_notice() {
        let page = render_page("agent", 3, Some(&[]));
        assert!(page.contains("No relevant chunks found."));
    }
}
