//! Query term highlighting
//!
//! Wraps the meaningful words of a search query in `<mark>` tags wherever
//! they appear in retrieved content, so the user can see at a glance why a
//! chunk was returned. Matching is whole-word and case-insensitive; the
//! original casing of the matched text is preserved.

use std::collections::HashSet;

use lazy_static::lazy_static;
use regex::RegexBuilder;

lazy_static! {
    /// Words too common to be worth highlighting
    static ref STOP_WORDS: HashSet<&'static str> = [
        "i", "the", "is", "are", "was", "were", "a", "an", "and", "or", "but", "in", "on",
        "at", "to", "for", "of", "with", "by", "what", "how", "why", "when", "where", "who",
        "whom", "whose", "which", "that", "this", "these", "those", "tell", "me", "about",
        "should", "we", "use",
    ]
    .into_iter()
    .collect();
}

/// Extract the meaningful words from a search query.
///
/// Hyphenated words count as two words, surrounding punctuation is
/// stripped, and stop words are dropped.
pub fn extract_query_words(query: &str) -> Vec<String> {
    query
        .replace('-', " ")
        .split_whitespace()
        .filter_map(|word| {
            let clean = word
                .trim_matches(|c: char| c.is_ascii_punctuation())
                .to_lowercase();
            if clean.is_empty() || STOP_WORDS.contains(clean.as_str()) {
                None
            } else {
                Some(clean)
            }
        })
        .collect()
}

/// Highlight every query word that appears in `text`.
///
/// Returns the text unchanged when either input is empty or the query
/// contains only stop words.
pub fn highlight_query_terms(text: &str, query: &str) -> String {
    if text.is_empty() || query.is_empty() {
        return text.to_string();
    }

    let words = extract_query_words(query);
    if words.is_empty() {
        return text.to_string();
    }

    let alternation = words
        .iter()
        .map(|w| regex::escape(w))
        .collect::<Vec<_>>()
        .join("|");
    let pattern = format!(r"\b(?:{})\b", alternation);

    // Words are escaped above; if the pattern still fails to compile,
    // skip highlighting rather than drop the chunk
    let re = match RegexBuilder::new(&pattern).case_insensitive(true).build() {
        Ok(re) => re,
        Err(_) => return text.to_string(),
    };

    re.replace_all(text, |caps: &regex::Captures<'_>| {
        format!("<mark class=\"highlight\">{}</mark>", &caps[0])
    })
    .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_drops_stop_words() {
        assert_eq!(extract_query_words("What is an agent?"), vec!["agent"]);
    }

    #[test]
    fn test_extract_splits_hyphenated_words() {
        assert_eq!(extract_query_words("fine-tuning"), vec!["fine", "tuning"]);
    }

    #[test]
    fn test_extract_strips_punctuation_and_lowercases() {
        assert_eq!(
            extract_query_words("Agents, tools!"),
            vec!["agents", "tools"]
        );
    }

    #[test]
    fn test_highlight_wraps_matches() {
        let out = highlight_query_terms("The agent performs tasks", "agent");
        assert_eq!(
            out,
            "The <mark class=\"highlight\">agent</mark> performs tasks"
        );
    }

    #[test]
    fn test_highlight_preserves_case() {
        let out = highlight_query_terms("Agent rules. An AGENT acts.", "agent");
        assert!(out.contains("<mark class=\"highlight\">Agent</mark>"));
        assert!(out.contains("<mark class=\"highlight\">AGENT</mark>"));
    }

    #[test]
    fn test_highlight_whole_words_only() {
        let out = highlight_query_terms("agents agent agency", "agent");
        assert_eq!(
            out,
            "agents <mark class=\"highlight\">agent</mark> agency"
        );
    }

    #[test]
    fn test_highlight_stop_word_only_query_is_noop() {
        let text = "What this is about";
        assert_eq!(highlight_query_terms(text, "what is"), text);
    }

    #[test]
    fn test_highlight_empty_inputs() {
        assert_eq!(highlight_query_terms("", "agent"), "");
        assert_eq!(highlight_query_terms("text", ""), "text");
    }
}
