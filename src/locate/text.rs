//! String-content parser: payloads that arrive as serialized text rather
//! than structured trees, common when the content is a blob straight out
//! of the decryption step.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use crate::catalogue;

use super::paths;
use super::types::ExtractionResult;

/// Provenance prefix for content re-located inside parsed embedded JSON.
const PARSED_PREFIX: &str = "string.parsed.";

/// Tag-pair patterns for the XML-ish fallback, one per vocabulary entry.
/// Non-greedy, multiline, case-insensitive. `(?:\s[^>]*)?` keeps
/// `<directive>` from matching the opening of `<directives>`.
static TAG_PATTERNS: LazyLock<Vec<(&'static str, Regex)>> = LazyLock::new(|| {
    catalogue::TAG_VOCABULARY
        .iter()
        .map(|tag| {
            let pattern = format!(r"(?is)<{tag}(?:\s[^>]*)?>(.*?)</{tag}\s*>");
            (*tag, Regex::new(&pattern).expect("valid tag pattern"))
        })
        .collect()
});

/// Strategy adapter: applies [`parse`] when the payload is textual.
pub fn locate(value: &Value) -> Option<ExtractionResult> {
    parse(value.as_str()?)
}

/// Parse serialized text: strict JSON first, tag pairs second.
///
/// Gated on a cheap keyword check so unrelated blobs skip both parse
/// modes. Malformed JSON or tag soup is a miss, never an error.
pub fn parse(text: &str) -> Option<ExtractionResult> {
    if !passes_gate(text) {
        return None;
    }

    match serde_json::from_str::<Value>(text) {
        Ok(parsed) => paths::locate_by_catalogue(&parsed, PARSED_PREFIX),
        Err(_) => extract_tagged(text),
    }
}

/// Text mentioning none of the gate keywords is not worth parsing.
fn passes_gate(text: &str) -> bool {
    let lower = text.to_lowercase();
    catalogue::TEXT_GATE_KEYWORDS
        .iter()
        .any(|kw| lower.contains(kw))
}

/// Scan for the first vocabulary tag present; join all of its bodies.
fn extract_tagged(text: &str) -> Option<ExtractionResult> {
    for (tag, pattern) in TAG_PATTERNS.iter() {
        let bodies: Vec<&str> = pattern
            .captures_iter(text)
            .filter_map(|captures| captures.get(1))
            .map(|body| body.as_str().trim())
            .filter(|body| !body.is_empty())
            .collect();

        if !bodies.is_empty() {
            let joined = bodies.join("\n");
            let mut body = serde_json::Map::new();
            body.insert((*tag).to_string(), Value::String(joined));
            return Some(ExtractionResult::new(
                Value::Object(body),
                format!("xml.{tag}"),
            ));
        }
    }
    None
}
