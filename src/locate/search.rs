//! Recursive searcher: last-resort structural search for directive-like
//! content anywhere in an arbitrarily deep, arbitrarily shaped tree.
//!
//! Depth-first, first match wins; a match at a shallower depth always
//! beats a deeper one because the walk returns immediately. Precedence at
//! each object node: exact container keys, then keyword density over the
//! node's key set, then descent into children.

use serde_json::{Map, Value};

use crate::catalogue;

use super::shape::is_effectively_empty;
use super::types::ExtractionResult;

/// Traversal budget. Payloads are plain deserialized data (no cycles),
/// but pathological nesting must not translate into unbounded work.
const MAX_SEARCH_DEPTH: usize = 64;

/// Provenance of a raw-text payload recognized by phrase.
const RAW_TEXT_PROVENANCE: &str = "texte";

/// Provenance of an opaque embedded PDF payload.
const PDF_PROVENANCE: &str = "pdf";

/// Third strategy of the pipeline.
pub fn locate(root: &Value) -> Option<ExtractionResult> {
    search_root(root, 0)
}

/// Shortcut rules that apply to a payload root (and again to the payload
/// wrapped under `contenu_dossier`, which some partners nest one level
/// deeper), before the general walk.
fn search_root(value: &Value, depth: usize) -> Option<ExtractionResult> {
    if depth >= MAX_SEARCH_DEPTH {
        tracing::warn!(depth, "directive search aborted: depth budget exhausted");
        return None;
    }

    if let Value::String(text) = value {
        if contains_directive_phrase(text) {
            return Some(ExtractionResult::new(value.clone(), RAW_TEXT_PROVENANCE));
        }
        if text.starts_with(catalogue::PDF_DATA_URI_PREFIX) {
            // Opaque embedded document; not parsed further.
            return Some(ExtractionResult::new(value.clone(), PDF_PROVENANCE));
        }
        return None;
    }

    if let Some(map) = value.as_object() {
        for key in catalogue::ROOT_KEYS {
            if let Some(found) = map.get(*key) {
                if !is_effectively_empty(found) {
                    return Some(ExtractionResult::new(found.clone(), *key));
                }
            }
        }
        if let Some(inner) = map.get(catalogue::WRAPPER_KEY) {
            if let Some(found) = search_root(inner, depth + 1) {
                return Some(found);
            }
        }
    }

    walk(value, "root", depth)
}

/// General recursive walk over objects and arrays.
fn walk(value: &Value, path: &str, depth: usize) -> Option<ExtractionResult> {
    if depth >= MAX_SEARCH_DEPTH {
        tracing::warn!(path, "directive search aborted: depth budget exhausted");
        return None;
    }

    match value {
        Value::Object(map) => {
            // Exact container key: highest precedence at this level.
            for key in catalogue::SPECIFIC_KEYS {
                if let Some(found) = map.get(*key) {
                    if !is_effectively_empty(found) {
                        return Some(ExtractionResult::new(
                            found.clone(),
                            format!("{path}.{key}"),
                        ));
                    }
                }
            }

            // Broader, lower-confidence match: enough directive-related
            // keywords across the key set make the whole node the match.
            if keyword_density_qualifies(map) {
                return Some(ExtractionResult::new(value.clone(), path.to_string()));
            }

            for (key, child) in map {
                let child_path = format!("{path}.{key}");
                match child {
                    Value::String(text) => {
                        if contains_directive_phrase(text) {
                            return Some(ExtractionResult::new(child.clone(), child_path));
                        }
                    }
                    Value::Object(_) | Value::Array(_) => {
                        if let Some(found) = walk(child, &child_path, depth + 1) {
                            return Some(found);
                        }
                    }
                    _ => {}
                }
            }
            None
        }
        Value::Array(items) => {
            for (index, item) in items.iter().enumerate() {
                if let Some(found) = walk(item, &format!("{path}[{index}]"), depth + 1) {
                    return Some(found);
                }
            }
            None
        }
        _ => None,
    }
}

/// One strong keyword, or two distinct weak ones, across the node's keys.
fn keyword_density_qualifies(map: &Map<String, Value>) -> bool {
    let mut weak_seen: Vec<&str> = Vec::new();
    for key in map.keys() {
        let lower = key.to_lowercase();
        if catalogue::STRONG_KEYWORDS
            .iter()
            .any(|kw| lower.contains(kw))
        {
            return true;
        }
        for kw in catalogue::WEAK_KEYWORDS {
            if lower.contains(kw) && !weak_seen.contains(kw) {
                weak_seen.push(*kw);
            }
        }
    }
    weak_seen.len() >= 2
}

/// Narrative text that *is* the directive content, markers or not.
fn contains_directive_phrase(text: &str) -> bool {
    catalogue::DIRECTIVE_PHRASES
        .iter()
        .any(|phrase| text.contains(phrase))
}
