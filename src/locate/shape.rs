//! Shape predicates shared by the path locator and the orchestrator.
//!
//! One named predicate replaces the duck-typed "does this look like the
//! directives" checks scattered through the legacy viewer, so the locator
//! and the orchestrator can never drift apart.

use serde_json::Value;

use crate::catalogue;

/// An object at or above this key count is a full record, not the
/// directive object itself.
const MAX_DIRECT_OBJECT_KEYS: usize = 10;

/// True when the payload already *is* the directive object: a small
/// object whose keys carry directive-related keywords. Declines when any
/// key is an exact container key (`directives`, `directives_anticipees`,
/// …) — that object is a wrapper and the path catalogue extracts the
/// value instead.
///
/// Threshold: one strong keyword, or two distinct weak ones. A small
/// object mentioning only `patient` is a person record, not a directive.
pub fn is_directive_shaped(value: &Value) -> bool {
    let Some(map) = value.as_object() else {
        return false;
    };
    if map.is_empty() || map.len() >= MAX_DIRECT_OBJECT_KEYS {
        return false;
    }
    if map
        .keys()
        .any(|key| catalogue::SPECIFIC_KEYS.contains(&key.as_str()))
    {
        return false;
    }

    let mut weak_seen: Vec<&str> = Vec::new();
    for key in map.keys() {
        let lower = key.to_lowercase();
        if catalogue::SHAPE_STRONG_KEYWORDS
            .iter()
            .any(|kw| lower.contains(kw))
        {
            return true;
        }
        for kw in catalogue::SHAPE_WEAK_KEYWORDS {
            if lower.contains(kw) && !weak_seen.contains(kw) {
                weak_seen.push(*kw);
            }
        }
    }
    weak_seen.len() >= 2
}

/// True for values with no usable content: null, blank text, empty
/// containers. Used both to skip hollow matches and to recognize the
/// true-empty payload case at the orchestrator boundary.
pub fn is_effectively_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(text) => text.trim().is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        Value::Number(_) | Value::Bool(_) => false,
    }
}
