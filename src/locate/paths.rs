//! Path locator: cheap, high-confidence lookup for payload shapes already
//! known to occur in partner exports.

use serde_json::Value;

use crate::catalogue;

use super::shape;
use super::types::{ExtractionResult, DIRECT_OBJECT_PROVENANCE};

/// First strategy of the pipeline.
///
/// Recognizes a payload that already is the directive object (guarding
/// against deeper strategies over-searching a correct payload), then
/// walks the ordered path catalogue.
pub fn locate(value: &Value) -> Option<ExtractionResult> {
    if shape::is_directive_shaped(value) {
        return Some(ExtractionResult::new(
            value.clone(),
            DIRECT_OBJECT_PROVENANCE,
        ));
    }
    locate_by_catalogue(value, "")
}

/// Walk the catalogue in trust order; the first path resolving to a
/// non-null value wins. `provenance_prefix` lets the string-content
/// parser re-apply the same catalogue with a `"string.parsed."` trail.
pub(crate) fn locate_by_catalogue(
    value: &Value,
    provenance_prefix: &str,
) -> Option<ExtractionResult> {
    for path in catalogue::KNOWN_PATHS {
        match resolve_path(value, path) {
            Some(found) if !found.is_null() => {
                return Some(ExtractionResult::new(
                    found.clone(),
                    format!("{provenance_prefix}{path}"),
                ));
            }
            _ => {}
        }
    }
    None
}

/// Descend a dotted path key-by-key. Aborts on a missing key or a
/// non-object intermediate value.
fn resolve_path<'a>(value: &'a Value, dotted: &str) -> Option<&'a Value> {
    let mut current = value;
    for segment in dotted.split('.') {
        current = current.as_object()?.get(segment)?;
    }
    Some(current)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    // ── Shape shortcut ──────────────────────────────────

    #[test]
    fn directive_shaped_payload_is_returned_whole() {
        let payload = json!({
            "texte_directive": "Pas d'acharnement",
            "date_creation": "2025-01-10"
        });
        let result = locate(&payload).unwrap();
        assert_eq!(result.provenance, DIRECT_OBJECT_PROVENANCE);
        assert_eq!(result.located, payload);
    }

    // ── Catalogue walk ──────────────────────────────────

    #[test]
    fn top_level_partner_key_wins() {
        let payload = json!({ "directives_anticipees": "Je refuse la réanimation" });
        let result = locate(&payload).unwrap();
        assert_eq!(result.provenance, "directives_anticipees");
        assert_eq!(result.located, json!("Je refuse la réanimation"));
    }

    #[test]
    fn nested_dossier_path_resolves() {
        let payload = json!({ "dossier": { "directives": { "texte": "…" } } });
        let result = locate(&payload).unwrap();
        assert_eq!(result.provenance, "dossier.directives");
        assert_eq!(result.located, json!({ "texte": "…" }));
    }

    #[test]
    fn path_order_encodes_trust() {
        // Both paths resolve; the earlier catalogue entry wins.
        let payload = json!({
            "directives_anticipees": "format partenaire",
            "dossier": { "directives": "format interne" }
        });
        let result = locate(&payload).unwrap();
        assert_eq!(result.provenance, "directives_anticipees");
    }

    #[test]
    fn null_valued_path_is_skipped() {
        let payload = json!({
            "directives_anticipees": null,
            "dossier": { "directives": "texte" }
        });
        let result = locate(&payload).unwrap();
        assert_eq!(result.provenance, "dossier.directives");
    }

    #[test]
    fn non_object_intermediate_aborts_path() {
        // `dossier` is a string, so `dossier.directives` cannot descend.
        let payload = json!({ "dossier": "pas un objet", "data": { "directives": "ok" } });
        let result = locate(&payload).unwrap();
        assert_eq!(result.provenance, "data.directives");
    }

    #[test]
    fn no_known_path_returns_none() {
        assert!(locate(&json!({ "foo": { "bar": 1 } })).is_none());
        assert!(locate(&json!("du texte")).is_none());
        assert!(locate(&json!(42)).is_none());
    }

    #[test]
    fn prefix_is_applied_to_provenance() {
        let payload = json!({ "content": { "directives": "Non réanimation" } });
        let result = locate_by_catalogue(&payload, "string.parsed.").unwrap();
        assert_eq!(result.provenance, "string.parsed.content.directives");
    }

    #[test]
    fn absence_is_a_normal_miss_not_an_error() {
        // Arrays, scalars, null: nothing matches, nothing panics.
        for payload in [json!([1, 2, 3]), json!(true), json!(null)] {
            assert!(locate(&payload).is_none());
        }
    }
}
