//! Extraction orchestrator: the engine's single entry point.
//!
//! Encodes the trust ordering as an explicit strategy list and
//! short-circuits on the first success. No step may fail past this
//! boundary: strategy misses are absorbed, accessor failures are logged
//! and downgraded, and the placeholder synthesizer guarantees a result
//! for any non-empty payload.

use std::panic::{catch_unwind, AssertUnwindSafe};

use serde_json::Value;
use uuid::Uuid;

use crate::diagnostic::{summarize, DiagnosticEvent, DiagnosticSink, TracingSink};

use super::paths;
use super::placeholder;
use super::search;
use super::shape;
use super::text;
use super::types::{ExtractionResult, Strategy, ACCESSOR_PROVENANCE, DIRECT_OBJECT_PROVENANCE};
use super::AccessorError;

/// Strategy names carried in diagnostic events.
pub mod strategy {
    pub const ACCESSOR: &str = "accessor";
    pub const DIRECT_OBJECT: &str = "direct_object";
    pub const KNOWN_PATHS: &str = "known_paths";
    pub const STRING_CONTENT: &str = "string_content";
    pub const RECURSIVE_SEARCH: &str = "recursive_search";
    pub const PLACEHOLDER: &str = "placeholder";
}

/// Internal strategies in decreasing trust order. The direct-object
/// shortcut runs before the table, the placeholder after it.
const PIPELINE: &[(&str, Strategy)] = &[
    (strategy::KNOWN_PATHS, paths::locate),
    (strategy::STRING_CONTENT, text::locate),
    (strategy::RECURSIVE_SEARCH, search::locate),
];

/// Higher-trust alternate source (a system that already parsed the
/// directive elsewhere), tried ahead of all internal strategies.
pub type DirectiveAccessor = dyn Fn() -> Result<Option<Value>, AccessorError>;

/// Sequences the strategies over a payload and reports each step to the
/// diagnostic sink.
pub struct DirectiveLocator {
    sink: Box<dyn DiagnosticSink>,
}

impl Default for DirectiveLocator {
    fn default() -> Self {
        Self::new(Box::new(TracingSink))
    }
}

impl DirectiveLocator {
    pub fn new(sink: Box<dyn DiagnosticSink>) -> Self {
        Self { sink }
    }

    /// Locate the advance directives inside `content`.
    ///
    /// Returns `None` only for the true-empty case (nothing to show);
    /// any non-empty payload yields a result, placeholder included.
    pub fn locate(&self, content: Option<&Value>) -> Option<ExtractionResult> {
        self.locate_with_accessor(content, None)
    }

    /// Locate with an optional external accessor tried first.
    pub fn locate_with_accessor(
        &self,
        content: Option<&Value>,
        accessor: Option<&DirectiveAccessor>,
    ) -> Option<ExtractionResult> {
        let extraction_id = Uuid::new_v4();

        if let Some(value) = content {
            self.sink.record(
                extraction_id,
                DiagnosticEvent::PayloadReceived {
                    summary: summarize(value),
                },
            );
        }

        if let Some(accessor) = accessor {
            match run_accessor(accessor) {
                Ok(Some(value)) if !shape::is_effectively_empty(&value) => {
                    let result = ExtractionResult::new(value, ACCESSOR_PROVENANCE);
                    return Some(self.matched(extraction_id, strategy::ACCESSOR, result));
                }
                Ok(_) => self.missed(extraction_id, strategy::ACCESSOR),
                Err(error) => self.sink.record(
                    extraction_id,
                    DiagnosticEvent::AccessorFailed {
                        detail: error.to_string(),
                    },
                ),
            }
        }

        let value = match content.filter(|v| !shape::is_effectively_empty(v)) {
            Some(value) => value,
            None => {
                // True empty: nothing to show, distinct from "could not
                // locate".
                self.sink.record(extraction_id, DiagnosticEvent::EmptyPayload);
                return None;
            }
        };

        if shape::is_directive_shaped(value) {
            let result = ExtractionResult::new(value.clone(), DIRECT_OBJECT_PROVENANCE);
            return Some(self.matched(extraction_id, strategy::DIRECT_OBJECT, result));
        }

        for &(name, locate) in PIPELINE {
            match locate(value) {
                Some(result) => return Some(self.matched(extraction_id, name, result)),
                None => self.missed(extraction_id, name),
            }
        }

        let result = placeholder::synthesize(value);
        Some(self.matched(extraction_id, strategy::PLACEHOLDER, result))
    }

    fn matched(
        &self,
        extraction_id: Uuid,
        strategy: &'static str,
        result: ExtractionResult,
    ) -> ExtractionResult {
        self.sink.record(
            extraction_id,
            DiagnosticEvent::StrategyMatched {
                strategy,
                provenance: result.provenance.clone(),
                located: summarize(&result.located),
            },
        );
        result
    }

    fn missed(&self, extraction_id: Uuid, strategy: &'static str) {
        self.sink
            .record(extraction_id, DiagnosticEvent::StrategyMissed { strategy });
    }
}

/// Locate with the default tracing sink and no accessor.
pub fn locate_directives(content: Option<&Value>) -> Option<ExtractionResult> {
    DirectiveLocator::default().locate(content)
}

/// Run the accessor behind an unwind boundary: a panicking accessor is a
/// failed accessor, never a crashed extraction.
fn run_accessor(accessor: &DirectiveAccessor) -> Result<Option<Value>, AccessorError> {
    catch_unwind(AssertUnwindSafe(accessor)).unwrap_or(Err(AccessorError::Panicked))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostic::{NullSink, RecordingSink};
    use crate::locate::types::PLACEHOLDER_PROVENANCE;
    use proptest::prelude::*;
    use proptest::strategy::Strategy;
    use serde_json::json;
    use std::sync::Arc;

    fn quiet() -> DirectiveLocator {
        DirectiveLocator::new(Box::new(NullSink))
    }

    // ── End-to-end scenarios ────────────────────────────

    /// S-01: known partner key at the top level.
    #[test]
    fn scenario_top_level_partner_key() {
        let payload = json!({ "directives_anticipees": "Je refuse la réanimation" });
        let result = quiet().locate(Some(&payload)).unwrap();
        assert_eq!(result.located, json!("Je refuse la réanimation"));
        assert_eq!(result.provenance, "directives_anticipees");
    }

    /// S-02: nested dossier path.
    #[test]
    fn scenario_nested_dossier_path() {
        let payload = json!({ "dossier": { "directives": { "texte": "…" } } });
        let result = quiet().locate(Some(&payload)).unwrap();
        assert_eq!(result.located, json!({ "texte": "…" }));
        assert_eq!(result.provenance, "dossier.directives");
    }

    /// S-03: serialized JSON blob.
    #[test]
    fn scenario_embedded_json_string() {
        let payload = json!(r#"{"content":{"directives":"Non réanimation"}}"#);
        let result = quiet().locate(Some(&payload)).unwrap();
        assert_eq!(result.located, json!("Non réanimation"));
        assert_eq!(result.provenance, "string.parsed.content.directives");
    }

    /// S-04: tag-style text that is not valid JSON.
    #[test]
    fn scenario_tagged_text() {
        let payload = json!("<directive>Pas de ventilation</directive>");
        let result = quiet().locate(Some(&payload)).unwrap();
        assert_eq!(result.located, json!({ "directive": "Pas de ventilation" }));
        assert_eq!(result.provenance, "xml.directive");
    }

    /// S-05: nothing directive-shaped anywhere — placeholder fires.
    #[test]
    fn scenario_placeholder_with_mined_identity() {
        let payload = json!({
            "patient": { "prenom": "Jean", "nom": "Dupont" },
            "notes": "rien de pertinent ici"
        });
        let result = quiet().locate(Some(&payload)).unwrap();
        assert_eq!(result.provenance, PLACEHOLDER_PROVENANCE);
        assert!(result.requires_disclaimer());
        let title = result.located["titre"].as_str().unwrap();
        assert!(title.contains("Jean Dupont"));
    }

    /// S-06: empty payload, no accessor — the true-empty case.
    #[test]
    fn scenario_empty_payload_is_none() {
        assert!(quiet().locate(Some(&json!({}))).is_none());
        assert!(quiet().locate(Some(&json!(null))).is_none());
        assert!(quiet().locate(Some(&json!(""))).is_none());
        assert!(quiet().locate(None).is_none());
    }

    // ── Accessor ────────────────────────────────────────

    #[test]
    fn accessor_outranks_every_internal_strategy() {
        let payload = json!({ "directives_anticipees": "interne" });
        let accessor: &DirectiveAccessor = &|| Ok(Some(json!("déjà extrait ailleurs")));
        let result = quiet()
            .locate_with_accessor(Some(&payload), Some(accessor))
            .unwrap();
        assert_eq!(result.provenance, ACCESSOR_PROVENANCE);
        assert_eq!(result.located, json!("déjà extrait ailleurs"));
    }

    #[test]
    fn accessor_empty_result_is_a_miss() {
        let payload = json!({ "directives_anticipees": "interne" });
        let accessor: &DirectiveAccessor = &|| Ok(Some(json!({})));
        let result = quiet()
            .locate_with_accessor(Some(&payload), Some(accessor))
            .unwrap();
        assert_eq!(result.provenance, "directives_anticipees");
    }

    #[test]
    fn accessor_error_falls_back_to_internal_strategies() {
        let payload = json!({ "directives_anticipees": "interne" });
        let accessor: &DirectiveAccessor =
            &|| Err(AccessorError::Unavailable("service coupé".into()));
        let result = quiet()
            .locate_with_accessor(Some(&payload), Some(accessor))
            .unwrap();
        assert_eq!(result.provenance, "directives_anticipees");
    }

    #[test]
    fn accessor_panic_is_contained() {
        let payload = json!({ "directives_anticipees": "interne" });
        let accessor: &DirectiveAccessor = &|| panic!("accesseur cassé");
        let result = quiet()
            .locate_with_accessor(Some(&payload), Some(accessor))
            .unwrap();
        assert_eq!(result.provenance, "directives_anticipees");
    }

    #[test]
    fn empty_payload_with_empty_accessor_is_none() {
        let accessor: &DirectiveAccessor = &|| Ok(None);
        assert!(quiet()
            .locate_with_accessor(Some(&json!({})), Some(accessor))
            .is_none());
    }

    #[test]
    fn accessor_alone_can_produce_the_result() {
        let accessor: &DirectiveAccessor = &|| Ok(Some(json!({ "texte": "présent" })));
        let result = quiet()
            .locate_with_accessor(None, Some(accessor))
            .unwrap();
        assert_eq!(result.provenance, ACCESSOR_PROVENANCE);
    }

    // ── Trust ordering ──────────────────────────────────

    #[test]
    fn direct_object_wins_over_deep_matches() {
        // Satisfies the shape heuristic AND contains a deep match the
        // recursive searcher would find: the shallower, higher-trust
        // strategy must win.
        let payload = json!({
            "instruction_medicale": "présente",
            "annexe": { "directives_anticipees": "niveau profond" }
        });
        let result = quiet().locate(Some(&payload)).unwrap();
        assert_eq!(result.provenance, DIRECT_OBJECT_PROVENANCE);
        assert_eq!(result.located, payload);
    }

    #[test]
    fn located_content_never_reports_placeholder_provenance() {
        let payload = json!({ "dossier": { "directives": "texte" } });
        let result = quiet().locate(Some(&payload)).unwrap();
        assert_ne!(result.provenance, PLACEHOLDER_PROVENANCE);
        assert!(!result.requires_disclaimer());
    }

    // ── Idempotence ─────────────────────────────────────

    #[test]
    fn repeated_runs_are_identical_for_located_content() {
        let payload = json!({ "content": { "directives": "stable" } });
        let locator = quiet();
        let first = locator.locate(Some(&payload)).unwrap();
        let second = locator.locate(Some(&payload)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn repeated_placeholder_runs_agree_modulo_date() {
        let payload = json!({ "notes": "rien" });
        let locator = quiet();
        let first = locator.locate(Some(&payload)).unwrap();
        let second = locator.locate(Some(&payload)).unwrap();
        assert_eq!(first.provenance, second.provenance);
        // The creation date is the synthesizer's only impurity; compare
        // the rest of the record.
        assert_eq!(first.located["titre"], second.located["titre"]);
        assert_eq!(
            first.located["personne_confiance"],
            second.located["personne_confiance"]
        );
        assert_eq!(first.located["remarques"], second.located["remarques"]);
    }

    // ── Diagnostics ─────────────────────────────────────

    #[test]
    fn sink_sees_the_matching_strategy() {
        let sink = Arc::new(RecordingSink::new());
        let locator = DirectiveLocator::new(Box::new(Arc::clone(&sink)));
        let payload = json!({ "directives_anticipees": "x" });
        locator.locate(Some(&payload)).unwrap();

        let events = sink.events();
        assert!(matches!(
            events.first(),
            Some((_, DiagnosticEvent::PayloadReceived { .. }))
        ));
        assert!(events.iter().any(|(_, event)| matches!(
            event,
            DiagnosticEvent::StrategyMatched { strategy, .. }
                if *strategy == strategy::KNOWN_PATHS
        )));
    }

    #[test]
    fn sink_sees_accessor_failures() {
        let sink = Arc::new(RecordingSink::new());
        let locator = DirectiveLocator::new(Box::new(Arc::clone(&sink)));
        let accessor: &DirectiveAccessor =
            &|| Err(AccessorError::Malformed("pas du JSON".into()));
        let payload = json!({ "directives": "x" });
        locator.locate_with_accessor(Some(&payload), Some(accessor));

        assert!(sink.events().iter().any(|(_, event)| matches!(
            event,
            DiagnosticEvent::AccessorFailed { .. }
        )));
    }

    // ── Totality ────────────────────────────────────────

    fn arb_payload() -> impl proptest::strategy::Strategy<Value = Value> {
        let leaf = prop_oneof![
            Just(Value::Null),
            any::<bool>().prop_map(Value::Bool),
            any::<i64>().prop_map(Value::from),
            "[a-zA-Z0-9éèà ]{0,16}".prop_map(Value::String),
        ];
        leaf.prop_recursive(4, 48, 6, |inner| {
            prop_oneof![
                proptest::collection::vec(inner.clone(), 0..5).prop_map(Value::Array),
                proptest::collection::btree_map("[a-z_]{1,10}", inner, 0..5)
                    .prop_map(|map| Value::Object(map.into_iter().collect())),
            ]
        })
    }

    proptest! {
        /// Any non-empty payload yields a result; only the true-empty
        /// case yields `None`.
        #[test]
        fn totality_over_arbitrary_payloads(payload in arb_payload()) {
            let result = quiet().locate(Some(&payload));
            if shape::is_effectively_empty(&payload) {
                prop_assert!(result.is_none());
            } else {
                let result = result.expect("non-empty payload must yield a result");
                prop_assert!(!result.provenance.is_empty());
            }
        }

        /// Two runs over the same payload report the same provenance.
        #[test]
        fn provenance_is_deterministic(payload in arb_payload()) {
            let locator = quiet();
            let first = locator.locate(Some(&payload));
            let second = locator.locate(Some(&payload));
            prop_assert_eq!(
                first.map(|r| r.provenance),
                second.map(|r| r.provenance)
            );
        }
    }
}
