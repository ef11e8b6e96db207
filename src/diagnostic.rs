//! Diagnostic channel for the location engine.
//!
//! Strategies and the orchestrator report what they saw and what matched
//! through a [`DiagnosticSink`]; the sink is observability only and is
//! never on the decision path. Summaries are structural — key lists,
//! sizes, truncated previews — so payload bodies never land in logs
//! wholesale.

use std::sync::Mutex;

use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

/// Maximum characters of text carried in a preview.
pub const PREVIEW_MAX_CHARS: usize = 96;

/// Maximum object keys listed in a summary.
pub const SUMMARY_MAX_KEYS: usize = 12;

// ──────────────────────────────────────────────
// Structural summaries
// ──────────────────────────────────────────────

/// Shape of a payload node, without its content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StructuralSummary {
    /// One of `object`, `array`, `text`, `number`, `boolean`, `null`.
    pub kind: &'static str,
    /// Key count, element count, or character count; 0 for scalars.
    pub size: usize,
    /// First [`SUMMARY_MAX_KEYS`] object keys, empty otherwise.
    pub keys: Vec<String>,
    /// Truncated text preview, text nodes only.
    pub preview: Option<String>,
}

/// Summarize a payload node for the diagnostic channel.
pub fn summarize(value: &Value) -> StructuralSummary {
    match value {
        Value::Object(map) => StructuralSummary {
            kind: "object",
            size: map.len(),
            keys: map.keys().take(SUMMARY_MAX_KEYS).cloned().collect(),
            preview: None,
        },
        Value::Array(items) => StructuralSummary {
            kind: "array",
            size: items.len(),
            keys: Vec::new(),
            preview: None,
        },
        Value::String(text) => StructuralSummary {
            kind: "text",
            size: text.chars().count(),
            keys: Vec::new(),
            preview: Some(truncate_preview(text)),
        },
        Value::Number(_) => scalar_summary("number"),
        Value::Bool(_) => scalar_summary("boolean"),
        Value::Null => scalar_summary("null"),
    }
}

fn scalar_summary(kind: &'static str) -> StructuralSummary {
    StructuralSummary {
        kind,
        size: 0,
        keys: Vec::new(),
        preview: None,
    }
}

/// Truncate text to [`PREVIEW_MAX_CHARS`], char-boundary safe.
pub fn truncate_preview(text: &str) -> String {
    let mut chars = text.chars();
    let head: String = chars.by_ref().take(PREVIEW_MAX_CHARS).collect();
    if chars.next().is_some() {
        format!("{head}…")
    } else {
        head
    }
}

// ──────────────────────────────────────────────
// Sink
// ──────────────────────────────────────────────

/// One observable step of an extraction run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum DiagnosticEvent {
    /// A payload arrived at the orchestrator.
    PayloadReceived { summary: StructuralSummary },
    /// A strategy ran and found nothing.
    StrategyMissed { strategy: &'static str },
    /// A strategy produced the result.
    StrategyMatched {
        strategy: &'static str,
        provenance: String,
        located: StructuralSummary,
    },
    /// The external accessor failed; the pipeline continued.
    AccessorFailed { detail: String },
    /// Both payload and accessor were empty — the true-empty case.
    EmptyPayload,
}

/// Receives diagnostic events. Implementations must not block or fail the
/// pipeline; consumers must not depend on event content or format, only
/// on their existence for troubleshooting.
pub trait DiagnosticSink: Send + Sync {
    fn record(&self, extraction_id: Uuid, event: DiagnosticEvent);
}

impl<S: DiagnosticSink + ?Sized> DiagnosticSink for std::sync::Arc<S> {
    fn record(&self, extraction_id: Uuid, event: DiagnosticEvent) {
        (**self).record(extraction_id, event);
    }
}

/// Default sink: structured `tracing` output, the same register as the
/// rest of the application.
#[derive(Debug, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn record(&self, extraction_id: Uuid, event: DiagnosticEvent) {
        match event {
            DiagnosticEvent::PayloadReceived { summary } => tracing::debug!(
                extraction_id = %extraction_id,
                kind = summary.kind,
                size = summary.size,
                "payload received"
            ),
            DiagnosticEvent::StrategyMissed { strategy } => tracing::debug!(
                extraction_id = %extraction_id,
                strategy,
                "strategy found nothing"
            ),
            DiagnosticEvent::StrategyMatched {
                strategy,
                provenance,
                located,
            } => tracing::info!(
                extraction_id = %extraction_id,
                strategy,
                provenance = %provenance,
                kind = located.kind,
                "directives located"
            ),
            DiagnosticEvent::AccessorFailed { detail } => tracing::warn!(
                extraction_id = %extraction_id,
                error = %detail,
                "external accessor failed, falling back to internal strategies"
            ),
            DiagnosticEvent::EmptyPayload => tracing::debug!(
                extraction_id = %extraction_id,
                "empty payload and no accessor result"
            ),
        }
    }
}

/// Sink that discards everything.
#[derive(Debug, Default)]
pub struct NullSink;

impl DiagnosticSink for NullSink {
    fn record(&self, _extraction_id: Uuid, _event: DiagnosticEvent) {}
}

/// Sink that captures events in memory. Test support, also usable by
/// embedders that ship diagnostics elsewhere.
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: Mutex<Vec<(Uuid, DiagnosticEvent)>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything recorded so far.
    pub fn events(&self) -> Vec<(Uuid, DiagnosticEvent)> {
        self.events.lock().map(|e| e.clone()).unwrap_or_default()
    }
}

impl DiagnosticSink for RecordingSink {
    fn record(&self, extraction_id: Uuid, event: DiagnosticEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push((extraction_id, event));
        }
    }
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────
