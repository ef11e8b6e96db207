use serde::Serialize;
use serde_json::Value;

/// Provenance of the synthetic placeholder record. The one provenance
/// that must trigger the "best-effort reconstruction" disclaimer
/// downstream.
pub const PLACEHOLDER_PROVENANCE: &str = "image miroir";

/// Provenance of a result produced by the external accessor.
pub const ACCESSOR_PROVENANCE: &str = "fonction getDirectives";

/// Provenance of a payload recognized as already being the directive
/// object itself.
pub const DIRECT_OBJECT_PROVENANCE: &str = "objet_direct";

/// A located directive, tagged with the trail that produced it.
///
/// Created fresh per extraction call, immediately consumed for display,
/// never cached or mutated.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtractionResult {
    /// The tree fragment or string holding the directive content.
    pub located: Value,
    /// Human-readable trail: which strategy and path produced the result
    /// (`"contenu.directives_anticipees"`, `"string.parsed.directives"`,
    /// `"root.personne.directives[2]"`, `"image miroir"`, …).
    pub provenance: String,
}

impl ExtractionResult {
    pub fn new(located: Value, provenance: impl Into<String>) -> Self {
        Self {
            located,
            provenance: provenance.into(),
        }
    }

    /// True when the result is the synthesized stand-in rather than
    /// content located in the payload.
    pub fn is_placeholder(&self) -> bool {
        self.provenance == PLACEHOLDER_PROVENANCE
    }

    /// Whether downstream UI must show the best-effort-reconstruction
    /// disclaimer.
    pub fn requires_disclaimer(&self) -> bool {
        self.is_placeholder()
    }
}

/// A locating strategy: pure, stateless, order-sensitive only in how the
/// orchestrator sequences it. Returns `None` on miss; malformed input is
/// a miss, never an error.
pub type Strategy = fn(&Value) -> Option<ExtractionResult>;

/// Best-effort identity mined from a payload for the placeholder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IdentityFragment {
    pub first_name: String,
    pub last_name: String,
}

impl IdentityFragment {
    /// Generic stand-in used when no recognizable identity shape exists.
    /// Callers must never treat these defaults as a real identity.
    pub const DEFAULT_FIRST_NAME: &'static str = "Prénom";
    pub const DEFAULT_LAST_NAME: &'static str = "Nom";

    pub fn generic() -> Self {
        Self {
            first_name: Self::DEFAULT_FIRST_NAME.to_string(),
            last_name: Self::DEFAULT_LAST_NAME.to_string(),
        }
    }

    /// True when the fragment still carries the generic defaults.
    pub fn is_generic(&self) -> bool {
        self.first_name == Self::DEFAULT_FIRST_NAME && self.last_name == Self::DEFAULT_LAST_NAME
    }

    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}
