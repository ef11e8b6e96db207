//! Lookup catalogues for the directive-location engine.
//!
//! Every list here is configuration data, not algorithm: partner systems
//! come and go, and the keyword tiers were grown from real payloads rather
//! than designed up front. Changing a table must never require touching
//! the strategies that consume it.

/// Dotted paths known to hold advance directives in partner exports,
/// ordered by trust: the most specific / most common partner format first.
/// The path walk returns on the first entry that resolves to a non-null
/// value, so order is load-bearing.
pub const KNOWN_PATHS: &[&str] = &[
    "directives_anticipees",
    "content.directives",
    "contenu.directives_anticipees",
    "dossier.directives",
    "document.directives",
    "data.directives",
    "xml.directives",
    "contenu.directives",
    "dossier.directives_anticipees",
    "medical_record.directives",
    "data.advance_directives",
    "record.directives",
];

/// Keys whose value *is* the directive content wherever they appear.
/// Checked with exact equality during the recursive walk; also used by the
/// shape predicate to tell a wrapper object apart from the directive
/// object itself.
pub const SPECIFIC_KEYS: &[&str] = &[
    "directives_anticipees",
    "directives",
    "directive_anticipee",
    "directive",
];

/// Root-level shortcut keys, tried before any tree walk.
pub const ROOT_KEYS: &[&str] = &["directives_anticipees", "directives"];

/// Partner convention: some exports wrap the whole record one level
/// deeper under this key.
pub const WRAPPER_KEY: &str = "contenu_dossier";

/// Keywords that, on their own, mark a key as directive-related.
pub const STRONG_KEYWORDS: &[&str] = &[
    "directive",
    "anticipe",
    "wish",
    "souhaits",
    "volonte",
    "consent",
    "reanimation",
    "resuscitation",
];

/// Keywords that are only indicative in combination: two distinct weak
/// hits are needed before a node is treated as a match. Keeps a node that
/// merely mentions "patient" from being mistaken for the directives.
pub const WEAK_KEYWORDS: &[&str] = &[
    "medical",
    "soin",
    "patient",
    "health",
    "care",
    "instruction",
    "preference",
    "decision",
    "traitement",
    "fin",
    "vie",
    "personne",
    "confiance",
    "contenu",
    "date_creation",
];

/// Keywords for the direct-object shape heuristic, same two-tier scheme.
/// Kept separate from the walk tiers: the shape check runs on payloads
/// that may be the directive record itself, where `instruction` and
/// `confiance` are strong signals.
pub const SHAPE_STRONG_KEYWORDS: &[&str] = &["directive", "anticipee", "instruction", "confiance"];

/// Weak tier of the shape heuristic.
pub const SHAPE_WEAK_KEYWORDS: &[&str] = &["personne", "medical", "patient"];

/// Cheap gate for the string-content parser: text mentioning none of
/// these is not worth a parse attempt.
pub const TEXT_GATE_KEYWORDS: &[&str] = &["directive", "medical", "patient"];

/// Tag names recognized by the XML-ish fallback scan, in trust order.
pub const TAG_VOCABULARY: &[&str] = &[
    "directive",
    "directives",
    "directivesAnticipees",
    "wishes",
    "instructions",
];

/// Literal phrases that identify narrative text as directive content.
/// Matched as-is; the first two cover the capitalizations seen in real
/// exports. TODO: extend with the Dutch phrases once the NL partner
/// export lands.
pub const DIRECTIVE_PHRASES: &[&str] = &[
    "directives anticipées",
    "Directives anticipées",
    "Personne de confiance",
];

/// Data-URI prefix marking an opaque embedded PDF directive.
pub const PDF_DATA_URI_PREFIX: &str = "data:application/pdf";
