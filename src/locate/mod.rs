//! Directive-location engine.
//!
//! Given an arbitrary decrypted record payload of unknown shape, locate
//! the sub-structure holding the person's advance directives, or
//! deterministically synthesize a clearly-labeled placeholder. Strategies
//! run in decreasing trust order and the first match wins; the pipeline
//! is total for non-empty input and never propagates an error.

pub mod orchestrator;
pub mod paths;
pub mod placeholder;
pub mod search;
pub mod shape;
pub mod text;
pub mod types;

pub use orchestrator::{DirectiveAccessor, DirectiveLocator};
pub use types::{ExtractionResult, IdentityFragment, Strategy};

use thiserror::Error;

/// Failure channel for the optional external accessor. Never escapes the
/// orchestrator: any variant is logged and downgraded to a miss.
#[derive(Error, Debug)]
pub enum AccessorError {
    #[error("directive source unavailable: {0}")]
    Unavailable(String),

    #[error("directive source returned a malformed payload: {0}")]
    Malformed(String),

    #[error("directive source panicked")]
    Panicked,
}
