pub mod catalogue;
pub mod diagnostic;
pub mod locate;

pub use diagnostic::{
    DiagnosticEvent, DiagnosticSink, NullSink, RecordingSink, StructuralSummary, TracingSink,
};
pub use locate::orchestrator::{locate_directives, strategy, DirectiveAccessor, DirectiveLocator};
pub use locate::types::{ExtractionResult, IdentityFragment};
pub use locate::AccessorError;
