// Public modules
pub mod defaults;
pub mod document;
pub mod error;
pub mod replace;
pub mod surface;

// Internal modules - not part of public API
pub(crate) mod paths;

// Re-export common types for convenience
pub use document::{replace_in_document, DocumentReplacement, Query, Summary, SummaryKind};
pub use error::{Error, ErrorCode, Result};
pub use replace::{CompiledPattern, ReplaceOptions, ReplaceResult, Scope, Segment, SegmentKind};
pub use surface::{apply_to_surface, ContentModel, DocumentSurface, FormFields, InMemory, SurfaceOutcome};
