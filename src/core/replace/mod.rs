//! Markup-safe search and replace.
//!
//! Splits markup into tag and text segments, compiles the search text into a
//! literal (optionally whole-word, optionally case-insensitive) pattern, and
//! rewrites only the text segments. Tags pass through byte-for-byte.

mod pattern;
mod replacer;
mod segment;

pub use pattern::{CompiledPattern, ReplaceOptions};
pub use replacer::{replace, ReplaceResult, Scope};
pub use segment::{join_segments, segment, Segment, SegmentKind};
