//! Markdown-to-HTML compaction module
//!
//! Converts plan descriptions written in the house Markdown dialect into
//! single styled HTML fragments suitable for marketplace description
//! fields, which reject fragments over a hard byte ceiling.
//!
//! The pipeline runs in three stages:
//!
//! - Tokenization into typed blocks (title, sections, bullets, rules)
//! - Rendering against a [`StyleSheet`] of inline declarations
//! - Compression, and when needed, ceiling enforcement that trims the
//!   optional section first and truncates at safe boundaries last

mod compact;
mod render;
mod style;
mod tokenize;
mod types;

// Re-export public API
pub use compact::{compact, compact_file, compress, convert, convert_file, CompactOutcome};
pub use render::HtmlRenderer;
pub use style::StyleSheet;
pub use tokenize::tokenize;
pub use types::{
    Block, CompactOptions, CompactOptionsBuilder, MarkdownError, Result, DEFAULT_CEILING,
    DEFAULT_HARD_CUT_MARGIN, DEFAULT_OPTIONAL_SECTION, DEFAULT_SAFETY_MARGIN, MIN_CEILING,
    MIN_MARGIN, OUTPUT_FILE_NAME,
};
