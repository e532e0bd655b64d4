//! Common types for the markdown module

use std::path::PathBuf;
use thiserror::Error;

// ============================================================
// Constants
// ============================================================

/// Default fragment ceiling in bytes (the marketplace description field limit)
pub const DEFAULT_CEILING: usize = 4000;

/// Bytes reserved below the ceiling when searching for a safe cut boundary
pub const DEFAULT_SAFETY_MARGIN: usize = 100;

/// Bytes reserved below the ceiling for the last-resort cut
pub const DEFAULT_HARD_CUT_MARGIN: usize = 50;

/// Smallest ceiling the builder accepts; below this the margins stop
/// leaving room for real content plus the container tags
pub const MIN_CEILING: usize = 512;

/// Smallest margin the builder accepts; a truncation can append up to
/// 25 bytes of closing tags past the cut, which must fit in the margin
pub const MIN_MARGIN: usize = 32;

/// Section header whose block is dropped first when a fragment runs long
pub const DEFAULT_OPTIONAL_SECTION: &str = "What This Isn't";

/// File name the compactor writes inside each plan's output directory
pub const OUTPUT_FILE_NAME: &str = "marketplace_description.html";

// ============================================================
// Error Types
// ============================================================

/// Markdown pipeline error types
#[derive(Debug, Error)]
pub enum MarkdownError {
    #[error("Source file not found: {0}")]
    SourceNotFound(PathBuf),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, MarkdownError>;

// ============================================================
// Core Data Structures
// ============================================================

/// A classified run of source lines, produced by the tokenizer and
/// consumed by the renderer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    /// First line of the document starting with a single `#`
    Title(String),
    /// `##` section header
    Section(String),
    /// `###` subsection header
    Sub(String),
    /// One or more consecutive `- ` lines, markers stripped
    Bullets(Vec<String>),
    /// Line of three or more hyphens
    Rule,
    /// Any other non-blank line
    Paragraph(String),
}

impl Block {
    /// Check whether this is a section header with the given text
    /// (case-insensitive)
    pub fn is_section_titled(&self, title: &str) -> bool {
        match self {
            Block::Section(text) => text.eq_ignore_ascii_case(title),
            _ => false,
        }
    }

    /// Short name of the block kind, used in debug traces
    pub fn kind_name(&self) -> &'static str {
        match self {
            Block::Title(_) => "title",
            Block::Section(_) => "section",
            Block::Sub(_) => "sub",
            Block::Bullets(_) => "bullets",
            Block::Rule => "rule",
            Block::Paragraph(_) => "paragraph",
        }
    }
}

// ============================================================
// Options
// ============================================================

/// Options for fragment compaction
#[derive(Debug, Clone)]
pub struct CompactOptions {
    /// Maximum fragment length in bytes
    pub ceiling: usize,

    /// Reserved bytes below the ceiling when searching for a close-tag
    /// boundary; also guarantees room for the appended closers
    pub safety_margin: usize,

    /// Reserved bytes below the ceiling for the last-resort cut when no
    /// close-tag boundary exists
    pub hard_cut_margin: usize,

    /// Header text of the section sacrificed first when over ceiling
    pub optional_section: String,
}

impl Default for CompactOptions {
    fn default() -> Self {
        Self {
            ceiling: DEFAULT_CEILING,
            safety_margin: DEFAULT_SAFETY_MARGIN,
            hard_cut_margin: DEFAULT_HARD_CUT_MARGIN,
            optional_section: DEFAULT_OPTIONAL_SECTION.to_string(),
        }
    }
}

impl CompactOptions {
    /// Create an options builder
    pub fn builder() -> CompactOptionsBuilder {
        CompactOptionsBuilder::default()
    }
}

/// Builder for CompactOptions
#[derive(Debug, Default)]
pub struct CompactOptionsBuilder {
    options: CompactOptions,
}

impl CompactOptionsBuilder {
    /// Set the byte ceiling (clamped to at least MIN_CEILING)
    #[must_use]
    pub fn ceiling(mut self, ceiling: usize) -> Self {
        self.options.ceiling = ceiling.max(MIN_CEILING);
        self
    }

    /// Set the boundary-search margin (clamped to at least MIN_MARGIN)
    #[must_use]
    pub fn safety_margin(mut self, margin: usize) -> Self {
        self.options.safety_margin = margin.max(MIN_MARGIN);
        self
    }

    /// Set the last-resort cut margin (clamped to at least MIN_MARGIN)
    #[must_use]
    pub fn hard_cut_margin(mut self, margin: usize) -> Self {
        self.options.hard_cut_margin = margin.max(MIN_MARGIN);
        self
    }

    /// Set the optional section header text
    #[must_use]
    pub fn optional_section(mut self, header: impl Into<String>) -> Self {
        self.options.optional_section = header.into();
        self
    }

    /// Build the options
    #[must_use]
    pub fn build(self) -> CompactOptions {
        self.options
    }
}

// ============================================================
// Tests
// ============================================================
