//! ggpress - content pipeline for Gravel God Cycling
//!
//! Batch tooling behind the training-plan marketplace and the race landing
//! pages: a Markdown-to-HTML compactor that keeps marketplace description
//! fragments under the listing byte ceiling, validators that gate generated
//! race-data and page-builder JSON before publish, an explicitly invoked
//! brand-color fix-up, and a QC runner that rolls everything into one
//! pass/fail summary.
//!
//! Everything is synchronous and batch-oriented; each operation is a pure
//! function of its input files plus configuration.

pub mod cli;
pub mod config;
pub mod fixup;
pub mod markdown;
pub mod qc;
pub mod validate;

// Re-export public API
pub use cli::{
    Cli, Commands, CompactArgs, ConvertArgs, FileArg, FixColorsArgs, FixTarget, QcArgs,
    ValidateTarget,
};
pub use config::{CliOverrides, Config, ConfigError, PlanEntry};
pub use fixup::{fix_colors, fix_colors_file, ColorFix};
pub use markdown::{
    compact, compact_file, compress, convert, convert_file, tokenize, Block, CompactOptions,
    CompactOutcome, HtmlRenderer, MarkdownError, StyleSheet,
};
pub use qc::{
    check_file, collect_json_files, run_qc, write_report, DocumentKind, FileOutcome, QcRules,
    QcSummary,
};
pub use validate::{
    check_colors, check_links, check_placeholders, check_race, check_sections, load_document,
    validate_colors, validate_page, validate_race, BrandRules, Category, Finding, PageRules,
    RaceRules, Report, SelectorRule, ValidateError,
};

/// Process exit codes
pub mod exit_codes {
    /// Successful completion
    pub const SUCCESS: i32 = 0;
    /// General error, including failed validation
    pub const GENERAL_ERROR: i32 = 1;
    /// Input file or plan catalog missing
    pub const INPUT_NOT_FOUND: i32 = 2;
}
