//! Output validation module
//!
//! Diagnostic gates run against generated JSON before anything publishes:
//! race-data records and assembled page-builder documents each get their
//! own battery of checks. Checks are independent, all run unconditionally,
//! never mutate their input, and collect every defect in one pass rather
//! than failing fast. Repair is someone else's job.

mod colors;
mod links;
mod placeholder;
mod race;
mod sections;
mod types;
mod walk;

// Re-export public API
pub use colors::check_colors;
pub use links::check_links;
pub use placeholder::check_placeholders;
pub use race::check_race;
pub use sections::{check_sections, collect_section_ids};
pub use types::{
    BrandRules, Category, Finding, PageRules, RaceRules, Report, Result, SelectorRule,
    ValidateError, BRAND_YELLOW, FORBIDDEN_COLORS, RACE_REQUIRED_PATHS, RATING_CATEGORIES,
    REQUIRED_SECTIONS, STRIPE_NEUTRALS, TP_LINK_MARKER,
};
pub use walk::{child_path, get_path, index_path, walk_strings};

use std::path::Path;

use serde_json::Value;

/// Read and parse one JSON document from disk.
pub fn load_document(path: &Path) -> Result<Value> {
    if !path.exists() {
        return Err(ValidateError::FileNotFound(path.to_path_buf()));
    }
    let text = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}

/// Full gate for a race-data record: placeholders plus schema.
pub fn validate_race(doc: &Value, rules: &RaceRules) -> Report {
    let mut findings = check_placeholders(doc);
    findings.extend(check_race(doc, rules));
    tracing::debug!(findings = findings.len(), "race validation complete");
    Report::from_findings(findings)
}

/// Full gate for a page-builder document: placeholders, required sections,
/// link format, and brand colors.
pub fn validate_page(doc: &Value, pages: &PageRules, brand: &BrandRules) -> Report {
    let mut findings = check_placeholders(doc);
    findings.extend(check_sections(doc, pages));
    findings.extend(check_links(doc, pages));
    findings.extend(check_colors(doc, brand));
    tracing::debug!(findings = findings.len(), "page validation complete");
    Report::from_findings(findings)
}

/// The standalone brand-consistency gate.
pub fn validate_colors(doc: &Value, brand: &BrandRules) -> Report {
    Report::from_findings(check_colors(doc, brand))
}

// ============================================================
// Tests
// ============================================================
