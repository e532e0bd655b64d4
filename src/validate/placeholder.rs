//! Unresolved template-token detection
//!
//! Generated documents are assembled from templates whose slots look like
//! `{{RACE_NAME}}`. Any slot that survives into output means the assembly
//! step was fed incomplete data.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use super::types::{Category, Finding};
use super::walk::walk_strings;

/// Double-brace-wrapped, uppercase, underscore-separated identifier
static PLACEHOLDER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{\{[A-Z][A-Z0-9_]*\}\}").expect("placeholder regex"));

/// Flag every unresolved template token in any string value, one finding
/// per distinct token per value.
pub fn check_placeholders(doc: &Value) -> Vec<Finding> {
    let mut findings = Vec::new();

    walk_strings(doc, &mut |path, text| {
        let mut seen: Vec<&str> = Vec::new();
        for token in PLACEHOLDER_RE.find_iter(text) {
            let token = token.as_str();
            if seen.contains(&token) {
                continue;
            }
            seen.push(token);
            findings.push(
                Finding::new(
                    Category::Placeholder,
                    format!("Unresolved placeholder {}", token),
                )
                .with_path(path),
            );
        }
    });

    findings
}

// ============================================================
// Tests
// ============================================================
