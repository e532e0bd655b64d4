//! TrainingPeaks link-format check
//!
//! Marketplace plan URLs carry a `tp-` slug segment; a TrainingPeaks
//! plan link without it points at nothing and 404s after publish.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use super::types::{Category, Finding, PageRules};
use super::walk::walk_strings;

/// TrainingPeaks training-plan URL
static TP_URL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"https?://(?:www\.)?trainingpeaks\.com/training-plans[^\s"'<>]*"#)
        .expect("trainingpeaks url regex")
});

/// Flag every TrainingPeaks plan URL that lacks the plan-slug marker.
pub fn check_links(doc: &Value, rules: &PageRules) -> Vec<Finding> {
    let mut findings = Vec::new();

    walk_strings(doc, &mut |path, text| {
        for url in TP_URL_RE.find_iter(text) {
            let url = url.as_str();
            if !url.contains(&rules.link_marker) {
                findings.push(
                    Finding::new(
                        Category::MalformedLink,
                        format!(
                            "TrainingPeaks link missing {} marker: {}",
                            rules.link_marker, url
                        ),
                    )
                    .with_path(path),
                );
            }
        }
    });

    findings
}

// ============================================================
// Tests
// ============================================================
