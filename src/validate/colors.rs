//! Brand color compliance check
//!
//! Three rules gate publish: the near-miss yellows must never appear, the
//! real brand yellow must appear at least once, and the pill/badge
//! selectors plus alternating-row stripes must resolve to approved values.
//! The document tree is walked structurally; regex handles only the
//! innermost string patterns (hex literals, CSS rules).

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use super::types::{BrandRules, Category, Finding};
use super::walk::walk_strings;

/// Six-digit hex color literal
static HEX_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"#[0-9a-fA-F]{6}\b").expect("hex regex"));

/// One CSS rule: selector text and declaration body
static CSS_BLOCK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([^{}]+)\{([^}]*)\}").expect("css block regex"));

/// background / background-color declaration value
static BG_DECL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)background(?:-color)?\s*:\s*([^;}]+)").expect("background regex")
});

/// `row` as its own word inside a selector (`.grow` must not count)
static ROW_WORD_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(?:^|[^a-z])row(?:[^a-z]|$)").expect("row selector regex"));

/// Check every string in the document for color-rule violations.
pub fn check_colors(doc: &Value, rules: &BrandRules) -> Vec<Finding> {
    let brand_upper = rules.brand_color.to_uppercase();
    let forbidden_upper: Vec<String> =
        rules.forbidden_colors.iter().map(|c| c.to_uppercase()).collect();
    let neutrals_upper: Vec<String> =
        rules.stripe_neutrals.iter().map(|c| c.to_uppercase()).collect();
    let prop_patterns: Vec<Regex> = rules
        .selector_rules
        .iter()
        .map(|rule| {
            Regex::new(&format!(r"(?i){}\s*:\s*([^;}}]+)", regex::escape(&rule.property)))
                .expect("property regex")
        })
        .collect();

    let mut findings = Vec::new();
    let mut brand_seen = false;

    walk_strings(doc, &mut |path, text| {
        // Literal hex scan, one finding per forbidden color per value
        let mut flagged: Vec<String> = Vec::new();
        for hex in HEX_RE.find_iter(text) {
            let hex = hex.as_str().to_uppercase();
            if hex == brand_upper {
                brand_seen = true;
            }
            if forbidden_upper.contains(&hex) && !flagged.contains(&hex) {
                findings.push(
                    Finding::new(Category::ForbiddenColor, format!("Forbidden color {}", hex))
                        .with_path(path),
                );
                flagged.push(hex);
            }
        }

        // Embedded CSS rules
        for caps in CSS_BLOCK_RE.captures_iter(text) {
            let selector = caps[1].trim();
            let body = &caps[2];

            for (rule, pattern) in rules.selector_rules.iter().zip(&prop_patterns) {
                if !selector.contains(rule.selector.as_str()) {
                    continue;
                }
                if let Some(decl) = pattern.captures(body) {
                    let value = decl[1].trim();
                    if !value.to_uppercase().contains(&brand_upper) {
                        findings.push(
                            Finding::new(
                                Category::OffBrandSelector,
                                format!(
                                    "Selector {} {} is {}, expected {}",
                                    rule.selector, rule.property, value, rules.brand_color
                                ),
                            )
                            .with_path(path),
                        );
                    }
                }
            }

            if is_stripe_selector(selector) {
                for decl in BG_DECL_RE.captures_iter(body) {
                    for hex in HEX_RE.find_iter(&decl[1]) {
                        let hex = hex.as_str().to_uppercase();
                        if hex != brand_upper && !neutrals_upper.contains(&hex) {
                            findings.push(
                                Finding::new(
                                    Category::OffBrandStripe,
                                    format!(
                                        "Row stripe background {} outside approved palette",
                                        hex
                                    ),
                                )
                                .with_path(path),
                            );
                        }
                    }
                }
            }
        }
    });

    if !brand_seen {
        findings.push(Finding::new(
            Category::MissingBrandColor,
            format!("Brand color {} does not appear anywhere", rules.brand_color),
        ));
    }

    findings
}

/// Whether a selector addresses alternating-row striping
fn is_stripe_selector(selector: &str) -> bool {
    let lower = selector.to_lowercase();
    lower.contains("nth-child") || lower.contains("stripe") || ROW_WORD_RE.is_match(selector)
}

// ============================================================
// Tests
// ============================================================
