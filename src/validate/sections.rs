//! Required-section presence check
//!
//! Page-builder documents nest widgets arbitrarily deep, and the section
//! anchors can live either in widget settings (`settings._element_id`) or
//! as literal `id` attributes inside raw-HTML widget content. Both sources
//! feed one collected set, checked against the required ids.

use std::collections::BTreeSet;

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use super::types::{Category, Finding, PageRules};

/// `id="..."` attribute inside embedded HTML
static ID_ATTR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"id\s*=\s*["']([^"']+)["']"#).expect("id attribute regex"));

/// Every element id present anywhere in the document, from widget settings
/// and from embedded HTML alike.
pub fn collect_section_ids(doc: &Value) -> BTreeSet<String> {
    let mut ids = BTreeSet::new();
    collect_into(doc, &mut ids);
    ids
}

fn collect_into(value: &Value, ids: &mut BTreeSet<String>) {
    match value {
        Value::Object(map) => {
            if let Some(id) = map
                .get("settings")
                .and_then(|settings| settings.get("_element_id"))
                .and_then(Value::as_str)
            {
                ids.insert(id.to_string());
            }
            for child in map.values() {
                collect_into(child, ids);
            }
        }
        Value::Array(items) => {
            for child in items {
                collect_into(child, ids);
            }
        }
        Value::String(text) => {
            for caps in ID_ATTR_RE.captures_iter(text) {
                ids.insert(caps[1].to_string());
            }
        }
        _ => {}
    }
}

/// One finding per required section id that appears nowhere in the page.
pub fn check_sections(doc: &Value, rules: &PageRules) -> Vec<Finding> {
    let present = collect_section_ids(doc);

    rules
        .required_sections
        .iter()
        .filter(|id| !present.contains(*id))
        .map(|id| {
            Finding::new(
                Category::MissingSection,
                format!("Required section missing: {}", id),
            )
        })
        .collect()
}

// ============================================================
// Tests
// ============================================================
