//! Brand-color repair
//!
//! The explicitly invoked counterpart to the color validator: rewrites
//! every forbidden yellow to the brand color, anywhere in a document.
//! Validators only diagnose; this is the one operation that edits.

use std::path::Path;

use regex::Regex;
use serde::Serialize;
use serde_json::Value;

use crate::validate::{child_path, index_path, load_document, BrandRules, Result};

/// One replacement performed by [`fix_colors`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColorFix {
    /// Where the color was found
    pub path: String,
    /// The forbidden color, canonical uppercase
    pub from: String,
    /// The brand color written in its place
    pub to: String,
}

/// Replace every forbidden color in every string value with the brand
/// color, case-insensitively. Returns one entry per occurrence replaced.
pub fn fix_colors(doc: &mut Value, rules: &BrandRules) -> Vec<ColorFix> {
    let patterns: Vec<(String, Regex)> = rules
        .forbidden_colors
        .iter()
        .map(|color| {
            let re = Regex::new(&format!(r"(?i){}\b", regex::escape(color)))
                .expect("forbidden color regex");
            (color.to_uppercase(), re)
        })
        .collect();

    let mut fixes = Vec::new();
    fix_value(doc, "", rules, &patterns, &mut fixes);
    fixes
}

fn fix_value(
    value: &mut Value,
    path: &str,
    rules: &BrandRules,
    patterns: &[(String, Regex)],
    fixes: &mut Vec<ColorFix>,
) {
    match value {
        Value::String(text) => {
            for (canonical, re) in patterns {
                let count = re.find_iter(text).count();
                if count == 0 {
                    continue;
                }
                let replaced = re.replace_all(text, rules.brand_color.as_str()).into_owned();
                *text = replaced;
                for _ in 0..count {
                    fixes.push(ColorFix {
                        path: path.to_string(),
                        from: canonical.clone(),
                        to: rules.brand_color.clone(),
                    });
                }
            }
        }
        Value::Object(map) => {
            for (key, child) in map.iter_mut() {
                fix_value(child, &child_path(path, key), rules, patterns, fixes);
            }
        }
        Value::Array(items) => {
            for (idx, child) in items.iter_mut().enumerate() {
                fix_value(child, &index_path(path, idx), rules, patterns, fixes);
            }
        }
        _ => {}
    }
}

/// Fix one JSON file. `write` controls whether the repaired document is
/// written back in place; the default invocation is a dry run. A rewrite
/// keeps the document's original key order, so the color change is the
/// only diff.
pub fn fix_colors_file(path: &Path, rules: &BrandRules, write: bool) -> Result<Vec<ColorFix>> {
    let mut doc = load_document(path)?;
    let fixes = fix_colors(&mut doc, rules);

    if write && !fixes.is_empty() {
        let mut serialized = serde_json::to_string_pretty(&doc)?;
        serialized.push('\n');
        std::fs::write(path, serialized)?;
    }

    tracing::info!(
        file = %path.display(),
        fixes = fixes.len(),
        write,
        "color fixup"
    );

    Ok(fixes)
}

// ============================================================
// Tests
// ============================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_forbidden_yellow_rewritten() {
        let mut doc = json!({"css": ".gg-pill { background: #FFFF00; }"});
        let fixes = fix_colors(&mut doc, &BrandRules::default());

        assert_eq!(fixes.len(), 1);
        assert_eq!(fixes[0].path, "css");
        assert_eq!(fixes[0].from, "#FFFF00");
        assert_eq!(fixes[0].to, "#F4D03F");
        assert_eq!(doc["css"], json!(".gg-pill { background: #F4D03F; }"));
    }

    #[test]
    fn test_case_insensitive_reported_canonical() {
        let mut doc = json!({"style": "color: #ffd700"});
        let fixes = fix_colors(&mut doc, &BrandRules::default());

        assert_eq!(fixes.len(), 1);
        assert_eq!(fixes[0].from, "#FFD700");
        assert_eq!(doc["style"], json!("color: #F4D03F"));
    }

    #[test]
    fn test_every_occurrence_counted() {
        let mut doc = json!({
            "a": "#FFC300 and #FFC300",
            "nested": [{"b": "#F1C40F"}]
        });
        let fixes = fix_colors(&mut doc, &BrandRules::default());

        assert_eq!(fixes.len(), 3);
        assert_eq!(doc["a"], json!("#F4D03F and #F4D03F"));
        assert_eq!(fixes[2].path, "nested[0].b");
    }

    #[test]
    fn test_clean_document_untouched() {
        let mut doc = json!({"css": ".gg-pill { background: #F4D03F; }"});
        let before = doc.clone();
        assert!(fix_colors(&mut doc, &BrandRules::default()).is_empty());
        assert_eq!(doc, before);
    }

    #[test]
    fn test_file_dry_run_leaves_file_alone() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("page.json");
        std::fs::write(&path, r##"{"css": "#FFFF00"}"##).unwrap();

        let fixes = fix_colors_file(&path, &BrandRules::default(), false).unwrap();
        assert_eq!(fixes.len(), 1);
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            r##"{"css": "#FFFF00"}"##
        );
    }

    #[test]
    fn test_file_write_applies_fixes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("page.json");
        std::fs::write(&path, r##"{"css": "#FFFF00"}"##).unwrap();

        let fixes = fix_colors_file(&path, &BrandRules::default(), true).unwrap();
        assert_eq!(fixes.len(), 1);

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("#F4D03F"));
        assert!(!written.contains("#FFFF00"));
    }

    #[test]
    fn test_file_write_keeps_key_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("page.json");
        // "widgets" sorts after "custom_css"; a rewrite must not reorder them
        std::fs::write(
            &path,
            r##"{"widgets": "#FFC300", "custom_css": ".gg-pill{background:#F4D03F}"}"##,
        )
        .unwrap();

        fix_colors_file(&path, &BrandRules::default(), true).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        let widgets = written.find("\"widgets\"").unwrap();
        let css = written.find("\"custom_css\"").unwrap();
        assert!(widgets < css, "keys reordered: {}", written);
        assert!(!written.contains("#FFC300"));
    }
}
