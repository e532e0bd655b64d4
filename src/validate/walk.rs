//! Recursive JSON traversal helpers
//!
//! All validators share one traversal vocabulary: dot-separated object keys
//! with bracketed array indices, e.g. `race.training_plans.plans[3].title`
//! or `content[0].elements[2].settings.html`.

use serde_json::Value;

/// Visit every string value in the document, in document order. The
/// callback receives the value's path and the string itself.
pub fn walk_strings<F>(value: &Value, visit: &mut F)
where
    F: FnMut(&str, &str),
{
    walk_strings_at(value, "", visit);
}

fn walk_strings_at<F>(value: &Value, path: &str, visit: &mut F)
where
    F: FnMut(&str, &str),
{
    match value {
        Value::String(s) => visit(path, s),
        Value::Object(map) => {
            for (key, child) in map {
                walk_strings_at(child, &child_path(path, key), visit);
            }
        }
        Value::Array(items) => {
            for (idx, child) in items.iter().enumerate() {
                walk_strings_at(child, &index_path(path, idx), visit);
            }
        }
        _ => {}
    }
}

/// Path of an object member under `base`.
pub fn child_path(base: &str, key: &str) -> String {
    if base.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", base, key)
    }
}

/// Path of an array element under `base`.
pub fn index_path(base: &str, idx: usize) -> String {
    format!("{}[{}]", base, idx)
}

/// Look up a nested value by dotted key path. Array indices are not
/// supported; the required-field rules only address object members.
pub fn get_path<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.').try_fold(value, |current, key| current.get(key))
}

// ============================================================
// Tests
// ============================================================
