//! Race-data record schema check
//!
//! Race records feed both the landing-page generator and the marketplace
//! copy, so a record missing a field fails here before anything renders.

use serde_json::Value;

use super::types::{Category, Finding, RaceRules};
use super::walk::{child_path, get_path, index_path};

const BREAKDOWN_PATH: &str = "race.ratings_breakdown";
const PLANS_PATH: &str = "race.training_plans";

/// Check one race-data record against the schema rules: required paths,
/// exact rating-category set, plan identifiers, and plan-count arithmetic.
pub fn check_race(doc: &Value, rules: &RaceRules) -> Vec<Finding> {
    let mut findings = Vec::new();

    for path in &rules.required_paths {
        if get_path(doc, path).is_none() {
            findings
                .push(Finding::new(Category::MissingField, "Required field missing").with_path(path));
        }
    }

    if let Some(breakdown) = get_path(doc, BREAKDOWN_PATH) {
        check_breakdown(breakdown, rules, &mut findings);
    }

    if let Some(listing) = get_path(doc, PLANS_PATH) {
        check_plans(listing, &mut findings);
    }

    findings
}

/// The ratings breakdown must carry exactly the configured categories,
/// each an object with a numeric score and a written explanation.
fn check_breakdown(breakdown: &Value, rules: &RaceRules, findings: &mut Vec<Finding>) {
    let Some(map) = breakdown.as_object() else {
        findings.push(
            Finding::new(Category::MissingField, "ratings_breakdown must be an object")
                .with_path(BREAKDOWN_PATH),
        );
        return;
    };

    for category in &rules.rating_categories {
        let path = child_path(BREAKDOWN_PATH, category);
        let Some(entry) = map.get(category) else {
            findings.push(
                Finding::new(
                    Category::MissingField,
                    format!("Rating category missing: {}", category),
                )
                .with_path(path),
            );
            continue;
        };

        if !entry.get("score").is_some_and(Value::is_number) {
            findings.push(
                Finding::new(
                    Category::MissingField,
                    format!("Rating category {} needs a numeric score", category),
                )
                .with_path(child_path(&path, "score")),
            );
        }
        if !entry.get("explanation").is_some_and(Value::is_string) {
            findings.push(
                Finding::new(
                    Category::MissingField,
                    format!("Rating category {} needs an explanation", category),
                )
                .with_path(child_path(&path, "explanation")),
            );
        }
    }

    for key in map.keys() {
        if !rules.rating_categories.iter().any(|c| c == key) {
            findings.push(
                Finding::new(
                    Category::CountMismatch,
                    format!("Unexpected rating category: {}", key),
                )
                .with_path(child_path(BREAKDOWN_PATH, key)),
            );
        }
    }
}

/// Every plan entry needs its TrainingPeaks identifiers, and the declared
/// total must agree with the list length.
fn check_plans(listing: &Value, findings: &mut Vec<Finding>) {
    let declared = match listing.get("total_count") {
        None => {
            findings.push(
                Finding::new(Category::MissingField, "Required field missing")
                    .with_path(child_path(PLANS_PATH, "total_count")),
            );
            None
        }
        Some(value) => {
            let count = value.as_u64();
            if count.is_none() {
                findings.push(
                    Finding::new(Category::CountMismatch, "total_count must be a number")
                        .with_path(child_path(PLANS_PATH, "total_count")),
                );
            }
            count
        }
    };

    let Some(plans) = listing.get("plans") else {
        findings.push(
            Finding::new(Category::MissingField, "Required field missing")
                .with_path(child_path(PLANS_PATH, "plans")),
        );
        return;
    };
    let Some(plans) = plans.as_array() else {
        findings.push(
            Finding::new(Category::MissingField, "training_plans.plans must be a list")
                .with_path(child_path(PLANS_PATH, "plans")),
        );
        return;
    };

    if let Some(declared) = declared {
        if declared != plans.len() as u64 {
            findings.push(
                Finding::new(
                    Category::CountMismatch,
                    format!(
                        "training_plans.total_count is {} but plans has {} entries",
                        declared,
                        plans.len()
                    ),
                )
                .with_path(child_path(PLANS_PATH, "total_count")),
            );
        }
    }

    let plans_base = child_path(PLANS_PATH, "plans");
    for (idx, plan) in plans.iter().enumerate() {
        for key in ["trainingpeaks_id", "trainingpeaks_slug"] {
            if plan.get(key).map_or(true, Value::is_null) {
                findings.push(
                    Finding::new(Category::MissingField, format!("Training plan missing {}", key))
                        .with_path(child_path(&index_path(&plans_base, idx), key)),
                );
            }
        }
    }
}

// ============================================================
// Tests
// ============================================================
