//! Validator integration tests
//!
//! Whole-document checks through the public API: complete passing fixtures
//! for both schemas, plus the defect cases the publish gate exists to catch.

use ggpress::{
    fix_colors, load_document, validate_colors, validate_page, validate_race, BrandRules, Category,
    PageRules, RaceRules, ValidateError,
};
use serde_json::{json, Value};

fn rating(score: u32, note: &str) -> Value {
    json!({"score": score, "explanation": note})
}

/// A complete race-data record that passes every check.
fn passing_race() -> Value {
    json!({
        "race": {
            "name": "Unbound Gravel 200",
            "slug": "unbound-gravel-200",
            "display_name": "UNBOUND Gravel",
            "tagline": "The crown jewel of the Flint Hills",
            "vitals": {
                "location": "Emporia, Kansas",
                "distance_mi": 200,
                "elevation_ft": 11000
            },
            "gravel_god_rating": 9.4,
            "ratings_breakdown": {
                "prestige": rating(10, "The one every gravel racer knows"),
                "length": rating(9, "A full day out, often more"),
                "technicality": rating(7, "Flint rock eats tires"),
                "elevation": rating(6, "Rolling and relentless"),
                "climate": rating(8, "Kansas heat and wind"),
                "altitude": rating(2, "Low plains"),
                "adventure": rating(9, "Self-supported between water stops")
            },
            "training_plans": {
                "total_count": 2,
                "plans": [
                    {
                        "name": "Unbound Base",
                        "trainingpeaks_id": 311201,
                        "trainingpeaks_slug": "tp-unbound-base-12wk"
                    },
                    {
                        "name": "Unbound Build",
                        "trainingpeaks_id": 311202,
                        "trainingpeaks_slug": "tp-unbound-build-8wk"
                    }
                ]
            }
        }
    })
}

/// A page-builder document that passes every check: all four section
/// anchors, a marked TrainingPeaks link, and brand-compliant CSS.
fn passing_page() -> Value {
    json!({
        "title": "Unbound Gravel 200 - Gravel God Cycling",
        "content": [
            {
                "id": "hero",
                "elements": [
                    {"settings": {"_element_id": "gg-black-pill"}},
                    {"settings": {"_element_id": "gg-vitals"}}
                ]
            },
            {
                "id": "body",
                "elements": [{
                    "widgetType": "html",
                    "settings": {
                        "html": "<section id=\"gg-rating\">\
                                 <style>.gg-pill{background:#F4D03F;color:#2C3E50}\
                                 .gg-rating-badge{background:linear-gradient(135deg,#F4D03F,#FFFFFF)}\
                                 .gg-vitals-table tr:nth-child(even){background:#F8F9FA}</style>\
                                 </section>\
                                 <div id=\"gg-training\">\
                                 <a href=\"https://www.trainingpeaks.com/training-plans/tp-unbound-base-12wk\">Get the plan</a>\
                                 </div>"
                    }
                }]
            }
        ]
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    // TC-VAL-001: A complete race record passes
    #[test]
    fn test_passing_race_record() {
        let report = validate_race(&passing_race(), &RaceRules::default());
        assert!(report.is_pass(), "unexpected findings: {:?}", report.findings());
    }

    // TC-VAL-002: A missing rating category yields exactly one finding
    // naming it
    #[test]
    fn test_missing_climate_is_one_finding() {
        let mut doc = passing_race();
        doc["race"]["ratings_breakdown"]
            .as_object_mut()
            .unwrap()
            .remove("climate");

        let report = validate_race(&doc, &RaceRules::default());
        assert!(!report.is_pass());
        assert_eq!(report.count(), 1);
        assert_eq!(report.findings()[0].category, Category::MissingField);
        assert!(report.findings()[0].message.contains("climate"));
    }

    // TC-VAL-003: Plan count mismatch cites both numbers
    #[test]
    fn test_plan_count_mismatch_cites_both_numbers() {
        let mut doc = passing_race();
        doc["race"]["training_plans"]["total_count"] = json!(15);
        let plans: Vec<Value> = (0..14)
            .map(|i| {
                json!({
                    "trainingpeaks_id": 311200 + i,
                    "trainingpeaks_slug": format!("tp-plan-{}", i)
                })
            })
            .collect();
        doc["race"]["training_plans"]["plans"] = json!(plans);

        let report = validate_race(&doc, &RaceRules::default());
        assert!(!report.is_pass());

        let mismatch = report
            .of_category(Category::CountMismatch)
            .next()
            .expect("count mismatch finding");
        assert!(mismatch.message.contains("15"));
        assert!(mismatch.message.contains("14"));
    }

    // TC-VAL-004: Unresolved placeholder reports the token and its path
    #[test]
    fn test_placeholder_reports_token_and_path() {
        let mut doc = passing_page();
        doc["content"][1]["elements"][0]["settings"]["html"] =
            json!("<h1>Welcome to {{RACE_NAME}}</h1>");

        let report = validate_page(&doc, &PageRules::default(), &BrandRules::default());
        let finding = report
            .of_category(Category::Placeholder)
            .next()
            .expect("placeholder finding");
        assert!(finding.message.contains("{{RACE_NAME}}"));
        assert_eq!(
            finding.path.as_deref(),
            Some("content[1].elements[0].settings.html")
        );
    }

    // TC-VAL-005: A forbidden yellow on the pill selector fails the
    // color gate
    #[test]
    fn test_forbidden_pill_color_fails() {
        let doc = json!({"custom_css": ".gg-pill { background: #FFFF00; }"});

        let report = validate_colors(&doc, &BrandRules::default());
        assert!(!report.is_pass());

        let forbidden = report
            .of_category(Category::ForbiddenColor)
            .next()
            .expect("forbidden color finding");
        assert!(forbidden.message.contains("#FFFF00"));
        // The same rule is also off brand for the selector check
        assert!(report.of_category(Category::OffBrandSelector).next().is_some());
    }

    // TC-VAL-006: A complete page document passes
    #[test]
    fn test_passing_page_document() {
        let report = validate_page(&passing_page(), &PageRules::default(), &BrandRules::default());
        assert!(report.is_pass(), "unexpected findings: {:?}", report.findings());
    }

    // TC-VAL-007: Defects from independent checks land in one report
    #[test]
    fn test_page_checks_are_unioned() {
        let doc = json!({
            "content": [{
                "elements": [{
                    "settings": {
                        "_element_id": "gg-vitals",
                        "html": "{{TAGLINE}} at https://trainingpeaks.com/training-plans/unbound"
                    }
                }]
            }]
        });

        let report = validate_page(&doc, &PageRules::default(), &BrandRules::default());
        assert!(!report.is_pass());

        assert_eq!(report.of_category(Category::Placeholder).count(), 1);
        assert_eq!(report.of_category(Category::MalformedLink).count(), 1);
        // gg-vitals is present; the other three anchors are not
        assert_eq!(report.of_category(Category::MissingSection).count(), 3);
        assert_eq!(report.of_category(Category::MissingBrandColor).count(), 1);
    }

    // TC-VAL-008: The color gate ignores structural defects
    #[test]
    fn test_validate_colors_is_colors_only() {
        let doc = json!({
            "html": "{{UNRESOLVED}} token",
            "css": ".gg-pill{background:#F4D03F}"
        });

        let report = validate_colors(&doc, &BrandRules::default());
        assert!(report.is_pass(), "unexpected findings: {:?}", report.findings());
    }

    // TC-VAL-009: Missing and malformed files surface as typed errors
    #[test]
    fn test_load_document_errors() {
        let dir = tempfile::tempdir().unwrap();

        let missing = load_document(&dir.path().join("absent.json"));
        assert!(matches!(missing, Err(ValidateError::FileNotFound(_))));

        let broken = dir.path().join("broken.json");
        std::fs::write(&broken, "{not json").unwrap();
        assert!(matches!(
            load_document(&broken),
            Err(ValidateError::ParseError(_))
        ));
    }

    // TC-VAL-010: The color fix-up turns a failing document into a
    // passing one
    #[test]
    fn test_fix_colors_then_validate_passes() {
        let mut doc = json!({
            "custom_css": ".gg-pill{background:#ffd700}",
            "footer": "accent stays #F4D03F"
        });

        let before = validate_colors(&doc, &BrandRules::default());
        assert!(!before.is_pass());

        let fixes = fix_colors(&mut doc, &BrandRules::default());
        assert_eq!(fixes.len(), 1);
        assert_eq!(fixes[0].from, "#FFD700");
        assert_eq!(fixes[0].to, "#F4D03F");
        assert_eq!(fixes[0].path, "custom_css");

        let after = validate_colors(&doc, &BrandRules::default());
        assert!(after.is_pass(), "unexpected findings: {:?}", after.findings());
    }
}
