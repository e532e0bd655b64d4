//! Common types for the validation module

use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

// ============================================================
// Constants
// ============================================================

/// The one approved brand yellow
pub const BRAND_YELLOW: &str = "#F4D03F";

/// Yellows that read as brand yellow but are not
pub const FORBIDDEN_COLORS: [&str; 4] = ["#FFFF00", "#FFD700", "#FFC300", "#F1C40F"];

/// Backgrounds approved for alternating table rows, besides the brand color
pub const STRIPE_NEUTRALS: [&str; 3] = ["#FFFFFF", "#F8F9FA", "#F4F4F4"];

/// Element ids every published race page must carry
pub const REQUIRED_SECTIONS: [&str; 4] = ["gg-vitals", "gg-black-pill", "gg-training", "gg-rating"];

/// The seven Gravel God rating categories, no more, no fewer
pub const RATING_CATEGORIES: [&str; 7] = [
    "prestige",
    "length",
    "technicality",
    "elevation",
    "climate",
    "altitude",
    "adventure",
];

/// Fields every race-data record must define
pub const RACE_REQUIRED_PATHS: [&str; 8] = [
    "race.name",
    "race.slug",
    "race.display_name",
    "race.tagline",
    "race.vitals",
    "race.gravel_god_rating",
    "race.ratings_breakdown",
    "race.training_plans",
];

/// Path segment every TrainingPeaks plan URL must contain
pub const TP_LINK_MARKER: &str = "tp-";

// ============================================================
// Error Types
// ============================================================

/// Validation pipeline error types
#[derive(Debug, Error)]
pub enum ValidateError {
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid JSON: {0}")]
    ParseError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ValidateError>;

// ============================================================
// Findings
// ============================================================

/// Category of a validation finding. The serialized form doubles as the
/// CLI marker printed in front of each finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Placeholder,
    MissingField,
    CountMismatch,
    MissingSection,
    MalformedLink,
    ForbiddenColor,
    MissingBrandColor,
    OffBrandSelector,
    OffBrandStripe,
}

impl Category {
    /// Marker string printed in CLI output
    pub fn marker(&self) -> &'static str {
        match self {
            Category::Placeholder => "placeholder",
            Category::MissingField => "missing-field",
            Category::CountMismatch => "count-mismatch",
            Category::MissingSection => "missing-section",
            Category::MalformedLink => "malformed-link",
            Category::ForbiddenColor => "forbidden-color",
            Category::MissingBrandColor => "missing-brand-color",
            Category::OffBrandSelector => "off-brand-selector",
            Category::OffBrandStripe => "off-brand-stripe",
        }
    }
}

/// One defect found in a document
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    /// What kind of defect
    pub category: Category,

    /// Human-readable description
    pub message: String,

    /// Where in the document, as a dot/bracket path (absent for
    /// document-wide defects such as a missing section)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl Finding {
    /// Create a new finding
    pub fn new(category: Category, message: impl Into<String>) -> Self {
        Self {
            category,
            message: message.into(),
            path: None,
        }
    }

    /// Set the JSON path
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }
}

/// Union of every check's findings for one document
#[derive(Debug, Clone, Default)]
pub struct Report {
    findings: Vec<Finding>,
}

impl Report {
    /// Build a report from collected findings
    pub fn from_findings(findings: Vec<Finding>) -> Self {
        Self { findings }
    }

    /// A document passes only when no check found anything
    pub fn is_pass(&self) -> bool {
        self.findings.is_empty()
    }

    /// All findings, in check order
    pub fn findings(&self) -> &[Finding] {
        &self.findings
    }

    /// Number of findings
    pub fn count(&self) -> usize {
        self.findings.len()
    }

    /// Findings of one category
    pub fn of_category(&self, category: Category) -> impl Iterator<Item = &Finding> {
        self.findings.iter().filter(move |f| f.category == category)
    }
}

// ============================================================
// Rules
// ============================================================

/// Schema rules for race-data records
#[derive(Debug, Clone)]
pub struct RaceRules {
    /// Dotted paths that must exist
    pub required_paths: Vec<String>,
    /// Exact set of rating categories
    pub rating_categories: Vec<String>,
}

impl Default for RaceRules {
    fn default() -> Self {
        Self {
            required_paths: RACE_REQUIRED_PATHS.iter().map(|s| s.to_string()).collect(),
            rating_categories: RATING_CATEGORIES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Structural rules for page-builder documents
#[derive(Debug, Clone)]
pub struct PageRules {
    /// Element ids that must appear somewhere on the page
    pub required_sections: Vec<String>,
    /// Path segment every TrainingPeaks plan URL must contain
    pub link_marker: String,
}

impl Default for PageRules {
    fn default() -> Self {
        Self {
            required_sections: REQUIRED_SECTIONS.iter().map(|s| s.to_string()).collect(),
            link_marker: TP_LINK_MARKER.to_string(),
        }
    }
}

/// One CSS selector/property pair that must resolve to the brand color
#[derive(Debug, Clone)]
pub struct SelectorRule {
    pub selector: String,
    pub property: String,
}

impl SelectorRule {
    pub fn new(selector: impl Into<String>, property: impl Into<String>) -> Self {
        Self {
            selector: selector.into(),
            property: property.into(),
        }
    }
}

/// Brand color rules
#[derive(Debug, Clone)]
pub struct BrandRules {
    /// The approved brand color
    pub brand_color: String,
    /// Colors that must never appear
    pub forbidden_colors: Vec<String>,
    /// Backgrounds allowed on alternating rows, besides the brand color
    pub stripe_neutrals: Vec<String>,
    /// Selector/property pairs that must resolve to the brand color
    pub selector_rules: Vec<SelectorRule>,
}

impl Default for BrandRules {
    fn default() -> Self {
        Self {
            brand_color: BRAND_YELLOW.to_string(),
            forbidden_colors: FORBIDDEN_COLORS.iter().map(|s| s.to_string()).collect(),
            stripe_neutrals: STRIPE_NEUTRALS.iter().map(|s| s.to_string()).collect(),
            selector_rules: vec![
                SelectorRule::new(".gg-pill", "background"),
                SelectorRule::new(".gg-rating-badge", "background"),
            ],
        }
    }
}

// ============================================================
// Tests
// ============================================================
