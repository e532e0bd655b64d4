//! Aggregate QC runner
//!
//! Runs every applicable validator over a batch of generated JSON files
//! and rolls the results into one summary, the publish gate a human reads
//! before pushing anything live. Race records and page documents are told
//! apart by their top-level shape, so a mixed directory works.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

use crate::validate::{
    self, BrandRules, Finding, PageRules, RaceRules, Result, ValidateError,
};

// ============================================================
// Types
// ============================================================

/// Document kind, detected from the top-level shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    Race,
    Page,
}

impl DocumentKind {
    /// Race records carry a top-level `race` object; everything else is
    /// treated as a page-builder document.
    pub fn detect(doc: &Value) -> Self {
        if doc.get("race").is_some() {
            DocumentKind::Race
        } else {
            DocumentKind::Page
        }
    }

    /// Kind name as printed in reports
    pub fn name(&self) -> &'static str {
        match self {
            DocumentKind::Race => "race",
            DocumentKind::Page => "page",
        }
    }
}

/// Rule sets shared by one QC run
#[derive(Debug, Clone, Default)]
pub struct QcRules {
    pub race: RaceRules,
    pub page: PageRules,
    pub brand: BrandRules,
}

/// Outcome for one file
#[derive(Debug, Serialize)]
pub struct FileOutcome {
    /// The file checked
    pub path: PathBuf,

    /// Detected kind; absent when the file could not be read or parsed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<DocumentKind>,

    /// Whether the file may publish
    pub pass: bool,

    /// File-level error, when the validators never ran
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// Content defects
    pub findings: Vec<Finding>,
}

/// Everything one QC run produced
#[derive(Debug, Serialize)]
pub struct QcSummary {
    /// When the run happened
    pub generated_at: DateTime<Utc>,

    /// Per-file outcomes, in input order
    pub files: Vec<FileOutcome>,
}

impl QcSummary {
    pub fn total(&self) -> usize {
        self.files.len()
    }

    pub fn passed(&self) -> usize {
        self.files.iter().filter(|f| f.pass).count()
    }

    pub fn failed(&self) -> usize {
        self.total() - self.passed()
    }

    pub fn all_passed(&self) -> bool {
        self.files.iter().all(|f| f.pass)
    }
}

// ============================================================
// Runner
// ============================================================

/// Validate one file, classifying it first. File-level errors become a
/// failing outcome rather than aborting the batch.
pub fn check_file(path: &Path, rules: &QcRules) -> FileOutcome {
    let doc = match validate::load_document(path) {
        Ok(doc) => doc,
        Err(err) => {
            tracing::warn!(file = %path.display(), error = %err, "unreadable document");
            return FileOutcome {
                path: path.to_path_buf(),
                kind: None,
                pass: false,
                error: Some(err.to_string()),
                findings: Vec::new(),
            };
        }
    };

    let kind = DocumentKind::detect(&doc);
    let report = match kind {
        DocumentKind::Race => validate::validate_race(&doc, &rules.race),
        DocumentKind::Page => validate::validate_page(&doc, &rules.page, &rules.brand),
    };

    tracing::debug!(
        file = %path.display(),
        kind = kind.name(),
        findings = report.count(),
        "checked"
    );

    FileOutcome {
        path: path.to_path_buf(),
        kind: Some(kind),
        pass: report.is_pass(),
        error: None,
        findings: report.findings().to_vec(),
    }
}

/// Run QC over a batch of files.
pub fn run_qc(paths: &[PathBuf], rules: &QcRules) -> QcSummary {
    QcSummary {
        generated_at: Utc::now(),
        files: paths.iter().map(|path| check_file(path, rules)).collect(),
    }
}

/// Expand one CLI path argument: a file stands for itself, a directory
/// for every `.json` file directly inside it, sorted by name.
pub fn collect_json_files(path: &Path) -> Result<Vec<PathBuf>> {
    if !path.exists() {
        return Err(ValidateError::FileNotFound(path.to_path_buf()));
    }

    if path.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }

    let mut files: Vec<PathBuf> = std::fs::read_dir(path)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|p| p.is_file() && p.extension().is_some_and(|ext| ext == "json"))
        .collect();
    files.sort();
    Ok(files)
}

/// Write the machine-readable QC report.
pub fn write_report(summary: &QcSummary, path: &Path) -> Result<()> {
    let mut serialized = serde_json::to_string_pretty(summary)?;
    serialized.push('\n');
    std::fs::write(path, serialized)?;
    tracing::info!(report = %path.display(), "wrote QC report");
    Ok(())
}

// ============================================================
// Tests
// ============================================================
