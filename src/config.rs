//! Configuration: directory layout and the plan catalog
//!
//! The catalog that used to live as a hardcoded name-to-path table now
//! loads from TOML and is passed explicitly into each operation, so the
//! compactor stays testable without any filesystem layout assumptions.
//!
//! Lookup order: `./ggpress.toml`, then `<user config dir>/ggpress/config.toml`,
//! then built-in defaults. Command-line flags override file values.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::markdown::DEFAULT_CEILING;

// ============================================================
// Constants
// ============================================================

/// Config file name checked in the working directory
pub const LOCAL_CONFIG_FILE: &str = "ggpress.toml";

/// Subdirectory of the user config directory
pub const USER_CONFIG_DIR: &str = "ggpress";

// ============================================================
// Error Types
// ============================================================

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config file not found: {0}")]
    NotFound(PathBuf),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid config: {0}")]
    ParseError(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

// ============================================================
// Configuration
// ============================================================

/// One training plan in the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PlanEntry {
    /// Human-readable plan name
    pub name: String,
    /// Markdown source, relative to `content_dir`
    pub source: PathBuf,
    /// Output directory name under `output_dir`
    pub slug: String,
}

/// Toolkit configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct Config {
    /// Where plan Markdown sources live
    pub content_dir: PathBuf,
    /// Where compacted fragments are written
    pub output_dir: PathBuf,
    /// Fragment byte ceiling
    pub ceiling: usize,
    /// Plan catalog
    pub plans: Vec<PlanEntry>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            content_dir: PathBuf::from("content"),
            output_dir: PathBuf::from("output"),
            ceiling: DEFAULT_CEILING,
            plans: Vec::new(),
        }
    }
}

impl Config {
    /// Load from the default locations, falling back to built-in defaults
    /// when no config file exists.
    pub fn load() -> Result<Self> {
        let local = PathBuf::from(LOCAL_CONFIG_FILE);
        if local.exists() {
            return Self::load_from_path(&local);
        }

        if let Some(dir) = dirs::config_dir() {
            let user = dir.join(USER_CONFIG_DIR).join("config.toml");
            if user.exists() {
                return Self::load_from_path(&user);
            }
        }

        Ok(Self::default())
    }

    /// Load from an explicit path.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }
        let text = std::fs::read_to_string(path)?;
        let config = toml::from_str(&text)?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Merge with command-line overrides; the command line wins where set.
    #[must_use]
    pub fn merge_with_cli(mut self, overrides: &CliOverrides) -> Self {
        if let Some(dir) = &overrides.content_dir {
            self.content_dir = dir.clone();
        }
        if let Some(dir) = &overrides.output_dir {
            self.output_dir = dir.clone();
        }
        if let Some(ceiling) = overrides.ceiling {
            self.ceiling = ceiling;
        }
        self
    }

    /// Absolute-or-relative source path of one plan.
    pub fn source_path(&self, plan: &PlanEntry) -> PathBuf {
        self.content_dir.join(&plan.source)
    }

    /// Output directory of one plan.
    pub fn plan_output_dir(&self, plan: &PlanEntry) -> PathBuf {
        self.output_dir.join(&plan.slug)
    }

    /// Find a catalog entry by name (case-insensitive) or slug.
    pub fn find_plan(&self, needle: &str) -> Option<&PlanEntry> {
        self.plans
            .iter()
            .find(|plan| plan.name.eq_ignore_ascii_case(needle) || plan.slug == needle)
    }
}

/// Optional values carried from the command line, applied over the config
/// file so clap defaults never mask file settings
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub content_dir: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub ceiling: Option<usize>,
}

impl CliOverrides {
    pub fn new() -> Self {
        Self::default()
    }
}

// ============================================================
// Tests
// ============================================================
