//! Command-line interface definitions

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Content pipeline for Gravel God Cycling
#[derive(Debug, Parser)]
#[command(
    name = "ggpress",
    version,
    about = "Markdown plan descriptions to marketplace HTML, plus QC for generated page JSON"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase output verbosity (-v, -vv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress the end-of-run summary
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Compact cataloged plan descriptions to marketplace HTML
    Compact(CompactArgs),

    /// Convert one Markdown file to styled HTML, no size ceiling
    Convert(ConvertArgs),

    /// Validate generated JSON before publish
    #[command(subcommand)]
    Validate(ValidateTarget),

    /// Explicitly invoked repairs for generated JSON
    #[command(subcommand)]
    Fix(FixTarget),

    /// Run every validator over a batch of files
    Qc(QcArgs),
}

/// Arguments for the compact command
#[derive(Debug, Args)]
pub struct CompactArgs {
    /// Config file (default: ggpress.toml lookup)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Compact a single plan, by name or slug
    #[arg(short, long)]
    pub plan: Option<String>,

    /// Fragment byte ceiling, overrides config
    #[arg(long)]
    pub ceiling: Option<usize>,

    /// Markdown source directory, overrides config
    #[arg(long)]
    pub content_dir: Option<PathBuf>,

    /// Output directory, overrides config
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// Rewrite outputs that already exist
    #[arg(short, long)]
    pub force: bool,

    /// Print the execution plan without writing anything
    #[arg(long)]
    pub dry_run: bool,
}

/// Arguments for the convert command
#[derive(Debug, Args)]
pub struct ConvertArgs {
    /// Markdown source file
    pub input: PathBuf,

    /// Output file (default: source path with .html)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Which validator to run
#[derive(Debug, Subcommand)]
pub enum ValidateTarget {
    /// Race-data record: schema plus placeholders
    Race(FileArg),

    /// Page-builder document: placeholders, sections, links, colors
    Page(FileArg),

    /// Brand-color rules only
    Colors(FileArg),
}

/// Single JSON file argument shared by the validators
#[derive(Debug, Args)]
pub struct FileArg {
    /// JSON file to check
    pub file: PathBuf,
}

/// Which fix-up to apply
#[derive(Debug, Subcommand)]
pub enum FixTarget {
    /// Rewrite forbidden colors to the brand color
    Colors(FixColorsArgs),
}

/// Arguments for fix colors
#[derive(Debug, Args)]
pub struct FixColorsArgs {
    /// JSON file to repair
    pub file: PathBuf,

    /// Write the repaired document back in place (default: dry run)
    #[arg(long)]
    pub write: bool,
}

/// Arguments for the qc command
#[derive(Debug, Args)]
pub struct QcArgs {
    /// JSON files, or directories containing .json files
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,

    /// Also write a machine-readable report here
    #[arg(long)]
    pub report: Option<PathBuf>,
}

// ============================================================
// Tests
// ============================================================
