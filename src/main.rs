//! ggpress - Gravel God content pipeline
//!
//! CLI entry point

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use std::time::Instant;

use ggpress::{
    exit_codes,
    // CLI
    Cli, Commands, CompactArgs, ConvertArgs, FixTarget, QcArgs, ValidateTarget,
    // Config
    CliOverrides, Config, PlanEntry,
    // Compactor
    compact_file, convert_file, CompactOptions, StyleSheet,
    // Validators
    load_document, validate_colors, validate_page, validate_race,
    BrandRules, PageRules, RaceRules, Report,
    // Fix-ups
    fix_colors_file,
    // QC
    collect_json_files, run_qc, write_report, QcRules,
};

fn main() {
    let cli = Cli::parse();

    init_tracing(cli.verbose);
    let verbose = cli.verbose > 0;
    let quiet = cli.quiet;

    let result = match cli.command {
        Commands::Compact(args) => run_compact(&args, verbose, quiet),
        Commands::Convert(args) => run_convert(&args),
        Commands::Validate(target) => run_validate(&target),
        Commands::Fix(target) => run_fix(&target),
        Commands::Qc(args) => run_qc_batch(&args, quiet),
    };

    std::process::exit(match result {
        Ok(()) => exit_codes::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            exit_codes::GENERAL_ERROR
        }
    });
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

// ============ Compact Command ============

fn run_compact(
    args: &CompactArgs,
    verbose: bool,
    quiet: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let start_time = Instant::now();

    // Load config file if specified, otherwise use default lookup
    let file_config = match &args.config {
        Some(config_path) => match Config::load_from_path(config_path) {
            Ok(cfg) => cfg,
            Err(e) => {
                eprintln!("Warning: Failed to load config file: {}", e);
                Config::default()
            }
        },
        None => Config::load().unwrap_or_default(),
    };

    // Merge config file with CLI arguments (CLI takes precedence)
    let cli_overrides = CliOverrides {
        content_dir: args.content_dir.clone(),
        output_dir: args.output_dir.clone(),
        ceiling: args.ceiling,
    };
    let config = file_config.merge_with_cli(&cli_overrides);

    // Resolve which plans to compact
    let plans: Vec<PlanEntry> = match &args.plan {
        Some(needle) => match config.find_plan(needle) {
            Some(plan) => vec![plan.clone()],
            None => {
                eprintln!("Error: No plan named '{}' in catalog", needle);
                std::process::exit(exit_codes::INPUT_NOT_FOUND);
            }
        },
        None => config.plans.clone(),
    };

    if plans.is_empty() {
        eprintln!("Error: Plan catalog is empty (is there a ggpress.toml?)");
        std::process::exit(exit_codes::INPUT_NOT_FOUND);
    }

    let options = CompactOptions::builder().ceiling(config.ceiling).build();
    let styles = StyleSheet::default();

    if args.dry_run {
        print_execution_plan(&config, &plans, &options);
        return Ok(());
    }

    let mut ok_count = 0usize;
    let mut skip_count = 0usize;
    let mut error_count = 0usize;

    for (idx, plan) in plans.iter().enumerate() {
        let source = config.source_path(plan);
        let dest_dir = config.plan_output_dir(plan);
        let output_file = dest_dir.join(ggpress::markdown::OUTPUT_FILE_NAME);

        if output_file.exists() && !args.force {
            if verbose {
                println!(
                    "[{}/{}] Skipping (exists): {}",
                    idx + 1,
                    plans.len(),
                    plan.name
                );
            }
            skip_count += 1;
            continue;
        }

        if !source.exists() {
            eprintln!(
                "Error: Source not found for '{}': {}",
                plan.name,
                source.display()
            );
            std::process::exit(exit_codes::INPUT_NOT_FOUND);
        }

        if verbose {
            println!("[{}/{}] Compacting: {}", idx + 1, plans.len(), plan.name);
        }

        match compact_file(&source, &dest_dir, &options, &styles) {
            Ok(outcome) => {
                ok_count += 1;
                if verbose {
                    println!(
                        "    Written: {} ({} bytes{})",
                        outcome.output_path.display(),
                        outcome.output_bytes,
                        if outcome.trimmed { ", trimmed" } else { "" }
                    );
                }
            }
            Err(e) => {
                eprintln!("Error compacting '{}': {}", plan.name, e);
                error_count += 1;
            }
        }
    }

    let elapsed = start_time.elapsed();

    if !quiet {
        println!(
            "Compacted {} plan(s): {} written, {} skipped, {} failed",
            plans.len(),
            ok_count,
            skip_count,
            error_count
        );
        println!("Total time: {:.2}s", elapsed.as_secs_f64());
    }

    if error_count > 0 {
        return Err(format!("{} plan(s) failed to compact", error_count).into());
    }

    Ok(())
}

/// Print execution plan for dry-run mode
fn print_execution_plan(config: &Config, plans: &[PlanEntry], options: &CompactOptions) {
    println!("=== Dry Run - Execution Plan ===");
    println!();
    println!("Content dir: {}", config.content_dir.display());
    println!("Output dir:  {}", config.output_dir.display());
    println!("Ceiling:     {} bytes", options.ceiling);
    println!();
    println!("Plans:");
    for (i, plan) in plans.iter().enumerate() {
        println!(
            "  {}. {} ({} -> {})",
            i + 1,
            plan.name,
            config.source_path(plan).display(),
            config
                .plan_output_dir(plan)
                .join(ggpress::markdown::OUTPUT_FILE_NAME)
                .display()
        );
    }
}

// ============ Convert Command ============

fn run_convert(args: &ConvertArgs) -> Result<(), Box<dyn std::error::Error>> {
    if !args.input.exists() {
        eprintln!("Error: Input file does not exist: {}", args.input.display());
        std::process::exit(exit_codes::INPUT_NOT_FOUND);
    }

    let output = convert_file(&args.input, args.output.as_deref())?;
    println!("Wrote {}", output.display());
    Ok(())
}

// ============ Validate Commands ============

fn run_validate(target: &ValidateTarget) -> Result<(), Box<dyn std::error::Error>> {
    let (file, report) = match target {
        ValidateTarget::Race(args) => {
            let doc = load_document(&args.file)?;
            (&args.file, validate_race(&doc, &RaceRules::default()))
        }
        ValidateTarget::Page(args) => {
            let doc = load_document(&args.file)?;
            (
                &args.file,
                validate_page(&doc, &PageRules::default(), &BrandRules::default()),
            )
        }
        ValidateTarget::Colors(args) => {
            let doc = load_document(&args.file)?;
            (&args.file, validate_colors(&doc, &BrandRules::default()))
        }
    };

    print_report(file, &report)
}

/// Print a validation report and convert it into the process outcome
fn print_report(file: &PathBuf, report: &Report) -> Result<(), Box<dyn std::error::Error>> {
    if report.is_pass() {
        println!("✓ Valid");
        return Ok(());
    }

    for finding in report.findings() {
        match &finding.path {
            Some(path) => println!(
                "✗ [{}] {}: {}",
                finding.category.marker(),
                path,
                finding.message
            ),
            None => println!("✗ [{}] {}", finding.category.marker(), finding.message),
        }
    }

    Err(format!("{} issue(s) found in {}", report.count(), file.display()).into())
}

// ============ Fix Commands ============

fn run_fix(target: &FixTarget) -> Result<(), Box<dyn std::error::Error>> {
    match target {
        FixTarget::Colors(args) => {
            let fixes = fix_colors_file(&args.file, &BrandRules::default(), args.write)?;

            if fixes.is_empty() {
                println!("✓ No forbidden colors in {}", args.file.display());
                return Ok(());
            }

            for fix in &fixes {
                println!("  {}: {} -> {}", fix.path, fix.from, fix.to);
            }
            if args.write {
                println!(
                    "{} replacement(s) written to {}",
                    fixes.len(),
                    args.file.display()
                );
            } else {
                println!(
                    "{} replacement(s) found (dry run; use --write to apply)",
                    fixes.len()
                );
            }
            Ok(())
        }
    }
}

// ============ QC Command ============

fn run_qc_batch(args: &QcArgs, quiet: bool) -> Result<(), Box<dyn std::error::Error>> {
    let mut files: Vec<PathBuf> = Vec::new();
    for path in &args.paths {
        files.extend(collect_json_files(path)?);
    }

    if files.is_empty() {
        return Err("No JSON files found".into());
    }

    let summary = run_qc(&files, &QcRules::default());

    for outcome in &summary.files {
        let kind = outcome.kind.map(|k| k.name()).unwrap_or("unreadable");

        if outcome.pass {
            println!("✓ {} [{}]", outcome.path.display(), kind);
            continue;
        }

        println!("✗ {} [{}]", outcome.path.display(), kind);
        if let Some(error) = &outcome.error {
            println!("    {}", error);
        }
        for finding in &outcome.findings {
            match &finding.path {
                Some(path) => println!(
                    "    [{}] {}: {}",
                    finding.category.marker(),
                    path,
                    finding.message
                ),
                None => println!("    [{}] {}", finding.category.marker(), finding.message),
            }
        }
    }

    if let Some(report_path) = &args.report {
        write_report(&summary, report_path)
            .with_context(|| format!("failed to write report to {}", report_path.display()))?;
    }

    if !quiet {
        println!(
            "{} file(s): {} passed, {} failed",
            summary.total(),
            summary.passed(),
            summary.failed()
        );
    }

    if !summary.all_passed() {
        return Err(format!("{} file(s) failed QC", summary.failed()).into());
    }

    Ok(())
}
