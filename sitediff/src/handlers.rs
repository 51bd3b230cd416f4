use anyhow::{Context, Result, bail};
use clap::ArgMatches;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use sitediff_core::config::InputConfig;
use sitediff_core::equivalence::Candidate;
use sitediff_core::report::{
    InventorySummary, ReportFormat, generate_json_summary, generate_text_summary, write_csv,
};
use sitediff_core::{
    Classifiers, EquivalenceMatcher, InputLayout, InventoryPipeline, MigrationConfig,
    canonical_path,
};
use sitediff_ingest::{SitemapMode, read_sitemap};
use std::collections::BTreeSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

// Helper functions shared by the handlers

/// Expand `~` and environment references in a user-supplied path.
pub fn expand_path(raw: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(raw).as_ref())
}

/// Built-in tables, or the given TOML file layered over them.
pub fn load_config(path: Option<&String>) -> Result<MigrationConfig> {
    match path {
        Some(raw) => {
            let path = expand_path(raw);
            MigrationConfig::load(&path)
                .with_context(|| format!("Failed to load config {}", path.display()))
        }
        None => Ok(MigrationConfig::default()),
    }
}

/// The conventional layout under `root`, with any explicitly given directory taking over.
pub fn resolve_layout(
    root: &Path,
    old_dir: Option<&String>,
    new_dir: Option<&String>,
    gsc_dir: Option<&String>,
    inputs: &InputConfig,
) -> InputLayout {
    let mut layout = InputLayout::under(root, inputs);
    if let Some(dir) = old_dir {
        layout.old_dir = expand_path(dir);
    }
    if let Some(dir) = new_dir {
        layout.new_dir = expand_path(dir);
    }
    if let Some(dir) = gsc_dir {
        layout.gsc_dir = expand_path(dir);
    }
    layout
}

/// One line per input: canonical path, page type, group and what decided it.
pub fn describe_classification(
    input: &str,
    classifiers: &Classifiers,
    new_sitemap: Option<&str>,
) -> String {
    let path = canonical_path(input);
    match new_sitemap {
        Some(file) => {
            let label = classifiers.new_site.classify(file);
            format!(
                "{}\t{}\t{}\t(sitemap: {})",
                path, label.page_type, label.group, file
            )
        }
        None => {
            let label = classifiers.old_site.classify(&path);
            let rule = classifiers
                .old_site
                .matching_rule(&path)
                .map(|rule| rule.name.as_str())
                .unwrap_or("fallback");
            format!(
                "{}\t{}\t{}\t(rule: {})",
                path, label.page_type, label.group, rule
            )
        }
    }
}

/// Canonical paths of every `<loc>` in the given sitemap files.
pub fn load_sitemap_paths(files: &[PathBuf]) -> Result<BTreeSet<String>> {
    let mut paths = BTreeSet::new();
    for file in files {
        let locs = read_sitemap(file, SitemapMode::WithIndex)
            .with_context(|| format!("Failed to read sitemap {}", file.display()))?;
        paths.extend(locs.iter().map(|loc| canonical_path(loc)));
    }
    Ok(paths)
}

/// Candidate listing, best first.
pub fn describe_candidates(candidates: &[Candidate]) -> Vec<String> {
    candidates
        .iter()
        .enumerate()
        .map(|(idx, candidate)| {
            format!("{}. {}  (via {})", idx + 1, candidate.path, candidate.heuristic)
        })
        .collect()
}

fn print_divider() {
    println!("{}", "═".repeat(60).bright_blue().bold());
}

fn spinner(quiet: bool) -> ProgressBar {
    if quiet {
        return ProgressBar::hidden();
    }
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

fn print_summary(summary: &InventorySummary, format: ReportFormat) -> Result<()> {
    match format {
        ReportFormat::Json => {
            println!("{}", generate_json_summary(summary)?);
        }
        ReportFormat::Text => {
            let text = generate_text_summary(summary);
            for line in text.lines() {
                if line.starts_with("  ! ") {
                    println!("{}", line.yellow());
                } else {
                    println!("{}", line);
                }
            }
        }
    }
    Ok(())
}

pub fn handle_inventory(args: &ArgMatches, quiet: bool) -> Result<()> {
    // stdout carries the summary, logs go to stderr
    let _ = tracing_subscriber::fmt().with_writer(io::stderr).try_init();

    let config = load_config(args.get_one::<String>("config"))?;
    let root = args
        .get_one::<String>("root")
        .map(|raw| expand_path(raw))
        .unwrap_or_else(|| PathBuf::from("."));
    let layout = resolve_layout(
        &root,
        args.get_one::<String>("old-dir"),
        args.get_one::<String>("new-dir"),
        args.get_one::<String>("gsc-dir"),
        &config.inputs,
    );
    let output_dir = args
        .get_one::<String>("output-dir")
        .map(|raw| expand_path(raw))
        .unwrap_or_else(|| root.clone());
    let format = args
        .get_one::<String>("format")
        .and_then(|name| ReportFormat::from_name(name))
        .unwrap_or(ReportFormat::Text);

    if !quiet && !layout.old_dir.is_dir() && !layout.new_dir.is_dir() {
        eprintln!(
            "{} Neither {} nor {} exists; the reports will be empty",
            "⚠".yellow().bold(),
            layout.old_dir.display(),
            layout.new_dir.display()
        );
    }

    let bar = spinner(quiet || format == ReportFormat::Json);
    let progress_bar = bar.clone();
    let pipeline = InventoryPipeline::new(layout, config).with_progress_callback(Arc::new(
        move |message: String| progress_bar.set_message(message),
    ));

    let inventory = pipeline.run()?;
    bar.set_message("Writing reports...");

    info!("Writing reports to {}", output_dir.display());
    fs::create_dir_all(&output_dir)
        .with_context(|| format!("Failed to create {}", output_dir.display()))?;
    let old_rows = inventory.old_rows();
    let new_rows = inventory.new_rows();
    let old_path = output_dir.join(&pipeline.config().inputs.old_report);
    let new_path = output_dir.join(&pipeline.config().inputs.new_report);
    write_csv(&old_rows, &old_path)
        .with_context(|| format!("Failed to write {}", old_path.display()))?;
    write_csv(&new_rows, &new_path)
        .with_context(|| format!("Failed to write {}", new_path.display()))?;
    bar.finish_and_clear();

    if format == ReportFormat::Text && !quiet {
        println!(
            "{} Wrote {} rows → {}",
            "✓".green().bold(),
            old_rows.len(),
            old_path.display()
        );
        println!(
            "{} Wrote {} rows → {}\n",
            "✓".green().bold(),
            new_rows.len(),
            new_path.display()
        );
    }

    let summary = InventorySummary::from_rows(&old_rows, &new_rows, &inventory.warnings);
    print_summary(&summary, format)
}

pub fn handle_classify(args: &ArgMatches) -> Result<()> {
    let config = load_config(args.get_one::<String>("config"))?;
    let classifiers = Classifiers::from_config(&config.classify)?;
    let new_sitemap = args.get_one::<String>("new-sitemap").map(String::as_str);

    for input in args.get_many::<String>("PATH").into_iter().flatten() {
        println!("{}", describe_classification(input, &classifiers, new_sitemap));
    }
    Ok(())
}

pub fn handle_match(args: &ArgMatches) -> Result<()> {
    let config = load_config(args.get_one::<String>("config"))?;
    let Some(input) = args.get_one::<String>("PATH") else {
        bail!("A new-site path is required");
    };
    let files: Vec<PathBuf> = args
        .get_many::<PathBuf>("old-sitemap")
        .into_iter()
        .flatten()
        .map(|file| expand_path(&file.to_string_lossy()))
        .collect();

    let old_paths = load_sitemap_paths(&files)?;
    let path = canonical_path(input);
    let matcher = EquivalenceMatcher::new(config.matcher);

    print_divider();
    println!("{} {}", "New-site path:".bright_cyan().bold(), path);
    println!("{} {}", "Old-site paths loaded:".bright_cyan().bold(), old_paths.len());
    print_divider();

    if old_paths.contains(&path) {
        println!("{} same path exists on the old site", "✓".green().bold());
        return Ok(());
    }

    let candidates = matcher.candidates(&path, &old_paths);
    if candidates.is_empty() {
        println!("{} no old-site equivalent found", "✗".red().bold());
    } else {
        for line in describe_candidates(&candidates) {
            println!("  {}", line);
        }
    }
    Ok(())
}

pub fn handle_default_config() -> Result<()> {
    print!("{}", MigrationConfig::default().to_toml_string()?);
    Ok(())
}
