//! chakra-refactor: Detect and fix generic Chakra UI Box elements.
//!
//! Scans JSX/TSX sources for `<Box>` elements imported from
//! `@chakra-ui/react` whose attributes prescribe a more specific component
//! (`display="flex"` -> `Flex`), reports them, and applies the rewrite on
//! request.

use anyhow::{Context, Result};
use chakra_refactor::{
    analyzer::{self, DetectionResult, Diagnostics, Finding},
    classifier, rewriter, scanner,
};
use clap::Parser;
use colored::Colorize;
use std::collections::BTreeMap;
use std::path::PathBuf;

mod cli;

use cli::{Args, Commands};

fn main() -> Result<()> {
    let args = Args::parse();

    match args.command {
        Commands::Check {
            paths,
            exclude,
            no_default_excludes,
            json,
            verbose,
        } => cmd_check(paths, &exclude, no_default_excludes, json, verbose),
        Commands::Fix {
            write,
            interactive,
            paths,
            exclude,
            no_default_excludes,
        } => cmd_fix(write, interactive, paths, &exclude, no_default_excludes),
        Commands::Scan {
            paths,
            exclude,
            no_default_excludes,
        } => cmd_scan(paths, &exclude, no_default_excludes),
        Commands::Rules => cmd_rules(),
    }
}

fn build_excludes(patterns: &[String]) -> Result<Vec<glob::Pattern>> {
    patterns
        .iter()
        .map(|p| glob::Pattern::new(p).with_context(|| format!("Invalid exclude pattern '{}'", p)))
        .collect()
}

fn collect_files(
    paths: Option<Vec<PathBuf>>,
    exclude: &[String],
    no_default_excludes: bool,
) -> Result<Vec<PathBuf>> {
    let scan_paths = paths.unwrap_or_else(|| vec![PathBuf::from(".")]);
    let patterns = build_excludes(exclude)?;
    scanner::collect_source_files(&scan_paths, &patterns, !no_default_excludes)
}

fn cmd_check(
    paths: Option<Vec<PathBuf>>,
    exclude: &[String],
    no_default_excludes: bool,
    json_output: bool,
    verbose: bool,
) -> Result<()> {
    let files = collect_files(paths, exclude, no_default_excludes)?;
    if verbose {
        eprintln!(
            "{} Found {} source files to scan",
            "info:".blue().bold(),
            files.len()
        );
    }

    let mut findings = Vec::new();
    let mut diagnostics = Diagnostics {
        files_scanned: files.len(),
        ..Default::default()
    };

    for file in &files {
        let source = match std::fs::read_to_string(file) {
            Ok(source) => source,
            Err(err) => {
                eprintln!(
                    "{} Skipping {}: {}",
                    "warn:".yellow().bold(),
                    file.display(),
                    err
                );
                continue;
            }
        };
        let analysis = match analyzer::analyze_source(&source, file) {
            Ok(analysis) => analysis,
            Err(err) => {
                eprintln!(
                    "{} Skipping {}: {:#}",
                    "warn:".yellow().bold(),
                    file.display(),
                    err
                );
                continue;
            }
        };
        diagnostics.elements_seen += analysis.elements_seen;
        diagnostics.eligible_elements += analysis.eligible_elements;
        findings.extend(analysis.findings);
    }

    diagnostics.findings = findings.len();
    diagnostics.fixable = findings.iter().filter(|f| f.fix.is_some()).count();
    diagnostics.unfixable = findings.iter().filter(|f| f.fix.is_none()).count();

    let any_findings = !findings.is_empty();
    let result = DetectionResult {
        findings,
        diagnostics,
    };

    if json_output {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_detection_result(&result, verbose);
    }

    if any_findings {
        std::process::exit(1);
    }
    Ok(())
}

fn cmd_fix(
    write: bool,
    interactive: bool,
    paths: Option<Vec<PathBuf>>,
    exclude: &[String],
    no_default_excludes: bool,
) -> Result<()> {
    let files = collect_files(paths, exclude, no_default_excludes)?;

    let mut findings_by_file: BTreeMap<PathBuf, Vec<Finding>> = BTreeMap::new();
    for file in &files {
        let source = match std::fs::read_to_string(file) {
            Ok(source) => source,
            Err(err) => {
                eprintln!(
                    "{} Skipping {}: {}",
                    "warn:".yellow().bold(),
                    file.display(),
                    err
                );
                continue;
            }
        };
        match analyzer::analyze_source(&source, file) {
            Ok(analysis) => {
                let fixable: Vec<_> = analysis
                    .findings
                    .into_iter()
                    .filter(|f| f.fix.is_some())
                    .collect();
                if !fixable.is_empty() {
                    findings_by_file.insert(file.clone(), fixable);
                }
            }
            Err(err) => {
                eprintln!(
                    "{} Skipping {}: {:#}",
                    "warn:".yellow().bold(),
                    file.display(),
                    err
                );
            }
        }
    }

    if findings_by_file.is_empty() {
        println!("{} No changes to apply", "info:".blue().bold());
        return Ok(());
    }

    for (file, findings) in &findings_by_file {
        println!(
            "\n{} {}",
            if write { "Updating:" } else { "Would update:" }
                .yellow()
                .bold(),
            file.display()
        );
        for finding in findings {
            println!(
                "  {}:{}: {} -> {} ({})",
                finding.line,
                finding.column,
                finding.invalid_component.red(),
                finding.valid_component.green(),
                finding.attribute.dimmed()
            );
        }

        if write {
            if interactive {
                let confirmed = dialoguer::Confirm::new()
                    .with_prompt(format!("Apply changes to {}?", file.display()))
                    .default(true)
                    .interact()?;
                if !confirmed {
                    println!("  {} skipped", "info:".blue().bold());
                    continue;
                }
            }

            let edits: Vec<_> = findings
                .iter()
                .filter_map(|f| f.fix.as_ref())
                .flat_map(|p| p.edits.iter().cloned())
                .collect();
            rewriter::apply_to_file(file, &edits)?;
        }
    }

    if !write {
        println!("\n{} Use --write to apply changes", "hint:".cyan().bold());
    }

    Ok(())
}

fn cmd_scan(
    paths: Option<Vec<PathBuf>>,
    exclude: &[String],
    no_default_excludes: bool,
) -> Result<()> {
    let files = collect_files(paths, exclude, no_default_excludes)?;

    println!("Would scan {} files:", files.len());
    for file in files {
        println!("  {}", file.display());
    }

    Ok(())
}

fn cmd_rules() -> Result<()> {
    println!(
        "Tracked component: {} from {}\n",
        classifier::GENERIC_COMPONENT.bold(),
        classifier::TARGET_MODULE
    );
    for rule in classifier::RULES {
        println!(
            "  <{} {}=\"{}\"> -> <{}>",
            rule.component,
            rule.attribute,
            rule.value,
            rule.replacement.green()
        );
    }
    Ok(())
}

fn print_detection_result(result: &DetectionResult, verbose: bool) {
    let d = &result.diagnostics;

    if verbose {
        println!(
            "\n{} Files: {}, Elements: {} ({} eligible)",
            "Diagnostics:".bold(),
            d.files_scanned,
            d.elements_seen,
            d.eligible_elements
        );
        println!(
            "             Findings: {} ({} fixable, {} unfixable)",
            d.findings, d.fixable, d.unfixable
        );
    }

    if result.findings.is_empty() {
        println!("{} No replaceable elements found", "ok:".green().bold());
        return;
    }

    println!(
        "\n{} {} replaceable element(s):\n",
        "Found".red().bold(),
        result.findings.len()
    );

    for finding in &result.findings {
        let loc = format!(
            "{}:{}:{}",
            finding.file.display(),
            finding.line,
            finding.column
        );
        println!("  {} {}", loc.dimmed(), finding.message());
        if finding.fix.is_none() {
            println!("    {}", "(no import declaration; fix unavailable)".dimmed());
        }
    }
}
