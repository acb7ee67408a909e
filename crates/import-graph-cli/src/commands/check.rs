//! Check command implementation.

use anyhow::{Context, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};
use import_graph_core::{Config, LintResult, PolicyEngine, RawOptions};
use import_graph_py::{LanguageExtractor, PythonExtractor};
use std::path::{Path, PathBuf};

use crate::config_resolver::ConfigSource;
use crate::OutputFormat;

/// Runs the check command.
pub fn run(
    path: &Path,
    format: OutputFormat,
    exclude: &[String],
    overrides: RawOptions,
    source: &ConfigSource,
) -> Result<()> {
    let config = source.load()?;
    let result = collect(path, &config, exclude, overrides)?;

    super::output::print(&result, format)?;

    if result.has_violations() {
        std::process::exit(1);
    }

    Ok(())
}

/// Checks every supported file under `path` and gathers the reports.
pub fn collect(
    path: &Path,
    config: &Config,
    exclude: &[String],
    overrides: RawOptions,
) -> Result<LintResult> {
    let mut raw = config.policy.clone();
    raw.extend(overrides);
    let policy = import_graph_core::build_configuration(&raw).context("Invalid import policy")?;
    let engine = PolicyEngine::new(policy, config.analyzer.resolver());

    let rules = engine.config();
    if rules.deny_rules().is_empty() {
        tracing::warn!("No deny-imports rules configured; nothing will be reported");
    }
    tracing::debug!(
        "Policy: {} deny rule(s), {} exemption(s), {} relative allowance(s); boundary marker(s): {}",
        rules.deny_rules().len(),
        rules.exemptions().len(),
        rules.relative_allowances().len(),
        engine.resolver().markers().join(", ")
    );

    let extractors: Vec<Box<dyn LanguageExtractor>> = vec![Box::new(PythonExtractor::new())];

    // Module resolution climbs parent directories, which a relative root
    // such as `.` does not have.
    let root = path
        .join(&config.analyzer.root)
        .canonicalize()
        .with_context(|| format!("Failed to resolve root {}", path.display()))?;

    let mut patterns = config.analyzer.exclude.clone();
    patterns.extend(exclude.iter().cloned());
    let excludes = build_globset(&patterns)?;

    let files = discover_files(&root, &excludes, config.analyzer.respect_gitignore, &extractors)?;

    tracing::info!("Checking imports in {} file(s)", files.len());

    let mut result = LintResult::new();

    for file_path in &files {
        let Some(extractor) = extractors.iter().find(|e| e.handles(file_path)) else {
            continue;
        };

        let source = std::fs::read_to_string(file_path)
            .with_context(|| format!("Failed to read {}", file_path.display()))?;
        let imports = extractor
            .extract(&source)
            .with_context(|| format!("Failed to parse {}", file_path.display()))?;

        let mut report = engine.check_file(file_path, &imports);
        tracing::debug!(
            "{} -> {} ({} import(s), {} violation(s))",
            file_path.display(),
            report.module,
            imports.len(),
            report.violations.len()
        );

        report.file = file_path
            .strip_prefix(&root)
            .unwrap_or(file_path)
            .to_path_buf();
        result.push(report);
    }

    result.sort();
    Ok(result)
}

fn build_globset(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob =
            Glob::new(pattern).with_context(|| format!("Invalid exclude pattern: {pattern}"))?;
        builder.add(glob);
    }
    builder.build().context("Failed to build exclude patterns")
}

fn discover_files(
    root: &Path,
    excludes: &GlobSet,
    respect_gitignore: bool,
    extractors: &[Box<dyn LanguageExtractor>],
) -> Result<Vec<PathBuf>> {
    let mut builder = ignore::WalkBuilder::new(root);
    builder.git_ignore(respect_gitignore);

    let mut files = Vec::new();
    for entry in builder.build() {
        let entry = entry?;
        let path = entry.path();

        if !path.is_file() || !extractors.iter().any(|e| e.handles(path)) {
            continue;
        }

        let rel = path.strip_prefix(root).unwrap_or(path);
        if excludes.is_match(rel) {
            tracing::debug!("Excluded {}", rel.display());
            continue;
        }

        files.push(path.to_path_buf());
    }

    files.sort();
    Ok(files)
}
