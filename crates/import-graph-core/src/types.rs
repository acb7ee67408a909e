//! Core types for dotted paths, violations and results.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::utils::paths::{is_prefix, join_dotted, split_dotted};

/// A dotted module path (`pkg.sub.mod`) held as its segments.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub struct DottedPath {
    segments: Vec<String>,
}

impl DottedPath {
    /// Creates a path from already separated segments.
    #[must_use]
    pub fn from_segments<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            segments: segments.into_iter().map(Into::into).collect(),
        }
    }

    /// Splits a dotted name without validating it.
    ///
    /// Use [`crate::build_configuration`] for user-supplied policy entries.
    #[must_use]
    pub fn split(name: &str) -> Self {
        Self::from_segments(split_dotted(name))
    }

    /// The path's segments, outermost package first.
    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Checks if `self` is a prefix of `other`.
    #[must_use]
    pub fn is_prefix_of(&self, other: &Self) -> bool {
        is_prefix(&self.segments, &other.segments)
    }

    /// Returns this path with its last `levels` segments removed.
    ///
    /// Removing more segments than the path has yields the empty path.
    #[must_use]
    pub fn ancestor(&self, levels: usize) -> Self {
        let keep = self.segments.len().saturating_sub(levels);
        Self {
            segments: self.segments[..keep].to_vec(),
        }
    }

    /// Returns a new path with `other`'s segments appended.
    #[must_use]
    pub fn join(&self, other: &Self) -> Self {
        let mut segments = self.segments.clone();
        segments.extend(other.segments.iter().cloned());
        Self { segments }
    }
}

impl std::fmt::Display for DottedPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&join_dotted(&self.segments))
    }
}

impl From<String> for DottedPath {
    fn from(name: String) -> Self {
        Self::split(&name)
    }
}

impl From<DottedPath> for String {
    fn from(path: DottedPath) -> Self {
        path.to_string()
    }
}

/// A single denied import found in a file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViolationRecord {
    /// Line number (1-indexed).
    pub line: usize,
    /// Column (0-indexed byte offset within line).
    pub column: usize,
    /// Human-readable message, prefixed with the rule id.
    pub message: String,
    /// Rule id (always [`crate::RULE_ID`]).
    pub rule_id: String,
}

impl ViolationRecord {
    /// Creates a record for a denied import target.
    #[must_use]
    pub fn denied(line: usize, column: usize, target: &str) -> Self {
        Self {
            line,
            column,
            message: format!("{} Denied import {target}", crate::RULE_ID),
            rule_id: crate::RULE_ID.to_string(),
        }
    }
}

impl std::fmt::Display for ViolationRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}: {}", self.line, self.column, self.message)
    }
}

/// Violations found in one file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileReport {
    /// File path as given to the engine.
    pub file: PathBuf,
    /// Resolved module identity.
    pub module: DottedPath,
    /// Whether the module matched an exemption prefix.
    #[serde(default)]
    pub exempt: bool,
    /// Violations in source order.
    pub violations: Vec<ViolationRecord>,
}

/// Result of checking a set of files.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct LintResult {
    /// Reports of files with at least one violation.
    pub reports: Vec<FileReport>,
    /// Number of files checked.
    pub files_checked: usize,
}

impl LintResult {
    /// Creates a new empty result.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a checked file, keeping its report only when it has violations.
    pub fn push(&mut self, report: FileReport) {
        self.files_checked += 1;
        if !report.violations.is_empty() {
            self.reports.push(report);
        }
    }

    /// Returns true if any file has a violation.
    #[must_use]
    pub fn has_violations(&self) -> bool {
        self.reports.iter().any(|r| !r.violations.is_empty())
    }

    /// Total number of violations across all files.
    #[must_use]
    pub fn violation_count(&self) -> usize {
        self.reports.iter().map(|r| r.violations.len()).sum()
    }

    /// Iterates over `(report, violation)` pairs in report order.
    pub fn violations(&self) -> impl Iterator<Item = (&FileReport, &ViolationRecord)> {
        self.reports
            .iter()
            .flat_map(|r| r.violations.iter().map(move |v| (r, v)))
    }

    /// Sorts reports by file path.
    pub fn sort(&mut self) {
        self.reports.sort_by(|a, b| a.file.cmp(&b.file));
    }
}
