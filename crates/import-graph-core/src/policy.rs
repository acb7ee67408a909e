//! Policy configuration: deny-rules, exemptions and relative-import allowances.
//!
//! Raw option strings are validated once by [`build_configuration`]; the
//! resulting [`PolicyConfiguration`] is immutable and shared across files.

use miette::Diagnostic;
use serde::{Deserialize, Serialize};

use crate::types::DottedPath;
use crate::utils::paths::split_dotted;

/// Separator between source and denied prefix in a deny entry.
pub const RULE_SEPARATOR: char = '=';

/// Unvalidated policy options as they come from a config file or command line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct RawOptions {
    /// Entries like `mypkg.where=other_pkg.disallowed_sub_package`.
    #[serde(default)]
    pub deny_imports: Vec<String>,

    /// Modules exempted from all denials, like `mypkg.where.exempted_module`.
    #[serde(default)]
    pub allow_all_imports: Vec<String>,

    /// Packages whose relative imports are never checked.
    #[serde(default)]
    pub allow_relative_imports: Vec<String>,
}

impl RawOptions {
    /// Appends another set of options after this one.
    pub fn extend(&mut self, other: Self) {
        self.deny_imports.extend(other.deny_imports);
        self.allow_all_imports.extend(other.allow_all_imports);
        self.allow_relative_imports
            .extend(other.allow_relative_imports);
    }

    /// Returns true when no option has any entry.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.deny_imports.is_empty()
            && self.allow_all_imports.is_empty()
            && self.allow_relative_imports.is_empty()
    }
}

/// Malformed policy entry.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, Diagnostic)]
pub enum ConfigurationError {
    /// An entry is empty or whitespace only.
    #[error("{option}: empty entry")]
    #[diagnostic(
        code(import_graph::config::empty_entry),
        help("remove the entry or fill in a dotted module path")
    )]
    EmptyEntry {
        /// Option the entry belongs to.
        option: &'static str,
    },

    /// A dotted path has an empty segment (`a..b`, `.a`, `a.`).
    #[error("{option}: `{entry}` contains an empty path segment")]
    #[diagnostic(code(import_graph::config::empty_segment))]
    EmptySegment {
        /// Option the entry belongs to.
        option: &'static str,
        /// Offending entry.
        entry: String,
    },

    /// A deny entry has no `=` between source and denied prefix.
    #[error("deny-imports: `{entry}` is missing the `=` separator")]
    #[diagnostic(
        code(import_graph::config::missing_separator),
        help("use the form `source.package=denied.package`")
    )]
    MissingSeparator {
        /// Offending entry.
        entry: String,
    },
}

/// "Modules under `source` must not import anything under `denied`."
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DenyRule {
    /// Prefix of the importing modules.
    pub source: DottedPath,
    /// Prefix of the forbidden import targets.
    pub denied: DottedPath,
}

/// Validated, immutable policy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PolicyConfiguration {
    deny_rules: Vec<DenyRule>,
    exemptions: Vec<DottedPath>,
    relative_allowed: Vec<DottedPath>,
}

/// Builds a [`PolicyConfiguration`] from raw options.
///
/// # Errors
///
/// Returns the first malformed entry: empty, with an empty segment, or a
/// deny entry without `=`.
pub fn build_configuration(raw: &RawOptions) -> Result<PolicyConfiguration, ConfigurationError> {
    let deny_rules = raw
        .deny_imports
        .iter()
        .map(|entry| parse_deny_rule(entry))
        .collect::<Result<Vec<_>, _>>()?;
    let exemptions = raw
        .allow_all_imports
        .iter()
        .map(|entry| parse_prefix("allow-all-imports", entry))
        .collect::<Result<Vec<_>, _>>()?;
    let relative_allowed = raw
        .allow_relative_imports
        .iter()
        .map(|entry| parse_prefix("allow-relative-imports", entry))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(PolicyConfiguration {
        deny_rules,
        exemptions,
        relative_allowed,
    })
}

fn parse_deny_rule(entry: &str) -> Result<DenyRule, ConfigurationError> {
    let trimmed = entry.trim();
    if trimmed.is_empty() {
        return Err(ConfigurationError::EmptyEntry {
            option: "deny-imports",
        });
    }
    let (source, denied) =
        trimmed
            .split_once(RULE_SEPARATOR)
            .ok_or_else(|| ConfigurationError::MissingSeparator {
                entry: trimmed.to_string(),
            })?;
    Ok(DenyRule {
        source: parse_prefix("deny-imports", source)?,
        denied: parse_prefix("deny-imports", denied)?,
    })
}

fn parse_prefix(option: &'static str, entry: &str) -> Result<DottedPath, ConfigurationError> {
    let trimmed = entry.trim();
    if trimmed.is_empty() {
        return Err(ConfigurationError::EmptyEntry { option });
    }
    let segments = split_dotted(trimmed);
    if segments.iter().any(|s| s.is_empty()) {
        return Err(ConfigurationError::EmptySegment {
            option,
            entry: trimmed.to_string(),
        });
    }
    Ok(DottedPath::from_segments(segments))
}

impl PolicyConfiguration {
    /// Deny-rules in configuration order.
    #[must_use]
    pub fn deny_rules(&self) -> &[DenyRule] {
        &self.deny_rules
    }

    /// Exemption prefixes.
    #[must_use]
    pub fn exemptions(&self) -> &[DottedPath] {
        &self.exemptions
    }

    /// Relative-import allowance prefixes.
    #[must_use]
    pub fn relative_allowances(&self) -> &[DottedPath] {
        &self.relative_allowed
    }

    /// Is `module` exempt from every deny-rule?
    #[must_use]
    pub fn is_exempt(&self, module: &DottedPath) -> bool {
        self.exemptions.iter().any(|e| e.is_prefix_of(module))
    }

    /// Derives the rule subset that applies to `module`.
    #[must_use]
    pub fn module_policy(&self, module: &DottedPath) -> ModulePolicy<'_> {
        let matching: Vec<&DenyRule> = self
            .deny_rules
            .iter()
            .filter(|r| r.source.is_prefix_of(module))
            .collect();
        ModulePolicy {
            denied: matching.iter().map(|r| &r.denied).collect(),
            allowed_override: matching.iter().map(|r| &r.source).collect(),
            relative_allowed: self
                .relative_allowed
                .iter()
                .any(|p| p.is_prefix_of(module)),
        }
    }
}

/// The part of a [`PolicyConfiguration`] that applies to one module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModulePolicy<'a> {
    /// Denied prefixes of every rule whose source covers the module.
    pub denied: Vec<&'a DottedPath>,
    /// Source prefixes of those same rules; a target under one is never denied.
    pub allowed_override: Vec<&'a DottedPath>,
    /// Relative imports are skipped entirely.
    pub relative_allowed: bool,
}
