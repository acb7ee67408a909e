//! Configuration file types for import-graph.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::module::ModuleResolver;
use crate::policy::{build_configuration, ConfigurationError, PolicyConfiguration, RawOptions};

/// Name `init` gives the project config file.
pub const CONFIG_FILE_NAME: &str = "import-graph.toml";

/// Accepted project config file names, in lookup order.
///
/// Unless `boundary-marker` says otherwise, any of them also marks the
/// directory module names are resolved from.
pub const CONFIG_FILE_NAMES: &[&str] = &[CONFIG_FILE_NAME, ".import-graph.toml"];

/// Top-level configuration for import-graph.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Analyzer configuration.
    #[serde(default)]
    pub analyzer: AnalyzerConfig,

    /// Import policy options.
    #[serde(default)]
    pub policy: RawOptions,
}

impl Config {
    /// Creates a new default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &std::path::Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })
    }

    /// Validates the `[policy]` section.
    ///
    /// # Errors
    ///
    /// Returns the first malformed policy entry.
    pub fn policy(&self) -> Result<PolicyConfiguration, ConfigurationError> {
        build_configuration(&self.policy)
    }
}

/// Analyzer-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct AnalyzerConfig {
    /// Root directory to analyze (default: current directory).
    #[serde(default = "default_root")]
    pub root: PathBuf,

    /// Glob patterns to exclude from analysis.
    #[serde(default)]
    pub exclude: Vec<String>,

    /// File whose presence stops module resolution.
    ///
    /// Unset means any of [`CONFIG_FILE_NAMES`].
    #[serde(default)]
    pub boundary_marker: Option<String>,

    /// Whether to respect .gitignore files.
    #[serde(default = "default_true")]
    pub respect_gitignore: bool,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            exclude: Vec::new(),
            boundary_marker: None,
            respect_gitignore: true,
        }
    }
}

impl AnalyzerConfig {
    /// Module resolver honouring `boundary-marker`.
    #[must_use]
    pub fn resolver(&self) -> ModuleResolver {
        match &self.boundary_marker {
            Some(marker) => ModuleResolver::new(marker.clone()),
            None => ModuleResolver::default(),
        }
    }
}

fn default_root() -> PathBuf {
    PathBuf::from(".")
}

fn default_true() -> bool {
    true
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// IO error reading config file.
    #[error("Failed to read config file {path}: {source}")]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// Parse error in config file.
    #[error("Failed to parse config: {message}")]
    Parse {
        /// Parse error message.
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.analyzer.respect_gitignore);
        assert!(config.analyzer.boundary_marker.is_none());
        assert_eq!(config.analyzer.resolver().markers(), CONFIG_FILE_NAMES);
        assert!(config.policy.is_empty());
    }

    #[test]
    fn test_parse_config() {
        let toml = r#"
[analyzer]
root = "./src"
exclude = ["**/.venv/**"]
boundary-marker = ".flake8"

[policy]
deny-imports = ["app.domain=app.web", "app.domain=django"]
allow-all-imports = ["app.tests"]
allow-relative-imports = ["app.legacy"]
"#;

        let config = Config::parse(toml).expect("Failed to parse");
        assert_eq!(config.analyzer.root, PathBuf::from("./src"));
        assert_eq!(config.analyzer.boundary_marker.as_deref(), Some(".flake8"));
        assert_eq!(config.analyzer.resolver().markers(), [".flake8"]);
        assert_eq!(config.policy.deny_imports.len(), 2);

        let policy = config.policy().expect("valid policy");
        assert_eq!(policy.deny_rules().len(), 2);
        assert_eq!(policy.exemptions().len(), 1);
        assert_eq!(policy.relative_allowances().len(), 1);
    }

    #[test]
    fn test_empty_file_is_default() {
        let config = Config::parse("").expect("Failed to parse");
        assert!(config.policy.is_empty());
        assert_eq!(config.analyzer.root, PathBuf::from("."));
    }

    #[test]
    fn test_invalid_toml() {
        let err = Config::parse("[policy\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_malformed_policy_entry() {
        let config = Config::parse("[policy]\ndeny-imports = [\"app.domain\"]\n").unwrap();
        assert!(matches!(
            config.policy(),
            Err(ConfigurationError::MissingSeparator { .. })
        ));
    }

    #[test]
    fn test_missing_file() {
        let err = Config::from_file(std::path::Path::new("/nonexistent/import-graph.toml"))
            .unwrap_err();
        assert!(err.to_string().contains("/nonexistent/import-graph.toml"));
    }
}
