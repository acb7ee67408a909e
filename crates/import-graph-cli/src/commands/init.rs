//! Init command implementation.

use anyhow::{bail, Result};
use import_graph_core::CONFIG_FILE_NAME;
use std::path::Path;

const DEFAULT_CONFIG: &str = r#"# import-graph configuration
#
# This file also marks the project root: module names are resolved
# relative to the directory that contains it.

[analyzer]
# Root directory to analyze (default: current directory)
# root = "./src"

# Glob patterns to exclude from analysis
exclude = [
    "**/.venv/**",
    "**/build/**",
    "**/migrations/**",
]

# File whose presence stops module-name resolution
# (default: import-graph.toml or .import-graph.toml)
# boundary-marker = "setup.cfg"

# Respect .gitignore files
respect-gitignore = true

[policy]
# Modules under the left prefix must not import anything under the right one.
deny-imports = [
    # "mypkg.domain=mypkg.web",
    # "mypkg.domain=django",
]

# Modules exempted from every denial
allow-all-imports = [
    # "mypkg.tests",
]

# Packages whose relative imports are never checked
allow-relative-imports = [
    # "mypkg.legacy",
]
"#;

/// Runs the init command.
pub fn run(force: bool) -> Result<()> {
    let config_path = Path::new(CONFIG_FILE_NAME);

    if config_path.exists() && !force {
        bail!(
            "Configuration file already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    std::fs::write(config_path, DEFAULT_CONFIG)?;

    println!("Created {}", config_path.display());
    println!("\nNext steps:");
    println!("  1. Add deny-imports rules under [policy]");
    println!("  2. Run: import-graph check");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use import_graph_core::Config;

    #[test]
    fn template_parses_with_empty_policy() {
        let config = Config::parse(DEFAULT_CONFIG).expect("template should parse");
        assert!(config.policy.is_empty());
        assert!(config.analyzer.boundary_marker.is_none());
        assert!(config.policy().is_ok());
    }
}
