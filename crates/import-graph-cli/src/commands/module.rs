//! Module command: prints the dotted identity resolved for each file.

use anyhow::Result;
use std::path::PathBuf;

use crate::config_resolver::ConfigSource;

/// Runs the module command.
pub fn run(files: &[PathBuf], source: &ConfigSource) -> Result<()> {
    let config = source.load()?;
    let resolver = config.analyzer.resolver();

    for file in files {
        let module = match file.canonicalize() {
            Ok(absolute) => resolver.resolve(&absolute),
            Err(_) => {
                tracing::warn!("{} does not exist; resolving by name only", file.display());
                resolver.resolve(file)
            }
        };
        println!("{}\t{module}", file.display());
    }

    Ok(())
}
