//! import-graph CLI tool.
//!
//! Usage:
//! ```bash
//! import-graph check [OPTIONS] [PATH]
//! import-graph module FILE...
//! import-graph init
//! ```

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use import_graph_core::RawOptions;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod config_resolver;

/// Dependency-boundary linter for Python imports
#[derive(Parser)]
#[command(name = "import-graph")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check imports against the configured deny-rules
    Check {
        /// Path to analyze (default: current directory)
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,

        /// Exclude glob patterns (can be specified multiple times)
        #[arg(short, long)]
        exclude: Vec<String>,

        #[command(flatten)]
        policy: PolicyArgs,
    },

    /// Print the module identity resolved for each file
    Module {
        /// Files to resolve
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// Initialize configuration file
    Init {
        /// Overwrite existing config
        #[arg(long)]
        force: bool,
    },
}

/// Policy entries given on the command line, appended to the config file's.
#[derive(Args, Debug, Default)]
struct PolicyArgs {
    /// Denied imports like `mypkg.where=other_pkg.disallowed_sub_package`
    #[arg(long, value_delimiter = ',')]
    deny_imports: Vec<String>,

    /// Modules exempted from import denials like `mypkg.where.exempted_module`
    #[arg(long, value_delimiter = ',')]
    allow_all_imports: Vec<String>,

    /// Packages where relative imports are allowed, like `mypkg.where.clean_module`
    #[arg(long, value_delimiter = ',')]
    allow_relative_imports: Vec<String>,
}

impl From<PolicyArgs> for RawOptions {
    fn from(args: PolicyArgs) -> Self {
        Self {
            deny_imports: args.deny_imports,
            allow_all_imports: args.allow_all_imports,
            allow_relative_imports: args.allow_relative_imports,
        }
    }
}

/// Output format for lint results.
#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    #[default]
    Text,
    /// JSON output.
    Json,
    /// One-line-per-violation compact format.
    Compact,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Check {
            path,
            format,
            exclude,
            policy,
        } => {
            let source = config_resolver::resolve(&path, cli.config.as_deref());
            commands::check::run(&path, format, &exclude, policy.into(), &source)
        }
        Commands::Module { files } => {
            let source = config_resolver::resolve(std::path::Path::new("."), cli.config.as_deref());
            commands::module::run(&files, &source)
        }
        Commands::Init { force } => commands::init::run(force),
    }
}
