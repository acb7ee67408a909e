//! # import-graph-core
//!
//! Dependency-boundary policy engine for dotted module hierarchies.
//!
//! Given the import statements of one source file and the dotted identity of
//! the module that contains them, the engine reports every import that
//! breaks a configured "module A may not depend on module B" rule.
//!
//! - [`build_configuration`] validates raw options into a [`PolicyConfiguration`]
//! - [`ModuleResolver`] derives a file's [`DottedPath`] identity
//! - [`analyze`] runs the [`ImportVisitor`] over a file's [`ImportStatement`]s
//! - [`PolicyEngine`] bundles both for hosts that work on file paths
//!
//! ## Example
//!
//! ```
//! use import_graph_core::{analyze, build_configuration, DottedPath, ImportStatement, RawOptions};
//!
//! let raw = RawOptions {
//!     deny_imports: vec!["app.domain=app.web".into()],
//!     ..RawOptions::default()
//! };
//! let policy = build_configuration(&raw)?;
//!
//! let module = DottedPath::split("app.domain.user");
//! let imports = [ImportStatement::direct("app.web.views", 3, 0)];
//!
//! let violations = analyze(&module, &imports, &policy);
//! assert_eq!(violations[0].message, "IMP001 Denied import app.web.views");
//! # Ok::<(), import_graph_core::ConfigurationError>(())
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod engine;
mod import;
mod module;
mod policy;
mod types;

/// Utility modules shared by the engine and its hosts.
pub mod utils;

pub use config::{AnalyzerConfig, Config, ConfigError, CONFIG_FILE_NAME, CONFIG_FILE_NAMES};
pub use engine::{analyze, ImportVisitor, PolicyEngine, RULE_ID, RULE_NAME};
pub use import::ImportStatement;
pub use module::ModuleResolver;
pub use policy::{
    build_configuration, ConfigurationError, DenyRule, ModulePolicy, PolicyConfiguration,
    RawOptions,
};
pub use types::{DottedPath, FileReport, LintResult, ViolationRecord};
pub use utils::paths::is_prefix;
