//! # import-graph-py
//!
//! Tree-sitter based Python import extraction for import-graph.
//!
//! Turns Python source into the language-agnostic
//! [`ImportStatement`](import_graph_core::ImportStatement) model that
//! `import-graph-core` checks:
//!
//! - [`LanguageExtractor`] trait for pluggable language support
//! - [`PythonExtractor`] for `import` / `from ... import` extraction

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod extractor;
pub mod python;

pub use extractor::{ExtractError, LanguageExtractor};
pub use python::PythonExtractor;
