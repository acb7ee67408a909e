//! Language-agnostic extraction trait.
//!
//! `LanguageExtractor` is the extension point for adding new languages:
//! implement it to turn source text into the [`ImportStatement`]s the
//! policy engine consumes.

use import_graph_core::ImportStatement;
use std::path::Path;

/// Errors raised while setting up or running a parser.
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    /// The grammar could not be loaded into the parser.
    #[error("failed to load {language} grammar: {message}")]
    Language {
        /// Language identifier.
        language: &'static str,
        /// Loader error detail.
        message: String,
    },
    /// The parser produced no tree.
    #[error("{language} parser returned no tree")]
    NoTree {
        /// Language identifier.
        language: &'static str,
    },
}

/// Trait for language-specific import extraction.
pub trait LanguageExtractor: Send + Sync {
    /// Language identifier (e.g., `"python"`).
    fn language_id(&self) -> &'static str;

    /// File extensions this extractor handles (e.g., `&[".py", ".pyi"]`).
    fn extensions(&self) -> &'static [&'static str];

    /// Extract every import statement, in source order.
    ///
    /// # Errors
    ///
    /// Returns an error only when the parser itself cannot run; syntax
    /// errors in `source` still yield the imports that could be recovered.
    fn extract(&self, source: &str) -> Result<Vec<ImportStatement>, ExtractError>;

    /// Does this extractor handle `path`?
    fn handles(&self, path: &Path) -> bool {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| format!(".{e}"))
            .unwrap_or_default();
        self.extensions().contains(&ext.as_str())
    }
}
