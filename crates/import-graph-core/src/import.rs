//! Language-agnostic import statement model.
//!
//! Extractors turn source text into [`ImportStatement`]s; the engine never
//! sees source text.

use crate::types::DottedPath;

/// A single import statement, as the engine consumes it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportStatement {
    /// `import a.b.c`
    ///
    /// A statement importing several names yields one `Direct` per name.
    Direct {
        /// Imported module.
        name: DottedPath,
        /// Line number (1-indexed).
        line: usize,
        /// Column (0-indexed byte offset within line).
        column: usize,
    },
    /// `from a.b import c, d` or `from ..a import c`.
    From {
        /// Number of enclosing-package steps; `0` for an absolute import.
        level: usize,
        /// Module the names come from; absent for `from . import x`.
        module: Option<DottedPath>,
        /// Imported names in declaration order (aliases already dropped).
        names: Vec<String>,
        /// Line number (1-indexed).
        line: usize,
        /// Column (0-indexed byte offset within line).
        column: usize,
    },
}

impl ImportStatement {
    /// Shorthand for a plain import of a dotted name.
    #[must_use]
    pub fn direct(name: &str, line: usize, column: usize) -> Self {
        Self::Direct {
            name: DottedPath::split(name),
            line,
            column,
        }
    }

    /// Shorthand for a from-import.
    ///
    /// An empty `module` means the `from . import x` form.
    #[must_use]
    pub fn from_import(
        level: usize,
        module: &str,
        names: &[&str],
        line: usize,
        column: usize,
    ) -> Self {
        Self::From {
            level,
            module: (!module.is_empty()).then(|| DottedPath::split(module)),
            names: names.iter().map(|n| (*n).to_string()).collect(),
            line,
            column,
        }
    }
}
