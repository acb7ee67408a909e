//! Python import extractor using Tree-sitter.

use import_graph_core::{DottedPath, ImportStatement};
use tree_sitter::{Language, Node, Parser};

use crate::extractor::{ExtractError, LanguageExtractor};

/// Extracts `import` and `from ... import` statements from Python source.
pub struct PythonExtractor {
    language: Language,
}

impl PythonExtractor {
    /// Creates a new Python extractor.
    #[must_use]
    pub fn new() -> Self {
        Self {
            language: tree_sitter_python::LANGUAGE.into(),
        }
    }

    fn text<'a>(node: &Node<'_>, src: &'a [u8]) -> &'a str {
        std::str::from_utf8(&src[node.start_byte()..node.end_byte()]).unwrap_or("")
    }

    /// Join identifier children of a `dotted_name` node.
    fn dotted_name(node: &Node<'_>, src: &[u8]) -> DottedPath {
        let mut parts = Vec::new();
        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            if child.kind() == "identifier" {
                parts.push(Self::text(&child, src).to_owned());
            }
        }
        DottedPath::from_segments(parts)
    }

    /// The imported name of a `dotted_name` or `aliased_import` node.
    fn imported_name(node: &Node<'_>, src: &[u8]) -> Option<DottedPath> {
        match node.kind() {
            "dotted_name" => Some(Self::dotted_name(node, src)),
            "aliased_import" => node
                .child_by_field_name("name")
                .map(|name| Self::dotted_name(&name, src)),
            _ => None,
        }
    }

    fn names(node: &Node<'_>, src: &[u8]) -> Vec<DottedPath> {
        let mut cursor = node.walk();
        let names = node
            .children_by_field_name("name", &mut cursor)
            .filter_map(|n| Self::imported_name(&n, src))
            .collect();
        names
    }

    fn position(node: &Node<'_>) -> (usize, usize) {
        let start = node.start_position();
        (start.row + 1, start.column)
    }

    fn extract_import(node: &Node<'_>, src: &[u8], out: &mut Vec<ImportStatement>) {
        let (line, column) = Self::position(node);
        for name in Self::names(node, src) {
            out.push(ImportStatement::Direct { name, line, column });
        }
    }

    fn extract_from_import(node: &Node<'_>, src: &[u8], out: &mut Vec<ImportStatement>) {
        let Some(module_node) = node.child_by_field_name("module_name") else {
            return;
        };

        let (level, module) = if module_node.kind() == "relative_import" {
            let mut level = 0;
            let mut module = None;
            let mut cursor = module_node.walk();
            for child in module_node.children(&mut cursor) {
                match child.kind() {
                    "import_prefix" => {
                        level = Self::text(&child, src).matches('.').count();
                    }
                    "dotted_name" => module = Some(Self::dotted_name(&child, src)),
                    _ => {}
                }
            }
            (level, module)
        } else {
            (0, Some(Self::dotted_name(&module_node, src)))
        };

        let names = if Self::has_wildcard(node) {
            vec!["*".to_string()]
        } else {
            Self::names(node, src)
                .iter()
                .map(ToString::to_string)
                .collect()
        };

        let (line, column) = Self::position(node);
        out.push(ImportStatement::From {
            level,
            module,
            names,
            line,
            column,
        });
    }

    fn extract_future_import(node: &Node<'_>, src: &[u8], out: &mut Vec<ImportStatement>) {
        let (line, column) = Self::position(node);
        out.push(ImportStatement::From {
            level: 0,
            module: Some(DottedPath::split("__future__")),
            names: Self::names(node, src)
                .iter()
                .map(ToString::to_string)
                .collect(),
            line,
            column,
        });
    }

    fn has_wildcard(node: &Node<'_>) -> bool {
        let mut cursor = node.walk();
        let found = node
            .children(&mut cursor)
            .any(|c| c.kind() == "wildcard_import");
        found
    }

    /// Depth-first walk; imports may sit inside functions, classes or blocks.
    fn walk(node: &Node<'_>, src: &[u8], out: &mut Vec<ImportStatement>) {
        match node.kind() {
            "import_statement" => Self::extract_import(node, src, out),
            "import_from_statement" => Self::extract_from_import(node, src, out),
            "future_import_statement" => Self::extract_future_import(node, src, out),
            _ => {
                let mut cursor = node.walk();
                for child in node.named_children(&mut cursor) {
                    Self::walk(&child, src, out);
                }
            }
        }
    }
}

impl Default for PythonExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl LanguageExtractor for PythonExtractor {
    fn language_id(&self) -> &'static str {
        "python"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &[".py", ".pyi"]
    }

    fn extract(&self, source: &str) -> Result<Vec<ImportStatement>, ExtractError> {
        let mut parser = Parser::new();
        parser
            .set_language(&self.language)
            .map_err(|e| ExtractError::Language {
                language: self.language_id(),
                message: e.to_string(),
            })?;

        let src = source.as_bytes();
        let tree = parser.parse(src, None).ok_or(ExtractError::NoTree {
            language: self.language_id(),
        })?;

        let root = tree.root_node();
        if root.has_error() {
            tracing::debug!("Python source has syntax errors; extracting recovered imports");
        }

        let mut imports = Vec::new();
        Self::walk(&root, src, &mut imports);
        Ok(imports)
    }
}
