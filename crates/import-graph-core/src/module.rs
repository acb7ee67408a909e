//! Module identity resolution: maps a file path to its dotted module path.

use std::path::Path;

use crate::config::CONFIG_FILE_NAMES;
use crate::types::DottedPath;
use crate::utils::paths::SEPARATOR;

/// Derives a file's module identity by walking up its directories.
///
/// The walk stops below the first directory containing a boundary marker
/// file, so `proj/pkg/sub/mod.py` with `proj/import-graph.toml` resolves to
/// `pkg.sub.mod`. Without a marker the whole path is consumed.
#[derive(Debug, Clone)]
pub struct ModuleResolver {
    markers: Vec<String>,
}

impl ModuleResolver {
    /// Creates a resolver that stops at directories containing `marker`.
    #[must_use]
    pub fn new(marker: impl Into<String>) -> Self {
        Self {
            markers: vec![marker.into()],
        }
    }

    /// Boundary marker file names; any one of them stops the walk.
    #[must_use]
    pub fn markers(&self) -> &[String] {
        &self.markers
    }

    /// Resolves `file` against the real filesystem.
    ///
    /// Relative paths stop climbing where they run out, so callers should
    /// pass absolute ones.
    #[must_use]
    pub fn resolve(&self, file: &Path) -> DottedPath {
        self.resolve_with(file, |dir| {
            self.markers.iter().any(|marker| dir.join(marker).is_file())
        })
    }

    /// Resolves `file`, asking `has_marker` whether a directory holds a marker.
    ///
    /// Terminates once the path runs out of components: at the filesystem
    /// root, at `.`/`..`, or when a relative path is exhausted. Directory or
    /// file names containing dots contribute one segment per dotted part.
    pub fn resolve_with<F>(&self, file: &Path, mut has_marker: F) -> DottedPath
    where
        F: FnMut(&Path) -> bool,
    {
        let stripped = file.with_extension("");
        let mut path: &Path = &stripped;
        let mut segments: Vec<String> = Vec::new();

        while !path.as_os_str().is_empty() {
            if has_marker(path) {
                break;
            }
            let Some(name) = path.file_name() else {
                break;
            };
            // pushed innermost first; reversed below
            segments.extend(
                name.to_string_lossy()
                    .rsplit(SEPARATOR)
                    .filter(|part| !part.is_empty())
                    .map(str::to_owned),
            );
            match path.parent() {
                Some(parent) => path = parent,
                None => break,
            }
        }

        segments.reverse();
        let module = DottedPath::from_segments(segments);
        tracing::debug!("Resolved {} to module {module}", file.display());
        module
    }
}

impl Default for ModuleResolver {
    fn default() -> Self {
        Self {
            markers: CONFIG_FILE_NAMES.iter().map(|name| (*name).to_string()).collect(),
        }
    }
}
