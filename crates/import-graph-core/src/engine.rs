//! Import rule engine.
//!
//! Evaluates a file's [`ImportStatement`]s against the deny-rules that apply
//! to its module, producing [`ViolationRecord`]s.

use std::path::Path;

use crate::import::ImportStatement;
use crate::module::ModuleResolver;
use crate::policy::{ModulePolicy, PolicyConfiguration};
use crate::types::{DottedPath, FileReport, ViolationRecord};
use crate::utils::paths::{is_prefix, join_dotted, split_dotted};

/// Rule id carried by every violation.
pub const RULE_ID: &str = "IMP001";

/// Human-readable rule name.
pub const RULE_NAME: &str = "denied-import";

/// Checks the imports of a single module.
///
/// Built once per module; holds the [`ModulePolicy`] derived for it.
pub struct ImportVisitor<'a> {
    module: &'a DottedPath,
    policy: ModulePolicy<'a>,
}

impl<'a> ImportVisitor<'a> {
    /// Creates a visitor for `module` under `config`.
    #[must_use]
    pub fn new(module: &'a DottedPath, config: &'a PolicyConfiguration) -> Self {
        Self {
            module,
            policy: config.module_policy(module),
        }
    }

    /// Evaluates one statement, appending violations to `out`.
    pub fn visit(&self, stmt: &ImportStatement, out: &mut Vec<ViolationRecord>) {
        match stmt {
            ImportStatement::Direct { name, line, column } => {
                let target = name.to_string();
                if self.not_allowed(&target) {
                    out.push(ViolationRecord::denied(*line, *column, &target));
                }
            }
            ImportStatement::From {
                level,
                module,
                names,
                line,
                column,
            } => {
                let module_name = if *level > 0 {
                    if self.policy.relative_allowed {
                        return;
                    }
                    self.resolve_relative(*level, module.as_ref())
                } else {
                    module.as_ref().map(ToString::to_string).unwrap_or_default()
                };

                if self.not_allowed(&module_name) {
                    out.push(ViolationRecord::denied(*line, *column, &module_name));
                }
                for name in names {
                    let full = format!("{module_name}.{name}");
                    if self.not_allowed(&full) {
                        out.push(ViolationRecord::denied(*line, *column, &full));
                    }
                }
            }
        }
    }

    /// Turns `from ..x import y` into an absolute module name.
    ///
    /// A level deeper than the module itself clamps to the empty path.
    fn resolve_relative(&self, level: usize, module: Option<&DottedPath>) -> String {
        let base = self.module.ancestor(level);
        let resolved = match module {
            Some(m) => base.join(m),
            None => base,
        };
        join_dotted(resolved.segments())
    }

    /// Is `target` under a denied prefix and outside every rule source?
    #[must_use]
    pub fn not_allowed(&self, target: &str) -> bool {
        let dotted = split_dotted(target);
        self.policy
            .denied
            .iter()
            .any(|p| is_prefix(p.segments(), &dotted))
            && !self
                .policy
                .allowed_override
                .iter()
                .any(|p| is_prefix(p.segments(), &dotted))
    }
}

/// Checks all imports of one module.
///
/// Exempt modules produce nothing. Violations come back in statement order.
#[must_use]
pub fn analyze(
    module: &DottedPath,
    imports: &[ImportStatement],
    config: &PolicyConfiguration,
) -> Vec<ViolationRecord> {
    if config.is_exempt(module) {
        tracing::debug!("Module {module} is exempt from import rules");
        return Vec::new();
    }

    let visitor = ImportVisitor::new(module, config);
    let mut violations = Vec::new();
    for stmt in imports {
        visitor.visit(stmt, &mut violations);
    }
    violations
}

/// Resolves file paths to modules and checks their imports.
pub struct PolicyEngine {
    config: PolicyConfiguration,
    resolver: ModuleResolver,
}

impl PolicyEngine {
    /// Creates a new engine.
    #[must_use]
    pub fn new(config: PolicyConfiguration, resolver: ModuleResolver) -> Self {
        Self { config, resolver }
    }

    /// The policy this engine enforces.
    #[must_use]
    pub fn config(&self) -> &PolicyConfiguration {
        &self.config
    }

    /// The module resolver in use.
    #[must_use]
    pub fn resolver(&self) -> &ModuleResolver {
        &self.resolver
    }

    /// Resolves `file`'s module and checks `imports` against it.
    #[must_use]
    pub fn check_file(&self, file: &Path, imports: &[ImportStatement]) -> FileReport {
        let module = self.resolver.resolve(file);
        self.check_module(file, module, imports)
    }

    /// Checks `imports` for an already resolved module.
    #[must_use]
    pub fn check_module(
        &self,
        file: &Path,
        module: DottedPath,
        imports: &[ImportStatement],
    ) -> FileReport {
        let exempt = self.config.is_exempt(&module);
        let violations = analyze(&module, imports, &self.config);
        FileReport {
            file: file.to_path_buf(),
            module,
            exempt,
            violations,
        }
    }
}
