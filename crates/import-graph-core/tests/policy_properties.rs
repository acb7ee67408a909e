//! Integration test: policy semantics end-to-end through the public API.
//!
//! Each test builds a policy from raw option strings, the way a host would,
//! and checks the violations `analyze` returns.

use import_graph_core::{
    analyze, build_configuration, is_prefix, DottedPath, ImportStatement, ModuleResolver,
    PolicyConfiguration, PolicyEngine, RawOptions, ViolationRecord,
};
use std::fs;
use tempfile::TempDir;

fn strings(xs: &[&str]) -> Vec<String> {
    xs.iter().map(|s| (*s).to_string()).collect()
}

fn policy(deny: &[&str], exempt: &[&str], relative: &[&str]) -> PolicyConfiguration {
    build_configuration(&RawOptions {
        deny_imports: strings(deny),
        allow_all_imports: strings(exempt),
        allow_relative_imports: strings(relative),
    })
    .expect("policy should build")
}

fn run(module: &str, imports: &[ImportStatement], config: &PolicyConfiguration) -> Vec<String> {
    analyze(&DottedPath::split(module), imports, config)
        .into_iter()
        .map(|v: ViolationRecord| v.message)
        .collect()
}

// ── Prefix predicate ──

#[test]
fn prefix_laws() {
    let samples: [&[&str]; 4] = [&[], &["a"], &["a", "b"], &["x", "y", "z"]];
    for x in samples {
        assert!(is_prefix::<&str, &str>(&[], x));
        assert!(is_prefix(x, x));
        for y in samples {
            if x.len() > y.len() {
                assert!(!is_prefix(x, y), "{x:?} vs {y:?}");
            }
        }
    }
}

// ── Deny-rules ──

#[test]
fn single_rule_single_violation() {
    let config = policy(&["a.b=x.y"], &[], &[]);
    let v = run("a.b.c", &[ImportStatement::direct("x.y.z", 1, 0)], &config);
    assert_eq!(v, vec!["IMP001 Denied import x.y.z"]);
}

#[test]
fn exemption_wins_over_matching_rule() {
    let config = policy(&["a.b=x.y"], &["a.b"], &[]);
    let v = run("a.b.c", &[ImportStatement::direct("x.y.z", 1, 0)], &config);
    assert!(v.is_empty());
}

#[test]
fn source_prefix_of_target_suppresses_denial() {
    // `a.b.sub` may not reach back into `a.b`, except into its own subtree.
    let alone = policy(&["a.b.sub=a.b"], &[], &[]);
    let own = run("a.b.sub.d", &[ImportStatement::direct("a.b.sub.e", 1, 0)], &alone);
    assert!(own.is_empty(), "own subtree must pass: {own:?}");
    let up = run("a.b.sub.d", &[ImportStatement::direct("a.b.other", 1, 0)], &alone);
    assert_eq!(up, vec!["IMP001 Denied import a.b.other"]);

    // A second rule sourced at `a.b` puts `a.b.other` under a matching source.
    let layered = policy(&["a.b.sub=a.b", "a.b=y"], &[], &[]);
    let up = run("a.b.sub.d", &[ImportStatement::direct("a.b.other", 1, 0)], &layered);
    assert!(up.is_empty(), "suppressed by the a.b source: {up:?}");

    // Suppression never strengthens: the second rule's own denial still fires.
    let y = run("a.b.sub.d", &[ImportStatement::direct("y.q", 1, 0)], &layered);
    assert_eq!(y, vec!["IMP001 Denied import y.q"]);
}

#[test]
fn relative_allowance_only_skips_relative_form() {
    // `from ..x import y` inside a.b.c resolves to a.x
    let relative = ImportStatement::from_import(2, "x", &["y"], 1, 0);
    let absolute = ImportStatement::from_import(0, "a.x", &["y"], 2, 0);

    let strict = policy(&["a.b=a.x"], &[], &[]);
    assert_eq!(run("a.b.c", &[relative.clone()], &strict).len(), 2);

    let relaxed = policy(&["a.b=a.x"], &[], &["a.b"]);
    assert!(run("a.b.c", &[relative], &relaxed).is_empty());
    assert_eq!(
        run("a.b.c", &[absolute], &relaxed),
        vec!["IMP001 Denied import a.x", "IMP001 Denied import a.x.y"]
    );
}

#[test]
fn per_name_check_isolates_denied_symbol() {
    let config = policy(&["a=x.y.z"], &[], &[]);
    let v = run(
        "a.m",
        &[ImportStatement::from_import(0, "x.y", &["z", "w"], 1, 0)],
        &config,
    );
    assert_eq!(v, vec!["IMP001 Denied import x.y.z"]);
}

#[test]
fn violations_follow_source_order() {
    let config = policy(&["app=lib"], &[], &[]);
    let imports = [
        ImportStatement::from_import(0, "lib", &["b", "a"], 1, 0),
        ImportStatement::direct("lib.c", 2, 0),
        ImportStatement::direct("os", 3, 0),
        ImportStatement::direct("lib", 4, 0),
    ];
    let v = analyze(&DottedPath::split("app.main"), &imports, &config);
    let got: Vec<(usize, &str)> = v.iter().map(|r| (r.line, r.message.as_str())).collect();
    assert_eq!(
        got,
        vec![
            (1, "IMP001 Denied import lib"),
            (1, "IMP001 Denied import lib.b"),
            (1, "IMP001 Denied import lib.a"),
            (2, "IMP001 Denied import lib.c"),
            (4, "IMP001 Denied import lib"),
        ]
    );
}

// ── Module resolution ──

#[test]
fn module_identity_from_marker() {
    let tmp = TempDir::new().unwrap();
    let proj = tmp.path().join("proj");
    fs::create_dir_all(proj.join("pkg/sub")).unwrap();
    fs::write(proj.join("import-graph.toml"), "").unwrap();

    let module = ModuleResolver::default().resolve(&proj.join("pkg/sub/mod.py"));
    assert_eq!(module.to_string(), "pkg.sub.mod");
}

#[test]
fn engine_checks_file_by_path() {
    let tmp = TempDir::new().unwrap();
    let proj = tmp.path().join("proj");
    fs::create_dir_all(proj.join("shop/domain")).unwrap();
    fs::write(proj.join("import-graph.toml"), "").unwrap();
    let file = proj.join("shop/domain/order.py");

    let engine = PolicyEngine::new(
        policy(&["shop.domain=shop.web"], &[], &[]),
        ModuleResolver::default(),
    );
    let report = engine.check_file(
        &file,
        &[
            ImportStatement::from_import(1, "", &["money"], 1, 0),
            ImportStatement::from_import(2, "web", &["views"], 2, 0),
        ],
    );

    assert_eq!(report.module.to_string(), "shop.domain.order");
    assert!(!report.exempt);
    let messages: Vec<&str> = report.violations.iter().map(|v| v.message.as_str()).collect();
    assert_eq!(
        messages,
        vec![
            "IMP001 Denied import shop.web",
            "IMP001 Denied import shop.web.views",
        ]
    );
}
