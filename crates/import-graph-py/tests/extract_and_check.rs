//! Integration test: Python source → extracted imports → policy violations.

use import_graph_core::{analyze, build_configuration, DottedPath, RawOptions};
use import_graph_py::{LanguageExtractor, PythonExtractor};

const SOURCE: &str = "\
from __future__ import annotations

import logging
from shop.web import views
from ..web.forms import OrderForm, Field
from . import money
import shop.web.api as api
";

fn check(module: &str, deny: &[&str], relative: &[&str]) -> Vec<(usize, String)> {
    let policy = build_configuration(&RawOptions {
        deny_imports: deny.iter().map(|s| (*s).to_string()).collect(),
        allow_all_imports: Vec::new(),
        allow_relative_imports: relative.iter().map(|s| (*s).to_string()).collect(),
    })
    .expect("policy should build");
    let imports = PythonExtractor::new()
        .extract(SOURCE)
        .expect("source should parse");
    analyze(&DottedPath::split(module), &imports, &policy)
        .into_iter()
        .map(|v| (v.line, v.message))
        .collect()
}

#[test]
fn reports_absolute_and_relative_denials_in_order() {
    let got = check("shop.domain.order", &["shop.domain=shop.web"], &[]);
    let expected: Vec<(usize, String)> = [
        (4, "IMP001 Denied import shop.web"),
        (4, "IMP001 Denied import shop.web.views"),
        (5, "IMP001 Denied import shop.web.forms"),
        (5, "IMP001 Denied import shop.web.forms.OrderForm"),
        (5, "IMP001 Denied import shop.web.forms.Field"),
        (7, "IMP001 Denied import shop.web.api"),
    ]
    .into_iter()
    .map(|(l, m)| (l, m.to_string()))
    .collect();
    assert_eq!(got, expected);
}

#[test]
fn relative_allowance_drops_relative_denials() {
    let got = check("shop.domain.order", &["shop.domain=shop.web"], &["shop.domain"]);
    let lines: Vec<usize> = got.iter().map(|(l, _)| *l).collect();
    assert_eq!(lines, vec![4, 4, 7]);
}

#[test]
fn unrelated_module_is_clean() {
    assert!(check("shop.web.views", &["shop.domain=shop.web"], &[]).is_empty());
}
