//! Layering guardrails for the shared numeric core.
//!
//! `numjit_core` holds the semantics every compiler stage agrees on (type lattice, promotion, libm naming,
//! vocabulary) and must stay a leaf crate. This test scans its `Cargo.toml` and fails if it gains any
//! `[dependencies]` entry.

#[test]
fn numjit_core_has_no_dependencies() {
    let manifest = include_str!("../crates/numjit_core/Cargo.toml");
    let mut in_dependencies = false;

    for raw_line in manifest.lines() {
        let line = raw_line.trim();
        // Track when we enter/exit a dependency table.
        if line.starts_with('[') {
            in_dependencies = line == "[dependencies]" || line.starts_with("[dependencies.");
            continue;
        }

        if !in_dependencies || line.is_empty() || line.starts_with('#') {
            continue;
        }

        // Strip inline comments for robustness.
        let line_no_comment = line.split('#').next().unwrap_or("").trim();
        if !line_no_comment.is_empty() {
            panic!("`numjit_core` must not depend on other crates; found `{line_no_comment}`");
        }
    }
}

#[test]
fn lowering_depends_on_core_through_path() {
    let manifest = include_str!("../Cargo.toml");
    assert!(
        manifest
            .lines()
            .any(|l| l.trim_start().starts_with("numjit_core") && l.contains("crates/numjit_core")),
        "the root crate must use the in-tree numjit_core"
    );
}
