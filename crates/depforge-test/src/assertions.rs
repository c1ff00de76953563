//! Tree and score assertions.

use depforge_core::{DependencyTree, TokenIndex};

/// Default tolerance for floating-point score comparisons.
pub const SCORE_TOLERANCE: f64 = 1e-9;

/// Asserts that `tree` holds exactly the `(head, label)` pairs of `expected`.
#[track_caller]
pub fn assert_attachments(tree: &DependencyTree, expected: &[(TokenIndex, &str)]) {
    let actual: Vec<(TokenIndex, &str)> = tree
        .attachments()
        .iter()
        .map(|a| (a.head, a.label.as_str()))
        .collect();
    assert_eq!(actual, expected, "tree {tree}");
}

/// Asserts that no two arcs of `tree` cross.
#[track_caller]
pub fn assert_projective(tree: &DependencyTree) {
    let crossings = tree.crossing_edges();
    assert!(
        crossings.is_empty(),
        "tree {tree} has {} crossing arc pair(s)",
        crossings.len()
    );
}

/// Asserts `|actual - expected| <= SCORE_TOLERANCE`.
#[track_caller]
pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() <= SCORE_TOLERANCE,
        "expected {expected}, got {actual}"
    );
}
