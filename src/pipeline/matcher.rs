// src/pipeline/matcher.rs

//! Keyword matching and deduplication engine.
//!
//! Given a batch of candidate papers, a keyword rule set, a search scope,
//! and the set of already-mailed ids, [`match_papers`] returns the papers
//! that are new matches, in input order. The function is pure: no I/O, no
//! clock, no shared state, so identical inputs always produce identical
//! output.

use crate::models::{KeywordGroup, KeywordRuleSet, Paper, SearchScope};
use crate::storage::SeenSet;

/// Build the lower-cased text a paper is searched in.
///
/// Case folding happens here, before any substring test, so keyword casing
/// never matters.
fn searchable_text(paper: &Paper, scope: SearchScope) -> String {
    let mut text = String::new();
    if scope.title {
        text.push_str(&paper.title.to_lowercase());
        text.push(' ');
    }
    if scope.abstract_text {
        text.push_str(&paper.abstract_text.to_lowercase());
    }
    text
}

/// True iff every keyword in the group occurs in the text.
///
/// Keywords are substrings, not tokens: "ai" matches inside "rain". An
/// empty group is vacuously satisfied; configuration validation rejects
/// empty groups before this engine runs.
fn group_satisfied(group: &KeywordGroup, text: &str) -> bool {
    group
        .keywords()
        .iter()
        .all(|keyword| text.contains(&keyword.to_lowercase()))
}

/// Select the papers that are new matches.
///
/// Per paper, in input order:
/// 1. Ids already in `seen` are excluded unconditionally; dedup takes
///    priority over matching.
/// 2. With both scope flags off there is no searchable text, so nothing
///    matches.
/// 3. A paper is included iff at least one keyword group is satisfied.
///
/// The result is an order-preserving subsequence of the input. `seen` is
/// read-only here; the orchestrator updates it only after delivery
/// succeeds.
pub fn match_papers(
    papers: &[Paper],
    rules: &KeywordRuleSet,
    scope: SearchScope,
    seen: &SeenSet,
) -> Vec<Paper> {
    let mut matched = Vec::new();

    for paper in papers {
        if seen.contains(&paper.id) {
            continue;
        }
        if scope.is_empty() {
            continue;
        }

        let text = searchable_text(paper, scope);
        if rules.groups().iter().any(|group| group_satisfied(group, &text)) {
            matched.push(paper.clone());
        }
    }

    matched
}
