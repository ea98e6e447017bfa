// src/models/rules.rs

//! Keyword rule data structures.
//!
//! A paper matches a [`KeywordRuleSet`] iff it satisfies at least one
//! [`KeywordGroup`] (OR over groups); a group is satisfied iff every keyword
//! in it occurs as a case-insensitive substring of the searchable text (AND
//! within a group). The matching algorithm itself lives in
//! `pipeline::matcher`.

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// A group of keywords that must ALL appear in the searchable text.
///
/// Keyword order is preserved for display only.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct KeywordGroup(Vec<String>);

impl KeywordGroup {
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(keywords.into_iter().map(Into::into).collect())
    }

    pub fn keywords(&self) -> &[String] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Render the group as `kw1 AND kw2`.
    pub fn display(&self) -> String {
        self.0.join(" AND ")
    }
}

/// An ordered list of keyword groups; satisfying any one group is a match.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct KeywordRuleSet(Vec<KeywordGroup>);

impl KeywordRuleSet {
    pub fn new<I>(groups: I) -> Self
    where
        I: IntoIterator<Item = KeywordGroup>,
    {
        Self(groups.into_iter().collect())
    }

    pub fn groups(&self) -> &[KeywordGroup] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Reject rule sets with no groups or with an empty group.
    ///
    /// An empty group would match every paper (all of its zero keywords are
    /// trivially present), so it is treated as a configuration mistake and
    /// rejected here, before matching ever runs.
    pub fn validate(&self) -> Result<()> {
        if self.0.is_empty() {
            return Err(AppError::validation(
                "search.keyword_groups must contain at least one group",
            ));
        }
        for (i, group) in self.0.iter().enumerate() {
            if group.is_empty() {
                return Err(AppError::validation(format!(
                    "search.keyword_groups[{}] is empty",
                    i
                )));
            }
            if group.keywords().iter().any(|k| k.trim().is_empty()) {
                return Err(AppError::validation(format!(
                    "search.keyword_groups[{}] contains a blank keyword",
                    i
                )));
            }
        }
        Ok(())
    }

    /// Render the rule set as `(a AND b) OR (c)`.
    pub fn display(&self) -> String {
        self.0
            .iter()
            .map(|g| format!("({})", g.display()))
            .collect::<Vec<_>>()
            .join(" OR ")
    }
}

/// Which paper fields contribute to the searchable text.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchScope {
    /// Include the title
    pub title: bool,

    /// Include the abstract
    pub abstract_text: bool,
}

impl SearchScope {
    /// True when no field is searched, so nothing can ever match.
    pub fn is_empty(&self) -> bool {
        !self.title && !self.abstract_text
    }
}

impl Default for SearchScope {
    fn default() -> Self {
        Self {
            title: true,
            abstract_text: true,
        }
    }
}
