// src/models/paper.rs

//! Paper data structure.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// A single paper fetched from the arXiv feed.
///
/// Immutable once fetched; instances live for one run only. The `id` is the
/// canonical arXiv identifier (the part of the entry id after `/abs/`) and
/// is stable across feed refreshes, which makes it the deduplication key.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Paper {
    /// Canonical arXiv identifier (e.g., "2401.01234v1")
    pub id: String,

    /// Paper title
    pub title: String,

    /// Paper abstract
    #[serde(rename = "abstract")]
    pub abstract_text: String,

    /// Author names, in submission order
    pub authors: Vec<String>,

    /// Submission timestamp
    pub published: DateTime<Utc>,

    /// Last update timestamp
    pub updated: DateTime<Utc>,

    /// arXiv category tags (e.g., "cs.LG")
    pub categories: Vec<String>,

    /// Full URL to the abstract page
    pub link: String,
}

impl Paper {
    /// Check that the required fields are present.
    ///
    /// A paper with an empty id, title, or abstract is a defect of the
    /// feed and must be rejected before it reaches the match engine.
    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(AppError::validation("paper is missing an id"));
        }
        if self.title.trim().is_empty() {
            return Err(AppError::validation(format!(
                "paper {} is missing a title",
                self.id
            )));
        }
        if self.abstract_text.trim().is_empty() {
            return Err(AppError::validation(format!(
                "paper {} is missing an abstract",
                self.id
            )));
        }
        Ok(())
    }

    /// Format the author list for display, truncating with "et al.".
    pub fn format_authors(&self, max_authors: usize) -> String {
        if self.authors.is_empty() {
            return "Unknown".to_string();
        }

        if self.authors.len() <= max_authors {
            self.authors.join(", ")
        } else {
            format!("{} et al.", self.authors[..max_authors].join(", "))
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn sample_paper() -> Paper {
        Paper {
            id: "2401.01234v1".to_string(),
            title: "Deep Learning for Robotics".to_string(),
            abstract_text: "We study reinforcement learning for robots.".to_string(),
            authors: vec![
                "Alice Kim".to_string(),
                "Bob Lee".to_string(),
                "Carol Park".to_string(),
                "Dan Cho".to_string(),
            ],
            published: Utc.with_ymd_and_hms(2026, 2, 1, 12, 0, 0).unwrap(),
            updated: Utc.with_ymd_and_hms(2026, 2, 1, 12, 0, 0).unwrap(),
            categories: vec!["cs.LG".to_string(), "cs.RO".to_string()],
            link: "https://arxiv.org/abs/2401.01234v1".to_string(),
        }
    }

    #[test]
    fn test_validate_ok() {
        assert!(sample_paper().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_id() {
        let mut paper = sample_paper();
        paper.id = "  ".to_string();
        assert!(paper.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_empty_title() {
        let mut paper = sample_paper();
        paper.title = String::new();
        assert!(paper.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_empty_abstract() {
        let mut paper = sample_paper();
        paper.abstract_text = String::new();
        assert!(paper.validate().is_err());
    }

    #[test]
    fn test_format_authors_truncates() {
        let paper = sample_paper();
        assert_eq!(
            paper.format_authors(3),
            "Alice Kim, Bob Lee, Carol Park et al."
        );
    }

    #[test]
    fn test_format_authors_short_list() {
        let mut paper = sample_paper();
        paper.authors.truncate(2);
        assert_eq!(paper.format_authors(3), "Alice Kim, Bob Lee");
    }

    #[test]
    fn test_format_authors_empty() {
        let mut paper = sample_paper();
        paper.authors.clear();
        assert_eq!(paper.format_authors(3), "Unknown");
    }
}
