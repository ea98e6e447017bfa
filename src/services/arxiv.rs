// src/services/arxiv.rs

//! arXiv paper source.
//!
//! Fetches recent submissions from the arXiv Atom API and maps feed entries
//! to [`Paper`] records. Entries missing required fields are skipped with a
//! warning so that malformed records never reach the match engine.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use feed_rs::model::Entry;
use url::Url;

use crate::error::{AppError, Result};
use crate::models::{HttpConfig, Paper};
use crate::utils::http;

/// Default arXiv API endpoint.
const ARXIV_API_URL: &str = "https://export.arxiv.org/api/query";

/// Trait for sourcing candidate papers.
///
/// A failed fetch is reported to the caller; the orchestrator treats it as
/// "zero candidate papers" and continues the run.
#[async_trait]
pub trait PaperSource: Send + Sync {
    /// Fetch the most recent papers for the given categories.
    async fn fetch_recent(&self, categories: &[String], max_results: usize) -> Result<Vec<Paper>>;
}

/// Paper source backed by the arXiv Atom API.
pub struct ArxivSource {
    client: reqwest::Client,
    base_url: String,
    request_delay: Duration,
}

impl ArxivSource {
    /// Create a source with a configured HTTP client.
    pub fn new(config: &HttpConfig) -> Result<Self> {
        Ok(Self {
            client: http::create_client(config)?,
            base_url: ARXIV_API_URL.to_string(),
            request_delay: Duration::from_millis(config.request_delay_ms),
        })
    }

    /// Override the API endpoint (used by tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Build the recent-submissions query URL.
    ///
    /// All categories go into one request (`cat:A OR cat:B`), sorted by
    /// submission date descending on the server, so the returned order is
    /// already deterministic.
    fn build_query_url(&self, categories: &[String], max_results: usize) -> Result<Url> {
        let search_query = categories
            .iter()
            .map(|cat| format!("cat:{}", cat))
            .collect::<Vec<_>>()
            .join(" OR ");

        let mut url = Url::parse(&self.base_url)?;
        url.query_pairs_mut()
            .append_pair("search_query", &search_query)
            .append_pair("sortBy", "submittedDate")
            .append_pair("sortOrder", "descending")
            .append_pair("max_results", &max_results.to_string());
        Ok(url)
    }
}

#[async_trait]
impl PaperSource for ArxivSource {
    async fn fetch_recent(&self, categories: &[String], max_results: usize) -> Result<Vec<Paper>> {
        let url = self.build_query_url(categories, max_results)?;
        log::info!("Fetching recent papers from {}", url);

        // Fixed delay to be polite to the API.
        if !self.request_delay.is_zero() {
            tokio::time::sleep(self.request_delay).await;
        }

        let response = self
            .client
            .get(url)
            .send()
            .await?
            .error_for_status()
            .map_err(|e| AppError::fetch("arXiv API", e))?;
        let bytes = response.bytes().await?;

        let feed = feed_rs::parser::parse(bytes.as_ref()).map_err(AppError::feed)?;
        let papers = entries_to_papers(feed.entries);

        log::info!("Fetched {} papers from arXiv", papers.len());
        Ok(papers)
    }
}

/// Map feed entries to papers, dropping malformed ones with a warning.
fn entries_to_papers(entries: Vec<Entry>) -> Vec<Paper> {
    let mut papers = Vec::with_capacity(entries.len());
    for entry in entries {
        let entry_id = entry.id.clone();
        match entry_to_paper(entry) {
            Some(paper) => papers.push(paper),
            None => log::warn!("Skipping malformed feed entry {}", entry_id),
        }
    }
    papers
}

/// Convert a single Atom entry, or None if required fields are missing.
fn entry_to_paper(entry: Entry) -> Option<Paper> {
    // Canonical id is the part after "/abs/"; entry ids look like
    // "http://arxiv.org/abs/2401.01234v1".
    let id = entry
        .id
        .split("/abs/")
        .last()
        .unwrap_or(entry.id.as_str())
        .to_string();

    let title = entry
        .title
        .map(|t| normalize_whitespace(&t.content))
        .unwrap_or_default();
    let abstract_text = entry
        .summary
        .map(|t| normalize_whitespace(&t.content))
        .unwrap_or_default();

    let published = entry.published.or(entry.updated)?;
    let updated = entry.updated.unwrap_or(published);

    let link = entry
        .links
        .iter()
        .find(|l| l.rel.as_deref() == Some("alternate"))
        .or_else(|| entry.links.first())
        .map(|l| l.href.clone())
        .unwrap_or_else(|| entry.id.clone());

    let paper = Paper {
        id,
        title,
        abstract_text,
        authors: entry.authors.into_iter().map(|a| a.name).collect(),
        published,
        updated,
        categories: entry.categories.into_iter().map(|c| c.term).collect(),
        link,
    };

    match paper.validate() {
        Ok(()) => Some(paper),
        Err(e) => {
            log::warn!("{}", e);
            None
        }
    }
}

/// Keep only papers published within the last `days` days.
pub fn filter_by_date(papers: Vec<Paper>, days: i64) -> Vec<Paper> {
    filter_by_date_at(papers, days, Utc::now())
}

fn filter_by_date_at(papers: Vec<Paper>, days: i64, now: DateTime<Utc>) -> Vec<Paper> {
    let cutoff = now - chrono::Duration::days(days);
    let before = papers.len();
    let filtered: Vec<Paper> = papers
        .into_iter()
        .filter(|p| p.published >= cutoff)
        .collect();

    log::info!(
        "Filtered {} papers down to {} published in the last {} day(s)",
        before,
        filtered.len(),
        days
    );
    filtered
}

fn normalize_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    const ATOM_FIXTURE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<feed xmlns="http://www.w3.org/2005/Atom">
  <title>ArXiv Query Results</title>
  <id>http://arxiv.org/api/fixture</id>
  <updated>2026-02-02T00:00:00Z</updated>
  <entry>
    <id>http://arxiv.org/abs/2401.01234v1</id>
    <title>Deep Learning
        for Robotics</title>
    <summary>We study reinforcement learning for robot control.</summary>
    <published>2026-02-01T12:00:00Z</published>
    <updated>2026-02-01T13:00:00Z</updated>
    <author><name>Alice Kim</name></author>
    <author><name>Bob Lee</name></author>
    <link href="http://arxiv.org/abs/2401.01234v1" rel="alternate" type="text/html"/>
    <category term="cs.LG"/>
    <category term="cs.RO"/>
  </entry>
  <entry>
    <id>http://arxiv.org/abs/2401.09999v1</id>
    <title></title>
    <summary>An entry without a title is malformed.</summary>
    <published>2026-02-01T12:00:00Z</published>
    <updated>2026-02-01T12:00:00Z</updated>
    <author><name>Nobody</name></author>
  </entry>
</feed>"#;

    fn source() -> ArxivSource {
        ArxivSource::new(&HttpConfig::default()).unwrap()
    }

    #[test]
    fn test_build_query_url() {
        let url = source()
            .build_query_url(&["cs.LG".to_string(), "cs.CL".to_string()], 25)
            .unwrap();
        let query = url.query().unwrap();

        assert!(url.as_str().starts_with(ARXIV_API_URL));
        assert!(query.contains("search_query=cat%3Acs.LG+OR+cat%3Acs.CL"));
        assert!(query.contains("sortBy=submittedDate"));
        assert!(query.contains("sortOrder=descending"));
        assert!(query.contains("max_results=25"));
    }

    #[test]
    fn test_fixture_maps_to_papers_and_skips_malformed() {
        let feed = feed_rs::parser::parse(ATOM_FIXTURE.as_bytes()).unwrap();
        let papers = entries_to_papers(feed.entries);

        // The titleless entry is dropped.
        assert_eq!(papers.len(), 1);

        let paper = &papers[0];
        assert_eq!(paper.id, "2401.01234v1");
        assert_eq!(paper.title, "Deep Learning for Robotics");
        assert_eq!(
            paper.abstract_text,
            "We study reinforcement learning for robot control."
        );
        assert_eq!(paper.authors, vec!["Alice Kim", "Bob Lee"]);
        assert_eq!(paper.categories, vec!["cs.LG", "cs.RO"]);
        assert_eq!(paper.link, "http://arxiv.org/abs/2401.01234v1");
        assert_eq!(
            paper.published,
            Utc.with_ymd_and_hms(2026, 2, 1, 12, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_filter_by_date_window() {
        let now = Utc.with_ymd_and_hms(2026, 2, 2, 12, 0, 0).unwrap();

        let mut fresh = sample_paper("fresh");
        fresh.published = Utc.with_ymd_and_hms(2026, 2, 2, 6, 0, 0).unwrap();

        let mut stale = sample_paper("stale");
        stale.published = Utc.with_ymd_and_hms(2026, 1, 25, 6, 0, 0).unwrap();

        let filtered = filter_by_date_at(vec![fresh, stale], 1, now);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, "fresh");
    }

    fn sample_paper(id: &str) -> Paper {
        Paper {
            id: id.to_string(),
            title: "Title".to_string(),
            abstract_text: "Abstract".to_string(),
            authors: vec!["Author".to_string()],
            published: Utc.with_ymd_and_hms(2026, 2, 1, 0, 0, 0).unwrap(),
            updated: Utc.with_ymd_and_hms(2026, 2, 1, 0, 0, 0).unwrap(),
            categories: vec!["cs.LG".to_string()],
            link: format!("https://arxiv.org/abs/{}", id),
        }
    }
}
