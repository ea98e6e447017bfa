// src/pipeline/run.rs

//! Alert run orchestration.
//!
//! Wires the collaborators in sequence: load history → fetch → match →
//! deliver → persist history. The seen-set is only updated after a
//! successful delivery, so a failed send means the same matches are
//! retried on the next run.

use crate::error::Result;
use crate::models::Config;
use crate::pipeline::matcher::match_papers;
use crate::services::{Notifier, PaperSource, filter_by_date};
use crate::storage::HistoryStore;

/// Per-run options from the CLI.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    /// Skip delivery and history update
    pub dry_run: bool,

    /// Log every fetched paper
    pub list_papers: bool,
}

/// Summary of one alert run.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunReport {
    /// Candidate papers after fetching (and date filtering)
    pub fetched: usize,

    /// New matches found
    pub matched: usize,

    /// Whether the digest was delivered
    pub delivered: bool,

    /// Whether the history file was updated
    pub history_updated: bool,
}

/// Run one fetch-match-notify cycle.
pub async fn run_alert(
    config: &Config,
    source: &dyn PaperSource,
    store: &dyn HistoryStore,
    notifier: &dyn Notifier,
    options: &RunOptions,
) -> Result<RunReport> {
    let mut report = RunReport::default();

    let mut seen = store.load().await;
    log::info!("Loaded {} previously sent papers", seen.len());

    let mut papers = match source
        .fetch_recent(&config.arxiv.categories, config.arxiv.max_results)
        .await
    {
        Ok(papers) => papers,
        Err(e) => {
            log::error!("Fetch failed ({}); continuing with zero candidates", e);
            Vec::new()
        }
    };

    if !config.arxiv.recent_feed {
        papers = filter_by_date(papers, config.arxiv.days_back);
    }
    report.fetched = papers.len();

    if options.list_papers {
        log::info!("Listing all {} fetched papers:", papers.len());
        for (i, paper) in papers.iter().enumerate() {
            log::info!("Paper {}: {} by {}", i + 1, paper.title, paper.format_authors(3));
        }
    }

    let matches = match_papers(
        &papers,
        &config.search.keyword_groups,
        config.search.scope(),
        &seen,
    );
    report.matched = matches.len();

    if matches.is_empty() {
        log::info!("No papers matched the search criteria");
        return Ok(report);
    }

    if options.dry_run {
        log::info!("DRY RUN: would send email with {} matched papers", matches.len());
        for (i, paper) in matches.iter().enumerate() {
            log::info!("Paper {}: {} by {}", i + 1, paper.title, paper.format_authors(3));
        }
        return Ok(report);
    }

    log::info!("Sending email with {} matched papers", matches.len());
    if let Err(e) = notifier.deliver(&matches, &config.search.keyword_groups).await {
        log::error!("Delivery failed ({}); matches will be retried next run", e);
        return Ok(report);
    }
    report.delivered = true;

    seen.extend(matches.iter().map(|p| p.id.clone()));
    match store.save(&seen).await {
        Ok(()) => {
            report.history_updated = true;
            log::info!("Updated sent papers history ({} papers)", seen.len());
        }
        Err(e) => {
            log::error!(
                "Failed to save history ({}); matches may be re-sent next run",
                e
            );
        }
    }

    Ok(report)
}
