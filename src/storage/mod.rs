// src/storage/mod.rs

//! Persistence for the set of already-mailed paper ids.
//!
//! The history file is the only state carried across runs. It is
//! authoritative for deduplication only; paper content is never
//! reconstructed from it.

pub mod local;

use std::collections::HashSet;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;

// Re-export for convenience
pub use local::LocalHistory;

/// Set of paper ids that have already been mailed.
pub type SeenSet = HashSet<String>;

/// On-disk form of the sent-paper history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SentHistory {
    /// Ids of papers already mailed
    #[serde(default)]
    pub sent_papers: Vec<String>,

    /// Timestamp of the last write
    #[serde(default)]
    pub last_updated: Option<DateTime<Utc>>,
}

impl SentHistory {
    /// Build the persisted form from a seen-set, sorted for stable output.
    pub fn new(seen: &SeenSet) -> Self {
        let mut sent_papers: Vec<String> = seen.iter().cloned().collect();
        sent_papers.sort();
        Self {
            sent_papers,
            last_updated: Some(Utc::now()),
        }
    }

    /// Convert into the in-memory seen-set.
    pub fn into_seen_set(self) -> SeenSet {
        self.sent_papers.into_iter().collect()
    }
}

/// Trait for sent-paper history backends.
#[async_trait]
pub trait HistoryStore: Send + Sync {
    /// Load the seen-set.
    ///
    /// An absent or unreadable backing store degrades to an empty set;
    /// this is a first-run state, not a failure.
    async fn load(&self) -> SeenSet;

    /// Persist the full seen-set plus a write timestamp.
    ///
    /// A failed save must leave the previously persisted file intact.
    async fn save(&self, seen: &SeenSet) -> Result<()>;
}
