// src/storage/local.rs

//! Local filesystem history storage.
//!
//! Persists the sent-paper history as a single JSON file:
//!
//! ```text
//! {
//!   "sent_papers": ["2401.01234v1", "..."],
//!   "last_updated": "2026-02-01T12:00:00Z"
//! }
//! ```
//!
//! Writes go to a temp file first and are renamed into place, so a failed
//! write never leaves a truncated history behind.

use std::path::PathBuf;

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;

use crate::error::Result;
use crate::storage::{HistoryStore, SeenSet, SentHistory};

/// History backed by a JSON file on the local filesystem.
#[derive(Debug, Clone)]
pub struct LocalHistory {
    path: PathBuf,
}

impl LocalHistory {
    /// Create a history store for the given file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Read the raw history record, if the file exists and parses.
    pub async fn read_history(&self) -> Option<SentHistory> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
            Err(e) => {
                log::warn!(
                    "Failed to read history file {}: {}",
                    self.path.display(),
                    e
                );
                return None;
            }
        };

        match serde_json::from_slice(&bytes) {
            Ok(history) => Some(history),
            Err(e) => {
                log::warn!(
                    "History file {} is not valid JSON ({}); treating as empty",
                    self.path.display(),
                    e
                );
                None
            }
        }
    }

    /// Write bytes atomically (write to temp, then rename).
    async fn write_bytes(&self, bytes: &[u8]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let tmp = self.path.with_extension("tmp");
        let mut file = tokio::fs::File::create(&tmp).await?;
        file.write_all(bytes).await?;
        file.flush().await?;
        drop(file);

        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

#[async_trait]
impl HistoryStore for LocalHistory {
    async fn load(&self) -> SeenSet {
        match self.read_history().await {
            Some(history) => history.into_seen_set(),
            None => SeenSet::new(),
        }
    }

    async fn save(&self, seen: &SeenSet) -> Result<()> {
        let history = SentHistory::new(seen);
        let bytes = serde_json::to_vec_pretty(&history)?;
        self.write_bytes(&bytes).await
    }
}
