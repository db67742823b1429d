//! Stored batches of provider records
//!
//! A snapshot is what the fetch/cache side hands over: a complete batch of
//! source records for one season, stamped with when it was captured. The
//! pipeline treats a loaded snapshot as fresh input.

use crate::error::Result;
use chrono::{DateTime, Duration, Utc};
use player_registry::SourceRecord;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path;
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceSnapshot {
    pub season: u16,
    pub captured_at: DateTime<Utc>,
    pub records: Vec<SourceRecord>,
}

impl SourceSnapshot {
    pub fn new(season: u16, records: Vec<SourceRecord>) -> Self {
        Self { season, captured_at: Utc::now(), records }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load a snapshot from a JSON file
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = tokio::fs::read_to_string(path).await?;
        let snapshot = Self::from_json(&content)?;

        info!(
            "Loaded {} season snapshot from {} ({} records, {} providers)",
            snapshot.season,
            path.display(),
            snapshot.records.len(),
            snapshot.providers().len()
        );
        Ok(snapshot)
    }

    /// Write the snapshot as JSON, creating parent directories as needed
    pub async fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(path, self.to_json()?).await?;
        debug!("Saved snapshot to {}", path.display());
        Ok(())
    }

    pub fn providers(&self) -> BTreeSet<&str> {
        self.records.iter().map(|r| r.provider.as_str()).collect()
    }

    pub fn is_stale(&self, max_age: Duration, now: DateTime<Utc>) -> bool {
        now - self.captured_at > max_age
    }
}
