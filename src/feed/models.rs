//! Data models for the study feed

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::Term;

/// Per-term exposure history
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExposureRecord {
    /// Most recent time the term was shown; `None` means never seen
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_seen_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub times_seen: u32,
}

impl ExposureRecord {
    /// Record for a term first shown at `now`
    pub fn first_seen(now: DateTime<Utc>) -> Self {
        Self {
            last_seen_at: Some(now),
            times_seen: 1,
        }
    }

    /// Refresh the timestamp and bump the counter
    pub fn mark_seen(&mut self, now: DateTime<Utc>) {
        self.last_seen_at = Some(now);
        self.times_seen = self.times_seen.saturating_add(1);
    }
}

/// A term paired with its weight for one feed generation
#[derive(Debug, Clone, Copy)]
pub struct WeightedCandidate<'a> {
    pub term: &'a Term,
    pub weight: f64,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum FeedError {
    /// Nothing to show; not a fatal condition for callers
    #[error("Catalog is empty")]
    EmptyCatalog,
}

pub type Result<T> = std::result::Result<T, FeedError>;
