//! Saved checklist progress
//!
//! The progress record is owned by the host's checklist tracker; this crate
//! reads it and prunes it during section reconciliation. An item's presence
//! in the map means it was checked off. `completed_count` is denormalized in
//! storage and must equal the item count; see [`ProgressRecord::normalize`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Completion metadata for a single checked-off item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletedItem {
    /// When the item was checked off
    pub completed_at: DateTime<Utc>,
    /// Account name of whoever checked it off, when the host tracks one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_by: Option<String>,
}

/// Persisted completion state for one checklist
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressRecord {
    /// Completed items keyed by item id
    #[serde(default)]
    pub items: BTreeMap<String, CompletedItem>,
    /// Denormalized item count, kept equal to `items.len()`
    #[serde(default)]
    pub completed_count: u32,
}

impl ProgressRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_completed(&self, item_id: &str) -> bool {
        self.items.contains_key(item_id)
    }

    /// Check an item off at the given time
    pub fn mark_completed(&mut self, item_id: &str, at: DateTime<Utc>, by: Option<&str>) {
        self.items.insert(
            item_id.to_string(),
            CompletedItem {
                completed_at: at,
                completed_by: by.map(str::to_string),
            },
        );
        self.completed_count = self.items.len() as u32;
    }

    /// Remove an item, returning whether it was present
    pub fn clear(&mut self, item_id: &str) -> bool {
        let removed = self.items.remove(item_id).is_some();
        self.completed_count = self.items.len() as u32;
        removed
    }

    /// Correct a drifted `completed_count`.
    ///
    /// Stored records can drift when edited outside this code path. The count
    /// is recomputed from the item map; returns true when a correction was
    /// needed so callers can log it.
    pub fn normalize(&mut self) -> bool {
        let actual = self.items.len() as u32;
        if self.completed_count != actual {
            self.completed_count = actual;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_mark_and_clear_keep_count_exact() {
        let mut record = ProgressRecord::new();
        record.mark_completed("sitemap", at(), Some("admin"));
        record.mark_completed("robots", at(), None);
        assert_eq!(record.completed_count, 2);

        assert!(record.clear("sitemap"));
        assert_eq!(record.completed_count, 1);

        // Clearing an absent item is a no-op
        assert!(!record.clear("sitemap"));
        assert_eq!(record.completed_count, 1);
    }

    #[test]
    fn test_mark_twice_counts_once() {
        let mut record = ProgressRecord::new();
        record.mark_completed("sitemap", at(), None);
        record.mark_completed("sitemap", at(), Some("admin"));
        assert_eq!(record.completed_count, 1);
        assert_eq!(
            record.items["sitemap"].completed_by.as_deref(),
            Some("admin")
        );
    }

    #[test]
    fn test_normalize_corrects_drift() {
        let mut record = ProgressRecord::new();
        record.mark_completed("sitemap", at(), None);
        record.completed_count = 7;

        assert!(record.normalize());
        assert_eq!(record.completed_count, 1);
        assert!(!record.normalize());
    }

    #[test]
    fn test_serde_shape() {
        let mut record = ProgressRecord::new();
        record.mark_completed("sitemap", at(), None);

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["completed_count"], 1);
        assert_eq!(json["items"]["sitemap"]["completed_at"], "2024-03-01T12:00:00Z");

        // Missing fields deserialize to an empty record
        let empty: ProgressRecord = serde_json::from_str("{}").unwrap();
        assert!(empty.is_empty());
        assert_eq!(empty.completed_count, 0);
    }
}
