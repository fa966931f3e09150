//! Local download history
//!
//! Append-only record of completed downloads, most recent first, capped so it
//! never grows unbounded. The crate keeps the history purely in memory; it is
//! serializable so embedders can persist it in whatever store they already
//! have (the original application used browser local storage).

use crate::types::HistoryEntry;
use serde::{Deserialize, Serialize};

/// Maximum number of entries retained
const HISTORY_CAP: usize = 20;

/// Capped, most-recent-first list of completed downloads
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct DownloadHistory {
    entries: Vec<HistoryEntry>,
}

impl DownloadHistory {
    /// Create an empty history
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a completed download
    ///
    /// The newest entry goes to the front; the oldest entry is dropped once
    /// the cap is exceeded.
    pub fn record(&mut self, entry: HistoryEntry) {
        self.entries.insert(0, entry);
        self.entries.truncate(HISTORY_CAP);
    }

    /// All retained entries, most recent first
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    /// Whether any downloads have been recorded
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of retained entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Forget all recorded downloads
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn entry(title: &str) -> HistoryEntry {
        HistoryEntry {
            title: title.to_string(),
            thumbnail: format!("https://thumbs.example/{title}.jpg"),
            url: format!("https://youtu.be/{title}"),
            downloaded_at: Utc::now(),
        }
    }

    #[test]
    fn newest_entry_first() {
        let mut history = DownloadHistory::new();
        history.record(entry("first"));
        history.record(entry("second"));

        assert_eq!(history.entries()[0].title, "second");
        assert_eq!(history.entries()[1].title, "first");
    }

    #[test]
    fn cap_drops_oldest() {
        let mut history = DownloadHistory::new();
        for i in 0..30 {
            history.record(entry(&format!("video-{i}")));
        }

        assert_eq!(history.len(), 20);
        assert_eq!(history.entries()[0].title, "video-29");
        assert_eq!(history.entries()[19].title, "video-10");
    }

    #[test]
    fn clear_empties_history() {
        let mut history = DownloadHistory::new();
        history.record(entry("one"));
        assert!(!history.is_empty());

        history.clear();
        assert!(history.is_empty());
        assert_eq!(history.len(), 0);
    }

    #[test]
    fn roundtrips_through_serde() {
        let mut history = DownloadHistory::new();
        history.record(entry("kept"));

        let json = serde_json::to_string(&history).unwrap();
        let back: DownloadHistory = serde_json::from_str(&json).unwrap();
        assert_eq!(back.entries(), history.entries());
    }
}
