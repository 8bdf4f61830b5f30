//! Bounded ring of recent summaries, kept in memory for the session only.

use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::{url::UrlKind, SummaryStyle};

#[derive(Debug, Clone, Serialize)]
pub struct HistoryEntry {
    pub url: String,
    pub url_type: UrlKind,
    pub style: SummaryStyle,
    pub summary: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug)]
pub struct History {
    entries: VecDeque<HistoryEntry>,
    capacity: usize,
}

impl History {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Appends an entry, evicting the oldest beyond capacity.
    pub fn push(&mut self, entry: HistoryEntry) {
        if self.capacity == 0 {
            return;
        }
        self.entries.push_back(entry);
        while self.entries.len() > self.capacity {
            self.entries.pop_front();
        }
    }

    pub fn newest_first(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter().rev()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(url: &str) -> HistoryEntry {
        HistoryEntry {
            url: url.to_string(),
            url_type: UrlKind::Website,
            style: SummaryStyle::Balanced,
            summary: "a summary".to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn keeps_newest_entries_up_to_capacity() {
        let mut history = History::new(2);
        history.push(entry("https://one.example"));
        history.push(entry("https://two.example"));
        history.push(entry("https://three.example"));

        assert_eq!(history.len(), 2);
        let urls: Vec<_> = history.newest_first().map(|e| e.url.as_str()).collect();
        assert_eq!(urls, ["https://three.example", "https://two.example"]);
    }

    #[test]
    fn zero_capacity_records_nothing() {
        let mut history = History::new(0);
        history.push(entry("https://one.example"));
        assert!(history.is_empty());
    }
}
