//! Externally supplied news-sentiment features.
//!
//! Sentiment is produced by an external analysis collaborator and merged
//! into the feature table read-only. The table is an ordered date-keyed
//! lookup so forward-filling is an explicit at-or-before query instead of
//! in-place mutation.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Per-date sentiment summary from the external news analyzer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SentimentSnapshot {
    /// Aggregate sentiment score in [-1, 1]
    pub score: f64,
    /// Magnitude of the sentiment (strength, unsigned)
    pub magnitude: f64,
    /// Fraction of articles classified positive
    pub positive_ratio: f64,
    /// Fraction of articles classified negative
    pub negative_ratio: f64,
    /// Fraction of articles classified neutral
    pub neutral_ratio: f64,
    /// Number of articles behind this snapshot
    pub article_count: u32,
    /// Whether any news was published for this date
    pub has_news: bool,
}

impl Default for SentimentSnapshot {
    /// Zero-valued defaults used for bars preceding any sentiment data.
    fn default() -> Self {
        Self {
            score: 0.0,
            magnitude: 0.0,
            positive_ratio: 0.0,
            negative_ratio: 0.0,
            neutral_ratio: 0.0,
            article_count: 0,
            has_news: false,
        }
    }
}

/// Ordered date-keyed sentiment lookup.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SentimentTable {
    entries: BTreeMap<NaiveDate, SentimentSnapshot>,
}

impl SentimentTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a snapshot for a date, replacing any existing entry.
    pub fn insert(&mut self, date: NaiveDate, snapshot: SentimentSnapshot) {
        self.entries.insert(date, snapshot);
    }

    /// Number of dated entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Exact-date lookup.
    pub fn get(&self, date: NaiveDate) -> Option<&SentimentSnapshot> {
        self.entries.get(&date)
    }

    /// Forward-fill lookup: the snapshot for `date`, or the most recent
    /// entry strictly before it. Never looks forward.
    pub fn at_or_before(&self, date: NaiveDate) -> Option<&SentimentSnapshot> {
        self.entries.range(..=date).next_back().map(|(_, s)| s)
    }

    /// Forward-fill lookup with zero defaults for dates preceding any data.
    pub fn forward_filled(&self, date: NaiveDate) -> SentimentSnapshot {
        self.at_or_before(date).copied().unwrap_or_default()
    }
}

impl FromIterator<(NaiveDate, SentimentSnapshot)> for SentimentTable {
    fn from_iter<T: IntoIterator<Item = (NaiveDate, SentimentSnapshot)>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    fn snapshot(score: f64) -> SentimentSnapshot {
        SentimentSnapshot {
            score,
            magnitude: score.abs(),
            positive_ratio: 0.5,
            negative_ratio: 0.3,
            neutral_ratio: 0.2,
            article_count: 3,
            has_news: true,
        }
    }

    #[test]
    fn test_exact_lookup() {
        let mut table = SentimentTable::new();
        table.insert(date(5), snapshot(0.4));

        assert_eq!(table.get(date(5)).unwrap().score, 0.4);
        assert!(table.get(date(6)).is_none());
    }

    #[test]
    fn test_forward_fill_carries_prior_value() {
        let mut table = SentimentTable::new();
        table.insert(date(5), snapshot(0.4));
        table.insert(date(10), snapshot(-0.2));

        // Gap between entries uses the most recent prior snapshot
        assert_eq!(table.forward_filled(date(7)).score, 0.4);
        assert_eq!(table.forward_filled(date(10)).score, -0.2);
        assert_eq!(table.forward_filled(date(25)).score, -0.2);
    }

    #[test]
    fn test_no_backward_fill() {
        let mut table = SentimentTable::new();
        table.insert(date(10), snapshot(0.9));

        // Dates before any data get zero defaults, never a future value
        let early = table.forward_filled(date(3));
        assert_eq!(early.score, 0.0);
        assert!(!early.has_news);
        assert_eq!(early.article_count, 0);
    }

    #[test]
    fn test_empty_table_defaults() {
        let table = SentimentTable::new();
        let s = table.forward_filled(date(1));
        assert_eq!(s, SentimentSnapshot::default());
    }
}
