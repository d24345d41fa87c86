//! Accumulates classified log lines into counters and recent-event logs

use super::classifier::{classify, Category};
use super::recent::RecentBuffer;
use super::report::DISPLAY_LIMIT;
use serde::Serialize;
use std::collections::BTreeSet;
use tracing::trace;

/// Number of events and errors retained when no limit is configured
pub const DEFAULT_RECENT_LIMIT: usize = 10;

/// One connection-related event, in input order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventRecord {
    pub timestamp: Option<String>,
    pub category: Category,
}

/// One error line, in input order. `line` is the trimmed line text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorRecord {
    pub timestamp: Option<String>,
    pub line: String,
}

/// Counters for one aggregation run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Stats {
    pub total_lines: u64,
    pub handshakes: u64,
    pub connections: u64,
    pub disconnections: u64,
    pub errors: u64,
    /// Distinct address literals; ordered only so output is stable
    pub unique_ips: BTreeSet<String>,
}

impl Stats {
    fn count(&mut self, category: Category) {
        match category {
            Category::Handshake => self.handshakes += 1,
            Category::Connection => self.connections += 1,
            Category::Disconnection => self.disconnections += 1,
        }
    }
}

/// Final state of an aggregation run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogSummary {
    pub stats: Stats,
    pub events: Vec<EventRecord>,
    pub errors: Vec<ErrorRecord>,
}

/// Streaming accumulator over log lines
#[derive(Debug, Clone)]
pub struct LogAggregator {
    stats: Stats,
    events: RecentBuffer<EventRecord>,
    errors: RecentBuffer<ErrorRecord>,
}

impl LogAggregator {
    /// Keep the newest `recent_limit` events and errors, never fewer than
    /// the report shows. Counters are unbounded.
    pub fn new(recent_limit: usize) -> Self {
        let capacity = recent_limit.max(DISPLAY_LIMIT);
        Self {
            stats: Stats::default(),
            events: RecentBuffer::new(capacity),
            errors: RecentBuffer::new(capacity),
        }
    }

    pub fn ingest(&mut self, line: &str) {
        self.stats.total_lines += 1;
        let trimmed = line.trim();
        let classification = classify(line);

        for &category in &classification.categories {
            self.stats.count(category);
            self.events.push(EventRecord {
                timestamp: classification.timestamp.clone(),
                category,
            });
        }

        if classification.is_error {
            self.stats.errors += 1;
            self.errors.push(ErrorRecord {
                timestamp: classification.timestamp.clone(),
                line: trimmed.to_string(),
            });
        }

        if !classification.categories.is_empty() || classification.is_error {
            trace!(
                line = self.stats.total_lines,
                categories = ?classification.categories,
                is_error = classification.is_error,
                "Classified log line"
            );
        }

        self.stats.unique_ips.extend(classification.ips);
    }

    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    pub fn finish(self) -> LogSummary {
        LogSummary {
            stats: self.stats,
            events: self.events.into_vec(),
            errors: self.errors.into_vec(),
        }
    }
}

impl Default for LogAggregator {
    fn default() -> Self {
        Self::new(DEFAULT_RECENT_LIMIT)
    }
}

/// Aggregate an in-memory line sequence
pub fn aggregate<I, S>(lines: I, recent_limit: usize) -> LogSummary
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut aggregator = LogAggregator::new(recent_limit);
    for line in lines {
        aggregator.ingest(line.as_ref());
    }
    aggregator.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_lines_counts_every_line() {
        let lines = ["", "   ", "handshake", "nothing here", "\t"];
        let summary = aggregate(lines, DEFAULT_RECENT_LIMIT);
        assert_eq!(summary.stats.total_lines, 5);
    }

    #[test]
    fn test_handshake_and_peer_produce_two_events() {
        let summary = aggregate(
            ["2024-03-01 08:00:00 Handshake completed with peer ABC="],
            DEFAULT_RECENT_LIMIT,
        );
        assert_eq!(
            summary.events,
            vec![
                EventRecord {
                    timestamp: Some("2024-03-01 08:00:00".to_string()),
                    category: Category::Handshake,
                },
                EventRecord {
                    timestamp: Some("2024-03-01 08:00:00".to_string()),
                    category: Category::Connection,
                },
            ]
        );
        assert_eq!(summary.stats.handshakes, 1);
        assert_eq!(summary.stats.connections, 1);
    }

    #[test]
    fn test_events_without_timestamp_share_absence() {
        let summary = aggregate(["HANDSHAKE with PEER"], DEFAULT_RECENT_LIMIT);
        assert_eq!(summary.events.len(), 2);
        assert!(summary.events.iter().all(|e| e.timestamp.is_none()));
    }

    #[test]
    fn test_error_line_lands_in_both_logs() {
        let summary = aggregate(
            ["  ERROR: handshake failed for 192.168.1.1  "],
            DEFAULT_RECENT_LIMIT,
        );
        assert_eq!(summary.stats.errors, 1);
        assert_eq!(summary.stats.handshakes, 1);
        assert_eq!(summary.events.len(), 1);
        assert_eq!(
            summary.errors,
            vec![ErrorRecord {
                timestamp: None,
                line: "ERROR: handshake failed for 192.168.1.1".to_string(),
            }]
        );
        assert!(summary.stats.unique_ips.contains("192.168.1.1"));
    }

    #[test]
    fn test_unique_ips_collapse_duplicates() {
        let summary = aggregate(
            [
                "peer 10.0.0.5 connected",
                "peer 10.0.0.5 disconnected from 10.0.0.1",
                "10.0.0.1 10.0.0.1",
            ],
            DEFAULT_RECENT_LIMIT,
        );
        assert_eq!(summary.stats.unique_ips.len(), 2);
    }

    #[test]
    fn test_recent_logs_keep_newest_in_order() {
        let lines: Vec<String> = (0..15)
            .map(|i| format!("2024-01-01 00:00:{:02} peer connected", i))
            .collect();
        let summary = aggregate(&lines, 10);

        assert_eq!(summary.stats.connections, 15);
        assert_eq!(summary.events.len(), 10);
        let stamps: Vec<_> = summary
            .events
            .iter()
            .map(|e| e.timestamp.clone().unwrap_or_default())
            .collect();
        let expected: Vec<_> = (5..15)
            .map(|i| format!("2024-01-01 00:00:{:02}", i))
            .collect();
        assert_eq!(stamps, expected);
    }

    #[test]
    fn test_small_limit_still_keeps_a_full_report_view() {
        let lines: Vec<String> = (0..15)
            .map(|i| format!("2024-01-01 00:00:{:02} peer connected", i))
            .collect();
        let summary = aggregate(&lines, 3);

        assert_eq!(summary.stats.connections, 15);
        assert_eq!(summary.events.len(), DISPLAY_LIMIT);
        assert_eq!(
            summary.events[0].timestamp.as_deref(),
            Some("2024-01-01 00:00:05")
        );

        let text = crate::logs::render_text("wg.log", &summary);
        let shown = text.lines().filter(|l| l.ends_with(" - Connection")).count();
        assert_eq!(shown, DISPLAY_LIMIT);
    }

    #[test]
    fn test_counters_match_categories() {
        let summary = aggregate(
            [
                "peer A disconnected",
                "handshake initiated",
                "client disconnect requested",
                "send failure",
            ],
            DEFAULT_RECENT_LIMIT,
        );
        // "disconnected" also contains "connected"
        assert_eq!(summary.stats.connections, 1);
        assert_eq!(summary.stats.disconnections, 2);
        assert_eq!(summary.stats.handshakes, 1);
        assert_eq!(summary.stats.errors, 1);
        assert_eq!(summary.events.len(), 4);
    }

    #[test]
    fn test_incremental_ingest_matches_batch() {
        let lines = ["peer up", "error 1", "handshake"];
        let mut aggregator = LogAggregator::default();
        for line in lines {
            aggregator.ingest(line);
        }
        assert_eq!(aggregator.stats().total_lines, 3);
        assert_eq!(aggregator.finish(), aggregate(lines, DEFAULT_RECENT_LIMIT));
    }
}
