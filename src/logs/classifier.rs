//! Per-line classification of tunnel log text
//!
//! A line is matched against a fixed, ordered rule table. Rules are
//! independent: one line may fall into several categories at once, and the
//! error flag is evaluated separately from the categories.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::fmt;

static TIMESTAMP_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d{4}-\d{2}-\d{2} \d{2}:\d{2}:\d{2}").expect("valid timestamp regex"));

static IPV4_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(?:\d{1,3}\.){3}\d{1,3}\b").expect("valid address regex"));

/// Connection event category a log line can belong to
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Category {
    Handshake,
    Connection,
    Disconnection,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Handshake => "Handshake",
            Category::Connection => "Connection",
            Category::Disconnection => "Disconnection",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A category and the lowercase needles that select it
struct Rule {
    needles: &'static [&'static str],
    category: Category,
}

/// Evaluated in this order; the order is also the order events are recorded.
const CATEGORY_RULES: &[Rule] = &[
    Rule {
        needles: &["handshake"],
        category: Category::Handshake,
    },
    Rule {
        needles: &["connected", "peer"],
        category: Category::Connection,
    },
    Rule {
        needles: &["disconnect"],
        category: Category::Disconnection,
    },
];

const ERROR_NEEDLES: &[&str] = &["error", "fail"];

/// Everything extracted from a single log line
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Classification {
    /// First `YYYY-MM-DD HH:MM:SS` substring, kept verbatim
    pub timestamp: Option<String>,
    /// Matched categories in rule order
    pub categories: Vec<Category>,
    pub is_error: bool,
    /// Dotted-quad literals in order of appearance, duplicates kept
    pub ips: Vec<String>,
}

/// Classify one line. Never fails: missing patterns produce empty results.
pub fn classify(line: &str) -> Classification {
    let lowered = line.to_lowercase();

    let categories = CATEGORY_RULES
        .iter()
        .filter(|rule| rule.needles.iter().any(|n| lowered.contains(n)))
        .map(|rule| rule.category)
        .collect();

    Classification {
        timestamp: extract_timestamp(line),
        categories,
        is_error: ERROR_NEEDLES.iter().any(|n| lowered.contains(n)),
        ips: extract_ips(line),
    }
}

pub fn extract_timestamp(line: &str) -> Option<String> {
    TIMESTAMP_PATTERN
        .find(line)
        .map(|m| m.as_str().to_string())
}

pub fn extract_ips(line: &str) -> Vec<String> {
    IPV4_PATTERN
        .find_iter(line)
        .map(|m| m.as_str().to_string())
        .collect()
}
