//! WireGuard log analysis
//!
//! Lines are classified one at a time ([`classifier`]), folded into counters
//! and bounded recent-event logs ([`aggregator`]) and rendered for operator
//! review ([`report`]). [`reader`] turns a single file into that line stream.

pub mod aggregator;
pub mod classifier;
pub mod reader;
pub mod recent;
pub mod report;

pub use aggregator::{
    aggregate, ErrorRecord, EventRecord, LogAggregator, LogSummary, Stats, DEFAULT_RECENT_LIMIT,
};
pub use classifier::{classify, Category, Classification};
pub use reader::{aggregate_reader, analyze_file, Analysis, LogLines};
pub use recent::RecentBuffer;
pub use report::{render_json, render_text, DISPLAY_LIMIT};
