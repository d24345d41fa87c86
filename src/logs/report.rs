//! Rendering of a finished log summary
//!
//! Output depends only on the summary and the caller's label, so rendering
//! the same summary twice produces identical text.

use super::aggregator::{ErrorRecord, EventRecord, LogSummary};
use crate::error::{ErrorExt, Result};
use serde::Serialize;

/// How many events and errors a report shows
pub const DISPLAY_LIMIT: usize = 10;

pub(crate) const RULE_HEAVY: &str =
    "============================================================";
pub(crate) const RULE_LIGHT: &str =
    "------------------------------------------------------------";

const NO_TIMESTAMP: &str = "None";

/// The newest `DISPLAY_LIMIT` items, oldest first
fn tail<T>(items: &[T]) -> &[T] {
    &items[items.len().saturating_sub(DISPLAY_LIMIT)..]
}

fn stamp(timestamp: &Option<String>) -> &str {
    timestamp.as_deref().unwrap_or(NO_TIMESTAMP)
}

/// Append `line` and a newline
pub(crate) fn push_line(out: &mut String, line: impl AsRef<str>) {
    out.push_str(line.as_ref());
    out.push('\n');
}

/// Render the operator-facing text report
pub fn render_text(label: &str, summary: &LogSummary) -> String {
    let stats = &summary.stats;
    let mut out = String::new();

    push_line(&mut out, RULE_HEAVY);
    push_line(&mut out, "VPN Log Analysis");
    push_line(&mut out, format!("Log File: {label}"));
    push_line(&mut out, RULE_HEAVY);

    push_line(&mut out, "\n[*] Log Statistics");
    push_line(&mut out, RULE_LIGHT);
    push_line(&mut out, format!("Total log lines: {}", stats.total_lines));
    push_line(&mut out, format!("Handshakes: {}", stats.handshakes));
    push_line(&mut out, format!("Connections: {}", stats.connections));
    push_line(&mut out, format!("Disconnections: {}", stats.disconnections));
    push_line(&mut out, format!("Errors: {}", stats.errors));
    push_line(&mut out, format!("Unique IPs seen: {}", stats.unique_ips.len()));

    if !summary.events.is_empty() {
        push_line(&mut out, format!("\n[*] Recent Connection Events (last {DISPLAY_LIMIT})"));
        push_line(&mut out, RULE_LIGHT);
        for event in tail(&summary.events) {
            push_line(&mut out, format!("{} - {}", stamp(&event.timestamp), event.category));
        }
    }

    if !summary.errors.is_empty() {
        push_line(&mut out, "\n[*] Error Events");
        push_line(&mut out, RULE_LIGHT);
        for error in tail(&summary.errors) {
            push_line(&mut out, stamp(&error.timestamp));
            push_line(&mut out, format!("  {}", error.line));
        }
    }

    push_line(&mut out, "\n[*] Analysis complete");
    out
}

#[derive(Serialize)]
struct JsonReport<'a> {
    log_file: &'a str,
    total_lines: u64,
    handshakes: u64,
    connections: u64,
    disconnections: u64,
    errors: u64,
    unique_ips: Vec<&'a str>,
    recent_events: &'a [EventRecord],
    recent_errors: &'a [ErrorRecord],
    complete: bool,
}

/// Render the same content as a pretty-printed JSON document
pub fn render_json(label: &str, summary: &LogSummary, complete: bool) -> Result<String> {
    let stats = &summary.stats;
    let report = JsonReport {
        log_file: label,
        total_lines: stats.total_lines,
        handshakes: stats.handshakes,
        connections: stats.connections,
        disconnections: stats.disconnections,
        errors: stats.errors,
        unique_ips: stats.unique_ips.iter().map(String::as_str).collect(),
        recent_events: tail(&summary.events),
        recent_errors: tail(&summary.errors),
        complete,
    };
    serde_json::to_string_pretty(&report).to_vpnwatch("Failed to serialize log report")
}
