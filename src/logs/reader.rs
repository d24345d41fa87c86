//! Reading a single log file as lines
//!
//! Open failures and mid-read failures are deliberately distinct: a file that
//! cannot be opened produces no summary at all, while a read that breaks part
//! way through still yields everything aggregated up to that point.

use super::aggregator::{LogAggregator, LogSummary};
use crate::error::{common, ErrorCode, Result, VpnWatchError};
use std::collections::VecDeque;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use tracing::{debug, info, warn};

/// Result of reading and aggregating one input
#[derive(Debug)]
pub struct Analysis {
    pub summary: LogSummary,
    /// Set when reading stopped early; `summary` covers the lines before it
    pub interrupted: Option<VpnWatchError>,
}

impl Analysis {
    pub fn is_complete(&self) -> bool {
        self.interrupted.is_none()
    }
}

/// Iterator over the lines of a reader.
///
/// Accepts `\n`, `\r\n` and bare `\r` terminators. Yields an error for
/// unreadable or non-UTF-8 input; callers stop at the first error.
pub struct LogLines<R> {
    reader: R,
    pending: VecDeque<String>,
    buf: Vec<u8>,
}

impl<R: BufRead> LogLines<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            pending: VecDeque::new(),
            buf: Vec::new(),
        }
    }

    fn fill(&mut self) -> io::Result<bool> {
        self.buf.clear();
        if self.reader.read_until(b'\n', &mut self.buf)? == 0 {
            return Ok(false);
        }
        if self.buf.last() == Some(&b'\n') {
            self.buf.pop();
        }

        let chunk = std::str::from_utf8(&self.buf)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

        // Anything left ending in or containing '\r' is a CR terminator.
        let mut pieces: Vec<&str> = chunk.split('\r').collect();
        if chunk.ends_with('\r') {
            pieces.pop();
        }
        self.pending.extend(pieces.into_iter().map(str::to_string));
        Ok(true)
    }
}

impl<R: BufRead> Iterator for LogLines<R> {
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(line) = self.pending.pop_front() {
                return Some(Ok(line));
            }
            match self.fill() {
                Ok(true) => continue,
                Ok(false) => return None,
                Err(e) => return Some(Err(e)),
            }
        }
    }
}

/// Aggregate every line from `reader`, stopping at the first read error
pub fn aggregate_reader<R: BufRead>(reader: R, recent_limit: usize) -> Analysis {
    let mut aggregator = LogAggregator::new(recent_limit);
    let mut interrupted = None;

    for line in LogLines::new(reader) {
        match line {
            Ok(line) => aggregator.ingest(&line),
            Err(e) => {
                let lines_read = aggregator.stats().total_lines;
                warn!("Log read stopped after {} lines: {}", lines_read, e);
                interrupted = Some(
                    VpnWatchError::input_with_code(
                        ErrorCode::INPUT_IO_ERROR,
                        "Error reading log file",
                        None,
                    )
                    .with_context(format!("stopped after {} lines", lines_read))
                    .with_source(e),
                );
                break;
            }
        }
    }

    Analysis {
        summary: aggregator.finish(),
        interrupted,
    }
}

/// Open `path` and aggregate its contents.
///
/// Returns `Err` only when the file cannot be opened.
pub fn analyze_file(path: &Path, recent_limit: usize) -> Result<Analysis> {
    debug!("Opening log file {}", path.display());
    let file = File::open(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => common::input_not_found(path).with_source(e),
        _ => VpnWatchError::from(e).with_path(path),
    })?;

    let mut analysis = aggregate_reader(BufReader::new(file), recent_limit);
    if let Some(err) = analysis.interrupted.take() {
        analysis.interrupted = Some(err.with_path(path));
    }

    info!(
        "Analyzed {} lines from {}",
        analysis.summary.stats.total_lines,
        path.display()
    );
    Ok(analysis)
}
