//! Command implementation modules

pub mod analyze;
pub mod config;
pub mod scan;
pub mod validate;

pub use analyze::{run_analyze, AnalyzeParams};
pub use config::run_config_command;
pub use scan::{run_scan, ScanParams};
pub use validate::{run_validate, ValidateParams};

use std::future::Future;
use tracing::warn;

/// Printed when Ctrl-C cuts a scan or validation short
pub(crate) const INTERRUPTED_MESSAGE: &str = "\n\n[!] Scan interrupted by user";

/// Exit status after a user interrupt
pub(crate) const INTERRUPTED_EXIT_CODE: i32 = 1;

/// Timestamp shown in report headers
pub(crate) fn report_date() -> String {
    chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Run `fut` to completion unless the user presses Ctrl-C first
pub(crate) async fn until_interrupted<F: Future>(fut: F) -> Option<F::Output> {
    tokio::pin!(fut);
    tokio::select! {
        out = &mut fut => Some(out),
        signal = tokio::signal::ctrl_c() => match signal {
            Ok(()) => None,
            Err(e) => {
                warn!("Cannot listen for Ctrl-C: {}", e);
                Some(fut.await)
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_completed_future_is_returned() {
        assert_eq!(until_interrupted(async { 7 }).await, Some(7));
    }

    #[test]
    fn test_report_date_format() {
        let date = report_date();
        assert!(chrono::NaiveDateTime::parse_from_str(&date, "%Y-%m-%d %H:%M:%S").is_ok());
    }
}
