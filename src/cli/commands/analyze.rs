use crate::config::VpnWatchConfig;
use crate::logs::{analyze_file, render_json, render_text};
use anyhow::Result;
use std::path::PathBuf;
use tracing::warn;

pub struct AnalyzeParams {
    pub log_file: Option<PathBuf>,
    pub json: bool,
}

/// `vpnwatch analyze`
///
/// A file that cannot be opened is an error with no report. A read failure
/// part-way through still prints the partial report and exits 0.
pub async fn run_analyze(params: AnalyzeParams, config: &VpnWatchConfig) -> Result<i32> {
    let path = params
        .log_file
        .unwrap_or_else(|| config.logs.file.clone());
    let label = path.display().to_string();
    let recent_limit = config.logs.recent_limit;

    let analysis =
        tokio::task::spawn_blocking(move || analyze_file(&path, recent_limit)).await??;

    if params.json {
        println!(
            "{}",
            render_json(&label, &analysis.summary, analysis.is_complete())?
        );
    } else {
        print!("{}", render_text(&label, &analysis.summary));
    }

    if let Some(err) = &analysis.interrupted {
        warn!("Partial report for {}: {}", label, err);
        eprintln!(
            "Warning: report is incomplete. {}",
            err.user_message()
        );
    }

    Ok(0)
}
