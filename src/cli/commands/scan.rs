use super::{report_date, until_interrupted, INTERRUPTED_EXIT_CODE, INTERRUPTED_MESSAGE};
use crate::audit::ExposureAuditor;
use crate::config::VpnWatchConfig;
use crate::probe::TcpProber;
use anyhow::Result;
use std::sync::Arc;
use std::time::Duration;

pub struct ScanParams {
    pub target: Option<String>,
    pub timeout: Option<Duration>,
    pub concurrency: Option<usize>,
    pub require_open: bool,
    pub json: bool,
}

impl ScanParams {
    /// Command-line flags win over file and environment settings
    fn apply(&self, config: &mut VpnWatchConfig) {
        if let Some(target) = &self.target {
            config.scan.target = Some(target.clone());
        }
        if let Some(timeout) = self.timeout {
            config.scan.timeout = timeout;
        }
        if let Some(concurrency) = self.concurrency {
            config.scan.concurrency = concurrency;
        }
        if self.require_open {
            config.scan.require_open = true;
        }
    }
}

/// `vpnwatch scan`: exit 0 when the scan passes, 1 otherwise
pub async fn run_scan(params: ScanParams, mut config: VpnWatchConfig) -> Result<i32> {
    params.apply(&mut config);
    config.validate()?;
    let target = config.require_target()?.to_string();

    let auditor = ExposureAuditor::from_config(Arc::new(TcpProber), &config.scan);
    let scan_date = report_date();

    let audit = auditor.audit(&target, &config.scan.closed_ports, &config.scan.open_ports);
    let Some(report) = until_interrupted(audit).await else {
        println!("{INTERRUPTED_MESSAGE}");
        return Ok(INTERRUPTED_EXIT_CODE);
    };

    if params.json {
        println!("{}", report.render_json(&scan_date)?);
    } else {
        print!("{}", report.render_text(&scan_date));
    }

    Ok(if report.passed() { 0 } else { 1 })
}
