use super::{report_date, until_interrupted, INTERRUPTED_EXIT_CODE, INTERRUPTED_MESSAGE};
use crate::audit::ConnectivityValidator;
use crate::config::VpnWatchConfig;
use crate::probe::TcpProber;
use crate::subprocess::SubprocessManager;
use crate::tunnel::TunnelInspector;
use anyhow::Result;
use std::sync::Arc;
use std::time::Duration;

pub struct ValidateParams {
    pub interface: Option<String>,
    pub timeout: Option<Duration>,
}

impl ValidateParams {
    fn apply(&self, config: &mut VpnWatchConfig) {
        if let Some(interface) = &self.interface {
            config.tunnel.interface = interface.clone();
        }
        if let Some(timeout) = self.timeout {
            config.tunnel.probe_timeout = timeout;
        }
    }
}

/// `vpnwatch validate`: exit 0 when every check passes, 1 otherwise
pub async fn run_validate(params: ValidateParams, mut config: VpnWatchConfig) -> Result<i32> {
    params.apply(&mut config);
    config.validate()?;

    let tunnel = &config.tunnel;
    if tunnel.authorized.is_empty() && tunnel.unauthorized.is_empty() {
        tracing::warn!("No services configured under [tunnel]; only local checks will run");
    }

    let inspector = TunnelInspector::new(SubprocessManager::production().runner(), tunnel.tool_timeout);
    let validator = ConnectivityValidator::new(
        inspector,
        Arc::new(TcpProber),
        tunnel.probe_timeout,
        tunnel.concurrency,
    );
    let test_date = report_date();

    let Some(report) = until_interrupted(validator.validate(tunnel)).await else {
        println!("{INTERRUPTED_MESSAGE}");
        return Ok(INTERRUPTED_EXIT_CODE);
    };

    print!("{}", report.render_text(&test_date));
    Ok(if report.all_passed() { 0 } else { 1 })
}
