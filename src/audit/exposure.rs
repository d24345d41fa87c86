use super::probe_all;
use crate::config::{PortEntry, ScanConfig};
use crate::error::{ErrorExt, Result};
use crate::logs::report::{push_line, RULE_HEAVY, RULE_LIGHT};
use crate::probe::{ProbeOutcome, Prober};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// One scanned port
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PortCheck {
    pub port: u16,
    pub label: String,
    pub outcome: ProbeOutcome,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExposureReport {
    pub target: String,
    /// Ports that must be closed, in declared order
    pub closed_results: Vec<PortCheck>,
    /// Ports that should be open, in declared order
    pub open_results: Vec<PortCheck>,
    pub exposed: Vec<PortEntry>,
    pub missing: Vec<PortEntry>,
    pub require_open: bool,
}

impl ExposureReport {
    /// Nothing exposed, and with `require_open` nothing missing either
    pub fn passed(&self) -> bool {
        self.exposed.is_empty() && !(self.require_open && !self.missing.is_empty())
    }

    pub fn closed_count(&self) -> usize {
        self.closed_results.len() - self.exposed.len()
    }

    pub fn open_count(&self) -> usize {
        self.open_results.len() - self.missing.len()
    }

    pub fn render_text(&self, scan_date: &str) -> String {
        let mut out = String::new();

        push_line(&mut out, RULE_HEAVY);
        push_line(&mut out, "WAN Exposure Security Scan");
        push_line(&mut out, format!("Target: {}", self.target));
        push_line(&mut out, format!("Scan Date: {scan_date}"));
        push_line(&mut out, RULE_HEAVY);

        push_line(&mut out, "\n[*] Scanning management ports (should be CLOSED)...");
        push_line(&mut out, RULE_LIGHT);
        for check in &self.closed_results {
            let verdict = if check.outcome.is_reachable() {
                "[EXPOSED] - SECURITY ISSUE!"
            } else {
                "[CLOSED] - Good"
            };
            write_port_line(&mut out, check, verdict);
        }

        push_line(&mut out, "\n[*] Scanning expected services (should be OPEN)...");
        push_line(&mut out, RULE_LIGHT);
        for check in &self.open_results {
            let verdict = if check.outcome.is_reachable() {
                "[OPEN] - Expected"
            } else {
                "[CLOSED] - May indicate VPN issues"
            };
            write_port_line(&mut out, check, verdict);
        }

        push_line(&mut out, format!("\n{RULE_HEAVY}"));
        push_line(&mut out, "SCAN SUMMARY");
        push_line(&mut out, RULE_HEAVY);
        push_line(
            &mut out,
            format!(
                "Management ports closed: {}/{}",
                self.closed_count(),
                self.closed_results.len()
            ),
        );
        push_line(
            &mut out,
            format!(
                "Expected services open: {}/{}",
                self.open_count(),
                self.open_results.len()
            ),
        );

        if !self.exposed.is_empty() {
            push_line(
                &mut out,
                format!("\n[!] WARNING: {} management services exposed!", self.exposed.len()),
            );
            push_line(&mut out, "Exposed services:");
            for entry in &self.exposed {
                push_line(&mut out, format!("  - Port {} ({})", entry.port, entry.label));
            }
            push_line(&mut out, "\n[-] SECURITY SCAN FAILED - Close exposed ports immediately");
        } else if self.require_open && !self.missing.is_empty() {
            push_line(
                &mut out,
                format!("\n[!] WARNING: {} expected services not reachable!", self.missing.len()),
            );
            push_line(&mut out, "Missing services:");
            for entry in &self.missing {
                push_line(&mut out, format!("  - Port {} ({})", entry.port, entry.label));
            }
            push_line(&mut out, "\n[-] SECURITY SCAN FAILED - Expected services not reachable");
        } else {
            push_line(&mut out, "\n[+] SECURITY SCAN PASSED - No management services exposed");
        }

        out
    }

    pub fn render_json(&self, scan_date: &str) -> Result<String> {
        #[derive(Serialize)]
        struct JsonReport<'a> {
            scan_date: &'a str,
            passed: bool,
            #[serde(flatten)]
            report: &'a ExposureReport,
        }

        serde_json::to_string_pretty(&JsonReport {
            scan_date,
            passed: self.passed(),
            report: self,
        })
        .to_vpnwatch("Failed to serialize exposure report")
    }
}

fn write_port_line(out: &mut String, check: &PortCheck, verdict: &str) {
    out.push_str(&format!("Scanning port {:>5} ({:<15})... ", check.port, check.label));
    if let ProbeOutcome::ProbeError(reason) = &check.outcome {
        push_line(out, format!("[!] Error scanning port {}: {}", check.port, reason));
    }
    push_line(out, verdict);
}

/// Scans a target for management ports that should not be reachable
pub struct ExposureAuditor {
    prober: Arc<dyn Prober>,
    timeout: Duration,
    concurrency: usize,
    require_open: bool,
}

impl ExposureAuditor {
    pub fn new(prober: Arc<dyn Prober>, timeout: Duration, concurrency: usize) -> Self {
        Self {
            prober,
            timeout,
            concurrency,
            require_open: false,
        }
    }

    pub fn from_config(prober: Arc<dyn Prober>, config: &ScanConfig) -> Self {
        Self::new(prober, config.timeout, config.concurrency).require_open(config.require_open)
    }

    pub fn require_open(mut self, require_open: bool) -> Self {
        self.require_open = require_open;
        self
    }

    pub async fn audit(
        &self,
        target: &str,
        closed: &[PortEntry],
        open: &[PortEntry],
    ) -> ExposureReport {
        info!(
            "Scanning {} ({} closed-expected, {} open-expected ports)",
            target,
            closed.len(),
            open.len()
        );

        // One fan-out for both tables keeps the concurrency bound global
        let endpoints: Vec<(&str, u16)> = closed
            .iter()
            .chain(open)
            .map(|entry| (target, entry.port))
            .collect();
        let mut outcomes =
            probe_all(self.prober.as_ref(), &endpoints, self.timeout, self.concurrency).await;
        let open_outcomes = outcomes.split_off(closed.len());

        let closed_results = zip_checks(closed, outcomes);
        let open_results = zip_checks(open, open_outcomes);

        let exposed: Vec<PortEntry> = closed_results
            .iter()
            .filter(|check| check.outcome.is_reachable())
            .map(|check| PortEntry::new(check.port, check.label.clone()))
            .collect();
        let missing: Vec<PortEntry> = open_results
            .iter()
            .filter(|check| !check.outcome.is_reachable())
            .map(|check| PortEntry::new(check.port, check.label.clone()))
            .collect();

        debug!(
            "Scan of {} finished: {} exposed, {} missing",
            target,
            exposed.len(),
            missing.len()
        );

        ExposureReport {
            target: target.to_string(),
            closed_results,
            open_results,
            exposed,
            missing,
            require_open: self.require_open,
        }
    }
}

fn zip_checks(entries: &[PortEntry], outcomes: Vec<ProbeOutcome>) -> Vec<PortCheck> {
    entries
        .iter()
        .zip(outcomes)
        .map(|(entry, outcome)| PortCheck {
            port: entry.port,
            label: entry.label.clone(),
            outcome,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::probe::MockProber;

    const TARGET: &str = "203.0.113.9";

    fn closed_ports() -> Vec<PortEntry> {
        vec![PortEntry::new(22, "SSH"), PortEntry::new(80, "HTTP")]
    }

    fn open_ports() -> Vec<PortEntry> {
        vec![PortEntry::new(51820, "WireGuard VPN")]
    }

    fn auditor(prober: MockProber) -> ExposureAuditor {
        ExposureAuditor::new(Arc::new(prober), Duration::from_secs(1), 4)
    }

    #[tokio::test]
    async fn test_reachable_management_ports_fail_the_scan() {
        let prober = MockProber::new()
            .with_outcome(TARGET, 22, ProbeOutcome::Reachable)
            .with_outcome(TARGET, 80, ProbeOutcome::Reachable)
            .with_outcome(TARGET, 51820, ProbeOutcome::Unreachable);

        let report = auditor(prober)
            .audit(TARGET, &closed_ports(), &open_ports())
            .await;

        let exposed: Vec<u16> = report.exposed.iter().map(|e| e.port).collect();
        let missing: Vec<u16> = report.missing.iter().map(|e| e.port).collect();
        assert_eq!(exposed, vec![22, 80]);
        assert_eq!(missing, vec![51820]);
        assert!(!report.passed());
    }

    #[tokio::test]
    async fn test_missing_open_port_alone_passes() {
        let report = auditor(MockProber::new())
            .audit(TARGET, &closed_ports(), &open_ports())
            .await;

        assert!(report.exposed.is_empty());
        assert_eq!(report.missing, open_ports());
        assert!(report.passed());
    }

    #[tokio::test]
    async fn test_require_open_fails_on_missing() {
        let report = auditor(MockProber::new())
            .require_open(true)
            .audit(TARGET, &closed_ports(), &open_ports())
            .await;

        assert!(!report.passed());
        let text = report.render_text("2024-01-15 10:30:00");
        assert!(text.contains("  - Port 51820 (WireGuard VPN)"));
        assert!(text.contains("[-] SECURITY SCAN FAILED - Expected services not reachable"));
    }

    #[tokio::test]
    async fn test_results_keep_declared_order_when_probes_finish_out_of_order() {
        let prober = MockProber::new()
            .with_outcome(TARGET, 22, ProbeOutcome::Reachable)
            .with_delay(TARGET, 22, Duration::from_millis(60))
            .with_outcome(TARGET, 80, ProbeOutcome::TimedOut);

        let report = auditor(prober)
            .audit(TARGET, &closed_ports(), &open_ports())
            .await;

        let ports: Vec<u16> = report.closed_results.iter().map(|c| c.port).collect();
        assert_eq!(ports, vec![22, 80]);
        assert_eq!(report.closed_results[0].outcome, ProbeOutcome::Reachable);
        assert_eq!(report.closed_results[1].outcome, ProbeOutcome::TimedOut);
    }

    #[tokio::test]
    async fn test_render_text_layout() {
        let prober = MockProber::new()
            .with_outcome("vpn.example.net", 22, ProbeOutcome::Reachable)
            .with_outcome("vpn.example.net", 51820, ProbeOutcome::Reachable);

        let report = auditor(prober)
            .audit("vpn.example.net", &closed_ports(), &open_ports())
            .await;
        let text = report.render_text("2024-01-15 10:30:00");

        assert!(text.starts_with(&format!(
            "{RULE_HEAVY}\nWAN Exposure Security Scan\nTarget: vpn.example.net\nScan Date: 2024-01-15 10:30:00\n{RULE_HEAVY}\n"
        )));
        assert!(text.contains("Scanning port    22 (SSH            )... [EXPOSED] - SECURITY ISSUE!\n"));
        assert!(text.contains("Scanning port    80 (HTTP           )... [CLOSED] - Good\n"));
        assert!(text.contains("Scanning port 51820 (WireGuard VPN  )... [OPEN] - Expected\n"));
        assert!(text.contains("Management ports closed: 1/2\n"));
        assert!(text.contains("Expected services open: 1/1\n"));
        assert!(text.contains("[!] WARNING: 1 management services exposed!\nExposed services:\n  - Port 22 (SSH)\n"));
        assert!(text.ends_with("[-] SECURITY SCAN FAILED - Close exposed ports immediately\n"));
    }

    #[tokio::test]
    async fn test_probe_errors_are_shown_and_count_as_closed() {
        let prober =
            MockProber::new().with_outcome(TARGET, 80, ProbeOutcome::ProbeError("no route".into()));

        let report = auditor(prober)
            .audit(TARGET, &closed_ports(), &[])
            .await;
        let text = report.render_text("now");

        assert!(text.contains(
            "Scanning port    80 (HTTP           )... [!] Error scanning port 80: no route\n[CLOSED] - Good\n"
        ));
        assert!(text.ends_with("[+] SECURITY SCAN PASSED - No management services exposed\n"));
    }

    #[tokio::test]
    async fn test_render_json_carries_verdict() {
        let report = auditor(MockProber::new())
            .audit(TARGET, &closed_ports(), &open_ports())
            .await;
        let json: serde_json::Value =
            serde_json::from_str(&report.render_json("2024-01-15 10:30:00").unwrap()).unwrap();

        assert_eq!(json["passed"], true);
        assert_eq!(json["target"], "203.0.113.9");
        assert_eq!(json["closed_results"][0]["outcome"]["state"], "unreachable");
        assert_eq!(json["missing"][0]["port"], 51820);
    }
}
